use super::IntView;
use crate::ripple_assert_simple;

/// Looks up a constant array: the value is `values[x - offset]`.
///
/// Indices outside the array are clamped onto its first or last entry, so the view always has a
/// value even while a move has put the index out of range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementConstView {
    values: Vec<i64>,
    offset: i64,
}

impl ElementConstView {
    /// Creates a view where the first element is at index 1.
    pub fn new(values: Vec<i64>) -> Self {
        ElementConstView::with_offset(values, 1)
    }

    pub fn with_offset(values: Vec<i64>, offset: i64) -> Self {
        ripple_assert_simple!(!values.is_empty(), "element view over an empty array");
        ElementConstView { values, offset }
    }

    fn clamped_position(&self, index: i64) -> usize {
        let last = self.values.len() as i64 - 1;
        (index - self.offset).clamp(0, last) as usize
    }
}

impl IntView for ElementConstView {
    fn map(&self, parent_value: i64) -> i64 {
        self.values[self.clamped_position(parent_value)]
    }

    fn bounds(&self, parent_lower_bound: i64, parent_upper_bound: i64) -> (i64, i64) {
        let start = self.clamped_position(parent_lower_bound);
        let end = self.clamped_position(parent_upper_bound);

        self.values[start..=end]
            .iter()
            .fold((i64::MAX, i64::MIN), |(lower, upper), &value| {
                (lower.min(value), upper.max(value))
            })
    }
}
