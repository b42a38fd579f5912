use super::IntView;

/// `x + offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntOffsetView {
    offset: i64,
}

impl IntOffsetView {
    pub fn new(offset: i64) -> Self {
        IntOffsetView { offset }
    }
}

impl IntView for IntOffsetView {
    fn map(&self, parent_value: i64) -> i64 {
        parent_value + self.offset
    }

    fn bounds(&self, parent_lower_bound: i64, parent_upper_bound: i64) -> (i64, i64) {
        (
            parent_lower_bound + self.offset,
            parent_upper_bound + self.offset,
        )
    }
}
