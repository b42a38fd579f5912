use super::IntView;

/// Models `y = scale * x + offset`.
///
/// A negative scale flips the parent's bounds. A scale of zero is allowed and turns the view into
/// the constant `offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScalarView {
    scale: i64,
    offset: i64,
}

impl ScalarView {
    pub fn new(scale: i64, offset: i64) -> Self {
        ScalarView { scale, offset }
    }
}

impl IntView for ScalarView {
    fn map(&self, parent_value: i64) -> i64 {
        self.scale * parent_value + self.offset
    }

    fn bounds(&self, parent_lower_bound: i64, parent_upper_bound: i64) -> (i64, i64) {
        let first = self.map(parent_lower_bound);
        let second = self.map(parent_upper_bound);
        (first.min(second), first.max(second))
    }
}
