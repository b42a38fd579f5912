use super::IntView;

/// `min(x, ceiling)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntMinView {
    ceiling: i64,
}

impl IntMinView {
    pub fn new(ceiling: i64) -> Self {
        IntMinView { ceiling }
    }
}

impl IntView for IntMinView {
    fn map(&self, parent_value: i64) -> i64 {
        parent_value.min(self.ceiling)
    }

    fn bounds(&self, parent_lower_bound: i64, parent_upper_bound: i64) -> (i64, i64) {
        (
            parent_lower_bound.min(self.ceiling),
            parent_upper_bound.min(self.ceiling),
        )
    }
}
