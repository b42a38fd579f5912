use super::IntView;

/// `max(x, floor)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntMaxView {
    floor: i64,
}

impl IntMaxView {
    pub fn new(floor: i64) -> Self {
        IntMaxView { floor }
    }
}

impl IntView for IntMaxView {
    fn map(&self, parent_value: i64) -> i64 {
        parent_value.max(self.floor)
    }

    fn bounds(&self, parent_lower_bound: i64, parent_upper_bound: i64) -> (i64, i64) {
        (
            parent_lower_bound.max(self.floor),
            parent_upper_bound.max(self.floor),
        )
    }
}
