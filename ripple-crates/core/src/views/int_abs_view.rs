use super::IntView;

/// `|x|`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntAbsView;

impl IntView for IntAbsView {
    fn map(&self, parent_value: i64) -> i64 {
        parent_value.abs()
    }

    fn bounds(&self, parent_lower_bound: i64, parent_upper_bound: i64) -> (i64, i64) {
        if parent_lower_bound >= 0 {
            (parent_lower_bound, parent_upper_bound)
        } else if parent_upper_bound <= 0 {
            (-parent_upper_bound, -parent_lower_bound)
        } else {
            (0, parent_upper_bound.max(-parent_lower_bound))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_straddling_zero_start_at_zero() {
        assert_eq!(IntAbsView.bounds(-7, 3), (0, 7));
        assert_eq!(IntAbsView.bounds(-7, -3), (3, 7));
        assert_eq!(IntAbsView.bounds(2, 3), (2, 3));
    }
}
