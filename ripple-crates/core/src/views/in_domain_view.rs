use super::IntView;
use crate::ripple_assert_simple;

/// The violation of `x ∈ domain`: zero when `x` lies in one of the intervals, otherwise the
/// distance to the nearest interval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InDomainView {
    /// Sorted, disjoint and non-empty `(lower_bound, upper_bound)` intervals.
    domain: Vec<(i64, i64)>,
}

impl InDomainView {
    pub fn new(domain: Vec<(i64, i64)>) -> Self {
        ripple_assert_simple!(!domain.is_empty());
        ripple_assert_simple!(domain.iter().all(|&(lower, upper)| lower <= upper));
        ripple_assert_simple!(
            domain.windows(2).all(|pair| pair[0].1 < pair[1].0),
            "intervals must be sorted and disjoint"
        );
        InDomainView { domain }
    }

    fn violation(&self, value: i64) -> i64 {
        self.domain
            .iter()
            .map(|&(lower, upper)| {
                if value < lower {
                    lower - value
                } else if value > upper {
                    value - upper
                } else {
                    0
                }
            })
            .min()
            .unwrap_or(0)
    }
}

impl IntView for InDomainView {
    fn map(&self, parent_value: i64) -> i64 {
        self.violation(parent_value)
    }

    fn bounds(&self, parent_lower_bound: i64, parent_upper_bound: i64) -> (i64, i64) {
        let mut lower = i64::MAX;
        for &(domain_lower, domain_upper) in &self.domain {
            if parent_upper_bound < domain_lower {
                lower = lower.min(domain_lower - parent_upper_bound);
                break;
            } else if parent_lower_bound <= domain_upper {
                lower = 0;
                break;
            } else {
                lower = lower.min(parent_lower_bound - domain_upper);
            }
        }

        // The violation is piecewise linear, so its maximum is at an end of the range or in the
        // middle of a gap between two intervals.
        let mut upper = self
            .violation(parent_lower_bound)
            .max(self.violation(parent_upper_bound));
        for pair in self.domain.windows(2) {
            let middle = pair[0].1 + (pair[1].0 - pair[0].1) / 2;
            for candidate in [middle, middle + 1] {
                if parent_lower_bound <= candidate && candidate <= parent_upper_bound {
                    upper = upper.max(self.violation(candidate));
                }
            }
        }

        (lower, upper)
    }
}
