use crate::basic_types::CommittableInt;
use crate::basic_types::Timestamp;

/// A stored integer variable: a timestamped value cell and the bounds `[lower_bound, upper_bound]`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct IntVar {
    value: CommittableInt,
    lower_bound: i64,
    upper_bound: i64,
}

impl IntVar {
    pub(crate) fn new(
        timestamp: Timestamp,
        initial_value: i64,
        lower_bound: i64,
        upper_bound: i64,
    ) -> Self {
        IntVar {
            value: CommittableInt::new(timestamp, initial_value),
            lower_bound,
            upper_bound,
        }
    }

    pub(crate) fn value(&self, timestamp: Timestamp) -> i64 {
        self.value.value(timestamp)
    }

    pub(crate) fn committed_value(&self) -> i64 {
        self.value.committed_value()
    }

    pub(crate) fn has_changed(&self, timestamp: Timestamp) -> bool {
        self.value.has_changed(timestamp)
    }

    pub(crate) fn lower_bound(&self) -> i64 {
        self.lower_bound
    }

    pub(crate) fn upper_bound(&self) -> i64 {
        self.upper_bound
    }

    pub(crate) fn in_domain(&self, value: i64) -> bool {
        self.lower_bound <= value && value <= self.upper_bound
    }

    pub(crate) fn set_value(&mut self, timestamp: Timestamp, value: i64) {
        self.value.set_value(timestamp, value);
    }

    pub(crate) fn inc_value(&mut self, timestamp: Timestamp, delta: i64) {
        self.value.inc_value(timestamp, delta);
    }

    pub(crate) fn commit_if(&mut self, timestamp: Timestamp) {
        self.value.commit_if(timestamp);
    }

    /// Returns whether the bounds moved.
    ///
    /// With `widen_only` the new bounds are joined with the current ones, so the domain can only
    /// grow.
    pub(crate) fn update_bounds(
        &mut self,
        lower_bound: i64,
        upper_bound: i64,
        widen_only: bool,
    ) -> bool {
        let (lower_bound, upper_bound) = if widen_only {
            (
                lower_bound.min(self.lower_bound),
                upper_bound.max(self.upper_bound),
            )
        } else {
            (lower_bound, upper_bound)
        };

        let changed = lower_bound != self.lower_bound || upper_bound != self.upper_bound;
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_only_never_narrows() {
        let mut var = IntVar::new(Timestamp::default(), 0, -5, 5);

        assert!(!var.update_bounds(-1, 1, true));
        assert_eq!((var.lower_bound(), var.upper_bound()), (-5, 5));

        assert!(var.update_bounds(-1, 9, true));
        assert_eq!((var.lower_bound(), var.upper_bound()), (-5, 9));
    }

    #[test]
    fn narrowing_replaces_the_bounds() {
        let mut var = IntVar::new(Timestamp::default(), 0, -5, 5);

        assert!(var.update_bounds(-1, 1, false));
        assert_eq!((var.lower_bound(), var.upper_bound()), (-1, 1));
    }
}
