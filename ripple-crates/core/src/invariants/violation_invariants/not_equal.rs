use super::LEFT;
use super::RIGHT;
use crate::basic_types::EngineError;
use crate::basic_types::LocalId;
use crate::basic_types::VarId;
use crate::basic_types::VarViewId;
use crate::invariants::InputCursor;
use crate::invariants::Invariant;
use crate::invariants::InvariantContext;
use crate::invariants::RegistrationContext;
use crate::invariants::ViolationInvariant;

/// The violation of `x != y`: one when both are equal, zero otherwise.
#[derive(Debug)]
pub struct NotEqual {
    violation: VarId,
    x: VarViewId,
    y: VarViewId,
    cursor: InputCursor,
}

impl NotEqual {
    pub fn new(violation: VarId, x: VarViewId, y: VarViewId) -> Self {
        NotEqual {
            violation,
            x,
            y,
            cursor: InputCursor::default(),
        }
    }
}

impl Invariant for NotEqual {
    fn name(&self) -> &str {
        "NotEqual"
    }

    fn register_vars(&mut self, context: &mut RegistrationContext<'_>) -> Result<(), EngineError> {
        context.register_input(self.x, LEFT);
        context.register_input(self.y, RIGHT);
        context.register_defined_var(self.violation)
    }

    fn update_bounds(&mut self, context: &mut InvariantContext<'_>, widen_only: bool) {
        let (x_lower_bound, x_upper_bound) =
            (context.lower_bound(self.x), context.upper_bound(self.x));
        let (y_lower_bound, y_upper_bound) =
            (context.lower_bound(self.y), context.upper_bound(self.y));

        let disjoint = x_upper_bound < y_lower_bound || y_upper_bound < x_lower_bound;
        let fixed_and_equal = x_lower_bound == x_upper_bound
            && y_lower_bound == y_upper_bound
            && x_lower_bound == y_lower_bound;

        let (lower_bound, upper_bound) = if disjoint {
            (0, 0)
        } else if fixed_and_equal {
            (1, 1)
        } else {
            (0, 1)
        };

        context.update_bounds(self.violation, lower_bound, upper_bound, widen_only);
    }

    fn recompute(&mut self, context: &mut InvariantContext<'_>) {
        let violation = i64::from(context.value(self.x) == context.value(self.y));
        context.set_value(self.violation, violation);
    }

    fn notify_input_changed(&mut self, context: &mut InvariantContext<'_>, _local_id: LocalId) {
        self.recompute(context);
    }

    fn next_input(&mut self, context: &mut InvariantContext<'_>) -> Option<VarViewId> {
        match self.cursor.advance(context.timestamp()) {
            0 => Some(self.x),
            1 => Some(self.y),
            _ => None,
        }
    }

    fn notify_current_input_changed(&mut self, context: &mut InvariantContext<'_>) {
        self.recompute(context);
    }
}

impl ViolationInvariant for NotEqual {
    fn violation_id(&self) -> VarId {
        self.violation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    #[test]
    fn violated_only_when_equal() {
        let mut engine = Engine::default();
        engine.open().expect("fresh engine");
        let x = engine.make_int_var(1, 0, 3).expect("non-empty domain");
        let y = engine.make_int_var(1, 0, 3).expect("non-empty domain");
        let violation = engine.make_int_var(0, 0, 0).expect("non-empty domain");
        let invariant = engine
            .make_constraint(NotEqual::new(violation, x.into(), y.into()))
            .expect("violation is not defined yet")
            .id();
        engine.close().expect("acyclic");

        assert_eq!(engine.upper_bound(violation), 1);
        assert_eq!(engine.committed_value(violation), 1);

        let timestamp = engine.current_timestamp() + 1;
        engine.set_value_at(timestamp, y, 2);
        engine.notify_input_changed(timestamp, invariant, RIGHT);
        assert_eq!(engine.value(timestamp, violation), 0);
    }
}
