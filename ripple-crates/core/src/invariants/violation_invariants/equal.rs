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

/// The violation of `x == y`, which is `|x - y|`.
#[derive(Debug)]
pub struct Equal {
    violation: VarId,
    x: VarViewId,
    y: VarViewId,
    cursor: InputCursor,
}

impl Equal {
    pub fn new(violation: VarId, x: VarViewId, y: VarViewId) -> Self {
        Equal {
            violation,
            x,
            y,
            cursor: InputCursor::default(),
        }
    }
}

impl Invariant for Equal {
    fn name(&self) -> &str {
        "Equal"
    }

    fn register_vars(&mut self, context: &mut RegistrationContext<'_>) -> Result<(), EngineError> {
        context.register_input(self.x, LEFT);
        context.register_input(self.y, RIGHT);
        context.register_defined_var(self.violation)
    }

    fn update_bounds(&mut self, context: &mut InvariantContext<'_>, widen_only: bool) {
        let smallest_difference = context.lower_bound(self.x) - context.upper_bound(self.y);
        let largest_difference = context.upper_bound(self.x) - context.lower_bound(self.y);

        let (lower_bound, upper_bound) = if largest_difference < 0 {
            (-largest_difference, -smallest_difference)
        } else if smallest_difference > 0 {
            (smallest_difference, largest_difference)
        } else {
            (0, largest_difference.max(-smallest_difference))
        };

        context.update_bounds(self.violation, lower_bound, upper_bound, widen_only);
    }

    fn recompute(&mut self, context: &mut InvariantContext<'_>) {
        let violation = (context.value(self.x) - context.value(self.y)).abs();
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

impl ViolationInvariant for Equal {
    fn violation_id(&self) -> VarId {
        self.violation
    }
}
