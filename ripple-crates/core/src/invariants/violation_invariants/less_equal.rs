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

/// The violation of `x <= y`, which is `max(0, x - y)`.
#[derive(Debug)]
pub struct LessEqual {
    violation: VarId,
    x: VarViewId,
    y: VarViewId,
    cursor: InputCursor,
}

impl LessEqual {
    pub fn new(violation: VarId, x: VarViewId, y: VarViewId) -> Self {
        LessEqual {
            violation,
            x,
            y,
            cursor: InputCursor::default(),
        }
    }
}

impl Invariant for LessEqual {
    fn name(&self) -> &str {
        "LessEqual"
    }

    fn register_vars(&mut self, context: &mut RegistrationContext<'_>) -> Result<(), EngineError> {
        context.register_input(self.x, LEFT);
        context.register_input(self.y, RIGHT);
        context.register_defined_var(self.violation)
    }

    fn update_bounds(&mut self, context: &mut InvariantContext<'_>, widen_only: bool) {
        let smallest_difference = context.lower_bound(self.x) - context.upper_bound(self.y);
        let largest_difference = context.upper_bound(self.x) - context.lower_bound(self.y);

        context.update_bounds(
            self.violation,
            smallest_difference.max(0),
            largest_difference.max(0),
            widen_only,
        );
    }

    fn recompute(&mut self, context: &mut InvariantContext<'_>) {
        let violation = (context.value(self.x) - context.value(self.y)).max(0);
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

impl ViolationInvariant for LessEqual {
    fn violation_id(&self) -> VarId {
        self.violation
    }
}
