use super::InputCursor;
use super::Invariant;
use super::InvariantContext;
use super::RegistrationContext;
use crate::basic_types::EngineError;
use crate::basic_types::LocalId;
use crate::basic_types::VarId;
use crate::basic_types::VarViewId;

const CONDITION: LocalId = LocalId::from(0);
const THEN_BRANCH: LocalId = LocalId::from(1);
const ELSE_BRANCH: LocalId = LocalId::from(2);

/// Maintains `output = if condition == 0 { then_branch } else { else_branch }`.
///
/// The condition is read like a violation: zero means it holds. Only the selected branch is an
/// input at any given time.
#[derive(Debug)]
pub struct IfThenElse {
    condition: VarViewId,
    then_branch: VarViewId,
    else_branch: VarViewId,
    output: VarId,
    cursor: InputCursor,
}

impl IfThenElse {
    pub fn new(
        condition: VarViewId,
        then_branch: VarViewId,
        else_branch: VarViewId,
        output: VarId,
    ) -> Self {
        IfThenElse {
            condition,
            then_branch,
            else_branch,
            output,
            cursor: InputCursor::default(),
        }
    }

    pub fn output(&self) -> VarId {
        self.output
    }

    fn selected(&self, context: &InvariantContext<'_>) -> VarViewId {
        if context.value(self.condition) == 0 {
            self.then_branch
        } else {
            self.else_branch
        }
    }
}

impl Invariant for IfThenElse {
    fn name(&self) -> &str {
        "IfThenElse"
    }

    fn register_vars(&mut self, context: &mut RegistrationContext<'_>) -> Result<(), EngineError> {
        context.register_input(self.condition, CONDITION);
        context.register_input(self.then_branch, THEN_BRANCH);
        context.register_input(self.else_branch, ELSE_BRANCH);
        context.register_defined_var(self.output)
    }

    fn update_bounds(&mut self, context: &mut InvariantContext<'_>, widen_only: bool) {
        let condition_lower_bound = context.lower_bound(self.condition);
        let condition_upper_bound = context.upper_bound(self.condition);

        let can_hold = condition_lower_bound <= 0 && 0 <= condition_upper_bound;
        let can_fail = condition_lower_bound != 0 || condition_upper_bound != 0;

        let mut lower_bound = i64::MAX;
        let mut upper_bound = i64::MIN;
        for (branch, reachable) in [(self.then_branch, can_hold), (self.else_branch, can_fail)] {
            if reachable {
                lower_bound = lower_bound.min(context.lower_bound(branch));
                upper_bound = upper_bound.max(context.upper_bound(branch));
            }
        }

        context.update_bounds(self.output, lower_bound, upper_bound, widen_only);
    }

    fn recompute(&mut self, context: &mut InvariantContext<'_>) {
        let value = context.value(self.selected(context));
        context.set_value(self.output, value);
    }

    fn notify_input_changed(&mut self, context: &mut InvariantContext<'_>, local_id: LocalId) {
        let holds = context.value(self.condition) == 0;
        let relevant = match local_id {
            CONDITION => true,
            THEN_BRANCH => holds,
            ELSE_BRANCH => !holds,
            _ => false,
        };

        if relevant {
            self.recompute(context);
        }
    }

    /// The condition first, then the selected branch.
    fn next_input(&mut self, context: &mut InvariantContext<'_>) -> Option<VarViewId> {
        match self.cursor.advance(context.timestamp()) {
            0 => Some(self.condition),
            1 => Some(self.selected(context)),
            _ => None,
        }
    }

    fn notify_current_input_changed(&mut self, context: &mut InvariantContext<'_>) {
        self.recompute(context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    #[test]
    fn follows_the_condition() {
        let mut engine = Engine::default();
        engine.open().expect("fresh engine");
        let condition = engine.make_int_var(0, 0, 3).expect("non-empty domain");
        let then_branch = engine.make_int_var(5, 0, 10).expect("non-empty domain");
        let else_branch = engine.make_int_var(-5, -10, 0).expect("non-empty domain");
        let output = engine.make_int_var(0, 0, 0).expect("non-empty domain");
        let invariant = engine
            .make_invariant(IfThenElse::new(
                condition.into(),
                then_branch.into(),
                else_branch.into(),
                output,
            ))
            .expect("output is not defined yet")
            .id();
        engine.close().expect("acyclic");

        assert_eq!(engine.lower_bound(output), -10);
        assert_eq!(engine.upper_bound(output), 10);
        assert_eq!(engine.committed_value(output), 5);

        let timestamp = engine.current_timestamp() + 1;
        engine.set_value_at(timestamp, else_branch, -7);
        engine.notify_input_changed(timestamp, invariant, ELSE_BRANCH);
        assert_eq!(engine.value(timestamp, output), 5);

        engine.set_value_at(timestamp, condition, 2);
        engine.notify_input_changed(timestamp, invariant, CONDITION);
        assert_eq!(engine.value(timestamp, output), -7);

        let inputs: Vec<_> =
            std::iter::from_fn(|| engine.next_input(timestamp, invariant)).collect();
        assert_eq!(inputs, vec![condition.into(), else_branch.into()]);
    }

    #[test]
    fn a_fixed_condition_only_reaches_one_branch() {
        let mut engine = Engine::default();
        engine.open().expect("fresh engine");
        let condition = engine.make_int_var(0, 0, 0).expect("non-empty domain");
        let then_branch = engine.make_int_var(5, 0, 10).expect("non-empty domain");
        let else_branch = engine.make_int_var(-5, -10, 0).expect("non-empty domain");
        let output = engine.make_int_var(0, 0, 0).expect("non-empty domain");
        let _ = engine
            .make_invariant(IfThenElse::new(
                condition.into(),
                then_branch.into(),
                else_branch.into(),
                output,
            ))
            .expect("output is not defined yet");

        assert_eq!(engine.lower_bound(output), 0);
        assert_eq!(engine.upper_bound(output), 10);
    }
}
