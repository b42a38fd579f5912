use super::InputCursor;
use super::Invariant;
use super::InvariantContext;
use super::RegistrationContext;
use crate::basic_types::CommittableInt;
use crate::basic_types::EngineError;
use crate::basic_types::LocalId;
use crate::basic_types::Timestamp;
use crate::basic_types::VarId;
use crate::basic_types::VarViewId;
use crate::ripple_assert_eq_simple;

/// Maintains `output = sum(coefficients[i] * inputs[i])`.
///
/// A change of a single input is applied as a delta. The invariant keeps a committable copy of
/// every input, holding the value the output currently accounts for, so being notified twice about
/// the same change is harmless.
#[derive(Debug)]
pub struct Linear {
    coefficients: Box<[i64]>,
    inputs: Box<[VarViewId]>,
    output: VarId,
    local_values: Box<[CommittableInt]>,
    cursor: InputCursor,
}

impl Linear {
    pub fn new(coefficients: Vec<i64>, inputs: Vec<VarViewId>, output: VarId) -> Self {
        ripple_assert_eq_simple!(
            coefficients.len(),
            inputs.len(),
            "every input needs a coefficient"
        );

        let local_values = vec![CommittableInt::new(Timestamp::default(), 0); inputs.len()];
        Linear {
            coefficients: coefficients.into_boxed_slice(),
            inputs: inputs.into_boxed_slice(),
            output,
            local_values: local_values.into_boxed_slice(),
            cursor: InputCursor::default(),
        }
    }

    /// A linear invariant where every coefficient is one.
    pub fn sum(inputs: Vec<VarViewId>, output: VarId) -> Self {
        Linear::new(vec![1; inputs.len()], inputs, output)
    }

    pub fn output(&self) -> VarId {
        self.output
    }
}

impl Invariant for Linear {
    fn name(&self) -> &str {
        "Linear"
    }

    fn register_vars(&mut self, context: &mut RegistrationContext<'_>) -> Result<(), EngineError> {
        for (index, &input) in self.inputs.iter().enumerate() {
            context.register_input(input, LocalId::from(index as u32));
        }
        context.register_defined_var(self.output)
    }

    fn update_bounds(&mut self, context: &mut InvariantContext<'_>, widen_only: bool) {
        let (lower_bound, upper_bound) = self
            .coefficients
            .iter()
            .zip(self.inputs.iter())
            .fold((0, 0), |(lower_bound, upper_bound), (&coefficient, &input)| {
                let from_lower = coefficient * context.lower_bound(input);
                let from_upper = coefficient * context.upper_bound(input);
                (
                    lower_bound + from_lower.min(from_upper),
                    upper_bound + from_lower.max(from_upper),
                )
            });

        context.update_bounds(self.output, lower_bound, upper_bound, widen_only);
    }

    fn close(&mut self, context: &mut InvariantContext<'_>) {
        let timestamp = context.timestamp();
        for (local_value, &input) in self.local_values.iter_mut().zip(self.inputs.iter()) {
            *local_value = CommittableInt::new(timestamp, context.committed_value(input));
        }
    }

    fn recompute(&mut self, context: &mut InvariantContext<'_>) {
        let timestamp = context.timestamp();
        let mut sum = 0;

        for ((local_value, &input), &coefficient) in self
            .local_values
            .iter_mut()
            .zip(self.inputs.iter())
            .zip(self.coefficients.iter())
        {
            let value = context.value(input);
            sum += coefficient * value;
            local_value.commit_value(context.committed_value(input));
            local_value.set_value(timestamp, value);
        }

        context.set_value(self.output, sum);
    }

    fn notify_input_changed(&mut self, context: &mut InvariantContext<'_>, local_id: LocalId) {
        let index = local_id.unpack() as usize;
        let timestamp = context.timestamp();

        let new_value = context.value(self.inputs[index]);
        let delta = new_value - self.local_values[index].value(timestamp);
        if delta != 0 {
            context.inc_value(self.output, delta * self.coefficients[index]);
            self.local_values[index].set_value(timestamp, new_value);
        }
    }

    fn next_input(&mut self, context: &mut InvariantContext<'_>) -> Option<VarViewId> {
        let position = self.cursor.advance(context.timestamp());
        self.inputs.get(position).copied()
    }

    fn notify_current_input_changed(&mut self, context: &mut InvariantContext<'_>) {
        if let Some(position) = self.cursor.position(context.timestamp()) {
            if position < self.inputs.len() {
                self.notify_input_changed(context, LocalId::from(position as u32));
            }
        }
    }

    fn commit(&mut self, timestamp: Timestamp) {
        for local_value in self.local_values.iter_mut() {
            local_value.commit_if(timestamp);
        }
    }
}
