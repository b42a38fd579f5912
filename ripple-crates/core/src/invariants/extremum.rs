use std::fmt::Debug;
use std::marker::PhantomData;

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
use crate::ripple_assert_extreme;
use crate::ripple_assert_simple;

/// Selects which of two values an [`Extremum`] keeps.
pub trait Direction: Debug + 'static {
    const NAME: &'static str;

    fn select(first: i64, second: i64) -> i64;
}

#[derive(Clone, Copy, Debug)]
pub struct Smallest;

impl Direction for Smallest {
    const NAME: &'static str = "Minimum";

    fn select(first: i64, second: i64) -> i64 {
        first.min(second)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Largest;

impl Direction for Largest {
    const NAME: &'static str = "Maximum";

    fn select(first: i64, second: i64) -> i64 {
        first.max(second)
    }
}

/// Maintains `output = min(inputs)`.
pub type Minimum = Extremum<Smallest>;
/// Maintains `output = max(inputs)`.
pub type Maximum = Extremum<Largest>;

/// Maintains the smallest or largest value among its inputs.
///
/// Most changes are handled in constant time: an input that becomes at least as good as the output
/// replaces it, and an input that was not the extremum cannot affect it. Only when the input
/// holding the extremum gets worse are all inputs scanned again.
#[derive(Debug)]
pub struct Extremum<D> {
    inputs: Box<[VarViewId]>,
    output: VarId,
    local_values: Box<[CommittableInt]>,
    cursor: InputCursor,
    direction: PhantomData<D>,
}

impl<D: Direction> Extremum<D> {
    pub fn new(inputs: Vec<VarViewId>, output: VarId) -> Self {
        ripple_assert_simple!(!inputs.is_empty(), "the extremum of no inputs is undefined");

        let local_values = vec![CommittableInt::new(Timestamp::default(), 0); inputs.len()];
        Extremum {
            inputs: inputs.into_boxed_slice(),
            output,
            local_values: local_values.into_boxed_slice(),
            cursor: InputCursor::default(),
            direction: PhantomData,
        }
    }

    pub fn output(&self) -> VarId {
        self.output
    }

    fn scan(&self, timestamp: Timestamp) -> i64 {
        self.local_values
            .iter()
            .map(|local_value| local_value.value(timestamp))
            .reduce(D::select)
            .unwrap_or_default()
    }
}

impl<D: Direction> Invariant for Extremum<D> {
    fn name(&self) -> &str {
        D::NAME
    }

    fn register_vars(&mut self, context: &mut RegistrationContext<'_>) -> Result<(), EngineError> {
        for (index, &input) in self.inputs.iter().enumerate() {
            context.register_input(input, LocalId::from(index as u32));
        }
        context.register_defined_var(self.output)
    }

    fn update_bounds(&mut self, context: &mut InvariantContext<'_>, widen_only: bool) {
        let lower_bound = self
            .inputs
            .iter()
            .map(|&input| context.lower_bound(input))
            .reduce(D::select)
            .unwrap_or_default();
        let upper_bound = self
            .inputs
            .iter()
            .map(|&input| context.upper_bound(input))
            .reduce(D::select)
            .unwrap_or_default();

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
        for (local_value, &input) in self.local_values.iter_mut().zip(self.inputs.iter()) {
            local_value.commit_value(context.committed_value(input));
            local_value.set_value(timestamp, context.value(input));
        }

        context.set_value(self.output, self.scan(timestamp));
    }

    fn notify_input_changed(&mut self, context: &mut InvariantContext<'_>, local_id: LocalId) {
        let index = local_id.unpack() as usize;
        let timestamp = context.timestamp();

        let old_value = self.local_values[index].value(timestamp);
        let new_value = context.value(self.inputs[index]);
        if old_value == new_value {
            return;
        }
        self.local_values[index].set_value(timestamp, new_value);

        let current = context.value(self.output);
        if D::select(new_value, current) == new_value {
            context.set_value(self.output, new_value);
        } else if old_value == current {
            context.set_value(self.output, self.scan(timestamp));
        }

        ripple_assert_extreme!(context.value(self.output) == self.scan(timestamp));
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

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::*;
    use crate::basic_types::InvariantId;
    use crate::engine::Engine;

    fn extremum<D: Direction>(values: &[i64]) -> (Engine, Vec<VarId>, VarId, InvariantId) {
        let mut engine = Engine::default();
        engine.open().expect("fresh engine");
        let inputs: Vec<VarId> = values
            .iter()
            .map(|&value| engine.make_int_var(value, -50, 50).expect("non-empty domain"))
            .collect();
        let output = engine.make_int_var(0, 0, 0).expect("non-empty domain");
        let handle = engine
            .make_invariant(Extremum::<D>::new(
                inputs.iter().map(|&input| input.into()).collect(),
                output,
            ))
            .expect("output is not defined yet");
        engine.close().expect("acyclic");

        (engine, inputs, output, handle.id())
    }

    #[test]
    fn initial_values() {
        let (engine, _, output, _) = extremum::<Smallest>(&[4, -2, 7]);
        assert_eq!(engine.committed_value(output), -2);

        let (engine, _, output, _) = extremum::<Largest>(&[4, -2, 7]);
        assert_eq!(engine.committed_value(output), 7);
    }

    #[test]
    fn bounds_follow_the_inputs() {
        let mut engine = Engine::default();
        engine.open().expect("fresh engine");
        let a = engine.make_int_var(0, -3, 10).expect("non-empty domain");
        let b = engine.make_int_var(3, 2, 5).expect("non-empty domain");
        let output = engine.make_int_var(0, 0, 0).expect("non-empty domain");
        let _ = engine
            .make_invariant(Minimum::new(vec![a.into(), b.into()], output))
            .expect("output is not defined yet");

        assert_eq!(engine.lower_bound(output), -3);
        assert_eq!(engine.upper_bound(output), 5);
    }

    #[test]
    fn worsening_the_extremum_rescans() {
        let (mut engine, inputs, output, invariant) = extremum::<Smallest>(&[4, -2, 7]);

        let timestamp = engine.current_timestamp() + 1;
        engine.set_value_at(timestamp, inputs[1], 20);
        engine.notify_input_changed(timestamp, invariant, LocalId::from(1));

        assert_eq!(engine.value(timestamp, output), 4);
        assert_eq!(engine.committed_value(output), -2);
    }

    #[test]
    fn random_histories_agree_with_a_scan() {
        let (mut engine, inputs, output, invariant) = extremum::<Largest>(&[0, 0, 0, 0, 0]);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut timestamp = engine.current_timestamp();

        for _ in 0..300 {
            timestamp = timestamp.next();
            for (index, &input) in inputs.iter().enumerate() {
                if rng.gen_bool(0.3) {
                    engine.set_value_at(timestamp, input, rng.gen_range(-50..=50));
                    engine.notify_input_changed(timestamp, invariant, LocalId::from(index as u32));
                }
            }

            let expected = inputs
                .iter()
                .map(|&input| engine.value(timestamp, input))
                .max()
                .expect("non-empty");
            assert_eq!(engine.value(timestamp, output), expected);

            if rng.gen_bool(0.5) {
                for &var in inputs.iter().chain([&output]) {
                    engine.commit_if(timestamp, var);
                }
                engine.commit_invariant(timestamp, invariant);
            }
        }
    }
}
