use crate::basic_types::InvariantId;
use crate::basic_types::LocalId;
use crate::basic_types::Timestamp;
use crate::basic_types::VarViewId;
use crate::containers::KeyedVec;
use crate::invariants::Invariant;
use crate::invariants::InvariantContext;
use crate::variables::VariableStore;

/// Owns all variables and invariants of an engine.
///
/// Variables and invariants live in separate fields so that an invariant can be borrowed mutably
/// together with the variables it reads and writes.
#[derive(Default)]
pub(crate) struct Store {
    pub(crate) variables: VariableStore,
    pub(crate) invariants: KeyedVec<InvariantId, Box<dyn Invariant>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("variables", &self.variables)
            .field(
                "invariants",
                &self
                    .invariants
                    .iter()
                    .map(|invariant| invariant.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Store {
    pub(crate) fn num_invariants(&self) -> usize {
        self.invariants.len()
    }

    pub(crate) fn recompute(&mut self, timestamp: Timestamp, invariant_id: InvariantId) {
        let mut context = InvariantContext::new(timestamp, &mut self.variables);
        self.invariants[invariant_id].recompute(&mut context);
    }

    pub(crate) fn notify_input_changed(
        &mut self,
        timestamp: Timestamp,
        invariant_id: InvariantId,
        local_id: LocalId,
    ) {
        let mut context = InvariantContext::new(timestamp, &mut self.variables);
        self.invariants[invariant_id].notify_input_changed(&mut context, local_id);
    }

    pub(crate) fn next_input(
        &mut self,
        timestamp: Timestamp,
        invariant_id: InvariantId,
    ) -> Option<VarViewId> {
        let mut context = InvariantContext::new(timestamp, &mut self.variables);
        self.invariants[invariant_id].next_input(&mut context)
    }

    pub(crate) fn notify_current_input_changed(
        &mut self,
        timestamp: Timestamp,
        invariant_id: InvariantId,
    ) {
        let mut context = InvariantContext::new(timestamp, &mut self.variables);
        self.invariants[invariant_id].notify_current_input_changed(&mut context);
    }

    pub(crate) fn close_invariant(&mut self, timestamp: Timestamp, invariant_id: InvariantId) {
        let mut context = InvariantContext::new(timestamp, &mut self.variables);
        self.invariants[invariant_id].close(&mut context);
    }

    pub(crate) fn commit_invariant(&mut self, timestamp: Timestamp, invariant_id: InvariantId) {
        self.invariants[invariant_id].commit(timestamp);
    }

    /// Returns whether a bound of one of the defined variables moved.
    pub(crate) fn update_bounds(
        &mut self,
        timestamp: Timestamp,
        invariant_id: InvariantId,
        widen_only: bool,
    ) -> bool {
        let mut context = InvariantContext::new(timestamp, &mut self.variables);
        self.invariants[invariant_id].update_bounds(&mut context, widen_only);
        context.bounds_changed()
    }
}
