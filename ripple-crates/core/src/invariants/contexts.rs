use log::trace;

use crate::basic_types::EngineError;
use crate::basic_types::InvariantId;
use crate::basic_types::LocalId;
use crate::basic_types::Timestamp;
use crate::basic_types::VarId;
use crate::basic_types::VarViewId;
use crate::engine::PropagationGraph;
#[cfg(doc)]
use crate::invariants::Invariant;
use crate::variables::VariableStore;

/// Handed to [`Invariant::register_vars`] to wire the invariant into the propagation graph.
#[derive(Debug)]
pub struct RegistrationContext<'a> {
    invariant_id: InvariantId,
    graph: &'a mut PropagationGraph,
    variables: &'a VariableStore,
}

impl<'a> RegistrationContext<'a> {
    pub(crate) fn new(
        invariant_id: InvariantId,
        graph: &'a mut PropagationGraph,
        variables: &'a VariableStore,
    ) -> Self {
        RegistrationContext {
            invariant_id,
            graph,
            variables,
        }
    }

    /// The id the invariant is being registered under.
    pub fn invariant_id(&self) -> InvariantId {
        self.invariant_id
    }

    /// Registers `var` as an input; the invariant is notified with `local_id` when it changes.
    ///
    /// Views are registered on the stored variable they read from.
    pub fn register_input(&mut self, var: impl Into<VarViewId>, local_id: LocalId) {
        let source = self.variables.source_id(var.into());
        self.graph
            .register_invariant_input(self.invariant_id, source, local_id);
    }

    /// Registers `var` as defined by the invariant. Fails if another invariant already defines it.
    pub fn register_defined_var(&mut self, var: VarId) -> Result<(), EngineError> {
        trace!("{} defines {var}", self.invariant_id);
        self.graph.register_defined_var(var, self.invariant_id)
    }
}

/// Gives an invariant access to the variables at one timestamp.
#[derive(Debug)]
pub struct InvariantContext<'a> {
    timestamp: Timestamp,
    variables: &'a mut VariableStore,
    bounds_changed: bool,
}

impl<'a> InvariantContext<'a> {
    pub(crate) fn new(timestamp: Timestamp, variables: &'a mut VariableStore) -> Self {
        InvariantContext {
            timestamp,
            variables,
            bounds_changed: false,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The value of `var` at the current timestamp.
    pub fn value(&self, var: impl Into<VarViewId>) -> i64 {
        self.variables.value(self.timestamp, var.into())
    }

    pub fn committed_value(&self, var: impl Into<VarViewId>) -> i64 {
        self.variables.committed_value(var.into())
    }

    pub fn lower_bound(&self, var: impl Into<VarViewId>) -> i64 {
        self.variables.lower_bound(var.into())
    }

    pub fn upper_bound(&self, var: impl Into<VarViewId>) -> i64 {
        self.variables.upper_bound(var.into())
    }

    pub fn has_changed(&self, var: impl Into<VarViewId>) -> bool {
        self.variables.has_changed(self.timestamp, var.into())
    }

    /// Sets the value of a defined variable at the current timestamp.
    pub fn set_value(&mut self, var: VarId, value: i64) {
        self.variables
            .int_var_mut(var)
            .set_value(self.timestamp, value);
    }

    pub fn inc_value(&mut self, var: VarId, delta: i64) {
        self.variables
            .int_var_mut(var)
            .inc_value(self.timestamp, delta);
    }

    pub fn update_bounds(
        &mut self,
        var: VarId,
        lower_bound: i64,
        upper_bound: i64,
        widen_only: bool,
    ) {
        let changed = self
            .variables
            .int_var_mut(var)
            .update_bounds(lower_bound, upper_bound, widen_only);
        self.bounds_changed |= changed;
    }

    /// Whether any call to [`InvariantContext::update_bounds`] moved a bound.
    pub(crate) fn bounds_changed(&self) -> bool {
        self.bounds_changed
    }
}
