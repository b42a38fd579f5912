use log::trace;

use crate::basic_types::EngineError;
use crate::basic_types::InvariantId;
use crate::basic_types::LocalId;
use crate::basic_types::VarId;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::ripple_assert_moderate;

/// An invariant that is notified when a variable changes, together with the local id under which
/// it registered that variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListeningInvariant {
    pub invariant_id: InvariantId,
    pub local_id: LocalId,
}

/// The bipartite dependency graph between variables and invariants.
///
/// Edges are only added while the engine is open. Closing the graph derives the search and
/// evaluation variables and a topological position for every variable.
#[derive(Debug, Default)]
pub(crate) struct PropagationGraph {
    defining_invariant: KeyedVec<VarId, Option<InvariantId>>,
    listening_invariants: KeyedVec<VarId, Vec<ListeningInvariant>>,
    defined_vars: KeyedVec<InvariantId, Vec<VarId>>,
    input_vars: KeyedVec<InvariantId, Vec<VarId>>,

    search_vars: Vec<VarId>,
    evaluation_vars: Vec<VarId>,
    /// Distance from the search variables, ignoring edges which close a cycle.
    position: KeyedVec<VarId, u32>,
    /// The invariants sorted by the position of the variables they define.
    invariant_order: Vec<InvariantId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Visit {
    Unvisited,
    OnPath,
    Done,
}

impl PropagationGraph {
    pub(crate) fn register_var(&mut self, var: VarId) {
        self.defining_invariant.accomodate(var, None);
        self.listening_invariants.accomodate(var, Vec::new());
    }

    pub(crate) fn register_invariant(&mut self, invariant_id: InvariantId) {
        self.defined_vars.accomodate(invariant_id, Vec::new());
        self.input_vars.accomodate(invariant_id, Vec::new());
    }

    /// Records that `invariant_id` defines `var`.
    ///
    /// An input edge from `var` to the same invariant is dropped, since an invariant cannot listen
    /// to its own output.
    pub(crate) fn register_defined_var(
        &mut self,
        var: VarId,
        invariant_id: InvariantId,
    ) -> Result<(), EngineError> {
        if let Some(defined_by) = self.defining_invariant[var] {
            return Err(EngineError::VarAlreadyDefined { var, defined_by });
        }

        self.defining_invariant[var] = Some(invariant_id);
        self.defined_vars[invariant_id].push(var);

        self.listening_invariants[var].retain(|listener| listener.invariant_id != invariant_id);
        self.input_vars[invariant_id].retain(|&input| input != var);

        Ok(())
    }

    pub(crate) fn register_invariant_input(
        &mut self,
        invariant_id: InvariantId,
        var: VarId,
        local_id: LocalId,
    ) {
        if self.defining_invariant[var] == Some(invariant_id) {
            trace!("{invariant_id} ignores its own output {var} as an input");
            return;
        }

        self.listening_invariants[var].push(ListeningInvariant {
            invariant_id,
            local_id,
        });
        self.input_vars[invariant_id].push(var);
    }

    /// Removes every edge of `invariant_id`, e.g. after its registration failed halfway.
    pub(crate) fn unregister_invariant(&mut self, invariant_id: InvariantId) {
        for &var in &self.defined_vars[invariant_id] {
            self.defining_invariant[var] = None;
        }
        for &var in &self.input_vars[invariant_id] {
            self.listening_invariants[var].retain(|listener| listener.invariant_id != invariant_id);
        }
        self.defined_vars[invariant_id].clear();
        self.input_vars[invariant_id].clear();
    }

    pub(crate) fn num_variables(&self) -> usize {
        self.defining_invariant.len()
    }

    pub(crate) fn defining_invariant(&self, var: VarId) -> Option<InvariantId> {
        self.defining_invariant[var]
    }

    pub(crate) fn listening_invariants(&self, var: VarId) -> &[ListeningInvariant] {
        &self.listening_invariants[var]
    }

    pub(crate) fn defined_vars(&self, invariant_id: InvariantId) -> &[VarId] {
        &self.defined_vars[invariant_id]
    }

    pub(crate) fn input_vars(&self, invariant_id: InvariantId) -> &[VarId] {
        &self.input_vars[invariant_id]
    }

    pub(crate) fn is_search_var(&self, var: VarId) -> bool {
        self.defining_invariant[var].is_none()
    }

    pub(crate) fn search_vars(&self) -> &[VarId] {
        &self.search_vars
    }

    pub(crate) fn evaluation_vars(&self) -> &[VarId] {
        &self.evaluation_vars
    }

    pub(crate) fn position(&self, var: VarId) -> u32 {
        self.position[var]
    }

    pub(crate) fn invariant_order(&self) -> &[InvariantId] {
        &self.invariant_order
    }

    /// Freezes the graph: derives the search and evaluation variables and orders the variables
    /// and invariants topologically.
    pub(crate) fn close(&mut self) {
        self.search_vars = self
            .defining_invariant
            .keys()
            .filter(|&var| self.is_search_var(var))
            .collect();
        self.evaluation_vars = self
            .listening_invariants
            .keys()
            .filter(|&var| self.listening_invariants[var].is_empty())
            .collect();

        self.compute_positions();

        let mut invariant_order: Vec<InvariantId> = self.defined_vars.keys().collect();
        invariant_order.sort_by_key(|&invariant_id| {
            self.defined_vars[invariant_id]
                .iter()
                .map(|&var| self.position[var])
                .min()
                .unwrap_or(u32::MAX)
        });
        self.invariant_order = invariant_order;

        trace!(
            "closed graph: {} search and {} evaluation variables",
            self.search_vars.len(),
            self.evaluation_vars.len()
        );
    }

    /// Assigns every variable one more than the largest position among the inputs of its defining
    /// invariant. An input that is still on the depth-first path closes a cycle and is ignored.
    fn compute_positions(&mut self) {
        let num_variables = self.num_variables();
        let mut visit = vec![Visit::Unvisited; num_variables];
        let mut position: KeyedVec<VarId, u32> = KeyedVec::default();
        if num_variables > 0 {
            position.accomodate(VarId::create_from_index(num_variables - 1), 0);
        }

        let mut stack: Vec<(VarId, usize)> = Vec::new();
        for root in self.defining_invariant.keys() {
            if visit[root.index()] != Visit::Unvisited {
                continue;
            }
            visit[root.index()] = Visit::OnPath;
            stack.push((root, 0));

            while let Some(top) = stack.last_mut() {
                let var = top.0;
                let inputs = self.defining_invariant[var]
                    .map(|invariant_id| self.input_vars[invariant_id].as_slice())
                    .unwrap_or_default();

                if let Some(&input) = inputs.get(top.1) {
                    top.1 += 1;
                    if visit[input.index()] == Visit::Unvisited {
                        visit[input.index()] = Visit::OnPath;
                        stack.push((input, 0));
                    }
                    continue;
                }

                position[var] = inputs
                    .iter()
                    .filter(|input| visit[input.index()] == Visit::Done)
                    .map(|&input| position[input] + 1)
                    .max()
                    .unwrap_or(0);
                visit[var.index()] = Visit::Done;
                let _ = stack.pop();
            }
        }

        ripple_assert_moderate!(visit.iter().all(|state| *state == Visit::Done));
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(num_vars: u32, num_invariants: u32) -> PropagationGraph {
        let mut graph = PropagationGraph::default();
        for var in 0..num_vars {
            graph.register_var(VarId(var));
        }
        for invariant in 0..num_invariants {
            graph.register_invariant(InvariantId(invariant));
        }
        graph
    }

    #[test]
    fn a_variable_can_only_be_defined_once() {
        let mut graph = graph_with(1, 2);

        graph
            .register_defined_var(VarId(0), InvariantId(0))
            .expect("first definition");
        let result = graph.register_defined_var(VarId(0), InvariantId(1));

        assert_eq!(
            result,
            Err(EngineError::VarAlreadyDefined {
                var: VarId(0),
                defined_by: InvariantId(0)
            })
        );
    }

    #[test]
    fn own_output_is_not_an_input() {
        let mut graph = graph_with(2, 1);
        let invariant = InvariantId(0);

        graph.register_invariant_input(invariant, VarId(0), LocalId::from(0));
        graph.register_invariant_input(invariant, VarId(1), LocalId::from(1));
        graph
            .register_defined_var(VarId(1), invariant)
            .expect("not defined yet");
        graph.register_invariant_input(invariant, VarId(1), LocalId::from(2));

        assert!(graph.listening_invariants(VarId(1)).is_empty());
        assert_eq!(graph.input_vars(invariant), &[VarId(0)]);
    }

    #[test]
    fn unregistering_removes_every_edge() {
        let mut graph = graph_with(3, 1);
        let invariant = InvariantId(0);
        graph.register_invariant_input(invariant, VarId(0), LocalId::from(0));
        graph
            .register_defined_var(VarId(1), invariant)
            .expect("not defined yet");

        graph.unregister_invariant(invariant);

        assert!(graph.listening_invariants(VarId(0)).is_empty());
        assert_eq!(graph.defining_invariant(VarId(1)), None);
        assert!(graph.defined_vars(invariant).is_empty());
        assert!(graph.input_vars(invariant).is_empty());
    }

    #[test]
    fn close_orders_a_chain() {
        // x0 -> i0 -> x1 -> i1 -> x2, plus x3 -> i1
        let mut graph = graph_with(4, 2);
        graph.register_invariant_input(InvariantId(0), VarId(0), LocalId::from(0));
        graph
            .register_defined_var(VarId(1), InvariantId(0))
            .expect("fresh");
        graph.register_invariant_input(InvariantId(1), VarId(1), LocalId::from(0));
        graph.register_invariant_input(InvariantId(1), VarId(3), LocalId::from(1));
        graph
            .register_defined_var(VarId(2), InvariantId(1))
            .expect("fresh");

        graph.close();

        assert_eq!(graph.search_vars(), &[VarId(0), VarId(3)]);
        assert_eq!(graph.evaluation_vars(), &[VarId(2)]);
        assert_eq!(graph.position(VarId(0)), 0);
        assert_eq!(graph.position(VarId(1)), 1);
        assert_eq!(graph.position(VarId(2)), 2);
        assert_eq!(graph.position(VarId(3)), 0);
        assert_eq!(graph.invariant_order(), &[InvariantId(0), InvariantId(1)]);
    }

    #[test]
    fn close_terminates_on_static_cycles() {
        // x0 -> i0 -> x1 -> i1 -> x2 -> i0
        let mut graph = graph_with(3, 2);
        graph.register_invariant_input(InvariantId(0), VarId(0), LocalId::from(0));
        graph.register_invariant_input(InvariantId(0), VarId(2), LocalId::from(1));
        graph
            .register_defined_var(VarId(1), InvariantId(0))
            .expect("fresh");
        graph.register_invariant_input(InvariantId(1), VarId(1), LocalId::from(0));
        graph
            .register_defined_var(VarId(2), InvariantId(1))
            .expect("fresh");

        graph.close();

        assert_eq!(graph.search_vars(), &[VarId(0)]);
        assert!(graph.position(VarId(1)) > graph.position(VarId(0)));
        assert_eq!(graph.invariant_order().len(), 2);
    }
}
