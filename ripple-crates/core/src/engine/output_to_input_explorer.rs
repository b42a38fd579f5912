use log::trace;
use log::warn;

use super::EngineStatistics;
use super::OutputToInputMarkingMode;
use super::PropagationGraph;
use super::Store;
use crate::basic_types::EngineError;
use crate::basic_types::InvariantId;
use crate::basic_types::Timestamp;
use crate::basic_types::VarId;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::ripple_assert_simple;

/// The demand-driven side of propagation: brings a queried variable up to date by walking from it
/// towards the search variables it depends on.
///
/// The walk is a depth-first search over two explicit stacks. The variable stack holds the
/// variables waiting to be computed; the invariant stack holds the invariants currently pulling
/// their inputs. Call stack depth therefore does not grow with the length of dependency chains.
#[derive(Debug, Default)]
pub(crate) struct OutputToInputExplorer {
    var_stack: Vec<VarId>,
    invariant_stack: Vec<InvariantId>,

    var_computed_at: KeyedVec<VarId, Option<Timestamp>>,
    invariant_on_stack: KeyedVec<InvariantId, bool>,
    invariant_evaluated_at: KeyedVec<InvariantId, Option<Timestamp>>,
    /// The invariants fully evaluated in the current round.
    evaluated_invariants: Vec<InvariantId>,

    marking_mode: OutputToInputMarkingMode,
    /// For every variable, the search variables it (transitively) depends on.
    search_var_ancestors: KeyedVec<VarId, HashSet<VarId>>,
    /// Variables reachable from a modified search variable in the current propagation.
    on_propagation_path: KeyedVec<VarId, bool>,
}

impl OutputToInputExplorer {
    pub(crate) fn register_var(&mut self, var: VarId) {
        self.var_computed_at.accomodate(var, None);
        self.on_propagation_path.accomodate(var, false);
    }

    pub(crate) fn register_invariant(&mut self, invariant_id: InvariantId) {
        self.invariant_on_stack.accomodate(invariant_id, false);
        self.invariant_evaluated_at.accomodate(invariant_id, None);
    }

    pub(crate) fn close(
        &mut self,
        graph: &PropagationGraph,
        marking_mode: OutputToInputMarkingMode,
    ) {
        self.marking_mode = marking_mode;
        if marking_mode == OutputToInputMarkingMode::OutputToInputStatic {
            self.compute_ancestors(graph);
        }
    }

    /// Whether the invariant already processed all of its inputs at `timestamp`.
    pub(crate) fn is_evaluated(&self, invariant_id: InvariantId, timestamp: Timestamp) -> bool {
        self.invariant_evaluated_at[invariant_id] == Some(timestamp)
    }

    pub(crate) fn evaluated_invariants(&self) -> &[InvariantId] {
        &self.evaluated_invariants
    }

    /// Forgets everything about the current round.
    pub(crate) fn clear_round(&mut self) {
        self.reset_stacks();
        self.evaluated_invariants.clear();
    }

    /// Empties the stacks, e.g. after a dynamic cycle aborted the walk.
    pub(crate) fn reset_stacks(&mut self) {
        for &invariant_id in &self.invariant_stack {
            self.invariant_on_stack[invariant_id] = false;
        }
        self.invariant_stack.clear();
        self.var_stack.clear();
    }

    /// Brings every variable in `query_vars` up to date at `timestamp`.
    pub(crate) fn propagate(
        &mut self,
        timestamp: Timestamp,
        query_vars: &[VarId],
        modified_search_vars: &HashSet<VarId>,
        graph: &PropagationGraph,
        store: &mut Store,
        statistics: &mut EngineStatistics,
    ) -> Result<(), EngineError> {
        if self.marking_mode == OutputToInputMarkingMode::InputToOutputExploration {
            self.mark_propagation_path(graph, modified_search_vars);
        }

        for &query_var in query_vars {
            if self.is_computed(query_var, timestamp)
                || !self.is_marked(query_var, modified_search_vars)
            {
                continue;
            }

            self.var_stack.push(query_var);
            let mut walk = Walk {
                explorer: &mut *self,
                timestamp,
                modified_search_vars,
                graph,
                store: &mut *store,
                statistics: &mut *statistics,
            };
            walk.run()?;
        }

        ripple_assert_simple!(self.var_stack.is_empty() && self.invariant_stack.is_empty());
        Ok(())
    }

    fn is_computed(&self, var: VarId, timestamp: Timestamp) -> bool {
        self.var_computed_at[var] == Some(timestamp)
    }

    fn is_marked(&self, var: VarId, modified_search_vars: &HashSet<VarId>) -> bool {
        match self.marking_mode {
            OutputToInputMarkingMode::None => true,
            OutputToInputMarkingMode::OutputToInputStatic => {
                let ancestors = &self.search_var_ancestors[var];
                if ancestors.len() < modified_search_vars.len() {
                    ancestors.iter().any(|var| modified_search_vars.contains(var))
                } else {
                    modified_search_vars.iter().any(|var| ancestors.contains(var))
                }
            }
            OutputToInputMarkingMode::InputToOutputExploration => self.on_propagation_path[var],
        }
    }

    /// Marks every variable reachable from a modified search variable.
    fn mark_propagation_path(
        &mut self,
        graph: &PropagationGraph,
        modified_search_vars: &HashSet<VarId>,
    ) {
        self.on_propagation_path.fill(false);

        let mut stack: Vec<VarId> = modified_search_vars.iter().copied().collect();
        for &var in &stack {
            self.on_propagation_path[var] = true;
        }

        while let Some(var) = stack.pop() {
            for listener in graph.listening_invariants(var) {
                for &defined_var in graph.defined_vars(listener.invariant_id) {
                    if !self.on_propagation_path[defined_var] {
                        self.on_propagation_path[defined_var] = true;
                        stack.push(defined_var);
                    }
                }
            }
        }
    }

    fn compute_ancestors(&mut self, graph: &PropagationGraph) {
        self.search_var_ancestors = KeyedVec::default();
        for _ in 0..graph.num_variables() {
            let _ = self.search_var_ancestors.push(HashSet::default());
        }

        let mut stack = Vec::new();
        for &search_var in graph.search_vars() {
            stack.push(search_var);
            let _ = self.search_var_ancestors[search_var].insert(search_var);

            while let Some(var) = stack.pop() {
                for listener in graph.listening_invariants(var) {
                    for &defined_var in graph.defined_vars(listener.invariant_id) {
                        if self.search_var_ancestors[defined_var].insert(search_var) {
                            stack.push(defined_var);
                        }
                    }
                }
            }
        }
    }
}

/// The state of one walk from a queried variable.
struct Walk<'a> {
    explorer: &'a mut OutputToInputExplorer,
    timestamp: Timestamp,
    modified_search_vars: &'a HashSet<VarId>,
    graph: &'a PropagationGraph,
    store: &'a mut Store,
    statistics: &'a mut EngineStatistics,
}

impl Walk<'_> {
    fn run(&mut self) -> Result<(), EngineError> {
        while let Some(&var) = self.explorer.var_stack.last() {
            if !self.explorer.is_computed(var, self.timestamp) {
                self.explorer.var_computed_at[var] = Some(self.timestamp);
                if let Some(invariant_id) = self.graph.defining_invariant(var) {
                    self.expand_invariant(invariant_id)?;
                }
                continue;
            }

            let _ = self.explorer.var_stack.pop();
            let Some(&invariant_id) = self.explorer.invariant_stack.last() else {
                continue;
            };

            if self.store.variables.int_var(var).has_changed(self.timestamp) {
                self.store
                    .notify_current_input_changed(self.timestamp, invariant_id);
                self.statistics.num_notifications += 1;
            }
            self.push_next_input(invariant_id)?;
        }

        Ok(())
    }

    /// Starts pulling the inputs of `invariant_id`. If none of them needs to be explored, the
    /// invariant is left alone and its defined variables keep their committed values.
    fn expand_invariant(&mut self, invariant_id: InvariantId) -> Result<(), EngineError> {
        if self.explorer.invariant_on_stack[invariant_id] {
            return Err(self.dynamic_cycle(invariant_id));
        }
        if self.explorer.is_evaluated(invariant_id, self.timestamp) {
            return Ok(());
        }

        self.statistics.num_expansions += 1;
        trace!("expanding {invariant_id} at {}", self.timestamp);

        if let Some(input) = self.next_marked_input(invariant_id)? {
            self.explorer.invariant_on_stack[invariant_id] = true;
            self.explorer.invariant_stack.push(invariant_id);
            self.explorer.var_stack.push(input);
        }

        Ok(())
    }

    fn push_next_input(&mut self, invariant_id: InvariantId) -> Result<(), EngineError> {
        if let Some(input) = self.next_marked_input(invariant_id)? {
            self.explorer.var_stack.push(input);
            return Ok(());
        }

        for &defined_var in self.graph.defined_vars(invariant_id) {
            self.explorer.var_computed_at[defined_var] = Some(self.timestamp);
        }
        self.explorer.invariant_on_stack[invariant_id] = false;
        self.explorer.invariant_evaluated_at[invariant_id] = Some(self.timestamp);
        self.explorer.evaluated_invariants.push(invariant_id);
        let _ = self.explorer.invariant_stack.pop();

        Ok(())
    }

    /// Pulls inputs of `invariant_id` until one is found that needs exploring.
    ///
    /// An input defined by an invariant that is still pulling its own inputs closes a cycle
    /// through the current values, which cannot be evaluated.
    fn next_marked_input(
        &mut self,
        invariant_id: InvariantId,
    ) -> Result<Option<VarId>, EngineError> {
        while let Some(input) = self.store.next_input(self.timestamp, invariant_id) {
            let source = self.store.variables.source_id(input);

            if let Some(defined_by) = self.graph.defining_invariant(source) {
                if defined_by == invariant_id || self.explorer.invariant_on_stack[defined_by] {
                    return Err(self.dynamic_cycle(defined_by));
                }
            }

            if self.explorer.is_marked(source, self.modified_search_vars) {
                return Ok(Some(source));
            }
        }

        Ok(None)
    }

    fn dynamic_cycle(&self, invariant_id: InvariantId) -> EngineError {
        warn!(
            "dynamic cycle through {invariant_id} at {}; invariant stack: {:?}",
            self.timestamp, self.explorer.invariant_stack
        );
        EngineError::DynamicCycle {
            invariant: invariant_id,
        }
    }
}
