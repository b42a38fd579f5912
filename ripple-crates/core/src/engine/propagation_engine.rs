use std::collections::BTreeSet;
use std::fmt::Display;

use log::debug;
use log::trace;
use log::warn;

use super::EngineOptions;
use super::EngineStatistics;
use super::ListeningInvariant;
use super::OutputToInputExplorer;
use super::OutputToInputMarkingMode;
use super::PropagationGraph;
use super::PropagationMode;
use super::Store;
use super::VariableQueue;
use crate::basic_types::EngineError;
use crate::basic_types::InvariantId;
use crate::basic_types::LocalId;
use crate::basic_types::Timestamp;
use crate::basic_types::VarId;
use crate::basic_types::VarViewId;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::invariants::Invariant;
use crate::invariants::InvariantHandle;
use crate::invariants::RegistrationContext;
use crate::invariants::ViolationInvariant;
use crate::ripple_assert_advanced;
use crate::ripple_assert_moderate;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::views::IntView;

/// The phase of the round protocol the engine is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundState {
    Idle,
    Move,
    Probe,
    Commit,
}

impl Display for RoundState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundState::Idle => "idle",
            RoundState::Move => "move",
            RoundState::Probe => "probe",
            RoundState::Commit => "commit",
        };
        write!(f, "{name}")
    }
}

/// The invariants which take part in the current round; these are committed by
/// [`Engine::end_commit`].
#[derive(Debug, Default)]
struct TouchedInvariants {
    touched_at: KeyedVec<InvariantId, Option<Timestamp>>,
    invariants: Vec<InvariantId>,
}

impl TouchedInvariants {
    fn register_invariant(&mut self, invariant_id: InvariantId) {
        self.touched_at.accomodate(invariant_id, None);
    }

    fn touch(&mut self, invariant_id: InvariantId, timestamp: Timestamp) {
        if self.touched_at[invariant_id] != Some(timestamp) {
            self.touched_at[invariant_id] = Some(timestamp);
            self.invariants.push(invariant_id);
        }
    }

    fn iter(&self) -> impl Iterator<Item = &InvariantId> {
        self.invariants.iter()
    }

    fn clear(&mut self) {
        self.invariants.clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Initial,
    Open,
    Closed,
}

/// An incremental propagation engine over integer variables and invariants.
///
/// The engine is built while it is open: variables, views and invariants are registered, and
/// each invariant declares which variables it reads and which it defines. [`Engine::close`]
/// freezes the resulting graph and computes a consistent initial assignment.
///
/// After closing, the engine is used in rounds:
/// - a move ([`Engine::begin_move`], [`Engine::set_value`], [`Engine::end_move`]) tentatively
///   assigns search variables;
/// - a probe ([`Engine::begin_probe`], [`Engine::query`], [`Engine::end_probe`]) propagates the
///   move far enough for the queried variables to be read with [`Engine::current_value`];
/// - a commit ([`Engine::begin_commit`], [`Engine::end_commit`]) propagates the move to every
///   affected variable and makes the result the new committed state.
///
/// A move which is never committed is discarded by starting the next move.
///
/// # Example
/// ```
/// # use ripple_core::Engine;
/// # use ripple_core::invariants::Linear;
/// let mut engine = Engine::default();
/// engine.open()?;
/// let a = engine.make_int_var(1, 0, 100)?;
/// let b = engine.make_int_var(2, 0, 100)?;
/// let sum = engine.make_int_var(0, 0, 0)?;
/// let _ = engine.make_invariant(Linear::new(vec![1, 10], vec![a.into(), b.into()], sum))?;
/// engine.close()?;
/// assert_eq!(engine.committed_value(sum), 21);
///
/// engine.begin_move()?;
/// engine.set_value(a, 5)?;
/// engine.end_move()?;
///
/// engine.begin_probe()?;
/// engine.query(sum)?;
/// engine.end_probe()?;
/// assert_eq!(engine.current_value(sum), 25);
/// assert_eq!(engine.committed_value(sum), 21);
/// # Ok::<(), ripple_core::EngineError>(())
/// ```
#[derive(Debug)]
pub struct Engine {
    options: EngineOptions,
    lifecycle: Lifecycle,
    round_state: RoundState,
    current_timestamp: Timestamp,

    store: Store,
    graph: PropagationGraph,
    queue: VariableQueue,
    explorer: OutputToInputExplorer,

    /// The search variables whose value at the current timestamp differs from the committed one.
    modified_search_vars: HashSet<VarId>,
    /// The variables queried in the current probe or commit.
    query_vars: Vec<VarId>,
    violation_vars: Vec<VarId>,
    touched_invariants: TouchedInvariants,
    /// For every variable popped this round, the value its listeners were last notified about.
    propagated_value: KeyedVec<VarId, i64>,
    /// The error which ended the current round, if any; the round can then no longer be probed
    /// or committed.
    round_error: Option<EngineError>,

    statistics: EngineStatistics,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(EngineOptions::default())
    }
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Engine {
            options,
            lifecycle: Lifecycle::Initial,
            round_state: RoundState::Idle,
            current_timestamp: Timestamp::default(),
            store: Store::default(),
            graph: PropagationGraph::default(),
            queue: VariableQueue::default(),
            explorer: OutputToInputExplorer::default(),
            modified_search_vars: HashSet::default(),
            query_vars: Vec::new(),
            violation_vars: Vec::new(),
            touched_invariants: TouchedInvariants::default(),
            propagated_value: KeyedVec::default(),
            round_error: None,
            statistics: EngineStatistics::default(),
        }
    }

    /// Allows variables, views and invariants to be registered.
    pub fn open(&mut self) -> Result<(), EngineError> {
        match self.lifecycle {
            Lifecycle::Initial => {
                debug!("opening engine");
                self.lifecycle = Lifecycle::Open;
                Ok(())
            }
            Lifecycle::Open => Err(EngineError::EngineAlreadyOpen),
            Lifecycle::Closed => Err(EngineError::GraphFrozen),
        }
    }

    /// Freezes the propagation graph and computes the initial values of all defined variables.
    ///
    /// Every invariant is recomputed, in topological order, and every changed variable is
    /// committed, until a pass changes nothing. If no such fixpoint is reached within
    /// `num_variables() + 1` passes the graph has a cycle without a stable assignment and
    /// [`EngineError::FailedToInitialise`] is returned.
    pub fn close(&mut self) -> Result<(), EngineError> {
        if self.lifecycle != Lifecycle::Open {
            return Err(EngineError::EngineNotOpen);
        }

        self.current_timestamp = self.current_timestamp.next();
        let timestamp = self.current_timestamp;
        debug!(
            "closing engine with {} variables, {} views and {} invariants",
            self.num_variables(),
            self.num_views(),
            self.num_invariants()
        );

        self.graph.close();
        let marking_mode = match self.options.propagation_mode {
            PropagationMode::InputToOutput => OutputToInputMarkingMode::None,
            PropagationMode::OutputToInput => self.options.marking_mode,
        };
        self.explorer.close(&self.graph, marking_mode);

        for invariant_id in self.store.invariants.keys() {
            self.store.close_invariant(timestamp, invariant_id);
        }

        self.lifecycle = Lifecycle::Closed;
        self.round_state = RoundState::Idle;

        self.initialise(timestamp)
    }

    fn initialise(&mut self, timestamp: Timestamp) -> Result<(), EngineError> {
        let max_passes = self.num_variables() as u64 + 1;
        let mut passes = 0;

        loop {
            passes += 1;
            if passes > max_passes {
                warn!("no stable initial assignment after {max_passes} passes");
                return Err(EngineError::FailedToInitialise);
            }

            for &invariant_id in self.graph.invariant_order() {
                self.store.recompute(timestamp, invariant_id);
            }

            let mut changed = false;
            for index in 0..self.store.variables.num_variables() {
                let var = self.store.variables.int_var_mut(VarId::create_from_index(index));
                if var.has_changed(timestamp) {
                    var.commit_if(timestamp);
                    changed = true;
                }
            }

            trace!("initialisation pass {passes} changed: {changed}");
            if !changed {
                break;
            }
        }

        self.statistics.num_initialisation_passes = passes;
        for invariant_id in self.store.invariants.keys() {
            self.store.commit_invariant(timestamp, invariant_id);
        }

        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle == Lifecycle::Open
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Can only be changed while the engine is open.
    pub fn set_propagation_mode(&mut self, mode: PropagationMode) -> Result<(), EngineError> {
        self.ensure_open()?;
        self.options.propagation_mode = mode;
        Ok(())
    }

    /// Can only be changed while the engine is open.
    pub fn set_output_to_input_marking_mode(
        &mut self,
        mode: OutputToInputMarkingMode,
    ) -> Result<(), EngineError> {
        self.ensure_open()?;
        self.options.marking_mode = mode;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), EngineError> {
        if self.lifecycle == Lifecycle::Open {
            Ok(())
        } else {
            Err(EngineError::EngineNotOpen)
        }
    }

    fn ensure_closed(&self) -> Result<(), EngineError> {
        if self.lifecycle == Lifecycle::Closed {
            Ok(())
        } else {
            Err(EngineError::EngineNotClosed)
        }
    }
}

/// Registration.
impl Engine {
    pub fn make_int_var(
        &mut self,
        initial_value: i64,
        lower_bound: i64,
        upper_bound: i64,
    ) -> Result<VarId, EngineError> {
        self.ensure_open()?;
        if lower_bound > upper_bound {
            return Err(EngineError::EmptyDomain {
                lower_bound,
                upper_bound,
            });
        }
        ripple_assert_moderate!(
            lower_bound <= initial_value && initial_value <= upper_bound,
            "initial value {initial_value} outside [{lower_bound}, {upper_bound}]"
        );

        let var = self.store.variables.create_int_var(
            self.current_timestamp,
            initial_value,
            lower_bound,
            upper_bound,
        );
        self.graph.register_var(var);
        self.queue.register_var(var);
        self.explorer.register_var(var);
        self.propagated_value.accomodate(var, initial_value);

        Ok(var)
    }

    /// Registers `view` on top of `parent`, which is either a variable or another view.
    pub fn make_int_view<V: IntView>(
        &mut self,
        parent: impl Into<VarViewId>,
        view: V,
    ) -> Result<VarViewId, EngineError> {
        self.ensure_open()?;
        let view_id = self.store.variables.create_view(parent.into(), Box::new(view));
        Ok(view_id.into())
    }

    /// Registers an invariant. Its variables are wired into the graph through
    /// [`Invariant::register_vars`], after which the bounds of its defined variables are computed.
    pub fn make_invariant<I: Invariant>(
        &mut self,
        invariant: I,
    ) -> Result<InvariantHandle<I>, EngineError> {
        self.ensure_open()?;

        let slot = self.store.invariants.new_slot();
        let invariant_id = slot.key();
        self.graph.register_invariant(invariant_id);
        self.explorer.register_invariant(invariant_id);
        self.touched_invariants.register_invariant(invariant_id);

        let mut invariant = invariant;
        let mut context =
            RegistrationContext::new(invariant_id, &mut self.graph, &self.store.variables);
        if let Err(error) = invariant.register_vars(&mut context) {
            self.graph.unregister_invariant(invariant_id);
            return Err(error);
        }
        trace!("registered {} as {invariant_id}", invariant.name());

        let _ = slot.populate(Box::new(invariant));
        let _ = self
            .store
            .update_bounds(self.current_timestamp, invariant_id, false);

        Ok(InvariantHandle::new(invariant_id))
    }

    /// Registers an invariant whose primary output is a violation, so that it is reported by
    /// [`Engine::violation_variables`].
    pub fn make_constraint<I: ViolationInvariant>(
        &mut self,
        invariant: I,
    ) -> Result<InvariantHandle<I>, EngineError> {
        let violation_id = invariant.violation_id();
        let handle = self.make_invariant(invariant)?;
        self.violation_vars.push(violation_id);
        Ok(handle)
    }

    /// Widens the bounds of every defined variable to cover what its invariant can produce.
    ///
    /// Invariants are processed in order of how many of their inputs are still uncomputed, so on
    /// an acyclic graph every invariant sees final input bounds after one pass. Passes are
    /// repeated, at most `num_variables()` times, until no bound moves.
    pub fn compute_bounds(&mut self) -> Result<(), EngineError> {
        self.ensure_open()?;

        let max_passes = self.num_variables().max(1);
        for pass in 1..=max_passes {
            if !self.compute_bounds_pass() {
                debug!("bounds stable after {pass} passes");
                break;
            }
        }

        Ok(())
    }

    /// Returns whether any bound moved.
    fn compute_bounds_pass(&mut self) -> bool {
        let num_invariants = self.store.num_invariants();
        let mut inputs_to_compute: Vec<usize> = (0..num_invariants)
            .map(|index| {
                self.graph
                    .input_vars(InvariantId::create_from_index(index))
                    .len()
            })
            .collect();

        for index in 0..self.graph.num_variables() {
            let var = VarId::create_from_index(index);
            if self.graph.is_search_var(var) {
                for listener in self.graph.listening_invariants(var) {
                    let remaining = &mut inputs_to_compute[listener.invariant_id.index()];
                    *remaining = remaining.saturating_sub(1);
                }
            }
        }

        let mut queue: BTreeSet<(usize, InvariantId)> = (0..num_invariants)
            .map(|index| (inputs_to_compute[index], InvariantId::create_from_index(index)))
            .collect();

        let mut changed = false;
        while let Some((_, invariant_id)) = queue.pop_first() {
            changed |= self
                .store
                .update_bounds(self.current_timestamp, invariant_id, true);

            for &defined_var in self.graph.defined_vars(invariant_id) {
                for listener in self.graph.listening_invariants(defined_var) {
                    let listener_index = listener.invariant_id.index();
                    let key = (inputs_to_compute[listener_index], listener.invariant_id);
                    if queue.remove(&key) {
                        inputs_to_compute[listener_index] =
                            inputs_to_compute[listener_index].saturating_sub(1);
                        let _ = queue
                            .insert((inputs_to_compute[listener_index], listener.invariant_id));
                    }
                }
            }
        }

        changed
    }

    /// Returns the invariant behind `handle`.
    pub fn invariant<I: Invariant>(&self, handle: InvariantHandle<I>) -> Option<&I> {
        self.store
            .invariants
            .get(handle.id())
            .and_then(|invariant| invariant.downcast_ref::<I>())
    }
}

/// The round protocol.
impl Engine {
    /// Starts a new move at a fresh timestamp, discarding any uncommitted changes.
    pub fn begin_move(&mut self) -> Result<(), EngineError> {
        self.transition("begin a move", RoundState::Idle, RoundState::Move)?;

        self.current_timestamp = self.current_timestamp.next();
        self.queue.clear();
        self.explorer.clear_round();
        self.modified_search_vars.clear();
        self.touched_invariants.clear();
        self.query_vars.clear();
        self.round_error = None;
        self.statistics.num_moves += 1;

        Ok(())
    }

    /// Tentatively assigns a search variable.
    pub fn set_value(&mut self, var: impl Into<VarViewId>, value: i64) -> Result<(), EngineError> {
        self.ensure_closed()?;
        self.ensure_state("set a value", RoundState::Move)?;

        let var = match var.into() {
            VarViewId::Var(var) => var,
            VarViewId::View(view) => return Err(EngineError::CannotSetView(view)),
        };
        if !self.graph.is_search_var(var) {
            return Err(EngineError::NotASearchVariable(var));
        }

        let timestamp = self.current_timestamp;
        let int_var = self.store.variables.int_var_mut(var);
        if !int_var.in_domain(value) {
            return Err(EngineError::ValueOutsideDomain {
                var,
                value,
                lower_bound: int_var.lower_bound(),
                upper_bound: int_var.upper_bound(),
            });
        }
        int_var.set_value(timestamp, value);
        let changed = int_var.has_changed(timestamp);

        let _ = self.queue.push(var, self.graph.position(var));
        if changed {
            let _ = self.modified_search_vars.insert(var);
        } else {
            let _ = self.modified_search_vars.remove(&var);
        }

        Ok(())
    }

    pub fn end_move(&mut self) -> Result<(), EngineError> {
        self.transition("end a move", RoundState::Move, RoundState::Idle)
    }

    pub fn begin_probe(&mut self) -> Result<(), EngineError> {
        self.transition("begin a probe", RoundState::Idle, RoundState::Probe)?;
        self.query_vars.clear();
        Ok(())
    }

    /// Requests that `var` is up to date once the probe or commit ends.
    pub fn query(&mut self, var: impl Into<VarViewId>) -> Result<(), EngineError> {
        self.ensure_closed()?;
        if !matches!(self.round_state, RoundState::Probe | RoundState::Commit) {
            return Err(EngineError::InvalidState {
                operation: "query",
                state: self.round_state,
            });
        }

        let source = self.store.variables.source_id(var.into());
        self.query_vars.push(source);
        Ok(())
    }

    /// Propagates the current move without committing it.
    ///
    /// Under input-to-output propagation every variable affected by the move is brought up to
    /// date; under output-to-input propagation only the queried variables and what they depend
    /// on.
    pub fn end_probe(&mut self) -> Result<(), EngineError> {
        self.ensure_closed()?;
        self.ensure_state("end a probe", RoundState::Probe)?;
        self.round_state = RoundState::Idle;

        let result = match self.options.propagation_mode {
            PropagationMode::InputToOutput => self.propagate_input_to_output(),
            PropagationMode::OutputToInput => self.explorer.propagate(
                self.current_timestamp,
                &self.query_vars,
                &self.modified_search_vars,
                &self.graph,
                &mut self.store,
                &mut self.statistics,
            ),
        };
        if let Err(error) = result {
            self.fail_round(error);
            return Err(error);
        }

        self.statistics.num_probes += 1;
        Ok(())
    }

    pub fn begin_commit(&mut self) -> Result<(), EngineError> {
        self.transition("begin a commit", RoundState::Idle, RoundState::Commit)?;
        self.query_vars.clear();
        Ok(())
    }

    /// Propagates the current move to every affected variable, in either propagation mode, and
    /// commits all variables and invariants that were updated.
    pub fn end_commit(&mut self) -> Result<(), EngineError> {
        self.ensure_closed()?;
        self.ensure_state("end a commit", RoundState::Commit)?;
        self.round_state = RoundState::Idle;

        if let Err(error) = self.propagate_input_to_output() {
            self.fail_round(error);
            return Err(error);
        }

        let timestamp = self.current_timestamp;
        for &var in self.queue.enqueued() {
            self.store.variables.int_var_mut(var).commit_if(timestamp);
        }
        ripple_assert_advanced!(self
            .queue
            .enqueued()
            .iter()
            .all(|&var| !self.store.variables.int_var(var).has_changed(timestamp)));

        for &invariant_id in self.explorer.evaluated_invariants() {
            self.touched_invariants.touch(invariant_id, timestamp);
        }
        for &invariant_id in self.touched_invariants.iter() {
            self.store.commit_invariant(timestamp, invariant_id);
        }

        self.modified_search_vars.clear();
        self.statistics.num_commits += 1;
        Ok(())
    }

    /// Evaluates every variable in the queue in topological order, notifying the listeners of
    /// each variable that changed and enqueueing what they define.
    ///
    /// A variable is popped again when an input behind a static cycle changes after it was first
    /// processed; its listeners are then told about the new value. Popping a variable more than
    /// `num_variables() + 1` times in one round means the cycle does not settle, which is reported
    /// as a dynamic cycle of its defining invariant.
    fn propagate_input_to_output(&mut self) -> Result<(), EngineError> {
        let timestamp = self.current_timestamp;
        let max_pops = self.num_variables() as u32 + 1;

        while let Some(var) = self.queue.pop() {
            self.statistics.num_dequeued_variables += 1;

            let times_popped = self.queue.times_popped(var);
            if let Some(invariant_id) = self.graph.defining_invariant(var) {
                if times_popped > max_pops {
                    warn!("{var} keeps changing at {timestamp}, {invariant_id} is on a live cycle");
                    return Err(EngineError::DynamicCycle {
                        invariant: invariant_id,
                    });
                }
                self.touched_invariants.touch(invariant_id, timestamp);
            }

            let int_var = self.store.variables.int_var(var);
            let value = int_var.value(timestamp);
            let previous_value = if times_popped == 1 {
                int_var.committed_value()
            } else {
                self.propagated_value[var]
            };
            self.propagated_value[var] = value;
            if value == previous_value {
                continue;
            }
            trace!("propagating {var} at {timestamp}");

            for &listener in self.graph.listening_invariants(var) {
                let invariant_id = listener.invariant_id;
                if !self.explorer.is_evaluated(invariant_id, timestamp) {
                    self.store
                        .notify_input_changed(timestamp, invariant_id, listener.local_id);
                    self.statistics.num_notifications += 1;
                }
                self.touched_invariants.touch(invariant_id, timestamp);

                for &defined_var in self.graph.defined_vars(invariant_id) {
                    let _ = self.queue.push(defined_var, self.graph.position(defined_var));
                }
            }
        }

        Ok(())
    }

    /// Discards the transient state of a round which raised `error`. Until the next move starts,
    /// the round can be neither probed nor committed.
    fn fail_round(&mut self, error: EngineError) {
        self.explorer.reset_stacks();
        self.round_error = Some(error);
    }

    fn transition(
        &mut self,
        operation: &'static str,
        from: RoundState,
        to: RoundState,
    ) -> Result<(), EngineError> {
        self.ensure_closed()?;
        self.ensure_state(operation, from)?;
        if matches!(to, RoundState::Probe | RoundState::Commit) {
            if let Some(error) = self.round_error {
                return Err(error);
            }
        }
        self.round_state = to;
        Ok(())
    }

    fn ensure_state(&self, operation: &'static str, expected: RoundState) -> Result<(), EngineError> {
        if self.round_state == expected {
            Ok(())
        } else {
            Err(EngineError::InvalidState {
                operation,
                state: self.round_state,
            })
        }
    }

    pub fn round_state(&self) -> RoundState {
        self.round_state
    }
}

/// Introspection.
impl Engine {
    pub fn current_timestamp(&self) -> Timestamp {
        self.current_timestamp
    }

    pub fn value(&self, timestamp: Timestamp, var: impl Into<VarViewId>) -> i64 {
        self.store.variables.value(timestamp, var.into())
    }

    /// The value of `var` at the current timestamp.
    pub fn current_value(&self, var: impl Into<VarViewId>) -> i64 {
        self.value(self.current_timestamp, var)
    }

    pub fn committed_value(&self, var: impl Into<VarViewId>) -> i64 {
        self.store.variables.committed_value(var.into())
    }

    pub fn lower_bound(&self, var: impl Into<VarViewId>) -> i64 {
        self.store.variables.lower_bound(var.into())
    }

    pub fn upper_bound(&self, var: impl Into<VarViewId>) -> i64 {
        self.store.variables.upper_bound(var.into())
    }

    pub fn has_changed(&self, timestamp: Timestamp, var: impl Into<VarViewId>) -> bool {
        self.store.variables.has_changed(timestamp, var.into())
    }

    pub fn update_bounds(
        &mut self,
        var: VarId,
        lower_bound: i64,
        upper_bound: i64,
        widen_only: bool,
    ) {
        let _ = self
            .store
            .variables
            .int_var_mut(var)
            .update_bounds(lower_bound, upper_bound, widen_only);
    }

    pub fn num_variables(&self) -> usize {
        self.store.variables.num_variables()
    }

    pub fn num_views(&self) -> usize {
        self.store.variables.num_views()
    }

    pub fn num_invariants(&self) -> usize {
        self.store.num_invariants()
    }

    /// The variables without a defining invariant. Only available once the engine is closed.
    pub fn search_variables(&self) -> &[VarId] {
        self.graph.search_vars()
    }

    /// The variables no invariant reads. Only available once the engine is closed.
    pub fn evaluation_variables(&self) -> &[VarId] {
        self.graph.evaluation_vars()
    }

    /// The violation variables of every invariant registered through [`Engine::make_constraint`].
    pub fn violation_variables(&self) -> &[VarId] {
        &self.violation_vars
    }

    pub fn defining_invariant(&self, var: VarId) -> Option<InvariantId> {
        self.graph.defining_invariant(var)
    }

    pub fn listening_invariants(&self, var: VarId) -> &[ListeningInvariant] {
        self.graph.listening_invariants(var)
    }

    pub fn variables_defined_by(&self, invariant_id: InvariantId) -> &[VarId] {
        self.graph.defined_vars(invariant_id)
    }

    pub fn input_variables(&self, invariant_id: InvariantId) -> &[VarId] {
        self.graph.input_vars(invariant_id)
    }

    pub fn statistics(&self) -> EngineStatistics {
        self.statistics
    }

    /// Writes the statistics of the engine if statistic logging has been configured.
    pub fn log_statistics(&self) {
        if should_log_statistics() {
            self.statistics.log(StatisticLogger::new(["engine"]));
            log_statistic_postfix();
        }
    }
}

/// Direct access to the invariant contract, bypassing the round protocol.
///
/// These drive a single invariant at an arbitrary timestamp and are meant for testing invariants
/// in isolation; nothing is enqueued or committed implicitly.
impl Engine {
    /// Writes any stored variable at `timestamp`.
    pub fn set_value_at(&mut self, timestamp: Timestamp, var: VarId, value: i64) {
        self.store
            .variables
            .int_var_mut(var)
            .set_value(timestamp, value);
    }

    pub fn commit_if(&mut self, timestamp: Timestamp, var: VarId) {
        self.store.variables.int_var_mut(var).commit_if(timestamp);
    }

    pub fn recompute(&mut self, timestamp: Timestamp, invariant_id: InvariantId) {
        self.store.recompute(timestamp, invariant_id);
    }

    pub fn notify_input_changed(
        &mut self,
        timestamp: Timestamp,
        invariant_id: InvariantId,
        local_id: LocalId,
    ) {
        self.store
            .notify_input_changed(timestamp, invariant_id, local_id);
    }

    pub fn next_input(
        &mut self,
        timestamp: Timestamp,
        invariant_id: InvariantId,
    ) -> Option<VarViewId> {
        self.store.next_input(timestamp, invariant_id)
    }

    pub fn notify_current_input_changed(&mut self, timestamp: Timestamp, invariant_id: InvariantId) {
        self.store
            .notify_current_input_changed(timestamp, invariant_id);
    }

    pub fn commit_invariant(&mut self, timestamp: Timestamp, invariant_id: InvariantId) {
        self.store.commit_invariant(timestamp, invariant_id);
    }
}
