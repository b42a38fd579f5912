#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::cell::Cell;
use std::rc::Rc;

use ripple_core::invariants::InputCursor;
use ripple_core::invariants::Invariant;
use ripple_core::invariants::InvariantContext;
use ripple_core::invariants::InvariantHandle;
use ripple_core::invariants::RegistrationContext;
use ripple_core::Engine;
use ripple_core::EngineError;
use ripple_core::EngineOptions;
use ripple_core::LocalId;
use ripple_core::PropagationMode;
use ripple_core::Timestamp;
use ripple_core::VarId;
use ripple_core::VarViewId;

/// Counts how often the engine drives each part of the contract.
#[derive(Debug, Default)]
struct Calls {
    recompute: Cell<usize>,
    notify_input_changed: Cell<usize>,
    next_input: Cell<usize>,
    notify_current_input_changed: Cell<usize>,
    commit: Cell<usize>,
}

impl Calls {
    fn notifications(&self) -> usize {
        self.notify_input_changed.get() + self.notify_current_input_changed.get()
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

/// Copies its input to its output.
#[derive(Debug)]
struct Forward {
    input: VarId,
    output: VarId,
    cursor: InputCursor,
    calls: Rc<Calls>,
    last_commit: Option<Timestamp>,
}

impl Forward {
    fn new(input: VarId, output: VarId, calls: Rc<Calls>) -> Self {
        Forward {
            input,
            output,
            cursor: InputCursor::default(),
            calls,
            last_commit: None,
        }
    }
}

impl Invariant for Forward {
    fn name(&self) -> &str {
        "Forward"
    }

    fn register_vars(&mut self, context: &mut RegistrationContext<'_>) -> Result<(), EngineError> {
        context.register_input(self.input, LocalId::from(0));
        context.register_defined_var(self.output)
    }

    fn update_bounds(&mut self, context: &mut InvariantContext<'_>, widen_only: bool) {
        let lower_bound = context.lower_bound(self.input);
        let upper_bound = context.upper_bound(self.input);
        context.update_bounds(self.output, lower_bound, upper_bound, widen_only);
    }

    fn recompute(&mut self, context: &mut InvariantContext<'_>) {
        bump(&self.calls.recompute);
        let value = context.value(self.input);
        context.set_value(self.output, value);
    }

    fn notify_input_changed(&mut self, context: &mut InvariantContext<'_>, _local_id: LocalId) {
        bump(&self.calls.notify_input_changed);
        let value = context.value(self.input);
        context.set_value(self.output, value);
    }

    fn next_input(&mut self, context: &mut InvariantContext<'_>) -> Option<VarViewId> {
        bump(&self.calls.next_input);
        (self.cursor.advance(context.timestamp()) == 0).then_some(self.input.into())
    }

    fn notify_current_input_changed(&mut self, context: &mut InvariantContext<'_>) {
        bump(&self.calls.notify_current_input_changed);
        let value = context.value(self.input);
        context.set_value(self.output, value);
    }

    fn commit(&mut self, timestamp: Timestamp) {
        bump(&self.calls.commit);
        self.last_commit = Some(timestamp);
    }
}

struct Chain {
    engine: Engine,
    source: VarId,
    middle: VarId,
    sink: VarId,
    first: InvariantHandle<Forward>,
    first_calls: Rc<Calls>,
    second_calls: Rc<Calls>,
}

/// `source -> middle -> sink`, each step a [`Forward`].
fn chain(propagation_mode: PropagationMode) -> Chain {
    let mut engine = Engine::new(EngineOptions {
        propagation_mode,
        ..Default::default()
    });
    engine.open().expect("fresh engine");
    let source = engine.make_int_var(1, 0, 10).expect("non-empty domain");
    let middle = engine.make_int_var(0, 0, 0).expect("non-empty domain");
    let sink = engine.make_int_var(0, 0, 0).expect("non-empty domain");

    let first_calls = Rc::new(Calls::default());
    let second_calls = Rc::new(Calls::default());
    let first = engine
        .make_invariant(Forward::new(source, middle, Rc::clone(&first_calls)))
        .expect("fresh output");
    let _ = engine
        .make_invariant(Forward::new(middle, sink, Rc::clone(&second_calls)))
        .expect("fresh output");
    engine.close().expect("acyclic");

    Chain {
        engine,
        source,
        middle,
        sink,
        first,
        first_calls,
        second_calls,
    }
}

fn move_source(engine: &mut Engine, source: VarId, value: i64) {
    engine.begin_move().expect("idle");
    engine.set_value(source, value).expect("search variable");
    engine.end_move().expect("moving");
}

#[test]
fn close_initialises_and_commits_every_invariant() {
    let Chain {
        engine,
        sink,
        first,
        first_calls,
        second_calls,
        ..
    } = chain(PropagationMode::InputToOutput);

    assert_eq!(engine.committed_value(sink), 1);
    assert!(first_calls.recompute.get() >= 1);
    assert_eq!(first_calls.commit.get(), 1);
    assert_eq!(second_calls.commit.get(), 1);
    assert_eq!(
        engine.invariant(first).expect("registered").last_commit,
        Some(engine.current_timestamp())
    );
    assert_eq!(first_calls.notifications(), 0);
}

#[test]
fn eager_probe_notifies_each_invariant_once() {
    let Chain {
        mut engine,
        source,
        sink,
        first_calls,
        second_calls,
        ..
    } = chain(PropagationMode::InputToOutput);

    move_source(&mut engine, source, 4);
    engine.begin_probe().expect("idle");
    engine.query(sink).expect("probing");
    engine.end_probe().expect("acyclic");

    assert_eq!(engine.current_value(sink), 4);
    assert_eq!(first_calls.notify_input_changed.get(), 1);
    assert_eq!(second_calls.notify_input_changed.get(), 1);
    assert_eq!(first_calls.next_input.get(), 0);

    engine.begin_commit().expect("idle");
    engine.end_commit().expect("acyclic");

    assert_eq!(first_calls.notifications(), 1);
    assert_eq!(second_calls.notifications(), 1);
    assert_eq!(first_calls.commit.get(), 2);
    assert_eq!(second_calls.commit.get(), 2);
}

#[test]
fn an_unchanged_move_notifies_nobody() {
    let Chain {
        mut engine,
        source,
        sink,
        first_calls,
        ..
    } = chain(PropagationMode::InputToOutput);

    move_source(&mut engine, source, 1);
    engine.begin_probe().expect("idle");
    engine.query(sink).expect("probing");
    engine.end_probe().expect("acyclic");

    assert_eq!(first_calls.notifications(), 0);
}

#[test]
fn lazy_probe_only_explores_what_is_queried() {
    let Chain {
        mut engine,
        source,
        middle,
        sink,
        first_calls,
        second_calls,
        ..
    } = chain(PropagationMode::OutputToInput);

    move_source(&mut engine, source, 6);
    engine.begin_probe().expect("idle");
    engine.query(middle).expect("probing");
    engine.end_probe().expect("acyclic");

    assert_eq!(engine.current_value(middle), 6);
    assert_eq!(first_calls.notify_current_input_changed.get(), 1);
    assert_eq!(second_calls.next_input.get(), 0);
    assert_eq!(engine.current_value(sink), 1);
}

#[test]
fn lazy_commit_does_not_notify_evaluated_invariants_again() {
    let Chain {
        mut engine,
        source,
        middle,
        sink,
        first_calls,
        second_calls,
        ..
    } = chain(PropagationMode::OutputToInput);

    move_source(&mut engine, source, 6);
    engine.begin_probe().expect("idle");
    engine.query(middle).expect("probing");
    engine.end_probe().expect("acyclic");
    engine.begin_commit().expect("idle");
    engine.end_commit().expect("acyclic");

    assert_eq!(first_calls.notifications(), 1);
    assert_eq!(second_calls.notifications(), 1);
    assert_eq!(engine.committed_value(middle), 6);
    assert_eq!(engine.committed_value(sink), 6);
    assert_eq!(second_calls.commit.get(), 2);
}
