#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use ripple_core::invariants::Linear;
use ripple_core::views::IntOffsetView;
use ripple_core::Engine;
use ripple_core::EngineError;
use ripple_core::OutputToInputMarkingMode;
use ripple_core::PropagationMode;
use ripple_core::RoundState;
use ripple_core::VarId;

fn doubling_engine() -> (Engine, VarId, VarId) {
    let mut engine = Engine::default();
    engine.open().expect("fresh engine");
    let x = engine.make_int_var(3, 0, 10).expect("non-empty domain");
    let doubled = engine.make_int_var(0, 0, 0).expect("non-empty domain");
    let _ = engine
        .make_invariant(Linear::new(vec![2], vec![x.into()], doubled))
        .expect("fresh output");
    engine.close().expect("acyclic");
    (engine, x, doubled)
}

#[test]
fn lifecycle_is_initial_open_closed() {
    let mut engine = Engine::default();
    assert!(!engine.is_open());
    assert_eq!(engine.make_int_var(0, 0, 1), Err(EngineError::EngineNotOpen));
    assert_eq!(engine.close(), Err(EngineError::EngineNotOpen));
    assert_eq!(engine.begin_move(), Err(EngineError::EngineNotClosed));

    engine.open().expect("fresh engine");
    assert!(engine.is_open());
    assert_eq!(engine.open(), Err(EngineError::EngineAlreadyOpen));
    assert_eq!(engine.begin_probe(), Err(EngineError::EngineNotClosed));

    engine.close().expect("empty graph");
    assert!(!engine.is_open());
    assert_eq!(engine.open(), Err(EngineError::GraphFrozen));
    assert_eq!(engine.make_int_var(0, 0, 1), Err(EngineError::EngineNotOpen));
    assert_eq!(
        engine.set_propagation_mode(PropagationMode::OutputToInput),
        Err(EngineError::EngineNotOpen)
    );
}

#[test]
fn modes_can_be_changed_while_open() {
    let mut engine = Engine::default();
    engine.open().expect("fresh engine");
    engine
        .set_propagation_mode(PropagationMode::OutputToInput)
        .expect("open");
    engine
        .set_output_to_input_marking_mode(OutputToInputMarkingMode::OutputToInputStatic)
        .expect("open");

    assert_eq!(engine.options().propagation_mode, PropagationMode::OutputToInput);
    assert_eq!(
        engine.options().marking_mode,
        OutputToInputMarkingMode::OutputToInputStatic
    );
}

#[test]
fn an_empty_domain_is_rejected() {
    let mut engine = Engine::default();
    engine.open().expect("fresh engine");

    assert_eq!(
        engine.make_int_var(0, 5, 4),
        Err(EngineError::EmptyDomain {
            lower_bound: 5,
            upper_bound: 4
        })
    );
}

#[test]
fn a_variable_is_defined_at_most_once() {
    let mut engine = Engine::default();
    engine.open().expect("fresh engine");
    let x = engine.make_int_var(0, 0, 10).expect("non-empty domain");
    let y = engine.make_int_var(0, 0, 10).expect("non-empty domain");
    let first = engine
        .make_invariant(Linear::sum(vec![x.into()], y))
        .expect("fresh output");

    let result = engine.make_invariant(Linear::sum(vec![x.into()], y));

    assert_eq!(
        result.map(|handle| handle.id()),
        Err(EngineError::VarAlreadyDefined {
            var: y,
            defined_by: first.id()
        })
    );
}

#[test]
fn phases_must_be_nested_correctly() {
    let (mut engine, x, doubled) = doubling_engine();

    assert_eq!(
        engine.set_value(x, 1),
        Err(EngineError::InvalidState {
            operation: "set a value",
            state: RoundState::Idle
        })
    );
    assert_eq!(
        engine.end_move(),
        Err(EngineError::InvalidState {
            operation: "end a move",
            state: RoundState::Idle
        })
    );

    engine.begin_move().expect("idle");
    assert_eq!(
        engine.begin_move(),
        Err(EngineError::InvalidState {
            operation: "begin a move",
            state: RoundState::Move
        })
    );
    assert_eq!(
        engine.query(doubled),
        Err(EngineError::InvalidState {
            operation: "query",
            state: RoundState::Move
        })
    );
    assert_eq!(engine.round_state(), RoundState::Move);
    engine.end_move().expect("moving");

    engine.begin_probe().expect("idle");
    assert_eq!(
        engine.begin_commit(),
        Err(EngineError::InvalidState {
            operation: "begin a commit",
            state: RoundState::Probe
        })
    );
    assert_eq!(
        engine.end_commit(),
        Err(EngineError::InvalidState {
            operation: "end a commit",
            state: RoundState::Probe
        })
    );
    engine.end_probe().expect("probing");
    assert_eq!(engine.round_state(), RoundState::Idle);
}

#[test]
fn only_search_variables_can_be_assigned() {
    let mut engine = Engine::default();
    engine.open().expect("fresh engine");
    let x = engine.make_int_var(3, 0, 10).expect("non-empty domain");
    let y = engine.make_int_var(0, 0, 0).expect("non-empty domain");
    let shifted = engine
        .make_int_view(x, IntOffsetView::new(1))
        .expect("open");
    let _ = engine
        .make_invariant(Linear::sum(vec![shifted], y))
        .expect("fresh output");
    engine.close().expect("acyclic");

    engine.begin_move().expect("idle");
    assert_eq!(engine.set_value(y, 1), Err(EngineError::NotASearchVariable(y)));
    let view = match shifted {
        ripple_core::VarViewId::View(view) => view,
        ripple_core::VarViewId::Var(_) => unreachable!("views get view ids"),
    };
    assert_eq!(engine.set_value(shifted, 1), Err(EngineError::CannotSetView(view)));
}

#[test]
fn moves_are_tentative_until_committed() {
    let (mut engine, x, doubled) = doubling_engine();
    assert_eq!(engine.committed_value(doubled), 6);

    engine.begin_move().expect("idle");
    engine.set_value(x, 5).expect("search variable");
    engine.end_move().expect("moving");
    engine.begin_probe().expect("idle");
    engine.query(doubled).expect("probing");
    engine.end_probe().expect("acyclic");
    assert_eq!(engine.current_value(doubled), 10);
    assert_eq!(engine.committed_value(doubled), 6);

    // a new move forgets the uncommitted one
    engine.begin_move().expect("idle");
    engine.end_move().expect("moving");
    assert_eq!(engine.current_value(x), 3);
    assert_eq!(engine.current_value(doubled), 6);

    engine.begin_move().expect("idle");
    engine.set_value(x, 7).expect("search variable");
    engine.end_move().expect("moving");
    engine.begin_commit().expect("idle");
    engine.end_commit().expect("acyclic");
    assert_eq!(engine.committed_value(x), 7);
    assert_eq!(engine.committed_value(doubled), 14);
}

#[test]
fn timestamps_only_advance_on_close_and_move() {
    let mut engine = Engine::default();
    engine.open().expect("fresh engine");
    let before_close = engine.current_timestamp();
    engine.close().expect("empty graph");
    let after_close = engine.current_timestamp();
    assert!(after_close > before_close);

    engine.begin_move().expect("idle");
    let move_timestamp = engine.current_timestamp();
    assert_eq!(move_timestamp, after_close.next());
    engine.end_move().expect("moving");
    engine.begin_probe().expect("idle");
    engine.end_probe().expect("nothing to propagate");
    engine.begin_commit().expect("idle");
    engine.end_commit().expect("nothing to propagate");

    assert_eq!(engine.current_timestamp(), move_timestamp);
}

#[test]
fn statistics_count_rounds() {
    let (mut engine, x, doubled) = doubling_engine();
    assert_eq!(engine.statistics().num_initialisation_passes, 2);

    for value in [4, 5] {
        engine.begin_move().expect("idle");
        engine.set_value(x, value).expect("search variable");
        engine.end_move().expect("moving");
        engine.begin_probe().expect("idle");
        engine.query(doubled).expect("probing");
        engine.end_probe().expect("acyclic");
    }
    engine.begin_commit().expect("idle");
    engine.end_commit().expect("acyclic");

    let statistics = engine.statistics();
    assert_eq!(statistics.num_moves, 2);
    assert_eq!(statistics.num_probes, 2);
    assert_eq!(statistics.num_commits, 1);
    assert_eq!(statistics.num_notifications, 2);
    assert_eq!(engine.committed_value(doubled), 10);
}

#[test]
fn introspection_reports_the_graph() {
    let (engine, x, doubled) = doubling_engine();

    assert_eq!(engine.num_variables(), 2);
    assert_eq!(engine.num_views(), 0);
    assert_eq!(engine.num_invariants(), 1);

    let invariant = engine.defining_invariant(doubled).expect("defined");
    assert_eq!(engine.defining_invariant(x), None);
    assert_eq!(engine.variables_defined_by(invariant), &[doubled]);
    assert_eq!(engine.input_variables(invariant), &[x]);
    assert_eq!(engine.listening_invariants(x).len(), 1);
    assert_eq!(engine.listening_invariants(x)[0].invariant_id, invariant);
    assert_eq!(engine.lower_bound(doubled), 0);
    assert_eq!(engine.upper_bound(doubled), 20);
}

#[test]
fn values_outside_the_domain_are_rejected() {
    let (mut engine, x, doubled) = doubling_engine();

    engine.begin_move().expect("idle");
    assert_eq!(
        engine.set_value(x, 11),
        Err(EngineError::ValueOutsideDomain {
            var: x,
            value: 11,
            lower_bound: 0,
            upper_bound: 10
        })
    );
    engine.end_move().expect("moving");
    engine.begin_commit().expect("idle");
    engine.end_commit().expect("acyclic");

    assert_eq!(engine.committed_value(x), 3);
    assert_eq!(engine.committed_value(doubled), 6);
}

#[test]
fn a_failed_registration_leaves_no_edges_behind() {
    let mut engine = Engine::default();
    engine.open().expect("fresh engine");
    let x = engine.make_int_var(1, 0, 10).expect("non-empty domain");
    let y = engine.make_int_var(0, 0, 0).expect("non-empty domain");
    let z = engine.make_int_var(2, 0, 10).expect("non-empty domain");
    let w = engine.make_int_var(0, 0, 0).expect("non-empty domain");
    let _ = engine
        .make_invariant(Linear::sum(vec![x.into()], y))
        .expect("fresh output");

    let result = engine.make_invariant(Linear::sum(vec![x.into(), z.into()], y));
    assert!(matches!(result, Err(EngineError::VarAlreadyDefined { .. })));
    assert_eq!(engine.num_invariants(), 1);
    assert_eq!(engine.listening_invariants(x).len(), 1);
    assert!(engine.listening_invariants(z).is_empty());

    let tripled = engine
        .make_invariant(Linear::new(vec![3], vec![z.into()], w))
        .expect("fresh output");
    assert_eq!(engine.input_variables(tripled.id()), &[z]);
    assert_eq!(engine.variables_defined_by(tripled.id()), &[w]);
    engine.close().expect("acyclic");

    assert_eq!(engine.committed_value(y), 1);
    assert_eq!(engine.committed_value(w), 6);
    assert_eq!(engine.listening_invariants(z).len(), 1);
}
