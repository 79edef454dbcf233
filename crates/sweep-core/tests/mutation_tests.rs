// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Player actions against hand-built heaps.

#![allow(missing_docs)]

mod common;

use common::assert_no_dangling;
use sweep_core::{
    coordinate_id, delete, nullify_outgoing, Fault, GameConfig, GameMachine, GameState,
    MemoryStatus, MutationError, Outcome, Phase, Rejection,
};
use sweep_dry_tests::{GraphBuilder, ScriptedRandom};

fn machine(state: GameState) -> GameMachine<ScriptedRandom> {
    GameMachine::from_state(GameConfig::default(), ScriptedRandom::new(), state)
}

#[test]
fn freeing_a_reachable_object_is_fatal() {
    let config = GameConfig::default();
    let state = GraphBuilder::new(6)
        .root((0, 0))
        .object((0, 1))
        .edge((0, 0), (0, 1))
        .running(&config);
    let b = coordinate_id(0, 1);
    assert_eq!(
        state.graph().node(&b).map(|n| n.status),
        Some(MemoryStatus::Active)
    );

    let mut machine = machine(state);
    let outcome = machine.apply(sweep_core::Intent::ActivateCell(b));

    assert_eq!(outcome, Outcome::Faulted(Fault::UseAfterFree(b)));
    assert!(machine.state().is_game_over());
    assert_eq!(machine.state().score(), 0);
    assert_eq!(machine.state().graph().object_count(), 2);
    assert_eq!(
        machine.state().log().latest(),
        Some("SEGFAULT: Accessed Active Object 0-1")
    );
    assert!(!machine.should_tick());
}

#[test]
fn referenced_garbage_needs_nullify_before_free() {
    let config = GameConfig::default();
    let state = GraphBuilder::new(6)
        .object((1, 0))
        .object((1, 1))
        .edge((1, 0), (1, 1))
        .running(&config);
    let (d, c) = (coordinate_id(1, 0), coordinate_id(1, 1));
    let mut machine = machine(state);
    let before = machine.state().graph().canonical_state_hash();

    let refused = machine.apply(sweep_core::Intent::ActivateCell(c));
    assert_eq!(
        refused,
        Outcome::Rejected(Rejection::ReferencedDelete {
            cell: c,
            incoming: 1
        })
    );
    assert_eq!(machine.state().graph().canonical_state_hash(), before);
    assert_eq!(machine.phase(), Phase::Running);

    let nullified = machine.apply(sweep_core::Intent::SecondaryActivateCell(d));
    assert_eq!(
        nullified,
        Outcome::Nullified {
            cell: d,
            edges_removed: 1
        }
    );
    let graph = machine.state().graph();
    assert_eq!(graph.node(&c).map(|n| n.status), Some(MemoryStatus::Dead));
    assert_eq!(graph.incoming_count(c), 0);
    assert_eq!(
        machine.state().log().latest(),
        Some("Nullified pointers from 1-0")
    );

    let freed = machine.apply(sweep_core::Intent::ActivateCell(c));
    assert_eq!(
        freed,
        Outcome::Freed {
            cell: c,
            edges_removed: 0
        }
    );
    let state = machine.state();
    assert_eq!(state.score(), 100);
    assert_eq!(state.reclaimed_kb(&config), 6400);
    assert_eq!(
        state.graph().node(&c).map(|n| n.status),
        Some(MemoryStatus::Free)
    );
    assert_eq!(state.memory_usage(), 2);
    assert_eq!(state.log().latest(), Some("Freed 64KB at 1-1"));
}

#[test]
fn freeing_cascades_outgoing_references() {
    let graph = GraphBuilder::new(6)
        .object((2, 0))
        .object((2, 1))
        .object((2, 2))
        .edge((2, 0), (2, 1))
        .edge((2, 0), (2, 2))
        .build();
    let freed = delete(&graph, coordinate_id(2, 0))
        .expect("unreferenced garbage")
        .expect("object present");
    assert_eq!(freed.edges_removed, 2);
    assert!(freed.graph.edges().is_empty());
    assert_no_dangling(&freed.graph);
}

#[test]
fn live_objects_cannot_be_nullified() {
    let config = GameConfig::default();
    let state = GraphBuilder::new(6).root((3, 3)).running(&config);
    let root = coordinate_id(3, 3);
    let mut machine = machine(state);
    let before = machine.state().graph().canonical_state_hash();

    // Refused even without outgoing references.
    let outcome = machine.apply(sweep_core::Intent::SecondaryActivateCell(root));
    assert_eq!(outcome, Outcome::Rejected(Rejection::IllegalMutateActive(root)));
    assert_eq!(
        machine.state().log().latest(),
        Some("ERROR: Cannot modify Active Object 3-3")
    );
    assert_eq!(machine.state().graph().canonical_state_hash(), before);
    assert_eq!(machine.phase(), Phase::Running);
}

#[test]
fn no_ops_leave_state_and_log_alone() {
    let config = GameConfig::default();
    let state = GraphBuilder::new(6).object((0, 0)).running(&config);
    let mut machine = machine(state.clone());

    for intent in [
        sweep_core::Intent::ActivateCell(coordinate_id(5, 5)),
        sweep_core::Intent::SecondaryActivateCell(coordinate_id(5, 5)),
        sweep_core::Intent::SecondaryActivateCell(coordinate_id(0, 0)),
        sweep_core::Intent::ActivateCell(coordinate_id(40, 40)),
    ] {
        assert_eq!(machine.apply(intent), Outcome::Ignored, "{intent:?}");
    }
    assert_eq!(machine.state(), &state);
}

#[test]
fn engine_results_distinguish_faults_from_rejections() {
    let graph = GraphBuilder::new(6)
        .root((0, 0))
        .object((0, 1))
        .object((0, 2))
        .edge((0, 0), (0, 1))
        .edge((0, 2), (0, 1))
        .build();
    assert!(matches!(
        delete(&graph, coordinate_id(0, 1)),
        Err(MutationError::Fault(Fault::UseAfterFree(_)))
    ));
    assert_eq!(
        nullify_outgoing(&graph, coordinate_id(0, 0)).err(),
        Some(Rejection::IllegalMutateActive(coordinate_id(0, 0)))
    );
    // DEAD source with an edge into live memory: nullify is allowed.
    let nullified = nullify_outgoing(&graph, coordinate_id(0, 2))
        .expect("dead source")
        .expect("has references");
    assert_eq!(nullified.edges_removed, 1);
    assert_eq!(
        nullified.graph.node(&coordinate_id(0, 1)).map(|n| n.status),
        Some(MemoryStatus::Active)
    );
}
