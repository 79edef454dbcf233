// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests for the mark phase and the structural mutations.

#![allow(missing_docs)]

mod common;

use common::{arb_graph, assert_no_dangling, dead_cells, reachable_by_fixpoint};
use proptest::prelude::*;
use proptest::test_runner::{Config, RngAlgorithm, TestRng, TestRunner};
use sweep_core::{
    classify, delete, nullify_outgoing, GameConfig, GameState, Intent, MemoryStatus, NodeKind,
    Outcome, Phase, Rejection,
};

proptest! {
    #[test]
    fn classification_is_idempotent(graph in arb_graph()) {
        let first = graph.classify();
        let second = graph.classify();
        prop_assert_eq!(&first, &second);

        let mut again = graph.clone();
        again.reclassify();
        prop_assert_eq!(again.canonical_state_hash(), graph.canonical_state_hash());
    }

    #[test]
    fn active_iff_reachable_from_a_root(graph in arb_graph()) {
        let reachable = reachable_by_fixpoint(&graph);
        for node in graph.objects() {
            prop_assert_eq!(
                node.status == MemoryStatus::Active,
                reachable.contains(&node.id),
                "cell {}", node.id
            );
            if node.is_root {
                prop_assert_eq!(node.status, MemoryStatus::Active);
            }
        }
    }

    #[test]
    fn free_iff_empty(graph in arb_graph()) {
        for node in graph.iter_nodes() {
            prop_assert_eq!(node.status == MemoryStatus::Free, node.kind == NodeKind::Empty);
        }
        let statuses = classify(graph.nodes(), graph.edges());
        prop_assert_eq!(statuses.len(), graph.capacity());
    }

    #[test]
    fn freeing_never_leaves_dangling_edges(graph in arb_graph()) {
        for cell in dead_cells(&graph) {
            match delete(&graph, cell) {
                Ok(Some(freed)) => {
                    assert_no_dangling(&freed.graph);
                    prop_assert_eq!(freed.graph.object_count() + 1, graph.object_count());
                    prop_assert_eq!(
                        freed.graph.node(&cell).map(|n| n.status),
                        Some(MemoryStatus::Free)
                    );
                }
                Ok(None) => prop_assert!(false, "dead object {} treated as empty", cell),
                Err(_) => prop_assert!(graph.incoming_count(cell) > 0),
            }
        }
    }

    #[test]
    fn nullifying_garbage_never_changes_liveness(graph in arb_graph()) {
        for cell in dead_cells(&graph) {
            if let Ok(Some(nullified)) = nullify_outgoing(&graph, cell) {
                let recomputed = nullified.graph.classify();
                for node in nullified.graph.iter_nodes() {
                    prop_assert_eq!(recomputed.get(&node.id), Some(&node.status));
                }
                prop_assert_eq!(nullified.graph.outgoing_count(cell), 0);
            }
        }
    }

    #[test]
    fn refused_actions_keep_the_published_graph(graph in arb_graph()) {
        let config = GameConfig::default();
        let state = GameState::from_graph(&config, graph, Phase::Running, 0);
        let before = state.graph().canonical_state_hash();

        for cell in dead_cells(state.graph()) {
            let incoming = state.graph().incoming_count(cell);
            if incoming == 0 {
                continue;
            }
            let transition = state.apply(&config, Intent::ActivateCell(cell));
            prop_assert_eq!(
                transition.outcome,
                Outcome::Rejected(Rejection::ReferencedDelete { cell, incoming })
            );
            prop_assert_eq!(transition.state.graph().canonical_state_hash(), before);
            prop_assert_eq!(transition.state.score(), state.score());
            prop_assert!(!transition.state.is_game_over());
        }

        for cell in state.graph().active_objects() {
            let transition = state.apply(&config, Intent::SecondaryActivateCell(cell));
            prop_assert_eq!(
                transition.outcome,
                Outcome::Rejected(Rejection::IllegalMutateActive(cell))
            );
            prop_assert_eq!(transition.state.graph().canonical_state_hash(), before);
        }
    }
}

#[test]
fn pinned_seed_replay_agrees_with_fixpoint() {
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &[7u8; 32]);
    let mut runner = TestRunner::new_with_rng(Config::with_cases(64), rng);
    runner
        .run(&arb_graph(), |graph| {
            let reachable = reachable_by_fixpoint(&graph);
            let active: std::collections::BTreeSet<_> =
                graph.active_objects().into_iter().collect();
            prop_assert_eq!(active, reachable);
            Ok(())
        })
        .expect("property holds for pinned seed");
}
