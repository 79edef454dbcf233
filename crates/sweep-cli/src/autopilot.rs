// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Built-in collector used by `--autopilot`.

use sweep_core::{HeapGraph, Intent};

/// Picks the next collector action for `graph`.
///
/// Frees the first unreferenced DEAD object in row-major order; failing that,
/// nullifies the first DEAD object that still holds references. ACTIVE objects
/// are never touched, so the collector cannot fault or be refused.
pub(crate) fn next_intent(graph: &HeapGraph) -> Option<Intent> {
    let dead: Vec<_> = graph.objects().filter(|n| n.is_dead()).map(|n| n.id).collect();
    if let Some(&cell) = dead.iter().find(|&&id| graph.incoming_count(id) == 0) {
        return Some(Intent::ActivateCell(cell));
    }
    dead.into_iter()
        .find(|&id| graph.outgoing_count(id) > 0)
        .map(Intent::SecondaryActivateCell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_core::{coordinate_id, GameConfig, GameMachine, Outcome};
    use sweep_dry_tests::{GraphBuilder, ScriptedRandom};

    #[test]
    fn frees_unreferenced_garbage_first() {
        let graph = GraphBuilder::new(6)
            .object((0, 0))
            .object((0, 1))
            .object((2, 2))
            .edge((0, 0), (0, 1))
            .build();
        assert_eq!(
            next_intent(&graph),
            Some(Intent::ActivateCell(coordinate_id(0, 0)))
        );
    }

    #[test]
    fn breaks_garbage_cycles_by_nullifying() {
        let graph = GraphBuilder::new(6)
            .object((1, 1))
            .object((1, 2))
            .edge((1, 1), (1, 2))
            .edge((1, 2), (1, 1))
            .build();
        assert_eq!(
            next_intent(&graph),
            Some(Intent::SecondaryActivateCell(coordinate_id(1, 1)))
        );
    }

    #[test]
    fn leaves_live_objects_alone() {
        let graph = GraphBuilder::new(6)
            .root((0, 0))
            .object((0, 1))
            .edge((0, 0), (0, 1))
            .build();
        assert_eq!(next_intent(&graph), None);
    }

    #[test]
    fn collector_never_faults_or_gets_refused() {
        let config = GameConfig::default();
        let state = GraphBuilder::new(6)
            .root((0, 0))
            .object((0, 1))
            .object((3, 3))
            .object((3, 4))
            .object((4, 4))
            .edge((0, 0), (0, 1))
            .edge((3, 3), (3, 4))
            .edge((3, 4), (3, 3))
            .edge((3, 4), (4, 4))
            .running(&config);
        let mut machine = GameMachine::from_state(config, ScriptedRandom::new(), state);

        while let Some(intent) = next_intent(machine.state().graph()) {
            let outcome = machine.apply(intent);
            assert!(
                matches!(outcome, Outcome::Freed { .. } | Outcome::Nullified { .. }),
                "unexpected {outcome:?}"
            );
        }
        assert_eq!(machine.state().graph().object_count(), 2);
        assert_eq!(machine.state().score(), 300);
    }
}
