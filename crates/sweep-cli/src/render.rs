// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Plain-text session report: summary, heap grid, system log.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use std::io::{self, Write};
use sweep_app_core::cue::CueRender;
use sweep_core::{coordinate_id, GameState, MemoryStatus, NodeRecord};

use crate::SessionSetup;

/// Glyph for one node: `.` free, `R` root, `A` active, `D` dead; `!` marks a
/// refused cell.
fn glyph(node: &NodeRecord, shaking: bool) -> String {
    let base = match node.status {
        MemoryStatus::Free => ".",
        MemoryStatus::Active if node.is_root => "R",
        MemoryStatus::Active => "A",
        MemoryStatus::Dead => "D",
    };
    if shaking {
        format!("{base}!")
    } else {
        base.to_owned()
    }
}

/// Heap grid as a table, one column per grid column.
pub(crate) fn grid_table(state: &GameState, cues: &[CueRender]) -> Table {
    let graph = state.graph();
    let size = u16::try_from(graph.grid_size()).unwrap_or(u16::MAX);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec![Cell::new("")];
    header.extend((0..size).map(Cell::new));
    table.set_header(header);

    for row in 0..size {
        let mut cells = vec![Cell::new(row)];
        for col in 0..size {
            let id = coordinate_id(row, col);
            let shaking = cues.iter().any(|c| c.cell == id);
            let text = graph
                .node(&id)
                .map_or_else(|| "?".to_owned(), |n| glyph(n, shaking));
            cells.push(Cell::new(text));
        }
        table.add_row(cells);
    }
    table
}

/// Writes the full report for a finished session.
pub(crate) fn write_report(
    out: &mut impl Write,
    setup: &SessionSetup,
    state: &GameState,
    cues: &[CueRender],
) -> io::Result<()> {
    let config = &setup.prefs.game;
    let hash = state.graph().canonical_state_hash();
    writeln!(out, "seed: {}", setup.seed)?;
    writeln!(out, "phase: {:?}", state.phase())?;
    writeln!(out, "ticks: {}", state.ticks())?;
    writeln!(
        out,
        "score: {} ({}KB reclaimed)",
        state.score(),
        state.reclaimed_kb(config)
    )?;
    writeln!(
        out,
        "memory: {}% of {}KB ({} objects, {} references)",
        state.memory_usage(),
        config.heap_size_kb(),
        state.graph().object_count(),
        state.graph().edges().len()
    )?;
    writeln!(out, "heap: {}", hex::encode(&hash[..8]))?;
    writeln!(out, "{}", grid_table(state, cues))?;
    writeln!(out, "log:")?;
    for line in state.log().iter() {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}
