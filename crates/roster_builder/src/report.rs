//! Plain-text board report.

use ninebox_core::grid::format_percent;
use ninebox_core::{BoardSummary, CellSummary};
use std::fmt::Write;

const NO_TEAM: &str = "(no team)";

fn cell_text(cell: &CellSummary) -> String {
    let flag = if cell.out_of_range { " !" } else { "  " };
    format!("[{}] {:>3} {:>4}{}", cell.cell, cell.count, cell.percent, flag)
}

/// Grid rows in drawing order, then unplotted, groups, teams and biases.
/// Cells marked `!` are out of range.
pub fn render_report(summary: &BoardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Layout: {} ({} of {} persons visible)",
        summary.layout, summary.total_visible, summary.total_persons
    );
    out.push('\n');

    for row in summary.cells.chunks(summary.columns.max(1)) {
        let line: Vec<String> = row.iter().map(cell_text).collect();
        let _ = writeln!(out, "  {}", line.join("   ").trim_end());
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "Unplotted: {} ({})",
        summary.unplotted.count,
        format_percent(summary.unplotted.ratio)
    );

    if !summary.groups.is_empty() {
        out.push_str("\nGroups:\n");
        for group in &summary.groups {
            let cells: Vec<String> = group.cells.iter().map(|c| c.to_string()).collect();
            let _ = writeln!(
                out,
                "  {} [{}]: {} ({}){}",
                group.name,
                cells.join(", "),
                group.count,
                format_percent(group.ratio),
                if group.out_of_range { " out of range" } else { "" }
            );
        }
    }

    out.push_str("\nTeams:\n");
    for toggle in &summary.teams {
        let mark = if toggle.included { 'x' } else { ' ' };
        let _ = writeln!(out, "  [{}] {}", mark, toggle.team.as_deref().unwrap_or(NO_TEAM));
    }

    out.push('\n');
    for bias in &summary.biases {
        let _ = writeln!(out, "{}", bias.text);
    }

    out
}
