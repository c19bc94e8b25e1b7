//! Search statistics and their tabular rendering.

use std::collections::HashMap;

use prettytable::{Cell, Row, Table};

use crate::solver::{constraint::Constraint, engine::ConstraintId};

#[derive(Debug, Clone, Default)]
pub struct PerConstraintStats {
    pub revisions: u64,
    pub prunings: u64,
    pub time_spent_micros: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub dead_ends: u64,
    pub solutions_found: u64,
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

/// Renders per-constraint revision counts as a table, most expensive
/// constraint first.
pub fn render_stats_table(stats: &SearchStats, constraints: &[Box<dyn Constraint>]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Constraint"),
        Cell::new("Description"),
        Cell::new("Revisions"),
        Cell::new("Prunings"),
        Cell::new("Time / Call (µs)"),
        Cell::new("Total (ms)"),
    ]));

    let mut sorted: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();
    sorted.sort_by_key(|(_, s)| std::cmp::Reverse(s.time_spent_micros));

    for (&constraint_id, constraint_stats) in sorted {
        let Some(constraint) = constraints.get(constraint_id) else {
            continue;
        };
        let descriptor = constraint.descriptor();
        let per_call = if constraint_stats.revisions > 0 {
            constraint_stats.time_spent_micros as f64 / constraint_stats.revisions as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(&descriptor.name),
            Cell::new(&descriptor.description),
            Cell::new(&constraint_stats.revisions.to_string()),
            Cell::new(&constraint_stats.prunings.to_string()),
            Cell::new(&format!("{:.2}", per_call)),
            Cell::new(&format!(
                "{:.2}",
                constraint_stats.time_spent_micros as f64 / 1000.0
            )),
        ]));
    }

    table.to_string()
}
