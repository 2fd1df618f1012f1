//! Output formatting utilities for CLI.

use std::fmt::Write;

use imperium::{GrowReport, Session};
use serde::Serialize;

/// Totals over all grow ticks of one run.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct GrowTotals {
    /// Ticks executed.
    pub(super) ticks: u32,
    /// Budget granted per tick.
    pub(super) budget: f64,
    /// Cells claimed.
    pub(super) claimed: usize,
    /// Cells taken from rivals.
    pub(super) overwritten: usize,
    /// Cost-units spent.
    pub(super) consumed: f64,
}

impl GrowTotals {
    /// Fold one tick into the totals.
    pub(super) fn record(&mut self, report: &GrowReport) {
        self.claimed += report.claimed;
        self.overwritten += report.overwritten;
        self.consumed += report.consumed;
    }
}

/// JSON-serializable grow result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGrowResult {
    /// Map width.
    pub(super) width: u32,
    /// Map height.
    pub(super) height: u32,
    /// Ticks executed.
    pub(super) ticks: u32,
    /// Budget per tick.
    pub(super) budget: f64,
    /// Cells claimed over the run.
    pub(super) claimed: usize,
    /// Cells taken from rivals over the run.
    pub(super) overwritten: usize,
    /// Cost-units spent over the run.
    pub(super) consumed: f64,
    /// Per-empire results.
    pub(super) empires: Vec<JsonEmpireResult>,
}

/// JSON-serializable empire result.
#[derive(Debug, Serialize)]
pub(super) struct JsonEmpireResult {
    /// Empire id.
    pub(super) id: u32,
    /// Display name.
    pub(super) name: String,
    /// Colour as `#RRGGBB`.
    pub(super) color: String,
    /// Owned cells.
    pub(super) territory: usize,
    /// Whether the empire still owns territory.
    pub(super) alive: bool,
    /// Unspent budget carried to the next tick.
    pub(super) budget: f64,
    /// Value of resources on owned cells.
    pub(super) resource_value: u64,
}

impl JsonGrowResult {
    /// Create from a session after growth.
    pub(super) fn from_session(session: &Session, totals: &GrowTotals) -> Self {
        Self {
            width: session.terrain().width(),
            height: session.terrain().height(),
            ticks: totals.ticks,
            budget: totals.budget,
            claimed: totals.claimed,
            overwritten: totals.overwritten,
            consumed: totals.consumed,
            empires: session
                .empires()
                .map(|empire| JsonEmpireResult {
                    id: empire.id,
                    name: empire.name.clone(),
                    color: empire.color.to_string(),
                    territory: session.territory(empire.id).unwrap_or(0),
                    alive: empire.alive,
                    budget: empire.budget,
                    resource_value: session.resource_value(empire.id).unwrap_or(0),
                })
                .collect(),
        }
    }
}

/// Format a grow result as human-readable text.
pub(super) fn format_text(result: &JsonGrowResult) -> String {
    let mut output = String::new();
    let cells = u64::from(result.width) * u64::from(result.height);

    let _ = writeln!(
        output,
        "Grow Result ({}x{}, {} ticks of {})",
        result.width, result.height, result.ticks, result.budget
    );
    let _ = writeln!(
        output,
        "  Claimed: {}  Overwritten: {}  Spent: {}",
        result.claimed, result.overwritten, result.consumed
    );
    output.push('\n');

    for empire in &result.empires {
        let status = if empire.alive { "" } else { " [eliminated]" };
        #[allow(clippy::cast_precision_loss)]
        let share = empire.territory as f64 * 100.0 / cells.max(1) as f64;
        let _ = writeln!(
            output,
            "  Empire {} ({}, {}): {} cells ({share:.1}%), resources {}, unspent {}{status}",
            empire.id,
            empire.name,
            empire.color,
            empire.territory,
            empire.resource_value,
            empire.budget,
        );
    }

    output
}
