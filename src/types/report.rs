use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::types::identifiers::{CategoryKey, RegistryVersion};

/// How a report was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Smallest combination meeting the target inside the balance window.
    Qualified,
    /// First combination meeting the target, balance ignored.
    Fallback,
    /// Nothing meets the target.
    Unsatisfiable,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Qualified => "qualified",
            Self::Fallback => "fallback",
            Self::Unsatisfiable => "unsatisfiable",
        }
    }

    pub fn is_satisfied(self) -> bool {
        !matches!(self, Self::Unsatisfiable)
    }
}

/// Outcome of a report request, ready for display or persistence.
/// Fully self-contained and serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub status: ReportStatus,
    pub target: u64,
    pub total: u64,
    pub items_selected: usize,
    pub news_points: u64,
    pub regular_points: u64,
    /// Selected references, oldest first.
    pub references: Vec<String>,
    pub candidates_considered: usize,
    /// Registry the selection was computed against (before commit).
    pub registry_version: RegistryVersion,
}

impl SelectionReport {
    pub fn render_text(&self) -> String {
        if !self.status.is_satisfied() {
            return format!(
                "Could not build a report for {} points with the available links.",
                self.target
            );
        }

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "--- Report for {} points (required >= {}) ---",
            self.total, self.target
        );
        if self.status == ReportStatus::Fallback {
            let _ = writeln!(out, "Balance window not met; fallback selection.");
        }
        let _ = writeln!(out, "Links used: {}.", self.items_selected);
        let _ = writeln!(out, "News contribution (50%): {} points.", self.news_points);
        let _ = writeln!(out, "Regular contribution: {} points.", self.regular_points);
        let _ = writeln!(out, "- Links:");
        for reference in &self.references {
            let _ = writeln!(out, "  - {reference}");
        }
        out.push_str("--- End of report ---");
        out
    }
}

/// One item flipped from unused to used by a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumedItem {
    pub category: CategoryKey,
    pub reference: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Invalid target: {0} (must be positive)")]
    InvalidTarget(i64),

    #[error("Search space too large: {candidates} candidates exceeds limit of {limit}")]
    SearchSpaceTooLarge { candidates: usize, limit: usize },

    #[error("Registry changed since allocation was planned: expected {expected}, found {actual}")]
    StaleAllocation {
        expected: RegistryVersion,
        actual: RegistryVersion,
    },
}
