//! ---
//! mv_section: "02-grid-walker"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Goal-map walker, plans and run reports."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use std::collections::BTreeMap;

use megaverse_api::{EntityKind, Position};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::plan::WalkMode;

/// Attempted/succeeded counts for one entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub success: usize,
    pub total: usize,
}

impl Tally {
    pub fn failed(&self) -> usize {
        self.total - self.success
    }
}

/// A cell whose call returned an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellFailure {
    pub position: Position,
    pub kind: EntityKind,
    pub status: Option<u16>,
    pub message: String,
}

/// Outcome of one walk.
#[derive(Debug, Clone)]
pub struct WalkReport {
    pub mode: WalkMode,
    tallies: BTreeMap<EntityKind, Tally>,
    pub failures: Vec<CellFailure>,
    /// Labels skipped because they could not be parsed.
    pub unrecognised: usize,
}

impl WalkReport {
    pub fn new(mode: WalkMode) -> Self {
        Self {
            mode,
            tallies: EntityKind::iter().map(|kind| (kind, Tally::default())).collect(),
            failures: Vec::new(),
            unrecognised: 0,
        }
    }

    pub fn record_success(&mut self, kind: EntityKind) {
        let tally = self.tallies.entry(kind).or_default();
        tally.total += 1;
        tally.success += 1;
    }

    pub fn record_failure(&mut self, failure: CellFailure) {
        self.tallies.entry(failure.kind).or_default().total += 1;
        self.failures.push(failure);
    }

    pub fn tally(&self, kind: EntityKind) -> Tally {
        self.tallies.get(&kind).copied().unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.tallies.values().map(|t| t.total).sum()
    }

    pub fn total_success(&self) -> usize {
        self.tallies.values().map(|t| t.success).sum()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human readable summary, one line per entry.
    pub fn summary_lines(&self) -> Vec<String> {
        let verb = self.mode.past_tense();
        let mut lines: Vec<String> = self
            .tallies
            .iter()
            .map(|(kind, tally)| {
                format!("{}: {}/{} {}", kind.plural(), tally.success, tally.total, verb)
            })
            .collect();

        let total = self.total();
        let success = self.total_success();
        if success == total {
            lines.push(format!(
                "Success! All {} objects were {} successfully.",
                total, verb
            ));
        } else {
            lines.push(format!(
                "{} {} out of {} objects.",
                capitalise(verb),
                success,
                total
            ));
            lines.push(format!(
                "Failed to {} {} objects.",
                self.mode.verb(),
                total - success
            ));
        }
        if self.unrecognised > 0 {
            lines.push(format!(
                "Skipped {} unrecognised cells.",
                self.unrecognised
            ));
        }
        lines
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
