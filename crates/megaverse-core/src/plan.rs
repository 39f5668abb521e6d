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

use megaverse_api::{
    Cell, ComethDirection, EntityKind, GoalMap, ParseCellError, Position, SoloonColor,
};
use serde::Serialize;
use strum::{AsRefStr, Display};

/// Direction of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WalkMode {
    /// Create every goal entity.
    Apply,
    /// Delete every goal entity.
    Reset,
}

impl WalkMode {
    pub fn verb(&self) -> &'static str {
        match self {
            WalkMode::Apply => "create",
            WalkMode::Reset => "delete",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            WalkMode::Apply => "created",
            WalkMode::Reset => "deleted",
        }
    }
}

/// Entity a planned call places or removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Polyanet,
    Soloon(SoloonColor),
    Cometh(ComethDirection),
}

impl Target {
    fn from_cell(cell: Cell) -> Option<Self> {
        match cell {
            Cell::Space => None,
            Cell::Polyanet => Some(Target::Polyanet),
            Cell::Soloon(color) => Some(Target::Soloon(color)),
            Cell::Cometh(direction) => Some(Target::Cometh(direction)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Target::Polyanet => EntityKind::Polyanet,
            Target::Soloon(_) => EntityKind::Soloon,
            Target::Cometh(_) => EntityKind::Cometh,
        }
    }
}

/// One non-space cell the walk acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub position: Position,
    pub kind: EntityKind,
    /// `Err` when the colour or direction prefix is unknown. Reset still
    /// deletes the cell; apply records a failure without issuing a call.
    pub target: Result<Target, ParseCellError>,
    /// One-based row-major index of the cell among every visited cell.
    pub ordinal: usize,
}

impl PlannedAction {
    /// `blue soloon`, `up cometh`, `polyanet`, `soloon 'GREEN_SOLOON'`.
    pub fn subject(&self) -> String {
        match &self.target {
            Ok(Target::Polyanet) => "polyanet".to_owned(),
            Ok(Target::Soloon(color)) => format!("{} soloon", color),
            Ok(Target::Cometh(direction)) => format!("{} cometh", direction),
            Err(reason) => format!("{} '{}'", self.kind, reason.label()),
        }
    }

    pub fn describe(&self, mode: WalkMode) -> String {
        format!(
            "{} {} at row {}, column {}",
            mode.verb(),
            self.subject(),
            self.position.row,
            self.position.column
        )
    }
}

/// Label whose entity kind could not be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognisedCell {
    pub position: Position,
    pub label: String,
    pub reason: ParseCellError,
}

/// Ordered list of calls a walk over a goal map would issue.
#[derive(Debug, Clone)]
pub struct Plan {
    pub mode: WalkMode,
    pub actions: Vec<PlannedAction>,
    pub unrecognised: Vec<UnrecognisedCell>,
    /// Every cell visited, spaces included.
    pub cells: usize,
}

impl Plan {
    /// Number of actions per entity kind.
    pub fn counts(&self) -> BTreeMap<EntityKind, usize> {
        let mut counts = BTreeMap::new();
        for action in &self.actions {
            *counts.entry(action.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Compute the walk for `goal` in row-major order without issuing any call.
///
/// The entity kind comes from the label suffix, so `GREEN_SOLOON` is still a
/// soloon action. Only labels naming no known kind are set aside.
pub fn plan(goal: &GoalMap, mode: WalkMode) -> Plan {
    let mut actions = Vec::new();
    let mut unrecognised = Vec::new();
    let mut cells = 0;
    for (position, label) in goal.cells() {
        cells += 1;
        let ordinal = cells;
        match label.parse::<Cell>() {
            Ok(cell) => actions.extend(Target::from_cell(cell).map(|target| PlannedAction {
                position,
                kind: target.kind(),
                target: Ok(target),
                ordinal,
            })),
            Err(reason) => match reason.kind() {
                Some(kind) => actions.push(PlannedAction {
                    position,
                    kind,
                    target: Err(reason),
                    ordinal,
                }),
                None => unrecognised.push(UnrecognisedCell {
                    position,
                    label: label.to_owned(),
                    reason,
                }),
            },
        }
    }
    Plan {
        mode,
        actions,
        unrecognised,
        cells,
    }
}
