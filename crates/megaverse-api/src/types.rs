//! ---
//! mv_section: "05-networking-external-interfaces"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Megaverse REST client and domain types."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Zero-based grid coordinate. Bounds are owned by the remote grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
}

impl Position {
    /// Construct a position from a row/column pair.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.column)
    }
}

/// Soloon colours accepted by the API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SoloonColor {
    /// `blue`
    Blue,
    /// `red`
    Red,
    /// `purple`
    Purple,
    /// `white`
    White,
}

/// Cometh directions accepted by the API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ComethDirection {
    /// `up`
    Up,
    /// `down`
    Down,
    /// `right`
    Right,
    /// `left`
    Left,
}

/// Entity kinds placeable on the grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    /// Stationary planet.
    Polyanet,
    /// Moon that must sit next to a polyanet.
    Soloon,
    /// Comet travelling in a fixed direction.
    Cometh,
}

impl EntityKind {
    /// REST collection path for this kind.
    pub fn endpoint(&self) -> &'static str {
        match self {
            EntityKind::Polyanet => "/polyanets",
            EntityKind::Soloon => "/soloons",
            EntityKind::Cometh => "/comeths",
        }
    }

    /// Capitalised plural used in run summaries.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Polyanet => "Polyanets",
            EntityKind::Soloon => "Soloons",
            EntityKind::Cometh => "Comeths",
        }
    }
}

/// Parsed goal-map cell label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// `SPACE`: nothing to place.
    Space,
    /// `POLYANET`
    Polyanet,
    /// `<COLOR>_SOLOON`
    Soloon(SoloonColor),
    /// `<DIRECTION>_COMETH`
    Cometh(ComethDirection),
}

impl Cell {
    /// Entity kind represented by the cell, `None` for space.
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Cell::Space => None,
            Cell::Polyanet => Some(EntityKind::Polyanet),
            Cell::Soloon(_) => Some(EntityKind::Soloon),
            Cell::Cometh(_) => Some(EntityKind::Cometh),
        }
    }
}

/// Errors raised while parsing a cell label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCellError {
    /// The label is not one of the known shapes.
    #[error("unrecognised cell label '{0}'")]
    UnknownLabel(String),
    /// `<COLOR>_SOLOON` with a colour outside the palette.
    #[error("unknown soloon colour '{color}' in label '{label}'")]
    UnknownColor {
        /// Full label.
        label: String,
        /// Offending prefix.
        color: String,
    },
    /// `<DIRECTION>_COMETH` with an unknown direction.
    #[error("unknown cometh direction '{direction}' in label '{label}'")]
    UnknownDirection {
        /// Full label.
        label: String,
        /// Offending prefix.
        direction: String,
    },
}

impl ParseCellError {
    /// Entity kind named by the label suffix, when the suffix alone is valid.
    ///
    /// `GREEN_SOLOON` still names a soloon even though its colour is unknown.
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            ParseCellError::UnknownLabel(_) => None,
            ParseCellError::UnknownColor { .. } => Some(EntityKind::Soloon),
            ParseCellError::UnknownDirection { .. } => Some(EntityKind::Cometh),
        }
    }

    /// The label that failed to parse.
    pub fn label(&self) -> &str {
        match self {
            ParseCellError::UnknownLabel(label)
            | ParseCellError::UnknownColor { label, .. }
            | ParseCellError::UnknownDirection { label, .. } => label,
        }
    }
}

impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "SPACE" => return Ok(Cell::Space),
            "POLYANET" => return Ok(Cell::Polyanet),
            _ => {}
        }
        match label.split_once('_') {
            Some((color, "SOLOON")) => color
                .parse()
                .map(Cell::Soloon)
                .map_err(|_| ParseCellError::UnknownColor {
                    label: label.to_owned(),
                    color: color.to_owned(),
                }),
            Some((direction, "COMETH")) => direction
                .parse()
                .map(Cell::Cometh)
                .map_err(|_| ParseCellError::UnknownDirection {
                    label: label.to_owned(),
                    direction: direction.to_owned(),
                }),
            _ => Err(ParseCellError::UnknownLabel(label.to_owned())),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Space => f.write_str("SPACE"),
            Cell::Polyanet => f.write_str("POLYANET"),
            Cell::Soloon(color) => write!(f, "{}_SOLOON", color.as_ref().to_uppercase()),
            Cell::Cometh(direction) => {
                write!(f, "{}_COMETH", direction.as_ref().to_uppercase())
            }
        }
    }
}

/// Target state returned by `GET /map/{candidateId}/goal`.
///
/// Labels are kept as raw strings so that one unknown label does not reject
/// the whole map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalMap {
    /// Rows of cell labels.
    pub goal: Vec<Vec<String>>,
}

impl GoalMap {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.goal.len()
    }

    /// Width of the widest row.
    pub fn columns(&self) -> usize {
        self.goal.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterate every cell label in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &str)> + '_ {
        self.goal.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(column, label)| (Position::new(row, column), label.as_str()))
        })
    }
}
