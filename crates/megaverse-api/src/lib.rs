//! ---
//! mv_section: "05-networking-external-interfaces"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Megaverse REST client and domain types."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Client surface for the Megaverse REST API: the cell/entity vocabulary,
//! a self-throttling HTTP client and the [`MegaverseApi`] trait the grid
//! walker is written against.

pub mod api;
pub mod client;
pub mod error;
pub mod throttle;
pub mod types;

pub use api::MegaverseApi;
pub use client::{ClientSettings, MegaverseClient};
pub use error::MegaverseError;
pub use throttle::RequestThrottle;
pub use types::{
    Cell, ComethDirection, EntityKind, GoalMap, ParseCellError, Position, SoloonColor,
};
