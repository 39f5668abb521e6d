//! ---
//! mv_section: "02-grid-walker"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Goal-map walker, plans and run reports."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
//! Walks a goal map row-major and issues one create (apply) or delete (reset)
//! per non-space cell through a [`MegaverseApi`](megaverse_api::MegaverseApi).

pub mod plan;
pub mod report;
pub mod walker;

pub use plan::{plan, Plan, PlannedAction, Target, UnrecognisedCell, WalkMode};
pub use report::{CellFailure, Tally, WalkReport};
pub use walker::GridWalker;
