//! ---
//! mv_section: "05-networking-external-interfaces"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Megaverse REST client and domain types."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use async_trait::async_trait;

use crate::error::MegaverseError;
use crate::types::{ComethDirection, GoalMap, Position, SoloonColor};

/// Operations exposed by the Megaverse API.
///
/// Implemented by [`MegaverseClient`](crate::MegaverseClient) over HTTP and by
/// recording doubles in tests.
#[async_trait]
pub trait MegaverseApi: Send + Sync {
    /// `POST /polyanets`
    async fn create_polyanet(&self, position: Position) -> Result<(), MegaverseError>;

    /// `DELETE /polyanets`
    async fn delete_polyanet(&self, position: Position) -> Result<(), MegaverseError>;

    /// `POST /soloons`
    async fn create_soloon(
        &self,
        position: Position,
        color: SoloonColor,
    ) -> Result<(), MegaverseError>;

    /// `DELETE /soloons`
    async fn delete_soloon(&self, position: Position) -> Result<(), MegaverseError>;

    /// `POST /comeths`
    async fn create_cometh(
        &self,
        position: Position,
        direction: ComethDirection,
    ) -> Result<(), MegaverseError>;

    /// `DELETE /comeths`
    async fn delete_cometh(&self, position: Position) -> Result<(), MegaverseError>;

    /// `GET /map/{candidateId}/goal`
    async fn goal_map(&self) -> Result<GoalMap, MegaverseError>;
}
