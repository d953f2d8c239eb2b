//! Remote service seam used by the reconciler.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::grid::{Coordinate, Grid};
use crate::shape::{Shape, ShapeKind};

/// Operations the Megaverse service exposes for one candidate.
///
/// Implementations must be thread-safe (`Send + Sync`). A call is successful
/// only when the service answers HTTP 200; everything else is an error.
#[async_trait]
pub trait MegaverseApi: Send + Sync {
    /// Fetches the goal grid for the configured candidate.
    async fn goal_map(&self) -> Result<Grid>;

    /// Creates `shape` at `coordinate`.
    async fn create(&self, shape: &Shape, coordinate: Coordinate) -> Result<()>;

    /// Deletes whatever object of `kind` sits at `coordinate`.
    async fn delete(&self, kind: ShapeKind, coordinate: Coordinate) -> Result<()>;
}

/// Type alias for a shared, dynamically dispatched API.
pub type DynApi = Arc<dyn MegaverseApi>;
