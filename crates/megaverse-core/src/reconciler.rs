//! Goal-map reconciliation.
//!
//! The [`Reconciler`] walks a goal grid in row-major order and issues one
//! create call per occupied cell against the remote object service:
//! - `space` cells are skipped
//! - `polyanet` cells create a Polyanet
//! - `<color>_soloon` / `<direction>_cometh` cells create the decorated kinds
//! - any other composite kind is ignored without a call
//!
//! Every per-cell failure (out-of-bounds coordinate, transport error,
//! non-200 answer) is logged and swallowed so that a single bad cell never
//! aborts the pass. The only fail-fast path is a missing goal map.

use tracing::{debug, info, warn};

use crate::api::DynApi;
use crate::config::{MegaverseConfig, ThrottleSettings};
use crate::error::{MegaverseError, Result};
use crate::grid::{Cell, Coordinate, Grid, GridBounds};
use crate::shape::{Shape, ShapeKind};

/// Margin kept between the cross pattern and each edge of the grid.
pub const CROSS_MARGIN: usize = 2;

/// Smallest grid that leaves room for a cross inside the margin.
pub const MIN_CROSS_SIZE: usize = 2 * CROSS_MARGIN + 1;

#[derive(Debug, Clone, Default)]
pub struct ReconcilerSettings {
    pub bounds: GridBounds,
    pub throttle: ThrottleSettings,
}

impl ReconcilerSettings {
    pub fn from_config(cfg: &MegaverseConfig) -> Self {
        Self {
            bounds: cfg.grid.bounds(),
            throttle: cfg.throttle.clone(),
        }
    }
}

/// What happened to a single create or delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The service answered HTTP 200.
    Succeeded,
    /// The coordinate was outside the grid; nothing was sent.
    Rejected,
    /// The request was sent but failed in transport or with a non-200 status.
    Failed,
}

/// Counters for one drawing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub succeeded: usize,
    pub failed: usize,
    pub rejected: usize,
    /// `space` cells.
    pub empty: usize,
    /// Cells whose kind was not recognized.
    pub ignored: usize,
}

impl PassReport {
    pub fn record(&mut self, outcome: CallOutcome) {
        match outcome {
            CallOutcome::Succeeded => self.succeeded += 1,
            CallOutcome::Rejected => self.rejected += 1,
            CallOutcome::Failed => self.failed += 1,
        }
    }

    /// Requests that actually reached the transport.
    pub fn calls(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Coordinates of an X inscribed in a `size` × `size` grid, two cells away
/// from every edge, in emission order. The center of odd-sized crosses
/// appears once.
pub fn cross_coordinates(size: usize) -> Result<Vec<Coordinate>> {
    if size < MIN_CROSS_SIZE {
        return Err(MegaverseError::InvalidPattern(format!(
            "cross pattern needs a grid of at least {MIN_CROSS_SIZE}x{MIN_CROSS_SIZE}, got {size}"
        )));
    }

    let start = CROSS_MARGIN;
    let end = size - CROSS_MARGIN - 1;
    let mut coordinates = Vec::with_capacity(2 * (end - start + 1));
    for i in start..=end {
        coordinates.push(Coordinate::new(i as i64, i as i64));
        let j = start + end - i;
        if i != j {
            coordinates.push(Coordinate::new(i as i64, j as i64));
        }
    }
    Ok(coordinates)
}

pub struct Reconciler {
    api: DynApi,
    bounds: GridBounds,
    throttle: ThrottleSettings,
}

impl Reconciler {
    pub fn new(api: DynApi, settings: ReconcilerSettings) -> Self {
        Self {
            api,
            bounds: settings.bounds,
            throttle: settings.throttle,
        }
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Fetch the goal grid. Transport failures, non-200 answers, malformed
    /// payloads and empty maps are logged and reported as `None`.
    pub async fn fetch_goal_grid(&self) -> Option<Grid> {
        match self.api.goal_map().await {
            Ok(grid) if grid.is_empty() => {
                warn!("Goal map has no rows");
                None
            }
            Ok(grid) => {
                let bounds = grid.bounds();
                debug!(rows = bounds.rows, columns = bounds.columns, "Fetched goal map");
                Some(grid)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch goal map");
                None
            }
        }
    }

    /// Draw a Polyanet cross on a square grid of side `size`.
    ///
    /// `size` must match both configured dimensions and be at least
    /// [`MIN_CROSS_SIZE`]; otherwise nothing is sent.
    pub async fn create_cross_pattern(&self, size: usize) -> PassReport {
        let mut report = PassReport::default();

        if !self.bounds.is_square() || size != self.bounds.rows {
            warn!(
                size,
                rows = self.bounds.rows,
                columns = self.bounds.columns,
                "Failed to create a cross Polyanet pattern: size must match a square grid"
            );
            return report;
        }
        let coordinates = match cross_coordinates(size) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to create a cross Polyanet pattern");
                return report;
            }
        };

        for coordinate in coordinates {
            report.record(self.create_shape(&Shape::Polyanet, coordinate).await);
        }
        info!(
            created = report.succeeded,
            failed = report.failed,
            "Cross pattern finished"
        );
        report
    }

    /// Recreate the goal map on the remote grid.
    ///
    /// Returns [`MegaverseError::EmptyGoalMap`] without issuing any call when
    /// the goal map cannot be obtained. Bounds are resized to the goal grid
    /// before the first create.
    pub async fn reconcile_from_goal(&mut self) -> Result<PassReport> {
        let Some(grid) = self.fetch_goal_grid().await else {
            warn!("Can't create the megaverse: goal map is unavailable");
            return Err(MegaverseError::EmptyGoalMap);
        };

        self.bounds = grid.bounds();
        let mut report = PassReport::default();

        for (coordinate, label) in grid.cells() {
            match Cell::parse(label) {
                Cell::Space => report.empty += 1,
                Cell::Shape(shape) => {
                    report.record(self.create_shape(&shape, coordinate).await);
                }
                Cell::Unrecognized(label) => {
                    debug!(
                        row = coordinate.row,
                        column = coordinate.column,
                        label = %label,
                        "Ignoring unrecognized cell kind"
                    );
                    report.ignored += 1;
                }
            }
        }

        info!(
            created = report.succeeded,
            failed = report.failed,
            rejected = report.rejected,
            ignored = report.ignored,
            "Goal map reconciliation finished"
        );
        Ok(report)
    }

    /// Create `shape` at `coordinate` after the per-kind throttle delay.
    ///
    /// Never fails: errors are logged and turned into a [`CallOutcome`].
    pub async fn create_shape(&self, shape: &Shape, coordinate: Coordinate) -> CallOutcome {
        let kind = shape.kind();
        if let Err(e) = self.bounds.check(coordinate) {
            warn!(%kind, row = coordinate.row, column = coordinate.column, error = %e, "Failed to create {kind}");
            return CallOutcome::Rejected;
        }

        let delay = self.throttle.delay_for(kind);
        if !delay.is_zero() {
            debug!(%kind, delay_ms = delay.as_millis() as u64, "Throttling create");
            tokio::time::sleep(delay).await;
        }

        match self.api.create(shape, coordinate).await {
            Ok(()) => {
                info!(%kind, row = coordinate.row, column = coordinate.column, "Created {kind}");
                CallOutcome::Succeeded
            }
            Err(e) => {
                warn!(%kind, row = coordinate.row, column = coordinate.column, error = %e, "Error creating {kind}");
                CallOutcome::Failed
            }
        }
    }

    /// Delete the `kind` object at `coordinate`. Deletes are not throttled.
    pub async fn delete_shape(&self, kind: ShapeKind, coordinate: Coordinate) -> CallOutcome {
        if let Err(e) = self.bounds.check(coordinate) {
            warn!(%kind, row = coordinate.row, column = coordinate.column, error = %e, "Failed to delete {kind}");
            return CallOutcome::Rejected;
        }

        match self.api.delete(kind, coordinate).await {
            Ok(()) => {
                info!(%kind, row = coordinate.row, column = coordinate.column, "Deleted {kind}");
                CallOutcome::Succeeded
            }
            Err(e) => {
                warn!(%kind, row = coordinate.row, column = coordinate.column, error = %e, "Error deleting {kind}");
                CallOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_smallest() {
        assert_eq!(cross_coordinates(5).unwrap(), vec![Coordinate::new(2, 2)]);
    }

    #[test]
    fn test_cross_eleven() {
        let coords = cross_coordinates(11).unwrap();
        assert_eq!(coords.len(), 13);
        assert_eq!(coords[0], Coordinate::new(2, 2));
        assert_eq!(coords[1], Coordinate::new(2, 8));
        assert_eq!(
            coords.iter().filter(|c| **c == Coordinate::new(5, 5)).count(),
            1
        );
        assert_eq!(*coords.last().unwrap(), Coordinate::new(8, 2));
    }

    #[test]
    fn test_cross_even_has_no_shared_center() {
        // start=2, end=7: six rows, two cells each
        assert_eq!(cross_coordinates(10).unwrap().len(), 12);
    }

    #[test]
    fn test_cross_too_small() {
        assert!(cross_coordinates(4).is_err());
        assert!(cross_coordinates(0).is_err());
    }

    #[test]
    fn test_report_calls() {
        let mut report = PassReport::default();
        report.record(CallOutcome::Succeeded);
        report.record(CallOutcome::Failed);
        report.record(CallOutcome::Rejected);
        assert_eq!(report.calls(), 2);
        assert_eq!(report.rejected, 1);
    }
}
