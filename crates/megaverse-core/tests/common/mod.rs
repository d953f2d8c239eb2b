#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use megaverse_core::config::ThrottleSettings;
use megaverse_core::{
    Coordinate, Grid, GridBounds, MegaverseApi, MegaverseError, Reconciler, ReconcilerSettings,
    Result, Shape, ShapeKind,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(Shape, Coordinate),
    Delete(ShapeKind, Coordinate),
}

/// In-memory API that records every call in order.
#[derive(Default)]
pub struct RecordingApi {
    goal: Option<Vec<Vec<String>>>,
    failing: HashSet<Coordinate>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingApi {
    pub fn with_goal(rows: &[&[&str]]) -> Self {
        Self {
            goal: Some(
                rows.iter()
                    .map(|r| r.iter().map(|s| s.to_string()).collect())
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn without_goal() -> Self {
        Self::default()
    }

    pub fn failing_at(mut self, coordinate: Coordinate) -> Self {
        self.failing.insert(coordinate);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MegaverseApi for RecordingApi {
    async fn goal_map(&self) -> Result<Grid> {
        match &self.goal {
            Some(rows) => Grid::from_rows(rows.clone()),
            None => Err(MegaverseError::remote_status(404, "no goal map")),
        }
    }

    async fn create(&self, shape: &Shape, coordinate: Coordinate) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(shape.clone(), coordinate));
        if self.failing.contains(&coordinate) {
            return Err(MegaverseError::remote_status(500, "boom"));
        }
        Ok(())
    }

    async fn delete(&self, kind: ShapeKind, coordinate: Coordinate) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Delete(kind, coordinate));
        if self.failing.contains(&coordinate) {
            return Err(MegaverseError::remote_status(500, "boom"));
        }
        Ok(())
    }
}

/// Reconciler over `api` without throttling.
pub fn reconciler(api: Arc<RecordingApi>, bounds: GridBounds) -> Reconciler {
    Reconciler::new(
        api,
        ReconcilerSettings {
            bounds,
            throttle: ThrottleSettings::disabled(),
        },
    )
}
