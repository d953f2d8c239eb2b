//! Client library for the Megaverse grid-drawing challenge.
//!
//! The remote service renders a grid of objects (Polyanets, Soloons and
//! Comeths) for one candidate. This crate reads the candidate's goal map and
//! issues the create/delete calls needed to make the rendered grid match it.
//!
//! - [`grid`] - coordinates, bounds and goal-map label classification
//! - [`shape`] - shape kinds and their sub-resource paths
//! - [`api`] - the [`MegaverseApi`] seam, implemented over HTTP by [`client`]
//! - [`reconciler`] - cross pattern and goal-map reconciliation
//! - [`config`] - layered configuration (file, environment, `.env`)

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod grid;
pub mod reconciler;
pub mod shape;

pub use api::{DynApi, MegaverseApi};
pub use client::MegaverseClient;
pub use config::MegaverseConfig;
pub use error::{MegaverseError, Result};
pub use grid::{Cell, Coordinate, GoalMap, Grid, GridBounds};
pub use reconciler::{
    CallOutcome, PassReport, Reconciler, ReconcilerSettings, cross_coordinates,
};
pub use shape::{Shape, ShapeKind};
