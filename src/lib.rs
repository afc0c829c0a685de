//! Core library surface for gym-logger, a terminal workout log.
//!
//! The persistence layer (`db`) owns the SQLite store: finding it, creating its
//! schema, seeding exercises and recording sets. `ui` drives the menu on top
//! of it, and `config` decides where the files live.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Persistence entry points used by `main.rs` and the integration tests.
pub use db::{Location, SeedOutcome, Store};
pub use error::StoreError;

/// The domain types the store hands out and accepts.
pub use models::{EmptyBatch, Exercise, Record, SetBatch, SetEntry};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
