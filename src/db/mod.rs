//! Persistence module split across logical submodules: finding the store file,
//! creating its schema, seeding it, and the queries the UI issues.

mod connection;
pub mod exercises;
pub mod locator;
pub mod records;
pub mod schema;
mod seed;

pub use connection::Store;
pub use locator::{probe, Location, Probe};
pub use seed::{read_seed_file, SeedOutcome};
