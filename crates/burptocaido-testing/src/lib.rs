//! Testing infrastructure for burptocaido integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `CaidoProject`: a throwaway Caido project directory with both databases
//! - `export`: Burp history export generation
//! - `assertions`: checks over what a migration left in the stores

pub mod assertions;
pub mod export;
pub mod fixtures;
pub mod schema;

pub use export::{BurpExport, ItemFixture};
pub use fixtures::CaidoProject;
