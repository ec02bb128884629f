//! Test Utilities Crate
//!
//! Provides shared test infrastructure and fixtures for the fund NAV tracker
//! test suite.
//!
//! # Modules
//!
//! - `fixtures`: NAV series and remote pages for common scenarios
//! - `database`: PostgreSQL test container management
//! - `generators`: Property-based test data generators

pub mod database;
pub mod fixtures;
pub mod generators;

pub use database::*;
pub use fixtures::*;
pub use generators::*;
