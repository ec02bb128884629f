//! Repository implementations for domain entities
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! domain types. Queries are checked at runtime so the crate builds without a
//! live database.

pub mod fund_worth;

pub use fund_worth::{FundWorthRow, PgNavStore};
