//! Infrastructure Database Layer
//!
//! This crate persists fund NAV records in PostgreSQL using SQLx and
//! implements the `NavStore` port of `domain_fund` on top of it.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: [`PgNavStore`] owns the SQL for
//! the `fund_worth` table and maps rows into domain records, so the domain
//! layer never sees SQL types or errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PgNavStore};
//!
//! let pool = create_pool(DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let store = PgNavStore::new(pool);
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use migrations::run_migrations;
pub use pool::{create_pool, DatabaseConfig, DatabasePool};
pub use repositories::PgNavStore;
