//! Remote NAV Source Client
//!
//! Implements the `NavSource` port of `domain_fund` against Sina's fund NAV
//! open API. One call fetches one page of a fund's history, optionally bounded
//! by a date window.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_source::{SinaNavSource, SourceConfig};
//!
//! let source = SinaNavSource::new(SourceConfig::from_env()?)?;
//! let crawler = Crawler::new(&source, &store);
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{SinaNavSource, SourceConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, SOURCE_TAG};
pub use error::SourceError;
pub use types::NavResponse;
