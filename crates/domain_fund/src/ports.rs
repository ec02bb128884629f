//! Port traits for NAV persistence and the remote NAV source
//!
//! `infra_db` implements [`NavStore`] on PostgreSQL and `infra_source`
//! implements [`NavSource`] over HTTP. The `mock` module provides in-memory
//! versions for tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{FundCode, PortError};

use crate::nav::{NavQuery, NavRecord};

/// Persistence port for NAV records
#[async_trait]
pub trait NavStore: Send + Sync {
    /// Latest stored info date for a fund, `None` if nothing is stored
    async fn latest_info_date(&self, fund_code: &FundCode) -> Result<Option<NaiveDate>, PortError>;

    /// Inserts a record keyed by (fund code, info date)
    ///
    /// Returns `false` when a record for that key already exists.
    async fn insert_nav(&self, record: &NavRecord) -> Result<bool, PortError>;

    /// Reads NAV records in ascending date order
    async fn query_nav(&self, query: &NavQuery) -> Result<Vec<NavRecord>, PortError>;

    /// Whether any record is stored for the fund
    async fn has_fund_data(&self, fund_code: &FundCode) -> Result<bool, PortError>;

    /// Verifies the store is reachable
    async fn ping(&self) -> Result<(), PortError>;
}

/// One page request against the remote NAV source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub fund_code: FundCode,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// 1-based page number
    pub page: u32,
}

/// A NAV row as delivered by the remote source, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNav {
    pub info_date: String,
    pub unit_worth: String,
    pub total_worth: String,
}

/// One decoded page from the remote source
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavPage {
    /// Source status code, 0 on success
    pub status_code: i64,
    pub records: Vec<RemoteNav>,
    /// Total row count reported by the source, if it sent a usable one
    pub total: Option<u64>,
}

impl NavPage {
    /// A page that ends the crawl: non-zero status or no rows
    pub fn is_terminal(&self) -> bool {
        self.status_code != 0 || self.records.is_empty()
    }
}

/// Remote paginated NAV source
#[async_trait]
pub trait NavSource: Send + Sync {
    /// Provenance tag stored with every record from this source
    fn source_tag(&self) -> &str;

    /// Fetches one page
    ///
    /// Transport failures, non-success HTTP statuses and undecodable bodies are
    /// all reported as errors; the crawl treats any of them as end of data.
    async fn fetch_page(&self, request: &PageRequest) -> Result<NavPage, PortError>;
}

/// Mock implementations for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashSet, VecDeque};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// In-memory NAV store keyed by (fund code, info date)
    #[derive(Debug, Default, Clone)]
    pub struct MockNavStore {
        rows: Arc<Mutex<BTreeMap<(FundCode, NaiveDate), NavRecord>>>,
        next_id: Arc<Mutex<i64>>,
        rejected_dates: Arc<Mutex<HashSet<NaiveDate>>>,
        offline: Arc<Mutex<bool>>,
        queries: Arc<Mutex<Vec<NavQuery>>>,
    }

    impl MockNavStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store, in the given insertion order
        pub async fn with_records(records: Vec<NavRecord>) -> Self {
            let store = Self::new();
            for record in records {
                store.insert_nav(&record).await.ok();
            }
            store
        }

        /// Makes inserts for this date fail
        pub async fn reject_date(&self, date: NaiveDate) {
            self.rejected_dates.lock().await.insert(date);
        }

        /// Makes every call fail with a connection error
        pub async fn set_offline(&self, offline: bool) {
            *self.offline.lock().await = offline;
        }

        /// All stored records, ordered by (fund code, date)
        pub async fn records(&self) -> Vec<NavRecord> {
            self.rows.lock().await.values().cloned().collect()
        }

        pub async fn len(&self) -> usize {
            self.rows.lock().await.len()
        }

        /// Queries received through `query_nav`
        pub async fn queries(&self) -> Vec<NavQuery> {
            self.queries.lock().await.clone()
        }

        async fn check_online(&self) -> Result<(), PortError> {
            if *self.offline.lock().await {
                return Err(PortError::connection("mock store is offline"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl NavStore for MockNavStore {
        async fn latest_info_date(&self, fund_code: &FundCode) -> Result<Option<NaiveDate>, PortError> {
            self.check_online().await?;
            Ok(self
                .rows
                .lock()
                .await
                .keys()
                .filter(|(code, _)| code == fund_code)
                .map(|(_, date)| *date)
                .max())
        }

        async fn insert_nav(&self, record: &NavRecord) -> Result<bool, PortError> {
            self.check_online().await?;
            if self.rejected_dates.lock().await.contains(&record.info_date) {
                return Err(PortError::internal(format!(
                    "insert rejected for {}",
                    record.info_date
                )));
            }
            let key = (record.fund_code.clone(), record.info_date);
            let mut rows = self.rows.lock().await;
            if rows.contains_key(&key) {
                return Ok(false);
            }
            let mut next_id = self.next_id.lock().await;
            *next_id += 1;
            rows.insert(key, record.clone().with_id(*next_id));
            Ok(true)
        }

        async fn query_nav(&self, query: &NavQuery) -> Result<Vec<NavRecord>, PortError> {
            self.check_online().await?;
            self.queries.lock().await.push(query.clone());
            Ok(self
                .rows
                .lock()
                .await
                .values()
                .filter(|r| r.fund_code == query.fund_code && query.contains(r.info_date))
                .cloned()
                .collect())
        }

        async fn has_fund_data(&self, fund_code: &FundCode) -> Result<bool, PortError> {
            self.check_online().await?;
            Ok(self.rows.lock().await.keys().any(|(code, _)| code == fund_code))
        }

        async fn ping(&self) -> Result<(), PortError> {
            self.check_online().await
        }
    }

    /// A remote source that replays scripted responses
    ///
    /// Once the script is exhausted every further page is empty, unless the
    /// source was built with [`ScriptedNavSource::endless`].
    #[derive(Debug, Default, Clone)]
    pub struct ScriptedNavSource {
        responses: Arc<Mutex<VecDeque<Result<NavPage, String>>>>,
        requests: Arc<Mutex<Vec<PageRequest>>>,
        endless: Option<NavPage>,
    }

    impl ScriptedNavSource {
        pub fn new() -> Self {
            Self::default()
        }

        /// Source whose responses are the given pages in order
        pub fn with_pages(pages: Vec<NavPage>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(pages.into_iter().map(Ok).collect())),
                ..Self::default()
            }
        }

        /// Source that answers every request with the same non-empty page
        pub fn endless(page: NavPage) -> Self {
            Self {
                endless: Some(page),
                ..Self::default()
            }
        }

        /// Queues a failure (transport error or malformed body)
        pub async fn push_error(&self, message: impl Into<String>) {
            self.responses.lock().await.push_back(Err(message.into()));
        }

        /// Requests received so far
        pub async fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().await.clone()
        }
    }

    #[async_trait]
    impl NavSource for ScriptedNavSource {
        fn source_tag(&self) -> &str {
            "mock"
        }

        async fn fetch_page(&self, request: &PageRequest) -> Result<NavPage, PortError> {
            self.requests.lock().await.push(request.clone());
            if let Some(page) = &self.endless {
                return Ok(page.clone());
            }
            match self.responses.lock().await.pop_front() {
                Some(Ok(page)) => Ok(page),
                Some(Err(message)) => Err(PortError::malformed(message)),
                None => Ok(NavPage::default()),
            }
        }
    }
}
