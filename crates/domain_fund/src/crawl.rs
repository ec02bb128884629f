//! Incremental NAV crawl
//!
//! Pages through the remote NAV source for one fund and stores every record it
//! returns. The first crawl of a fund fetches its whole history; later crawls
//! fetch from the latest stored date through today.
//!
//! The loop ends on the first page that is unreachable, undecodable, carries a
//! non-zero status, or has no rows. None of these is an error. A single record
//! that fails to parse or store is logged and skipped.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use core_kernel::{parse_date, FundCode};

use crate::error::FundError;
use crate::nav::NavRecord;
use crate::ports::{NavPage, NavSource, NavStore, PageRequest, RemoteNav};

/// Default page-count guard
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Crawl settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Stop after this many pages even if the source keeps returning data
    pub max_pages: u32,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl CrawlConfig {
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Date window sent with every page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CrawlWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl CrawlWindow {
    /// Whole-history window
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Window derived from the latest stored date
    ///
    /// With nothing stored the window is unbounded; otherwise it runs from the
    /// latest stored date through `today`.
    pub fn from_cursor(latest: Option<NaiveDate>, today: NaiveDate) -> Self {
        match latest {
            Some(from) => Self {
                from: Some(from),
                to: Some(today),
            },
            None => Self::unbounded(),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Why a crawl stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CrawlStop {
    /// A page came back with no rows
    EmptyPage,
    /// The source reported a non-zero status code
    SourceStatus { code: i64 },
    /// The page could not be fetched or decoded
    SourceUnavailable { message: String },
    /// The page-count guard was reached
    PageLimit { max_pages: u32 },
}

impl fmt::Display for CrawlStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlStop::EmptyPage => f.write_str("empty page"),
            CrawlStop::SourceStatus { code } => write!(f, "source status {}", code),
            CrawlStop::SourceUnavailable { message } => write!(f, "source unavailable: {}", message),
            CrawlStop::PageLimit { max_pages } => write!(f, "page limit {} reached", max_pages),
        }
    }
}

/// Outcome of one crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub fund_code: FundCode,
    pub window: CrawlWindow,
    /// Pages that carried rows
    pub pages_with_data: u32,
    /// Last page number requested (the terminal one, unless the guard hit)
    pub last_page: u32,
    pub records_inserted: u64,
    /// Rows the store already had
    pub records_existing: u64,
    /// Rows that failed to parse or store
    pub records_failed: u64,
    pub stop: CrawlStop,
}

impl CrawlReport {
    fn new(fund_code: FundCode, window: CrawlWindow) -> Self {
        Self {
            fund_code,
            window,
            pages_with_data: 0,
            last_page: 0,
            records_inserted: 0,
            records_existing: 0,
            records_failed: 0,
            stop: CrawlStop::EmptyPage,
        }
    }

    /// True when the source itself signalled the end of data
    pub fn is_complete(&self) -> bool {
        !matches!(self.stop, CrawlStop::PageLimit { .. })
    }
}

/// Drives a crawl for one fund against a source and a store
pub struct Crawler<'a> {
    source: &'a dyn NavSource,
    store: &'a dyn NavStore,
    config: CrawlConfig,
}

impl<'a> Crawler<'a> {
    pub fn new(source: &'a dyn NavSource, store: &'a dyn NavStore) -> Self {
        Self {
            source,
            store,
            config: CrawlConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    /// Crawls the NAV history of `fund_code`
    ///
    /// # Errors
    ///
    /// Returns `FundError::Store` only if the latest stored date cannot be
    /// read. Every later failure ends or skips part of the crawl instead.
    pub async fn crawl(&self, fund_code: &FundCode, today: NaiveDate) -> Result<CrawlReport, FundError> {
        let latest = self.store.latest_info_date(fund_code).await?;
        let window = CrawlWindow::from_cursor(latest, today);

        info!(
            fund_code = %fund_code,
            from = ?window.from,
            to = ?window.to,
            incremental = !window.is_unbounded(),
            "Starting NAV crawl"
        );

        let mut report = CrawlReport::new(fund_code.clone(), window);
        let mut page = 1u32;

        loop {
            if page > self.config.max_pages {
                warn!(
                    fund_code = %fund_code,
                    max_pages = self.config.max_pages,
                    "Page limit reached before the source ran out of data"
                );
                report.stop = CrawlStop::PageLimit {
                    max_pages: self.config.max_pages,
                };
                break;
            }

            report.last_page = page;
            let request = PageRequest {
                fund_code: fund_code.clone(),
                from: window.from,
                to: window.to,
                page,
            };
            debug!(fund_code = %fund_code, page, "Fetching NAV page");

            let nav_page = match self.source.fetch_page(&request).await {
                Ok(nav_page) => nav_page,
                Err(e) => {
                    warn!(fund_code = %fund_code, page, error = %e, "NAV page unavailable, ending crawl");
                    report.stop = CrawlStop::SourceUnavailable { message: e.to_string() };
                    break;
                }
            };

            if let Some(stop) = terminal_reason(&nav_page) {
                report.stop = stop;
                break;
            }

            report.pages_with_data += 1;
            self.store_page(fund_code, &nav_page, &mut report).await;
            page += 1;
        }

        info!(
            fund_code = %fund_code,
            pages = report.pages_with_data,
            inserted = report.records_inserted,
            existing = report.records_existing,
            failed = report.records_failed,
            stop = %report.stop,
            "NAV crawl finished"
        );
        Ok(report)
    }

    async fn store_page(&self, fund_code: &FundCode, nav_page: &NavPage, report: &mut CrawlReport) {
        for remote in &nav_page.records {
            let record = match to_record(fund_code, remote, self.source.source_tag()) {
                Ok(record) => record,
                Err(e) => {
                    warn!(fund_code = %fund_code, row = ?remote, error = %e, "Skipping unparseable NAV row");
                    report.records_failed += 1;
                    continue;
                }
            };

            match self.store.insert_nav(&record).await {
                Ok(true) => report.records_inserted += 1,
                Ok(false) => {
                    debug!(fund_code = %fund_code, info_date = %record.info_date, "NAV already stored");
                    report.records_existing += 1;
                }
                Err(e) => {
                    warn!(
                        fund_code = %fund_code,
                        info_date = %record.info_date,
                        unit_worth = %record.unit_worth,
                        total_worth = %record.total_worth,
                        error = %e,
                        "Failed to save NAV record"
                    );
                    report.records_failed += 1;
                }
            }
        }
    }
}

fn terminal_reason(page: &NavPage) -> Option<CrawlStop> {
    if !page.is_terminal() {
        return None;
    }
    if page.status_code != 0 {
        Some(CrawlStop::SourceStatus { code: page.status_code })
    } else {
        Some(CrawlStop::EmptyPage)
    }
}

/// Validates a remote row into a NAV record
///
/// # Errors
///
/// Returns `FundError::InvalidData` if the date or either NAV does not parse.
pub fn to_record(fund_code: &FundCode, remote: &RemoteNav, source: &str) -> Result<NavRecord, FundError> {
    let info_date = parse_date(&remote.info_date).map_err(|e| FundError::InvalidData(e.to_string()))?;
    let unit_worth = parse_worth(&remote.unit_worth)?;
    let total_worth = parse_worth(&remote.total_worth)?;
    Ok(NavRecord::new(fund_code.clone(), info_date, unit_worth, total_worth, source))
}

fn parse_worth(raw: &str) -> Result<Decimal, FundError> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| FundError::InvalidData(format!("NAV '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::{MockNavStore, ScriptedNavSource};
    use rust_decimal_macros::dec;

    fn code() -> FundCode {
        FundCode::parse("000962").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(d: &str, unit: &str) -> RemoteNav {
        RemoteNav {
            info_date: d.to_string(),
            unit_worth: unit.to_string(),
            total_worth: unit.to_string(),
        }
    }

    fn page(rows: Vec<RemoteNav>) -> NavPage {
        NavPage {
            status_code: 0,
            total: Some(rows.len() as u64),
            records: rows,
        }
    }

    #[test]
    fn test_window_from_cursor() {
        let today = date(2026, 10, 18);
        assert!(CrawlWindow::from_cursor(None, today).is_unbounded());

        let window = CrawlWindow::from_cursor(Some(date(2022, 4, 11)), today);
        assert_eq!(window.from, Some(date(2022, 4, 11)));
        assert_eq!(window.to, Some(today));
    }

    #[test]
    fn test_to_record_parses_remote_row() {
        let record = to_record(&code(), &row("2022-04-11 00:00:00", "1.2340"), "sina").unwrap();
        assert_eq!(record.info_date, date(2022, 4, 11));
        assert_eq!(record.unit_worth, dec!(1.234));
        assert_eq!(record.source, "sina");

    }

    #[test]
    fn test_malformed_remote_rows_are_invalid_data() {
        let bad_nav = to_record(&code(), &row("2022-04-11", "n/a"), "sina").unwrap_err();
        assert!(matches!(bad_nav, FundError::InvalidData(ref msg) if msg.contains("'n/a'")));
        assert!(!bad_nav.is_input_error());

        let bad_date = to_record(&code(), &row("", "1.0"), "sina").unwrap_err();
        assert!(matches!(bad_date, FundError::InvalidData(_)));
        assert!(!bad_date.is_input_error());
    }

    #[test]
    fn test_terminal_reason_follows_page_state() {
        let rows = page(vec![row("2022-04-11", "1.0")]);
        assert!(!rows.is_terminal());
        assert_eq!(terminal_reason(&rows), None);

        let empty = page(vec![]);
        assert!(empty.is_terminal());
        assert_eq!(terminal_reason(&empty), Some(CrawlStop::EmptyPage));

        let failed = NavPage {
            status_code: 7,
            ..NavPage::default()
        };
        assert_eq!(terminal_reason(&failed), Some(CrawlStop::SourceStatus { code: 7 }));
    }

    #[tokio::test]
    async fn test_status_code_ends_crawl() {
        let source = ScriptedNavSource::with_pages(vec![NavPage {
            status_code: 3,
            records: vec![row("2022-04-11", "1.0")],
            total: None,
        }]);
        let store = MockNavStore::new();

        let report = Crawler::new(&source, &store).crawl(&code(), date(2026, 10, 18)).await.unwrap();

        assert_eq!(report.stop, CrawlStop::SourceStatus { code: 3 });
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_rows_are_counted_not_inserted() {
        let store = MockNavStore::new();
        let first = to_record(&code(), &row("2022-04-11", "1.0"), "mock").unwrap();
        store.insert_nav(&first).await.unwrap();

        let source = ScriptedNavSource::with_pages(vec![page(vec![
            row("2022-04-11", "1.0"),
            row("2022-04-12", "1.1"),
        ])]);

        let report = Crawler::new(&source, &store).crawl(&code(), date(2026, 10, 18)).await.unwrap();

        assert_eq!(report.records_inserted, 1);
        assert_eq!(report.records_existing, 1);
        assert_eq!(store.len().await, 2);
    }
}
