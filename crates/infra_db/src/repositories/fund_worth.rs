//! Fund NAV repository implementation
//!
//! This module provides database access for the `fund_worth` table, one row
//! per fund and trading day, and implements the `NavStore` port on it.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use core_kernel::{FundCode, PortError};
use domain_fund::{NavQuery, NavRecord, NavStore};

use crate::error::DatabaseError;

/// Database row for a NAV record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FundWorthRow {
    pub id: i64,
    pub fund_code: String,
    pub info_date: NaiveDate,
    pub unit_worth: Decimal,
    pub total_worth: Decimal,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<FundWorthRow> for NavRecord {
    type Error = DatabaseError;

    fn try_from(row: FundWorthRow) -> Result<Self, Self::Error> {
        let fund_code = FundCode::parse(&row.fund_code)
            .map_err(|e| DatabaseError::InvalidData(e.to_string()))?;

        Ok(NavRecord::new(
            fund_code,
            row.info_date,
            row.unit_worth,
            row.total_worth,
            row.source,
        )
        .with_id(row.id))
    }
}

/// PostgreSQL-backed NAV store
///
/// Uniqueness of (fund code, info date) is enforced by the table, so inserting
/// a record twice is a no-op.
#[derive(Debug, Clone)]
pub struct PgNavStore {
    pool: PgPool,
}

impl PgNavStore {
    /// Creates a new store with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Retrieves the latest stored info date for a fund
    pub async fn max_info_date(&self, fund_code: &FundCode) -> Result<Option<NaiveDate>, DatabaseError> {
        let latest: Option<NaiveDate> =
            sqlx::query_scalar("SELECT MAX(info_date) FROM fund_worth WHERE fund_code = $1")
                .bind(fund_code.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(latest)
    }

    /// Inserts a NAV row unless one exists for the same fund and date
    ///
    /// # Returns
    ///
    /// `true` if a row was written
    pub async fn insert(&self, record: &NavRecord) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO fund_worth (fund_code, info_date, unit_worth, total_worth, source)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (fund_code, info_date) DO NOTHING
            "#,
        )
        .bind(record.fund_code.as_str())
        .bind(record.info_date)
        .bind(record.unit_worth)
        .bind(record.total_worth)
        .bind(&record.source)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Retrieves NAV rows for a fund, optionally bounded, in ascending date order
    ///
    /// # Arguments
    ///
    /// * `query` - Fund code plus inclusive `from` / `to` bounds
    pub async fn find_range(&self, query: &NavQuery) -> Result<Vec<FundWorthRow>, DatabaseError> {
        let rows = range_query(query)
            .build_query_as::<FundWorthRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Counts the stored rows for a fund
    pub async fn count(&self, fund_code: &FundCode) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fund_worth WHERE fund_code = $1")
            .bind(fund_code.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn range_query(query: &NavQuery) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT id, fund_code, info_date, unit_worth, total_worth, source, created_at \
         FROM fund_worth WHERE fund_code = ",
    );
    builder.push_bind(query.fund_code.as_str());

    if let Some(from) = query.from {
        builder.push(" AND info_date >= ").push_bind(from);
    }
    if let Some(to) = query.to {
        builder.push(" AND info_date <= ").push_bind(to);
    }

    builder.push(" ORDER BY info_date ASC");
    builder
}

#[async_trait]
impl NavStore for PgNavStore {
    #[instrument(skip(self), fields(fund_code = %fund_code))]
    async fn latest_info_date(&self, fund_code: &FundCode) -> Result<Option<NaiveDate>, PortError> {
        Ok(self.max_info_date(fund_code).await?)
    }

    #[instrument(skip(self, record), fields(fund_code = %record.fund_code, info_date = %record.info_date))]
    async fn insert_nav(&self, record: &NavRecord) -> Result<bool, PortError> {
        let inserted = self.insert(record).await?;
        debug!(inserted, "NAV insert");
        Ok(inserted)
    }

    #[instrument(skip(self, query), fields(fund_code = %query.fund_code))]
    async fn query_nav(&self, query: &NavQuery) -> Result<Vec<NavRecord>, PortError> {
        let rows = self.find_range(query).await?;
        debug!(count = rows.len(), "NAV rows loaded");

        let records = rows
            .into_iter()
            .map(NavRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn has_fund_data(&self, fund_code: &FundCode) -> Result<bool, PortError> {
        Ok(self.count(fund_code).await? > 0)
    }

    async fn ping(&self) -> Result<(), PortError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}
