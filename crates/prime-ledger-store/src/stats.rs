//! Site metric samples.
//!
//! `site_stats` is not registered for row security, so the gate passes
//! every caller through. Samples are append-only; one metric may have
//! many samples per day.

use chrono::{NaiveDate, Utc};
use prime_ledger_core::{Caller, MetricId, MetricSample, NewMetricSample, TableAction};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use crate::error::Result;
use crate::policy::check_access;
use crate::schema::table;
use crate::Store;

const METRIC_COLUMNS: &str = "id, metric, value, day, created_at";

impl Store {
    /// Appends one metric sample and returns the stored row.
    ///
    /// # Errors
    /// `StoreError::Database` if the insert fails.
    pub fn record_metric(&self, caller: Caller, new: &NewMetricSample) -> Result<MetricSample> {
        let conn = self.conn();
        check_access(&conn, caller, table::SITE_STATS, TableAction::Insert)?;

        let sample = MetricSample {
            id: MetricId::generate(),
            metric: new.metric.clone(),
            value: new.value,
            day: new.day,
            created_at: Utc::now(),
        };
        conn.execute(
            "INSERT INTO site_stats (id, metric, value, day, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                sample.id.to_string(),
                sample.metric,
                sample.value,
                sample.day,
                sample.created_at,
            ],
        )?;
        tracing::debug!(metric = %sample.metric, value = sample.value, "metric recorded");
        Ok(sample)
    }

    /// All samples taken on `day`, ordered by metric name.
    ///
    /// # Errors
    /// `StoreError::Database` if the query fails.
    pub fn metrics_for_day(&self, caller: Caller, day: NaiveDate) -> Result<Vec<MetricSample>> {
        let conn = self.conn();
        check_access(&conn, caller, table::SITE_STATS, TableAction::Select)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {METRIC_COLUMNS} FROM site_stats WHERE day = ?1 ORDER BY metric ASC"
        ))?;
        let rows = stmt.query_map(params![day], row_to_sample)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// The most recently recorded sample of `metric`, if any.
    ///
    /// # Errors
    /// `StoreError::Database` if the query fails.
    pub fn latest_metric(&self, caller: Caller, metric: &str) -> Result<Option<MetricSample>> {
        let conn = self.conn();
        check_access(&conn, caller, table::SITE_STATS, TableAction::Select)?;
        let sample = conn
            .query_row(
                &format!(
                    "SELECT {METRIC_COLUMNS} FROM site_stats WHERE metric = ?1 \
                     ORDER BY created_at DESC, rowid DESC LIMIT 1"
                ),
                params![metric],
                row_to_sample,
            )
            .optional()?;
        Ok(sample)
    }
}

fn row_to_sample(row: &Row<'_>) -> rusqlite::Result<MetricSample> {
    let id: String = row.get("id")?;
    Ok(MetricSample {
        id: id
            .parse::<MetricId>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
        metric: row.get("metric")?,
        value: row.get("value")?,
        day: row.get("day")?,
        created_at: row.get("created_at")?,
    })
}

// ============================================================================
// Tests
// ============================================================================
