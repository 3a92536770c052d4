//! JSON output for application listings
//!
//! Rows are wrapped as `{"data": [...], "meta": {"count", "generated_at", "version"}}`
//! so scripts can check the row count without walking the array.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Rows printed by a single command.
#[derive(Debug, Serialize)]
pub struct RowsEnvelope<'a, T> {
    pub data: &'a [T],
    pub meta: RowsMeta,
}

#[derive(Debug, Serialize)]
pub struct RowsMeta {
    pub count: usize,
    pub generated_at: DateTime<Utc>,
    pub version: &'static str,
}

impl<'a, T> RowsEnvelope<'a, T> {
    pub fn at(rows: &'a [T], generated_at: DateTime<Utc>) -> Self {
        Self {
            data: rows,
            meta: RowsMeta {
                count: rows.len(),
                generated_at,
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

pub fn format_json<T: Serialize>(rows: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RowsEnvelope::at(rows, Utc::now()))
}
