//! Member store over a row-level capability
//!
//! [`RowStore`] is the minimal surface needed from the spreadsheet vendor.
//! [`MemberStore`] maps [`MemberRecord`]s onto it for one fixed range.
//!
//! Writes are full-range replaces. The store does not lock or queue: two
//! concurrent `update_members` calls race and the last write applied by the
//! remote service wins.

use crate::error::SheetsResult;
use async_trait::async_trait;
use shared::models::{MemberRecord, Row};
use std::sync::Arc;

/// Row-level access to a spreadsheet
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Fetch every row of `range`. An empty range yields no rows.
    async fn get_rows(&self, range: &str) -> SheetsResult<Vec<Row>>;

    /// Overwrite `range` starting at its first row, parsing values as user input.
    /// Rows past `rows.len()` keep their previous content.
    async fn put_rows(&self, range: &str, rows: &[Row]) -> SheetsResult<()>;
}

/// Members table bound to one spreadsheet range
#[derive(Clone)]
pub struct MemberStore {
    rows: Arc<dyn RowStore>,
    range: String,
}

impl MemberStore {
    pub fn new(rows: Arc<dyn RowStore>, range: impl Into<String>) -> Self {
        Self {
            rows,
            range: range.into(),
        }
    }

    /// The A1 range this store reads and writes
    pub fn range(&self) -> &str {
        &self.range
    }

    /// Replace the configured range with `members`, in order.
    ///
    /// Errors from authentication or the remote API are returned unchanged.
    pub async fn update_members(&self, members: &[MemberRecord]) -> SheetsResult<()> {
        let rows: Vec<Row> = members.iter().map(MemberRecord::to_row).collect();
        self.rows.put_rows(&self.range, &rows).await?;
        tracing::info!(range = %self.range, count = rows.len(), "Members updated");
        Ok(())
    }

    /// Read every member row of the configured range
    pub async fn read_members(&self) -> SheetsResult<Vec<MemberRecord>> {
        let rows = self.rows.get_rows(&self.range).await?;
        tracing::debug!(range = %self.range, count = rows.len(), "Members read");
        Ok(rows.iter().map(|row| MemberRecord::from_row(row)).collect())
    }
}
