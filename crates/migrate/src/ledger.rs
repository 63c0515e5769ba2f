//! Applied-Set Ledger - persistent record of applied migrations
//!
//! The ledger table is the bootstrap special case: it is created if absent
//! before any other operation runs and is never itself migrated. Record and
//! unrecord run inside the owning unit's transaction so a failed unit leaves
//! no ledger row behind.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashSet;

use crate::definitions::{AppliedRecord, MigrationUnit};
use crate::error::{MigrateError, MigrateResult};

/// Persistent applied-set store backed by a single table
#[derive(Debug, Clone)]
pub struct Ledger {
    pool: PgPool,
    table: String,
}

impl Ledger {
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the ledger table if it does not exist yet.
    pub async fn ensure_table(&self) -> MigrateResult<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    \
                id VARCHAR(255) PRIMARY KEY,\n    \
                batch INTEGER NOT NULL,\n    \
                applied_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP\n\
            );",
            self.table
        );
        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| MigrateError::Ledger(format!("failed to create ledger table: {}", e)))?;
        Ok(())
    }

    /// All applied records, most recent first (batch, then identifier)
    pub async fn applied(&self) -> MigrateResult<Vec<AppliedRecord>> {
        let sql = format!(
            "SELECT id, batch, applied_at FROM {} ORDER BY batch DESC, id DESC",
            self.table
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MigrateError::Ledger(format!("failed to query applied set: {}", e)))?;
        rows.iter().map(Self::row_to_record).collect()
    }

    /// Set of applied identifiers
    pub async fn applied_ids(&self) -> MigrateResult<HashSet<String>> {
        Ok(self.applied().await?.into_iter().map(|r| r.id).collect())
    }

    /// Units not yet recorded as applied, in ascending identifier order.
    ///
    /// Gaps are tolerated: a unit older than an already-applied one is still
    /// returned. The platform's own history includes out-of-order
    /// application, which is why several units carry their own guards.
    pub async fn pending(&self, all_units: &[MigrationUnit]) -> MigrateResult<Vec<MigrationUnit>> {
        let applied = self.applied_ids().await?;
        Ok(pending_against(all_units, &applied))
    }

    /// Latest batch number, 0 when nothing has been applied
    pub async fn latest_batch(&self) -> MigrateResult<i32> {
        let sql = format!("SELECT COALESCE(MAX(batch), 0) FROM {}", self.table);
        let row = sqlx::query(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| MigrateError::Ledger(format!("failed to get latest batch: {}", e)))?;
        let latest: i32 = row
            .try_get(0)
            .map_err(|e| MigrateError::Ledger(format!("failed to read latest batch: {}", e)))?;
        Ok(latest)
    }

    pub async fn next_batch(&self) -> MigrateResult<i32> {
        Ok(self.latest_batch().await? + 1)
    }

    /// Records in one batch, descending identifier order (rollback order)
    pub async fn records_in_batch(&self, batch: i32) -> MigrateResult<Vec<AppliedRecord>> {
        let sql = format!(
            "SELECT id, batch, applied_at FROM {} WHERE batch = $1 ORDER BY id DESC",
            self.table
        );
        let rows = sqlx::query(&sql)
            .bind(batch)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MigrateError::Ledger(format!("failed to query batch: {}", e)))?;
        rows.iter().map(Self::row_to_record).collect()
    }

    /// The most recently applied N records, descending identifier order
    pub async fn last_applied(&self, count: usize) -> MigrateResult<Vec<AppliedRecord>> {
        let sql = format!(
            "SELECT id, batch, applied_at FROM {} ORDER BY batch DESC, id DESC LIMIT $1",
            self.table
        );
        let rows = sqlx::query(&sql)
            .bind(count as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MigrateError::Ledger(format!("failed to query applied set: {}", e)))?;
        rows.iter().map(Self::row_to_record).collect()
    }

    /// Record a unit as applied, inside the unit's transaction.
    pub async fn record(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: &str,
        batch: i32,
    ) -> MigrateResult<()> {
        let sql = format!(
            "INSERT INTO {} (id, batch, applied_at) VALUES ($1, $2, $3)",
            self.table
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(batch)
            .bind(Utc::now())
            .execute(&mut **tx)
            .await
            .map_err(|e| MigrateError::Ledger(format!("failed to record migration: {}", e)))?;
        Ok(())
    }

    /// Remove a unit's record, inside the rollback transaction.
    pub async fn unrecord(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: &str,
    ) -> MigrateResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        sqlx::query(&sql)
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| MigrateError::Ledger(format!("failed to remove migration record: {}", e)))?;
        Ok(())
    }

    fn row_to_record(row: &sqlx::postgres::PgRow) -> MigrateResult<AppliedRecord> {
        Ok(AppliedRecord {
            id: row
                .try_get("id")
                .map_err(|e| MigrateError::Ledger(format!("failed to read id: {}", e)))?,
            batch: row
                .try_get("batch")
                .map_err(|e| MigrateError::Ledger(format!("failed to read batch: {}", e)))?,
            applied_at: row
                .try_get("applied_at")
                .map_err(|e| MigrateError::Ledger(format!("failed to read applied_at: {}", e)))?,
        })
    }
}

/// Pure pending computation: units whose identifier is not in the applied
/// set, ascending identifier order.
pub fn pending_against(
    all_units: &[MigrationUnit],
    applied: &HashSet<String>,
) -> Vec<MigrationUnit> {
    all_units
        .iter()
        .filter(|u| !applied.contains(&u.id))
        .cloned()
        .collect()
}
