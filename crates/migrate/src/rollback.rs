//! Migration Rollback - reverses applied migrations
//!
//! Rollback granularity is the last batch by default, or a caller-specified
//! number of units. Units revert in descending identifier order, the exact
//! reverse of apply order, one transaction per unit. Reverse sequences are
//! the unit author's own; they are never derived from the forward sequence.

use crate::definitions::{AppliedRecord, RollbackResult};
use crate::error::{MigrateError, MigrateResult};
use crate::runner::MigrationRunner;

/// Extension trait for MigrationRunner adding rollback functionality
pub trait MigrationRollback {
    /// Roll back every unit in the most recent batch
    async fn rollback_last_batch(&self) -> MigrateResult<RollbackResult>;

    /// Roll back every unit in a specific batch
    async fn rollback_batch(&self, batch: i32) -> MigrateResult<RollbackResult>;

    /// Roll back the most recently applied N units, regardless of batch
    async fn rollback_step(&self, step: usize) -> MigrateResult<RollbackResult>;

    /// Roll back everything, batch by batch
    async fn rollback_all(&self) -> MigrateResult<RollbackResult>;
}

impl MigrationRollback for MigrationRunner {
    async fn rollback_last_batch(&self) -> MigrateResult<RollbackResult> {
        let start_time = std::time::Instant::now();

        self.ledger().ensure_table().await?;
        let latest_batch = self.ledger().latest_batch().await?;

        if latest_batch == 0 {
            return Ok(RollbackResult {
                rolled_back_count: 0,
                rolled_back_migrations: Vec::new(),
                execution_time_ms: start_time.elapsed().as_millis(),
            });
        }

        self.rollback_batch(latest_batch).await
    }

    async fn rollback_batch(&self, batch: i32) -> MigrateResult<RollbackResult> {
        let start_time = std::time::Instant::now();
        let records = self.ledger().records_in_batch(batch).await?;
        let rolled_back_migrations = self.revert_records(&records).await?;

        Ok(RollbackResult {
            rolled_back_count: rolled_back_migrations.len(),
            rolled_back_migrations,
            execution_time_ms: start_time.elapsed().as_millis(),
        })
    }

    async fn rollback_step(&self, step: usize) -> MigrateResult<RollbackResult> {
        let start_time = std::time::Instant::now();

        self.ledger().ensure_table().await?;
        let records = self.ledger().last_applied(step).await?;
        let rolled_back_migrations = self.revert_records(&records).await?;

        Ok(RollbackResult {
            rolled_back_count: rolled_back_migrations.len(),
            rolled_back_migrations,
            execution_time_ms: start_time.elapsed().as_millis(),
        })
    }

    async fn rollback_all(&self) -> MigrateResult<RollbackResult> {
        let start_time = std::time::Instant::now();
        let mut total_rolled_back = Vec::new();

        loop {
            let result = self.rollback_last_batch().await?;
            if result.rolled_back_count == 0 {
                break;
            }
            total_rolled_back.extend(result.rolled_back_migrations);
        }

        Ok(RollbackResult {
            rolled_back_count: total_rolled_back.len(),
            rolled_back_migrations: total_rolled_back,
            execution_time_ms: start_time.elapsed().as_millis(),
        })
    }
}

impl MigrationRunner {
    /// Revert the given records in order, aborting on first failure. The
    /// ledger queries already return descending identifier order.
    async fn revert_records(&self, records: &[AppliedRecord]) -> MigrateResult<Vec<String>> {
        let mut rolled_back = Vec::new();

        for record in records {
            let unit = self
                .registry()
                .get(&record.id)
                .ok_or_else(|| MigrateError::LedgerCorruption {
                    id: record.id.clone(),
                })?;

            tracing::info!(migration = %unit.id, "rolling back migration: {}", unit.name);

            let mut tx = self.pool().begin().await.map_err(|e| {
                MigrateError::Connection(format!("failed to start rollback transaction: {}", e))
            })?;

            for op in &unit.down {
                self.execute_operation(&mut tx, unit, op).await?;
            }

            self.ledger().unrecord(&mut tx, &unit.id).await?;

            tx.commit().await.map_err(|e| {
                MigrateError::Connection(format!(
                    "failed to commit rollback of {}: {}",
                    unit.id, e
                ))
            })?;

            rolled_back.push(record.id.clone());
        }

        Ok(rolled_back)
    }
}
