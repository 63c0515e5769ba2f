//! Migration Runner - executes migrations against the database
//!
//! Applies pending units in ascending identifier order, one transaction per
//! unit: all forward operations, then the ledger record, then commit.
//! Postgres DDL is transactional, so a failed unit leaves neither schema
//! changes nor a ledger row. On failure the remaining queue is abandoned and
//! the failing unit, operation and engine error are surfaced together.

use sqlx::{PgPool, Postgres, Transaction};

use crate::definitions::{
    MigrationConfig, MigrationRunResult, MigrationStatus, MigrationUnit,
};
use crate::error::{is_duplicate_object, MigrateError, MigrateResult};
use crate::ledger::{pending_against, Ledger};
use crate::registry::MigrationRegistry;
use crate::schema::{PostgresDialect, SchemaOperation, SqlDialect};

/// Migration runner that executes registered units against a database
pub struct MigrationRunner {
    registry: MigrationRegistry,
    ledger: Ledger,
    pool: PgPool,
    dialect: Box<dyn SqlDialect>,
}

impl MigrationRunner {
    /// Create a runner with the default configuration and Postgres dialect
    pub fn new(registry: MigrationRegistry, pool: PgPool) -> Self {
        Self::with_config(registry, pool, MigrationConfig::default())
    }

    pub fn with_config(registry: MigrationRegistry, pool: PgPool, config: MigrationConfig) -> Self {
        Self {
            ledger: Ledger::new(pool.clone(), config.ledger_table),
            registry,
            pool,
            dialect: Box::new(PostgresDialect),
        }
    }

    /// Create a runner from a database URL
    pub async fn from_url(
        registry: MigrationRegistry,
        database_url: &str,
        config: MigrationConfig,
    ) -> MigrateResult<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| MigrateError::Connection(format!("failed to connect: {}", e)))?;
        Ok(Self::with_config(registry, pool, config))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn registry(&self) -> &MigrationRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn dialect(&self) -> &dyn SqlDialect {
        self.dialect.as_ref()
    }

    /// Run all pending migrations in ascending identifier order.
    pub async fn run(&self) -> MigrateResult<MigrationRunResult> {
        let start_time = std::time::Instant::now();

        self.ledger.ensure_table().await?;

        // The ledger and the registry must agree before anything runs; an
        // applied identifier with no registered unit aborts here exactly as
        // it does for status and rollback.
        let applied = self.ledger.applied_ids().await?;
        self.registry
            .verify_applied_ids(applied.iter().map(|s| s.as_str()))?;

        let pending = pending_against(self.registry.ordered(), &applied);
        let skipped_count = self.registry.len() - pending.len();

        if pending.is_empty() {
            return Ok(MigrationRunResult {
                applied_count: 0,
                applied_migrations: Vec::new(),
                skipped_count,
                execution_time_ms: start_time.elapsed().as_millis(),
            });
        }

        let batch = self.ledger.next_batch().await?;
        let mut applied_migrations = Vec::new();

        // Fail-fast: a later unit is not attempted once an earlier one fails.
        for unit in &pending {
            tracing::info!(migration = %unit.id, batch, "applying migration: {}", unit.name);
            self.apply_unit(unit, batch).await?;
            applied_migrations.push(unit.id.clone());
        }

        Ok(MigrationRunResult {
            applied_count: applied_migrations.len(),
            applied_migrations,
            skipped_count,
            execution_time_ms: start_time.elapsed().as_millis(),
        })
    }

    /// Apply a single unit: forward operations plus ledger record in one
    /// transaction.
    async fn apply_unit(&self, unit: &MigrationUnit, batch: i32) -> MigrateResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            MigrateError::Connection(format!("failed to start transaction: {}", e))
        })?;

        for op in &unit.up {
            self.execute_operation(&mut tx, unit, op).await?;
        }

        self.ledger.record(&mut tx, &unit.id, batch).await?;

        tx.commit().await.map_err(|e| {
            MigrateError::Connection(format!(
                "failed to commit migration {}: {}",
                unit.id, e
            ))
        })?;

        Ok(())
    }

    /// Execute one operation inside the unit's transaction. Only operations
    /// that explicitly tolerate "already exists" failures may swallow them.
    pub(crate) async fn execute_operation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        unit: &MigrationUnit,
        op: &SchemaOperation,
    ) -> MigrateResult<()> {
        let statements = self.dialect.render(op)?;

        for statement in statements {
            if statement.trim().is_empty() {
                continue;
            }
            if let Err(e) = sqlx::query(&statement).execute(&mut **tx).await {
                let code = e
                    .as_database_error()
                    .and_then(|db| db.code().map(|c| c.to_string()));
                if op.tolerates_existing() && is_duplicate_object(code.as_deref()) {
                    tracing::warn!(
                        migration = %unit.id,
                        operation = op.kind(),
                        "object already exists, tolerated by this unit: {}",
                        e
                    );
                    continue;
                }
                return Err(MigrateError::from_sqlx(op.kind(), op.table(), &e));
            }
        }

        Ok(())
    }

    /// Check whether a table exists in the current schema.
    pub async fn has_table(&self, table: &str) -> MigrateResult<bool> {
        let row = sqlx::query(self.dialect.has_table_sql())
            .bind(table)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| MigrateError::from_sqlx("HasTable", table, &e))?;
        Ok(row.is_some())
    }

    /// Check whether a column exists on a table in the current schema.
    pub async fn has_column(&self, table: &str, column: &str) -> MigrateResult<bool> {
        let row = sqlx::query(self.dialect.has_column_sql())
            .bind(table)
            .bind(column)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| MigrateError::from_sqlx("HasColumn", table, &e))?;
        Ok(row.is_some())
    }

    /// Applied/pending state for every registered unit, ascending order.
    /// Fails with LedgerCorruption if the ledger records an identifier no
    /// registered unit carries.
    pub async fn status(&self) -> MigrateResult<Vec<(MigrationUnit, MigrationStatus)>> {
        self.ledger.ensure_table().await?;
        let applied = self.ledger.applied().await?;

        self.registry
            .verify_applied_ids(applied.iter().map(|r| r.id.as_str()))?;

        let mut status_list = Vec::new();
        for unit in self.registry.ordered() {
            let status = applied
                .iter()
                .find(|r| r.id == unit.id)
                .map(|r| MigrationStatus::Applied {
                    applied_at: r.applied_at,
                    batch: r.batch,
                })
                .unwrap_or(MigrationStatus::Pending);
            status_list.push((unit.clone(), status));
        }

        Ok(status_list)
    }
}
