//! Migration Definitions - Core types and structures for migrations
//!
//! Defines the fundamental types used throughout the migration system
//! including MigrationUnit, AppliedRecord, and MigrationConfig.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::SchemaOperation;

/// A single reversible schema change.
///
/// The forward and reverse sequences are authored independently; the reverse
/// is never derived from the forward. Several units in the platform set are
/// deliberately asymmetric (a default restored to a different value, an enum
/// narrowed back below what forward widened).
#[derive(Debug, Clone)]
pub struct MigrationUnit {
    /// Unique, sortable identifier (timestamp prefix plus slug)
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Operations applied in author order when migrating forward
    pub up: Vec<SchemaOperation>,
    /// Operations applied in author order when rolling back
    pub down: Vec<SchemaOperation>,
}

impl MigrationUnit {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        up: Vec<SchemaOperation>,
        down: Vec<SchemaOperation>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            up,
            down,
        }
    }
}

/// Ledger row for an applied migration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedRecord {
    /// Migration identifier
    pub id: String,
    /// When the migration was applied
    pub applied_at: DateTime<Utc>,
    /// Batch number (for grouping migrations applied in one run)
    pub batch: i32,
}

/// Configuration for the migration system
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Table name for the applied-set ledger
    pub ledger_table: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            ledger_table: "boxoffice_migrations".to_string(),
        }
    }
}

/// Result of running migrations forward
#[derive(Debug)]
pub struct MigrationRunResult {
    /// Number of migrations that were applied
    pub applied_count: usize,
    /// IDs of migrations that were applied, in apply order
    pub applied_migrations: Vec<String>,
    /// Number of migrations that were skipped (already applied)
    pub skipped_count: usize,
    /// Total execution time in milliseconds
    pub execution_time_ms: u128,
}

/// Result of rolling back migrations
#[derive(Debug)]
pub struct RollbackResult {
    /// Number of migrations that were rolled back
    pub rolled_back_count: usize,
    /// IDs of migrations that were rolled back, in rollback order
    pub rolled_back_migrations: Vec<String>,
    /// Total execution time in milliseconds
    pub execution_time_ms: u128,
}

/// Applied/pending state of a single unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationStatus {
    /// Not yet applied
    Pending,
    /// Applied, with the ledger bookkeeping
    Applied {
        applied_at: DateTime<Utc>,
        batch: i32,
    },
}
