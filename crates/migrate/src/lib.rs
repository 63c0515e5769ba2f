//! # boxoffice-migrate: Schema Migration Engine
//!
//! Database migration layer for the boxoffice ticketing platform.
//!
//! Migrations are authored in code as [`MigrationUnit`]s: an identifier plus
//! two independently written operation sequences (forward and reverse). The
//! [`MigrationRegistry`] orders them, the [`Ledger`] tracks what has been
//! applied, and the [`MigrationRunner`] executes pending units against a
//! PostgreSQL database one transaction per unit.

pub mod definitions;
pub mod error;
pub mod ledger;
pub mod registry;
pub mod rollback;
pub mod runner;
pub mod schema;

// Re-export core traits and types
pub use definitions::*;
pub use error::*;
pub use ledger::*;
pub use registry::*;
pub use rollback::*;
pub use runner::*;
pub use schema::*;
