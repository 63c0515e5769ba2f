//! Schema Operation Layer
//!
//! Structured schema-change primitives, the fluent builder that authors
//! them, and the dialect that renders them to DDL. This module is the only
//! place that knows how an operation becomes SQL.

pub mod builder;
pub mod dialect;
pub mod operation;

pub use builder::*;
pub use dialect::*;
pub use operation::*;
