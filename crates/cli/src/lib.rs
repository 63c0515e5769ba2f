//! boxoffice CLI library
//!
//! Exposes the command implementations and the platform's migration set so
//! integration tests can exercise them without going through the binary.

pub mod commands;
pub mod migrations;
