//! Error types for the migration engine
//!
//! Every failure surfaces the failing operation and table together with the
//! underlying engine message. Nothing here is retried automatically; schema
//! changes are not safely retryable without operator judgment.

/// Result type alias for migration operations
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Error types for migration engine operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum MigrateError {
    /// Two registered migration units share an identifier
    #[error("duplicate migration identifier: {0}")]
    DuplicateIdentifier(String),

    /// A migration identifier was requested that no registered unit carries
    #[error("unknown migration: {0}")]
    UnknownMigration(String),

    /// The ledger records an identifier that is not present in the registry
    #[error("ledger records migration '{id}' which is not registered")]
    LedgerCorruption { id: String },

    /// Target table/column already in the requested end state, or absent
    /// when expected present
    #[error("schema conflict in {operation} on '{table}': {message}")]
    SchemaConflict {
        operation: String,
        table: String,
        message: String,
    },

    /// Foreign key, unique or check constraint rejected by the engine
    #[error("constraint violation in {operation} on '{table}': {message}")]
    ConstraintViolation {
        operation: String,
        table: String,
        message: String,
    },

    /// The active dialect has no translation for the requested operation
    #[error("operation {operation} is not supported by this dialect: {message}")]
    DialectUnsupported { operation: String, message: String },

    /// Any other database error, tagged with the operation and table
    #[error("database error in {operation} on '{table}': {message}")]
    Database {
        operation: String,
        table: String,
        message: String,
    },

    /// Connection or pool failure
    #[error("connection error: {0}")]
    Connection(String),

    /// Failure reading or writing the applied-set ledger itself
    #[error("ledger error: {0}")]
    Ledger(String),
}

/// Coarse classification of a database error by SQLSTATE code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlStateClass {
    /// Class 42: duplicate or undefined object (table, column, index)
    SchemaConflict,
    /// Class 23 integrity violations, plus check failures raised while
    /// narrowing a constraint over existing rows
    ConstraintViolation,
    /// Anything else, including connection-level failures without a code
    Other,
}

/// Classify a SQLSTATE code into the engine's error taxonomy.
pub fn classify_sqlstate(code: Option<&str>) -> SqlStateClass {
    match code {
        Some(c) if c.starts_with("23") => SqlStateClass::ConstraintViolation,
        Some(c) if c.starts_with("42") => SqlStateClass::SchemaConflict,
        _ => SqlStateClass::Other,
    }
}

/// SQLSTATE codes raised when the object being created already exists.
/// These are the only errors a unit may ask the executor to tolerate.
pub fn is_duplicate_object(code: Option<&str>) -> bool {
    matches!(
        code,
        Some("42P07") | Some("42701") | Some("42710") | Some("42P06") | Some("42P04")
    )
}

impl MigrateError {
    /// Wrap a sqlx error, tagging it with the failing operation and table.
    pub fn from_sqlx(operation: &str, table: &str, err: &sqlx::Error) -> Self {
        let code = err
            .as_database_error()
            .and_then(|db| db.code().map(|c| c.to_string()));
        let message = err.to_string();

        match classify_sqlstate(code.as_deref()) {
            SqlStateClass::SchemaConflict => MigrateError::SchemaConflict {
                operation: operation.to_string(),
                table: table.to_string(),
                message,
            },
            SqlStateClass::ConstraintViolation => MigrateError::ConstraintViolation {
                operation: operation.to_string(),
                table: table.to_string(),
                message,
            },
            SqlStateClass::Other => MigrateError::Database {
                operation: operation.to_string(),
                table: table.to_string(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlstate_classification() {
        assert_eq!(
            classify_sqlstate(Some("23505")),
            SqlStateClass::ConstraintViolation
        );
        assert_eq!(
            classify_sqlstate(Some("23514")),
            SqlStateClass::ConstraintViolation
        );
        assert_eq!(
            classify_sqlstate(Some("42P07")),
            SqlStateClass::SchemaConflict
        );
        assert_eq!(
            classify_sqlstate(Some("42703")),
            SqlStateClass::SchemaConflict
        );
        assert_eq!(classify_sqlstate(Some("08006")), SqlStateClass::Other);
        assert_eq!(classify_sqlstate(None), SqlStateClass::Other);
    }

    #[test]
    fn duplicate_object_codes() {
        assert!(is_duplicate_object(Some("42P07"))); // duplicate table
        assert!(is_duplicate_object(Some("42701"))); // duplicate column
        assert!(is_duplicate_object(Some("42710"))); // duplicate object
        assert!(!is_duplicate_object(Some("42P01"))); // undefined table
        assert!(!is_duplicate_object(Some("23505")));
        assert!(!is_duplicate_object(None));
    }

    #[test]
    fn error_messages_carry_operation_and_table() {
        let err = MigrateError::SchemaConflict {
            operation: "AddColumn".to_string(),
            table: "invoices".to_string(),
            message: "column \"external_ref\" already exists".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("AddColumn"));
        assert!(text.contains("invoices"));
        assert!(text.contains("already exists"));
    }
}
