//! Schema operation primitives
//!
//! Tagged variants over the schema changes the engine knows how to execute.
//! Decimal columns carry explicit (precision, scale) and bounded strings an
//! explicit max length; both are preserved exactly through rendering.

/// Column data types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-incrementing 32-bit integer
    Serial,
    /// Auto-incrementing 64-bit integer
    BigSerial,
    Integer,
    BigInt,
    Boolean,
    /// Unbounded text
    Text,
    /// Bounded string with explicit max length
    VarChar(u32),
    /// Exact numeric with explicit precision and scale
    Decimal { precision: u8, scale: u8 },
    /// Timestamp with time zone
    TimestampTz,
    Date,
    Uuid,
    Json,
}

/// A column definition within a create-table or add-column operation
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: ColumnType,
    pub nullable: bool,
    /// Raw SQL default expression, rendered verbatim
    pub default: Option<String>,
    pub unique: bool,
    pub primary_key: bool,
}

impl ColumnSpec {
    /// New nullable column with no default
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: true,
            default: None,
            unique: false,
            primary_key: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }
}

/// Referential action on delete of the referenced row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    Restrict,
    SetNull,
    NoAction,
}

/// Foreign key definition
#[derive(Debug, Clone)]
pub struct ForeignKeySpec {
    /// Constraint name; derived from table and column when absent
    pub name: Option<String>,
    pub column: String,
    pub references_table: String,
    pub references_column: String,
    pub on_delete: OnDelete,
}

/// Index definition
#[derive(Debug, Clone)]
pub struct IndexSpec {
    /// Index name; derived from table and columns when absent
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub unique: bool,
    /// Render with IF NOT EXISTS so re-application is tolerated
    pub if_absent: bool,
}

impl IndexSpec {
    /// Resolve the index name, deriving one from the column list if the
    /// author did not pick one.
    pub fn resolved_name(&self, table: &str) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("idx_{}_{}", table, self.columns.join("_")))
    }
}

/// Table-level constraints within a create-table operation
#[derive(Debug, Clone)]
pub enum TableConstraint {
    PrimaryKey(Vec<String>),
    Unique(Vec<String>),
    ForeignKey(ForeignKeySpec),
    /// Named CHECK constraint with a raw SQL expression
    Check { name: String, expr: String },
}

/// Alteration applied to an existing column
#[derive(Debug, Clone)]
pub enum ColumnChange {
    /// Change the column's data type
    Type(ColumnType),
    SetNotNull,
    DropNotNull,
    /// Raw SQL default expression
    SetDefault(String),
    DropDefault,
}

/// One primitive schema change.
///
/// The `if_absent`/`if_exists` flags are the engine's central idempotence
/// capability: units that must tolerate partial prior runs request them
/// here instead of branching on introspection themselves.
#[derive(Debug, Clone)]
pub enum SchemaOperation {
    CreateTable {
        table: String,
        columns: Vec<ColumnSpec>,
        constraints: Vec<TableConstraint>,
        if_absent: bool,
    },
    DropTable {
        table: String,
        if_exists: bool,
    },
    AddColumn {
        table: String,
        column: ColumnSpec,
        if_absent: bool,
    },
    DropColumn {
        table: String,
        column: String,
        if_exists: bool,
    },
    ModifyColumn {
        table: String,
        column: String,
        change: ColumnChange,
    },
    AddIndex {
        table: String,
        index: IndexSpec,
    },
    DropIndex {
        name: String,
        if_exists: bool,
    },
    AddForeignKey {
        table: String,
        foreign_key: ForeignKeySpec,
    },
    DropForeignKey {
        table: String,
        name: String,
    },
    /// Escape hatch for DDL the structured primitives cannot express
    /// (constraint swaps, conditional index creation, coupled backfills).
    /// May hold several statements separated by semicolons.
    RawStatement {
        sql: String,
        /// Ignore "already exists" class failures from this statement
        tolerate_existing: bool,
    },
}

impl SchemaOperation {
    /// Operation kind for error tagging and logs
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaOperation::CreateTable { .. } => "CreateTable",
            SchemaOperation::DropTable { .. } => "DropTable",
            SchemaOperation::AddColumn { .. } => "AddColumn",
            SchemaOperation::DropColumn { .. } => "DropColumn",
            SchemaOperation::ModifyColumn { .. } => "ModifyColumn",
            SchemaOperation::AddIndex { .. } => "AddIndex",
            SchemaOperation::DropIndex { .. } => "DropIndex",
            SchemaOperation::AddForeignKey { .. } => "AddForeignKey",
            SchemaOperation::DropForeignKey { .. } => "DropForeignKey",
            SchemaOperation::RawStatement { .. } => "RawStatement",
        }
    }

    /// Target table for error tagging; raw statements and index drops have
    /// no single structured target.
    pub fn table(&self) -> &str {
        match self {
            SchemaOperation::CreateTable { table, .. }
            | SchemaOperation::DropTable { table, .. }
            | SchemaOperation::AddColumn { table, .. }
            | SchemaOperation::DropColumn { table, .. }
            | SchemaOperation::ModifyColumn { table, .. }
            | SchemaOperation::AddIndex { table, .. }
            | SchemaOperation::AddForeignKey { table, .. }
            | SchemaOperation::DropForeignKey { table, .. } => table,
            SchemaOperation::DropIndex { name, .. } => name,
            SchemaOperation::RawStatement { .. } => "<raw>",
        }
    }

    /// Whether the executor may swallow "already exists" failures for this
    /// operation. Only raw statements opt in explicitly; the structured
    /// guards render as IF NOT EXISTS instead and never error.
    pub fn tolerates_existing(&self) -> bool {
        matches!(
            self,
            SchemaOperation::RawStatement {
                tolerate_existing: true,
                ..
            }
        )
    }
}
