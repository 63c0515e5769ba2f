//! Schema Builder - DSL for authoring schema changes
//!
//! Fluent interface migrations use to build their forward and reverse
//! operation sequences. The builder produces structured [`SchemaOperation`]s;
//! rendering to SQL is the dialect's job.

use super::operation::{
    ColumnChange, ColumnSpec, ColumnType, ForeignKeySpec, IndexSpec, OnDelete, SchemaOperation,
    TableConstraint,
};

/// Builds an ordered sequence of schema operations
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    operations: Vec<SchemaOperation>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Create a new table
    pub fn create_table<F>(mut self, table: &str, callback: F) -> Self
    where
        F: FnOnce(&mut TableBuilder),
    {
        let mut builder = TableBuilder::new(table, false);
        callback(&mut builder);
        self.operations.push(builder.into_operation());
        self
    }

    /// Create a table only if it does not exist yet. Units that must
    /// tolerate partial prior runs use this instead of checking themselves.
    pub fn create_table_if_absent<F>(mut self, table: &str, callback: F) -> Self
    where
        F: FnOnce(&mut TableBuilder),
    {
        let mut builder = TableBuilder::new(table, true);
        callback(&mut builder);
        self.operations.push(builder.into_operation());
        self
    }

    pub fn drop_table(mut self, table: &str) -> Self {
        self.operations.push(SchemaOperation::DropTable {
            table: table.to_string(),
            if_exists: false,
        });
        self
    }

    pub fn drop_table_if_exists(mut self, table: &str) -> Self {
        self.operations.push(SchemaOperation::DropTable {
            table: table.to_string(),
            if_exists: true,
        });
        self
    }

    pub fn add_column(mut self, table: &str, column: ColumnSpec) -> Self {
        self.operations.push(SchemaOperation::AddColumn {
            table: table.to_string(),
            column,
            if_absent: false,
        });
        self
    }

    pub fn add_column_if_absent(mut self, table: &str, column: ColumnSpec) -> Self {
        self.operations.push(SchemaOperation::AddColumn {
            table: table.to_string(),
            column,
            if_absent: true,
        });
        self
    }

    pub fn drop_column(mut self, table: &str, column: &str) -> Self {
        self.operations.push(SchemaOperation::DropColumn {
            table: table.to_string(),
            column: column.to_string(),
            if_exists: false,
        });
        self
    }

    pub fn drop_column_if_exists(mut self, table: &str, column: &str) -> Self {
        self.operations.push(SchemaOperation::DropColumn {
            table: table.to_string(),
            column: column.to_string(),
            if_exists: true,
        });
        self
    }

    pub fn modify_column(mut self, table: &str, column: &str, change: ColumnChange) -> Self {
        self.operations.push(SchemaOperation::ModifyColumn {
            table: table.to_string(),
            column: column.to_string(),
            change,
        });
        self
    }

    pub fn add_index(mut self, table: &str, columns: &[&str]) -> Self {
        self.push_index(table, columns, false, false);
        self
    }

    pub fn add_index_if_absent(mut self, table: &str, columns: &[&str]) -> Self {
        self.push_index(table, columns, false, true);
        self
    }

    pub fn add_unique_index(mut self, table: &str, columns: &[&str]) -> Self {
        self.push_index(table, columns, true, false);
        self
    }

    fn push_index(&mut self, table: &str, columns: &[&str], unique: bool, if_absent: bool) {
        self.operations.push(SchemaOperation::AddIndex {
            table: table.to_string(),
            index: IndexSpec {
                name: None,
                columns: columns.iter().map(|c| c.to_string()).collect(),
                unique,
                if_absent,
            },
        });
    }

    pub fn drop_index(mut self, name: &str) -> Self {
        self.operations.push(SchemaOperation::DropIndex {
            name: name.to_string(),
            if_exists: false,
        });
        self
    }

    pub fn drop_index_if_exists(mut self, name: &str) -> Self {
        self.operations.push(SchemaOperation::DropIndex {
            name: name.to_string(),
            if_exists: true,
        });
        self
    }

    pub fn add_foreign_key(
        mut self,
        table: &str,
        column: &str,
        references_table: &str,
        references_column: &str,
        on_delete: OnDelete,
    ) -> Self {
        self.operations.push(SchemaOperation::AddForeignKey {
            table: table.to_string(),
            foreign_key: ForeignKeySpec {
                name: None,
                column: column.to_string(),
                references_table: references_table.to_string(),
                references_column: references_column.to_string(),
                on_delete,
            },
        });
        self
    }

    pub fn drop_foreign_key(mut self, table: &str, name: &str) -> Self {
        self.operations.push(SchemaOperation::DropForeignKey {
            table: table.to_string(),
            name: name.to_string(),
        });
        self
    }

    /// Raw DDL/DML escape hatch
    pub fn raw(mut self, sql: &str) -> Self {
        self.operations.push(SchemaOperation::RawStatement {
            sql: sql.to_string(),
            tolerate_existing: false,
        });
        self
    }

    /// Raw statement whose "already exists" failures are swallowed, for
    /// idempotent creation the structured primitives cannot express.
    pub fn raw_tolerating_existing(mut self, sql: &str) -> Self {
        self.operations.push(SchemaOperation::RawStatement {
            sql: sql.to_string(),
            tolerate_existing: true,
        });
        self
    }

    /// Finish and return the operation sequence
    pub fn build(self) -> Vec<SchemaOperation> {
        self.operations
    }
}

/// Column and constraint collector for CREATE TABLE operations
#[derive(Debug)]
pub struct TableBuilder {
    table: String,
    columns: Vec<ColumnSpec>,
    constraints: Vec<TableConstraint>,
    if_absent: bool,
}

impl TableBuilder {
    fn new(table: &str, if_absent: bool) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            constraints: Vec::new(),
            if_absent,
        }
    }

    /// Add a fully specified column
    pub fn add(&mut self, column: ColumnSpec) -> &mut Self {
        self.columns.push(column);
        self
    }

    /// Auto-increment integer primary key named `id`
    pub fn id(&mut self) -> &mut Self {
        self.add(ColumnSpec::new("id", ColumnType::Serial).primary_key())
    }

    pub fn string(&mut self, name: &str, length: u32) -> &mut Self {
        self.add(ColumnSpec::new(name, ColumnType::VarChar(length)))
    }

    pub fn text(&mut self, name: &str) -> &mut Self {
        self.add(ColumnSpec::new(name, ColumnType::Text))
    }

    pub fn integer(&mut self, name: &str) -> &mut Self {
        self.add(ColumnSpec::new(name, ColumnType::Integer))
    }

    pub fn boolean(&mut self, name: &str) -> &mut Self {
        self.add(ColumnSpec::new(name, ColumnType::Boolean))
    }

    pub fn decimal(&mut self, name: &str, precision: u8, scale: u8) -> &mut Self {
        self.add(ColumnSpec::new(
            name,
            ColumnType::Decimal { precision, scale },
        ))
    }

    pub fn timestamptz(&mut self, name: &str) -> &mut Self {
        self.add(ColumnSpec::new(name, ColumnType::TimestampTz))
    }

    /// created_at / updated_at pair
    pub fn timestamps(&mut self) -> &mut Self {
        self.add(
            ColumnSpec::new("created_at", ColumnType::TimestampTz)
                .not_null()
                .default_expr("CURRENT_TIMESTAMP"),
        );
        self.add(
            ColumnSpec::new("updated_at", ColumnType::TimestampTz)
                .not_null()
                .default_expr("CURRENT_TIMESTAMP"),
        )
    }

    pub fn primary_key(&mut self, columns: &[&str]) -> &mut Self {
        self.constraints.push(TableConstraint::PrimaryKey(
            columns.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn unique(&mut self, columns: &[&str]) -> &mut Self {
        self.constraints.push(TableConstraint::Unique(
            columns.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn check(&mut self, name: &str, expr: &str) -> &mut Self {
        self.constraints.push(TableConstraint::Check {
            name: name.to_string(),
            expr: expr.to_string(),
        });
        self
    }

    pub fn foreign_key(
        &mut self,
        column: &str,
        references_table: &str,
        references_column: &str,
        on_delete: OnDelete,
    ) -> &mut Self {
        self.constraints
            .push(TableConstraint::ForeignKey(ForeignKeySpec {
                name: None,
                column: column.to_string(),
                references_table: references_table.to_string(),
                references_column: references_column.to_string(),
                on_delete,
            }));
        self
    }

    fn into_operation(self) -> SchemaOperation {
        SchemaOperation::CreateTable {
            table: self.table,
            columns: self.columns,
            constraints: self.constraints,
            if_absent: self.if_absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::dialect::{PostgresDialect, SqlDialect};

    #[test]
    fn builder_orders_operations_as_authored() {
        let ops = SchemaBuilder::new()
            .create_table("tenants", |t| {
                t.id();
                t.string("name", 160);
            })
            .add_index("tenants", &["name"])
            .raw("UPDATE tenants SET name = trim(name);")
            .build();

        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].kind(), "CreateTable");
        assert_eq!(ops[1].kind(), "AddIndex");
        assert_eq!(ops[2].kind(), "RawStatement");
    }

    #[test]
    fn create_table_dsl_renders_like_handwritten_ddl() {
        let ops = SchemaBuilder::new()
            .create_table("price_tiers", |t| {
                t.id();
                t.integer("tenant_id");
                t.string("name", 80);
                t.decimal("price", 10, 2);
                t.timestamps();
                t.unique(&["tenant_id", "name"]);
                t.foreign_key("tenant_id", "tenants", "id", OnDelete::Cascade);
            })
            .build();

        let sql = PostgresDialect.render(&ops[0]).unwrap().remove(0);
        assert!(sql.contains("CREATE TABLE price_tiers"));
        assert!(sql.contains("id SERIAL PRIMARY KEY"));
        assert!(sql.contains("name VARCHAR(80)"));
        assert!(sql.contains("price DECIMAL(10, 2)"));
        assert!(sql.contains("created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP"));
        assert!(sql.contains("UNIQUE (tenant_id, name)"));
        assert!(sql.contains("FOREIGN KEY (tenant_id) REFERENCES tenants (id) ON DELETE CASCADE"));
    }

    #[test]
    fn guard_variants_set_flags() {
        let ops = SchemaBuilder::new()
            .create_table_if_absent("price_tiers", |t| {
                t.id();
            })
            .add_column_if_absent(
                "invoices",
                ColumnSpec::new("external_ref", ColumnType::VarChar(64)),
            )
            .drop_column_if_exists("invoices", "external_ref")
            .build();

        assert!(matches!(
            ops[0],
            SchemaOperation::CreateTable { if_absent: true, .. }
        ));
        assert!(matches!(
            ops[1],
            SchemaOperation::AddColumn { if_absent: true, .. }
        ));
        assert!(matches!(
            ops[2],
            SchemaOperation::DropColumn { if_exists: true, .. }
        ));
    }

    #[test]
    fn tolerant_raw_statements_are_flagged() {
        let ops = SchemaBuilder::new()
            .raw_tolerating_existing(
                "CREATE UNIQUE INDEX idx_marketplace_clients_api_key ON marketplace_clients (api_key)",
            )
            .build();
        assert!(ops[0].tolerates_existing());
    }
}
