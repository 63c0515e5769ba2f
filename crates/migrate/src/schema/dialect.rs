//! Dialect translation - renders schema operations to DDL
//!
//! The engine depends on this seam but does not own dialect knowledge
//! anywhere else; swapping the trait object is enough to target another
//! engine's DDL.

use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use super::operation::{
    ColumnChange, ColumnSpec, ColumnType, ForeignKeySpec, OnDelete, SchemaOperation,
    TableConstraint,
};
use crate::error::{MigrateError, MigrateResult};

/// Renders schema operations into the target engine's DDL.
pub trait SqlDialect: Send + Sync {
    /// Translate one operation into one or more executable statements.
    fn render(&self, op: &SchemaOperation) -> MigrateResult<Vec<String>>;

    /// Query returning a row iff the table exists; `$1` is the table name.
    fn has_table_sql(&self) -> &'static str;

    /// Query returning a row iff the column exists; `$1` table, `$2` column.
    fn has_column_sql(&self) -> &'static str;
}

/// PostgreSQL dialect
#[derive(Debug, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    fn column_type(&self, ty: &ColumnType) -> String {
        match ty {
            ColumnType::Serial => "SERIAL".to_string(),
            ColumnType::BigSerial => "BIGSERIAL".to_string(),
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::BigInt => "BIGINT".to_string(),
            ColumnType::Boolean => "BOOLEAN".to_string(),
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::VarChar(len) => format!("VARCHAR({})", len),
            ColumnType::Decimal { precision, scale } => {
                format!("DECIMAL({}, {})", precision, scale)
            }
            ColumnType::TimestampTz => "TIMESTAMPTZ".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Uuid => "UUID".to_string(),
            ColumnType::Json => "JSONB".to_string(),
        }
    }

    fn column_def(&self, col: &ColumnSpec) -> String {
        let mut def = format!("{} {}", col.name, self.column_type(&col.ty));
        if col.primary_key {
            def.push_str(" PRIMARY KEY");
        } else if !col.nullable {
            def.push_str(" NOT NULL");
        }
        if let Some(default) = &col.default {
            def.push_str(&format!(" DEFAULT {}", default));
        }
        if col.unique && !col.primary_key {
            def.push_str(" UNIQUE");
        }
        def
    }

    fn on_delete(&self, action: OnDelete) -> &'static str {
        match action {
            OnDelete::Cascade => "CASCADE",
            OnDelete::Restrict => "RESTRICT",
            OnDelete::SetNull => "SET NULL",
            OnDelete::NoAction => "NO ACTION",
        }
    }

    fn foreign_key_clause(&self, fk: &ForeignKeySpec) -> String {
        format!(
            "FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {}",
            fk.column,
            fk.references_table,
            fk.references_column,
            self.on_delete(fk.on_delete)
        )
    }

    fn constraint_def(&self, constraint: &TableConstraint) -> String {
        match constraint {
            TableConstraint::PrimaryKey(cols) => format!("PRIMARY KEY ({})", cols.join(", ")),
            TableConstraint::Unique(cols) => format!("UNIQUE ({})", cols.join(", ")),
            TableConstraint::ForeignKey(fk) => self.foreign_key_clause(fk),
            TableConstraint::Check { name, expr } => {
                format!("CONSTRAINT {} CHECK ({})", name, expr)
            }
        }
    }
}

impl SqlDialect for PostgresDialect {
    fn render(&self, op: &SchemaOperation) -> MigrateResult<Vec<String>> {
        let sql = match op {
            SchemaOperation::CreateTable {
                table,
                columns,
                constraints,
                if_absent,
            } => {
                if columns.is_empty() {
                    return Err(MigrateError::DialectUnsupported {
                        operation: op.kind().to_string(),
                        message: format!("table '{}' defines no columns", table),
                    });
                }
                let mut parts: Vec<String> =
                    columns.iter().map(|c| self.column_def(c)).collect();
                parts.extend(constraints.iter().map(|c| self.constraint_def(c)));
                format!(
                    "CREATE TABLE{} {} (\n    {}\n);",
                    if *if_absent { " IF NOT EXISTS" } else { "" },
                    table,
                    parts.join(",\n    ")
                )
            }
            SchemaOperation::DropTable { table, if_exists } => format!(
                "DROP TABLE{} {};",
                if *if_exists { " IF EXISTS" } else { "" },
                table
            ),
            SchemaOperation::AddColumn {
                table,
                column,
                if_absent,
            } => format!(
                "ALTER TABLE {} ADD COLUMN{} {};",
                table,
                if *if_absent { " IF NOT EXISTS" } else { "" },
                self.column_def(column)
            ),
            SchemaOperation::DropColumn {
                table,
                column,
                if_exists,
            } => format!(
                "ALTER TABLE {} DROP COLUMN{} {};",
                table,
                if *if_exists { " IF EXISTS" } else { "" },
                column
            ),
            SchemaOperation::ModifyColumn {
                table,
                column,
                change,
            } => match change {
                ColumnChange::Type(ty) => format!(
                    "ALTER TABLE {} ALTER COLUMN {} TYPE {};",
                    table,
                    column,
                    self.column_type(ty)
                ),
                ColumnChange::SetNotNull => format!(
                    "ALTER TABLE {} ALTER COLUMN {} SET NOT NULL;",
                    table, column
                ),
                ColumnChange::DropNotNull => format!(
                    "ALTER TABLE {} ALTER COLUMN {} DROP NOT NULL;",
                    table, column
                ),
                ColumnChange::SetDefault(expr) => format!(
                    "ALTER TABLE {} ALTER COLUMN {} SET DEFAULT {};",
                    table, column, expr
                ),
                ColumnChange::DropDefault => format!(
                    "ALTER TABLE {} ALTER COLUMN {} DROP DEFAULT;",
                    table, column
                ),
            },
            SchemaOperation::AddIndex { table, index } => {
                if index.columns.is_empty() {
                    return Err(MigrateError::DialectUnsupported {
                        operation: op.kind().to_string(),
                        message: format!("index on '{}' lists no columns", table),
                    });
                }
                format!(
                    "CREATE{} INDEX{} {} ON {} ({});",
                    if index.unique { " UNIQUE" } else { "" },
                    if index.if_absent { " IF NOT EXISTS" } else { "" },
                    index.resolved_name(table),
                    table,
                    index.columns.join(", ")
                )
            }
            SchemaOperation::DropIndex { name, if_exists } => format!(
                "DROP INDEX{} {};",
                if *if_exists { " IF EXISTS" } else { "" },
                name
            ),
            SchemaOperation::AddForeignKey { table, foreign_key } => {
                let name = foreign_key
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("fk_{}_{}", table, foreign_key.column));
                format!(
                    "ALTER TABLE {} ADD CONSTRAINT {} {};",
                    table,
                    name,
                    self.foreign_key_clause(foreign_key)
                )
            }
            SchemaOperation::DropForeignKey { table, name } => {
                format!("ALTER TABLE {} DROP CONSTRAINT {};", table, name)
            }
            SchemaOperation::RawStatement { sql, .. } => {
                return Ok(split_sql_statements(sql));
            }
        };
        Ok(vec![sql])
    }

    fn has_table_sql(&self) -> &'static str {
        "SELECT 1 FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_name = $1"
    }

    fn has_column_sql(&self) -> &'static str {
        "SELECT 1 FROM information_schema.columns \
         WHERE table_schema = current_schema() AND table_name = $1 AND column_name = $2"
    }
}

/// Split a raw SQL block into executable statements using proper SQL parsing
pub fn split_sql_statements(sql: &str) -> Vec<String> {
    let dialect = GenericDialect {};
    match Parser::parse_sql(&dialect, sql) {
        Ok(parsed) => parsed.iter().map(|stmt| format!("{};", stmt)).collect(),
        Err(e) => {
            // Postgres-specific syntax (IF NOT EXISTS on indexes, constraint
            // swaps) does not always parse; fall back to semicolon splitting.
            tracing::warn!("SQL parsing failed, using naive semicolon splitting: {}", e);
            sql.split(';')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| format!("{};", s))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::operation::IndexSpec;

    fn render_one(op: SchemaOperation) -> String {
        let rendered = PostgresDialect.render(&op).unwrap();
        assert_eq!(rendered.len(), 1);
        rendered.into_iter().next().unwrap()
    }

    #[test]
    fn create_table_preserves_precision_and_length() {
        let op = SchemaOperation::CreateTable {
            table: "invoices".to_string(),
            columns: vec![
                ColumnSpec::new("id", ColumnType::Serial).primary_key(),
                ColumnSpec::new("number", ColumnType::VarChar(40)).not_null().unique(),
                ColumnSpec::new(
                    "total",
                    ColumnType::Decimal {
                        precision: 10,
                        scale: 2,
                    },
                )
                .not_null(),
            ],
            constraints: vec![],
            if_absent: false,
        };
        let sql = render_one(op);
        assert!(sql.contains("CREATE TABLE invoices"));
        assert!(sql.contains("id SERIAL PRIMARY KEY"));
        assert!(sql.contains("number VARCHAR(40) NOT NULL UNIQUE"));
        assert!(sql.contains("total DECIMAL(10, 2) NOT NULL"));
    }

    #[test]
    fn create_table_if_absent() {
        let op = SchemaOperation::CreateTable {
            table: "price_tiers".to_string(),
            columns: vec![ColumnSpec::new("id", ColumnType::Serial).primary_key()],
            constraints: vec![],
            if_absent: true,
        };
        assert!(render_one(op).starts_with("CREATE TABLE IF NOT EXISTS price_tiers"));
    }

    #[test]
    fn create_table_with_no_columns_is_unsupported() {
        let op = SchemaOperation::CreateTable {
            table: "empty".to_string(),
            columns: vec![],
            constraints: vec![],
            if_absent: false,
        };
        assert!(matches!(
            PostgresDialect.render(&op),
            Err(MigrateError::DialectUnsupported { .. })
        ));
    }

    #[test]
    fn foreign_key_constraint_with_on_delete() {
        let op = SchemaOperation::CreateTable {
            table: "venues".to_string(),
            columns: vec![
                ColumnSpec::new("id", ColumnType::Serial).primary_key(),
                ColumnSpec::new("tenant_id", ColumnType::Integer).not_null(),
            ],
            constraints: vec![TableConstraint::ForeignKey(ForeignKeySpec {
                name: None,
                column: "tenant_id".to_string(),
                references_table: "tenants".to_string(),
                references_column: "id".to_string(),
                on_delete: OnDelete::Cascade,
            })],
            if_absent: false,
        };
        let sql = render_one(op);
        assert!(sql.contains("FOREIGN KEY (tenant_id) REFERENCES tenants (id) ON DELETE CASCADE"));
    }

    #[test]
    fn add_column_if_absent() {
        let op = SchemaOperation::AddColumn {
            table: "invoices".to_string(),
            column: ColumnSpec::new("external_ref", ColumnType::VarChar(64)),
            if_absent: true,
        };
        assert_eq!(
            render_one(op),
            "ALTER TABLE invoices ADD COLUMN IF NOT EXISTS external_ref VARCHAR(64);"
        );
    }

    #[test]
    fn modify_column_variants() {
        let set_default = SchemaOperation::ModifyColumn {
            table: "events".to_string(),
            column: "status".to_string(),
            change: ColumnChange::SetDefault("'published'".to_string()),
        };
        assert_eq!(
            render_one(set_default),
            "ALTER TABLE events ALTER COLUMN status SET DEFAULT 'published';"
        );

        let retype = SchemaOperation::ModifyColumn {
            table: "invoices".to_string(),
            column: "total".to_string(),
            change: ColumnChange::Type(ColumnType::Decimal {
                precision: 12,
                scale: 2,
            }),
        };
        assert_eq!(
            render_one(retype),
            "ALTER TABLE invoices ALTER COLUMN total TYPE DECIMAL(12, 2);"
        );
    }

    #[test]
    fn index_name_is_derived_when_unnamed() {
        let op = SchemaOperation::AddIndex {
            table: "events".to_string(),
            index: IndexSpec {
                name: None,
                columns: vec!["tenant_id".to_string(), "starts_at".to_string()],
                unique: false,
                if_absent: true,
            },
        };
        assert_eq!(
            render_one(op),
            "CREATE INDEX IF NOT EXISTS idx_events_tenant_id_starts_at ON events (tenant_id, starts_at);"
        );
    }

    #[test]
    fn drop_operations_honor_if_exists() {
        assert_eq!(
            render_one(SchemaOperation::DropTable {
                table: "price_tiers".to_string(),
                if_exists: true,
            }),
            "DROP TABLE IF EXISTS price_tiers;"
        );
        assert_eq!(
            render_one(SchemaOperation::DropIndex {
                name: "idx_events_status".to_string(),
                if_exists: true,
            }),
            "DROP INDEX IF EXISTS idx_events_status;"
        );
    }

    #[test]
    fn raw_statement_splits_into_statements() {
        let op = SchemaOperation::RawStatement {
            sql: "UPDATE invoices SET external_ref = number WHERE external_ref IS NULL; \
                  DELETE FROM invoices WHERE total < 0"
                .to_string(),
            tolerate_existing: false,
        };
        let rendered = PostgresDialect.render(&op).unwrap();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].starts_with("UPDATE invoices"));
        assert!(rendered[1].starts_with("DELETE FROM invoices"));
    }
}
