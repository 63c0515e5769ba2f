use boxoffice_migrate::{ColumnSpec, ColumnType, MigrationUnit, SchemaBuilder};

/// The column add is guarded so environments that received the hotfix copy
/// of this change re-apply cleanly; the backfill is idempotent by its WHERE
/// clause.
pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20240322_134500_add_invoice_external_ref",
        "add invoice external ref",
        SchemaBuilder::new()
            .add_column_if_absent(
                "invoices",
                ColumnSpec::new("external_ref", ColumnType::VarChar(64)),
            )
            .raw("UPDATE invoices SET external_ref = number WHERE external_ref IS NULL;")
            .build(),
        SchemaBuilder::new()
            .drop_column_if_exists("invoices", "external_ref")
            .build(),
    )
}
