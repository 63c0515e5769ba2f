use boxoffice_migrate::{ColumnChange, MigrationUnit, SchemaBuilder};

/// Widens the invoice status set and moves the default to the new initial
/// state. The rollback reinstates the narrower check; if any row still holds
/// a widened value the engine reports it as a constraint violation rather
/// than touching the data.
pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20231118_101500_widen_invoice_status",
        "widen invoice status",
        SchemaBuilder::new()
            .raw("ALTER TABLE invoices DROP CONSTRAINT invoices_status_check;")
            .raw(
                "ALTER TABLE invoices ADD CONSTRAINT invoices_status_check \
                 CHECK (status IN ('new', 'pending', 'outstanding', 'overdue', 'paid', 'cancelled'));",
            )
            .modify_column(
                "invoices",
                "status",
                ColumnChange::SetDefault("'new'".to_string()),
            )
            .build(),
        SchemaBuilder::new()
            .raw("ALTER TABLE invoices DROP CONSTRAINT invoices_status_check;")
            .raw(
                "ALTER TABLE invoices ADD CONSTRAINT invoices_status_check \
                 CHECK (status IN ('outstanding', 'paid', 'cancelled'));",
            )
            .modify_column(
                "invoices",
                "status",
                ColumnChange::SetDefault("'outstanding'".to_string()),
            )
            .build(),
    )
}
