use boxoffice_migrate::{ColumnSpec, ColumnType, MigrationUnit, OnDelete, SchemaBuilder};

pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20231005_140000_create_invoices",
        "create invoices",
        SchemaBuilder::new()
            .create_table("invoices", |t| {
                t.id();
                t.add(ColumnSpec::new("tenant_id", ColumnType::Integer).not_null());
                t.add(
                    ColumnSpec::new("number", ColumnType::VarChar(40))
                        .not_null()
                        .unique(),
                );
                t.add(
                    ColumnSpec::new("subtotal", ColumnType::Decimal { precision: 10, scale: 2 })
                        .not_null()
                        .default_expr("0"),
                );
                t.add(
                    ColumnSpec::new("vat", ColumnType::Decimal { precision: 10, scale: 2 })
                        .not_null()
                        .default_expr("0"),
                );
                t.add(
                    ColumnSpec::new("total", ColumnType::Decimal { precision: 10, scale: 2 })
                        .not_null()
                        .default_expr("0"),
                );
                t.add(
                    ColumnSpec::new("status", ColumnType::VarChar(20))
                        .not_null()
                        .default_expr("'outstanding'"),
                );
                t.timestamps();
                t.check(
                    "invoices_status_check",
                    "status IN ('outstanding', 'paid', 'cancelled')",
                );
                t.foreign_key("tenant_id", "tenants", "id", OnDelete::Restrict);
            })
            .build(),
        SchemaBuilder::new().drop_table("invoices").build(),
    )
}
