use boxoffice_migrate::{ColumnSpec, ColumnType, MigrationUnit, OnDelete, SchemaBuilder};

pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20240112_160000_create_affiliates",
        "create affiliates",
        SchemaBuilder::new()
            .create_table("affiliates", |t| {
                t.id();
                t.add(ColumnSpec::new("tenant_id", ColumnType::Integer).not_null());
                t.add(ColumnSpec::new("name", ColumnType::VarChar(120)).not_null());
                t.add(
                    ColumnSpec::new("code", ColumnType::VarChar(24))
                        .not_null()
                        .unique(),
                );
                t.add(
                    ColumnSpec::new(
                        "commission_rate",
                        ColumnType::Decimal { precision: 5, scale: 2 },
                    )
                    .not_null()
                    .default_expr("0"),
                );
                t.timestamps();
                t.foreign_key("tenant_id", "tenants", "id", OnDelete::Cascade);
            })
            .add_column(
                "invoices",
                ColumnSpec::new("affiliate_id", ColumnType::Integer),
            )
            .add_foreign_key("invoices", "affiliate_id", "affiliates", "id", OnDelete::SetNull)
            .build(),
        SchemaBuilder::new()
            .drop_foreign_key("invoices", "fk_invoices_affiliate_id")
            .drop_column("invoices", "affiliate_id")
            .drop_table("affiliates")
            .build(),
    )
}
