use boxoffice_migrate::{ColumnSpec, ColumnType, MigrationUnit, OnDelete, SchemaBuilder};

/// Guarded both ways: this table appeared on some environments before the
/// unit was authored, so re-application must not error.
pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20230920_083000_create_price_tiers",
        "create price tiers",
        SchemaBuilder::new()
            .create_table_if_absent("price_tiers", |t| {
                t.id();
                t.add(ColumnSpec::new("tenant_id", ColumnType::Integer).not_null());
                t.add(ColumnSpec::new("event_id", ColumnType::Integer).not_null());
                t.add(ColumnSpec::new("name", ColumnType::VarChar(80)).not_null());
                t.add(
                    ColumnSpec::new("price", ColumnType::Decimal { precision: 10, scale: 2 })
                        .not_null(),
                );
                t.unique(&["event_id", "name"]);
                t.foreign_key("tenant_id", "tenants", "id", OnDelete::Cascade);
                t.foreign_key("event_id", "events", "id", OnDelete::Cascade);
            })
            .build(),
        SchemaBuilder::new().drop_table_if_exists("price_tiers").build(),
    )
}
