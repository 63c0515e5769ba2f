use boxoffice_migrate::{ColumnSpec, ColumnType, MigrationUnit, OnDelete, SchemaBuilder};

pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20230815_100000_create_events",
        "create events",
        SchemaBuilder::new()
            .create_table("events", |t| {
                t.id();
                t.add(ColumnSpec::new("tenant_id", ColumnType::Integer).not_null());
                t.integer("venue_id");
                t.add(ColumnSpec::new("title", ColumnType::VarChar(200)).not_null());
                t.add(
                    ColumnSpec::new("status", ColumnType::VarChar(20))
                        .not_null()
                        .default_expr("'draft'"),
                );
                t.add(ColumnSpec::new("starts_at", ColumnType::TimestampTz).not_null());
                t.timestamptz("ends_at");
                t.timestamps();
                t.foreign_key("tenant_id", "tenants", "id", OnDelete::Cascade);
                t.foreign_key("venue_id", "venues", "id", OnDelete::SetNull);
            })
            .add_index("events", &["tenant_id", "starts_at"])
            .build(),
        SchemaBuilder::new().drop_table("events").build(),
    )
}
