use boxoffice_migrate::{ColumnSpec, ColumnType, MigrationUnit, OnDelete, SchemaBuilder};

pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20230812_091000_create_venues",
        "create venues",
        SchemaBuilder::new()
            .create_table("venues", |t| {
                t.id();
                t.add(ColumnSpec::new("tenant_id", ColumnType::Integer).not_null());
                t.add(ColumnSpec::new("name", ColumnType::VarChar(160)).not_null());
                t.text("address");
                t.integer("capacity");
                t.timestamps();
                t.foreign_key("tenant_id", "tenants", "id", OnDelete::Cascade);
            })
            .add_index("venues", &["tenant_id"])
            .build(),
        SchemaBuilder::new().drop_table("venues").build(),
    )
}
