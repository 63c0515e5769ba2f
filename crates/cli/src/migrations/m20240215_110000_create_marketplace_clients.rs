use boxoffice_migrate::{ColumnSpec, ColumnType, MigrationUnit, OnDelete, SchemaBuilder};

pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20240215_110000_create_marketplace_clients",
        "create marketplace clients",
        SchemaBuilder::new()
            .create_table("marketplace_clients", |t| {
                t.id();
                t.add(ColumnSpec::new("tenant_id", ColumnType::Integer).not_null());
                t.add(ColumnSpec::new("name", ColumnType::VarChar(120)).not_null());
                t.add(ColumnSpec::new("api_key", ColumnType::VarChar(64)).not_null());
                t.add(
                    ColumnSpec::new("active", ColumnType::Boolean)
                        .not_null()
                        .default_expr("true"),
                );
                t.timestamps();
                t.foreign_key("tenant_id", "tenants", "id", OnDelete::Cascade);
            })
            // some environments already carry this index from a hotfix
            .raw_tolerating_existing(
                "CREATE UNIQUE INDEX idx_marketplace_clients_api_key \
                 ON marketplace_clients (api_key);",
            )
            .build(),
        SchemaBuilder::new()
            .drop_index_if_exists("idx_marketplace_clients_api_key")
            .drop_table("marketplace_clients")
            .build(),
    )
}
