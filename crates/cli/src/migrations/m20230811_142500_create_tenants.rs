use boxoffice_migrate::{ColumnSpec, ColumnType, MigrationUnit, SchemaBuilder};

pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20230811_142500_create_tenants",
        "create tenants",
        SchemaBuilder::new()
            .create_table("tenants", |t| {
                t.id();
                t.add(ColumnSpec::new("name", ColumnType::VarChar(160)).not_null());
                t.add(
                    ColumnSpec::new("subdomain", ColumnType::VarChar(63))
                        .not_null()
                        .unique(),
                );
                t.add(
                    ColumnSpec::new("plan", ColumnType::VarChar(32))
                        .not_null()
                        .default_expr("'free'"),
                );
                t.timestamps();
            })
            .build(),
        SchemaBuilder::new().drop_table("tenants").build(),
    )
}
