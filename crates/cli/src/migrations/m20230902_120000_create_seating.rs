use boxoffice_migrate::{ColumnSpec, ColumnType, MigrationUnit, OnDelete, SchemaBuilder};

pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20230902_120000_create_seating",
        "create seating zones and seats",
        SchemaBuilder::new()
            .create_table("seating_zones", |t| {
                t.id();
                t.add(ColumnSpec::new("event_id", ColumnType::Integer).not_null());
                t.add(ColumnSpec::new("name", ColumnType::VarChar(80)).not_null());
                t.add(
                    ColumnSpec::new("capacity", ColumnType::Integer)
                        .not_null()
                        .default_expr("0"),
                );
                t.foreign_key("event_id", "events", "id", OnDelete::Cascade);
            })
            .create_table("seats", |t| {
                t.id();
                t.add(ColumnSpec::new("zone_id", ColumnType::Integer).not_null());
                t.add(ColumnSpec::new("row_label", ColumnType::VarChar(8)).not_null());
                t.add(ColumnSpec::new("number", ColumnType::Integer).not_null());
                t.unique(&["zone_id", "row_label", "number"]);
                t.foreign_key("zone_id", "seating_zones", "id", OnDelete::Cascade);
            })
            .build(),
        // seats references seating_zones, so it goes first
        SchemaBuilder::new()
            .drop_table("seats")
            .drop_table("seating_zones")
            .build(),
    )
}
