use boxoffice_migrate::{ColumnChange, MigrationUnit, SchemaBuilder};

/// Deliberately asymmetric: events created before 2024 defaulted to
/// 'draft', but operations standardized on 'scheduled' as the reset state,
/// so the rollback lands there instead of the historical value.
pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20240610_090000_change_event_status_default",
        "change event status default",
        SchemaBuilder::new()
            .modify_column(
                "events",
                "status",
                ColumnChange::SetDefault("'published'".to_string()),
            )
            .build(),
        SchemaBuilder::new()
            .modify_column(
                "events",
                "status",
                ColumnChange::SetDefault("'scheduled'".to_string()),
            )
            .build(),
    )
}
