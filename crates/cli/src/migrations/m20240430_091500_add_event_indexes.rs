use boxoffice_migrate::{MigrationUnit, SchemaBuilder};

pub fn unit() -> MigrationUnit {
    MigrationUnit::new(
        "20240430_091500_add_event_indexes",
        "add event and invoice indexes",
        SchemaBuilder::new()
            .add_index_if_absent("events", &["status"])
            .add_index_if_absent("invoices", &["tenant_id", "status"])
            .build(),
        SchemaBuilder::new()
            .drop_index_if_exists("idx_invoices_tenant_id_status")
            .drop_index_if_exists("idx_events_status")
            .build(),
    )
}
