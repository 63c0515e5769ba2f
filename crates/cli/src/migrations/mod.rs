//! Platform migration set
//!
//! One file per unit, registered in ascending identifier order. Reverse
//! sequences are authored by hand in each unit; none is derived from its
//! forward sequence.

pub mod m20230811_142500_create_tenants;
pub mod m20230812_091000_create_venues;
pub mod m20230815_100000_create_events;
pub mod m20230902_120000_create_seating;
pub mod m20230920_083000_create_price_tiers;
pub mod m20231005_140000_create_invoices;
pub mod m20231118_101500_widen_invoice_status;
pub mod m20240112_160000_create_affiliates;
pub mod m20240215_110000_create_marketplace_clients;
pub mod m20240322_134500_add_invoice_external_ref;
pub mod m20240430_091500_add_event_indexes;
pub mod m20240610_090000_change_event_status_default;

use boxoffice_migrate::{MigrateResult, MigrationRegistry};

/// Assemble the full platform registry
pub fn registry() -> MigrateResult<MigrationRegistry> {
    let mut registry = MigrationRegistry::new();
    registry.register(m20230811_142500_create_tenants::unit())?;
    registry.register(m20230812_091000_create_venues::unit())?;
    registry.register(m20230815_100000_create_events::unit())?;
    registry.register(m20230902_120000_create_seating::unit())?;
    registry.register(m20230920_083000_create_price_tiers::unit())?;
    registry.register(m20231005_140000_create_invoices::unit())?;
    registry.register(m20231118_101500_widen_invoice_status::unit())?;
    registry.register(m20240112_160000_create_affiliates::unit())?;
    registry.register(m20240215_110000_create_marketplace_clients::unit())?;
    registry.register(m20240322_134500_add_invoice_external_ref::unit())?;
    registry.register(m20240430_091500_add_event_indexes::unit())?;
    registry.register(m20240610_090000_change_event_status_default::unit())?;
    Ok(registry)
}
