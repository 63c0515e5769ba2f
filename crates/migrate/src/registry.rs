//! Migration Registry - ordered collection of known migration units
//!
//! Identifiers are globally unique and sort order defines application order.
//! The registry is read-only once assembled; it never touches the database.

use std::collections::HashSet;

use crate::definitions::MigrationUnit;
use crate::error::{MigrateError, MigrateResult};

/// Ordered set of all known migration units
#[derive(Debug, Default)]
pub struct MigrationRegistry {
    units: Vec<MigrationUnit>,
    ids: HashSet<String>,
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Register a unit, keeping the collection sorted by identifier.
    pub fn register(&mut self, unit: MigrationUnit) -> MigrateResult<()> {
        if !self.ids.insert(unit.id.clone()) {
            return Err(MigrateError::DuplicateIdentifier(unit.id));
        }
        let pos = self
            .units
            .binary_search_by(|u| u.id.cmp(&unit.id))
            .unwrap_err();
        self.units.insert(pos, unit);
        Ok(())
    }

    /// All units in ascending identifier order
    pub fn ordered(&self) -> &[MigrationUnit] {
        &self.units
    }

    /// Look up a unit by identifier
    pub fn get(&self, id: &str) -> Option<&MigrationUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Verify that every applied identifier has a registered unit. An
    /// identifier the registry does not know means the ledger and the
    /// migration set have diverged, and neither forward application nor
    /// rollback can proceed safely.
    pub fn verify_applied_ids<'a, I>(&self, applied: I) -> MigrateResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for id in applied {
            if !self.ids.contains(id) {
                return Err(MigrateError::LedgerCorruption { id: id.to_string() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str) -> MigrationUnit {
        MigrationUnit::new(id, id.replace('_', " "), vec![], vec![])
    }

    #[test]
    fn registration_order_does_not_matter() {
        let mut registry = MigrationRegistry::new();
        registry.register(unit("20231005_140000_create_invoices")).unwrap();
        registry.register(unit("20230811_142500_create_tenants")).unwrap();
        registry.register(unit("20230815_100000_create_events")).unwrap();

        let ids: Vec<&str> = registry.ordered().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "20230811_142500_create_tenants",
                "20230815_100000_create_events",
                "20231005_140000_create_invoices",
            ]
        );
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut registry = MigrationRegistry::new();
        registry.register(unit("20230811_142500_create_tenants")).unwrap();
        let err = registry
            .register(unit("20230811_142500_create_tenants"))
            .unwrap_err();
        assert!(matches!(err, MigrateError::DuplicateIdentifier(id) if id.contains("tenants")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn applied_ids_must_all_be_registered() {
        let mut registry = MigrationRegistry::new();
        registry.register(unit("20230811_142500_create_tenants")).unwrap();
        registry.register(unit("20230812_091000_create_venues")).unwrap();

        registry
            .verify_applied_ids(["20230811_142500_create_tenants"])
            .unwrap();

        // a ledger row with no registered unit is corruption, not a gap
        let err = registry
            .verify_applied_ids([
                "20230811_142500_create_tenants",
                "20230901_000000_dropped_from_the_set",
            ])
            .unwrap_err();
        assert!(
            matches!(err, MigrateError::LedgerCorruption { id } if id == "20230901_000000_dropped_from_the_set")
        );
    }

    #[test]
    fn lookup_by_identifier() {
        let mut registry = MigrationRegistry::new();
        registry.register(unit("20230811_142500_create_tenants")).unwrap();
        assert!(registry.contains("20230811_142500_create_tenants"));
        assert!(registry.get("20230811_142500_create_tenants").is_some());
        assert!(registry.get("20990101_000000_missing").is_none());
    }
}
