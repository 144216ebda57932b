use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::Utc;

use crate::domain::normalize_text;
use super::errors::FabricError;
use super::value_objects::{Fabric, FabricPatch, NewFabric};

// ============================================================================
// Fabric Inventory
// ============================================================================
//
// The order ledger only needs two things from the inventory: look a fabric up
// and take meters off it. Stock never goes below zero; asking for more than
// is on the shelf empties it without failing.
//
// ============================================================================

/// Fabrics at or below this many meters are reported as low stock
pub const LOW_STOCK_THRESHOLD_METERS: f64 = 3.0;

/// Outcome of one clamped stock decrement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockDeduction {
    pub fabric_id: Uuid,
    pub requested: f64,
    pub applied: f64,
    pub remaining: f64,
}

impl StockDeduction {
    /// True when the shelf held less than was asked for
    pub fn was_clamped(&self) -> bool {
        self.applied < self.requested
    }
}

/// Collaborator interface consumed by the order ledger
pub trait FabricInventory {
    fn find_by_id(&self, id: Uuid) -> Option<&Fabric>;

    /// Remove `meters` from a fabric's stock, clamped at zero.
    /// Returns `None` for an unknown fabric.
    fn decrement_stock(&mut self, id: Uuid, meters: f64) -> Option<StockDeduction>;
}

/// The shop's fabric list, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FabricCatalog(Vec<Fabric>);

impl FabricCatalog {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fabric> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Fabric] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add a fabric at the front of the catalog
    pub fn add(&mut self, new_fabric: NewFabric) -> Result<Uuid, FabricError> {
        let name = new_fabric.name.trim();
        if name.is_empty() {
            return Err(FabricError::EmptyName);
        }
        if new_fabric.price_per_meter < 0.0 {
            return Err(FabricError::NegativeQuantity {
                field: "pricePerMeter",
                value: new_fabric.price_per_meter,
            });
        }
        if new_fabric.stock_meters < 0.0 {
            return Err(FabricError::NegativeQuantity {
                field: "stockMeters",
                value: new_fabric.stock_meters,
            });
        }

        let fabric = Fabric {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: new_fabric.category,
            fabric_type: normalize_text(new_fabric.fabric_type),
            color: normalize_text(new_fabric.color),
            pattern: normalize_text(new_fabric.pattern),
            supplier: normalize_text(new_fabric.supplier),
            price_per_meter: new_fabric.price_per_meter,
            stock_meters: new_fabric.stock_meters,
            texture_photo: new_fabric.texture_photo,
            created_at: Utc::now(),
        };
        let id = fabric.id;
        self.0.insert(0, fabric);
        Ok(id)
    }

    pub fn update(&mut self, id: Uuid, patch: FabricPatch) -> Option<&Fabric> {
        let fabric = self.0.iter_mut().find(|f| f.id == id)?;
        patch.apply_to(fabric);
        Some(fabric)
    }

    /// Put meters back on the shelf (negative values take them off, clamped)
    pub fn restock(&mut self, id: Uuid, meters: f64) -> Option<&Fabric> {
        let fabric = self.0.iter_mut().find(|f| f.id == id)?;
        fabric.stock_meters = (fabric.stock_meters + meters).max(0.0);
        Some(fabric)
    }

    /// Fabrics at or below the low-stock threshold, catalog order preserved
    pub fn low_stock(&self) -> Vec<&Fabric> {
        self.0
            .iter()
            .filter(|f| f.stock_meters <= LOW_STOCK_THRESHOLD_METERS)
            .collect()
    }
}

impl From<Vec<Fabric>> for FabricCatalog {
    fn from(fabrics: Vec<Fabric>) -> Self {
        Self(fabrics)
    }
}

impl FabricInventory for FabricCatalog {
    fn find_by_id(&self, id: Uuid) -> Option<&Fabric> {
        self.0.iter().find(|f| f.id == id)
    }

    fn decrement_stock(&mut self, id: Uuid, meters: f64) -> Option<StockDeduction> {
        let fabric = self.0.iter_mut().find(|f| f.id == id)?;
        let before = fabric.stock_meters;
        let remaining = (before - meters).max(0.0);
        fabric.stock_meters = remaining;

        Some(StockDeduction {
            fabric_id: id,
            requested: meters,
            applied: before - remaining,
            remaining,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fabric::FabricCategory;

    fn catalog_with(stock: f64) -> (FabricCatalog, Uuid) {
        let mut catalog = FabricCatalog::new();
        let id = catalog
            .add(NewFabric::new("Oxford White", FabricCategory::Shirt, 12.0, stock))
            .unwrap();
        (catalog, id)
    }

    #[test]
    fn test_decrement_within_stock() {
        let (mut catalog, id) = catalog_with(10.0);
        let deduction = catalog.decrement_stock(id, 2.5).unwrap();

        assert_eq!(deduction.applied, 2.5);
        assert_eq!(deduction.remaining, 7.5);
        assert!(!deduction.was_clamped());
        assert_eq!(catalog.find_by_id(id).unwrap().stock_meters, 7.5);
    }

    #[test]
    fn test_decrement_clamps_at_zero() {
        let (mut catalog, id) = catalog_with(2.0);
        let deduction = catalog.decrement_stock(id, 5.0).unwrap();

        assert_eq!(deduction.requested, 5.0);
        assert_eq!(deduction.applied, 2.0);
        assert_eq!(deduction.remaining, 0.0);
        assert!(deduction.was_clamped());
        assert_eq!(catalog.find_by_id(id).unwrap().stock_meters, 0.0);
    }

    #[test]
    fn test_decrement_unknown_fabric_is_none() {
        let (mut catalog, _) = catalog_with(2.0);
        assert!(catalog.decrement_stock(Uuid::new_v4(), 1.0).is_none());
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut catalog = FabricCatalog::new();
        let result = catalog.add(NewFabric::new("   ", FabricCategory::Tie, 5.0, 1.0));
        assert_eq!(result.unwrap_err(), FabricError::EmptyName);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_add_rejects_negative_stock() {
        let mut catalog = FabricCatalog::new();
        let result = catalog.add(NewFabric::new("Silk", FabricCategory::Tie, 5.0, -1.0));
        assert!(matches!(
            result.unwrap_err(),
            FabricError::NegativeQuantity { field: "stockMeters", .. }
        ));
    }

    #[test]
    fn test_add_places_newest_first_and_trims() {
        let mut catalog = FabricCatalog::new();
        catalog.add(NewFabric::new("First", FabricCategory::Coat, 1.0, 1.0)).unwrap();
        let mut second = NewFabric::new("  Second ", FabricCategory::Coat, 1.0, 1.0);
        second.color = Some("  ".to_string());
        let id = catalog.add(second).unwrap();

        assert_eq!(catalog.as_slice()[0].id, id);
        assert_eq!(catalog.as_slice()[0].name, "Second");
        assert_eq!(catalog.as_slice()[0].color, None);
    }

    #[test]
    fn test_restock_adds_meters() {
        let (mut catalog, id) = catalog_with(2.0);
        assert_eq!(catalog.restock(id, 1.0).unwrap().stock_meters, 3.0);
        assert_eq!(catalog.restock(id, -10.0).unwrap().stock_meters, 0.0);
    }

    #[test]
    fn test_low_stock_boundary() {
        let mut catalog = FabricCatalog::new();
        let above = catalog.add(NewFabric::new("A", FabricCategory::Coat, 1.0, 3.01)).unwrap();
        let at = catalog.add(NewFabric::new("B", FabricCategory::Coat, 1.0, 3.0)).unwrap();
        let empty = catalog.add(NewFabric::new("C", FabricCategory::Coat, 1.0, 0.0)).unwrap();

        let low: Vec<Uuid> = catalog.low_stock().iter().map(|f| f.id).collect();
        assert_eq!(low, vec![empty, at]);
        assert!(!low.contains(&above));
    }
}
