use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::domain::GarmentType;

// ============================================================================
// Fabric Value Objects
// ============================================================================

/// Fabrics are shelved by the garment they are meant for
pub type FabricCategory = GarmentType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fabric {
    pub id: Uuid,
    pub name: String,
    pub category: FabricCategory,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub fabric_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub price_per_meter: f64,
    pub stock_meters: f64,
    /// Data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for adding a fabric to the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct NewFabric {
    pub name: String,
    pub category: FabricCategory,
    pub fabric_type: Option<String>,
    pub color: Option<String>,
    pub pattern: Option<String>,
    pub supplier: Option<String>,
    pub price_per_meter: f64,
    pub stock_meters: f64,
    pub texture_photo: Option<String>,
}

impl NewFabric {
    pub fn new(
        name: impl Into<String>,
        category: FabricCategory,
        price_per_meter: f64,
        stock_meters: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            fabric_type: None,
            color: None,
            pattern: None,
            supplier: None,
            price_per_meter,
            stock_meters,
            texture_photo: None,
        }
    }
}

/// Shallow patch; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FabricPatch {
    pub name: Option<String>,
    pub category: Option<FabricCategory>,
    pub fabric_type: Option<String>,
    pub color: Option<String>,
    pub pattern: Option<String>,
    pub supplier: Option<String>,
    pub price_per_meter: Option<f64>,
    pub stock_meters: Option<f64>,
    pub texture_photo: Option<String>,
}

impl FabricPatch {
    pub fn apply_to(self, fabric: &mut Fabric) {
        if let Some(name) = self.name {
            fabric.name = name;
        }
        if let Some(category) = self.category {
            fabric.category = category;
        }
        if let Some(fabric_type) = self.fabric_type {
            fabric.fabric_type = Some(fabric_type);
        }
        if let Some(color) = self.color {
            fabric.color = Some(color);
        }
        if let Some(pattern) = self.pattern {
            fabric.pattern = Some(pattern);
        }
        if let Some(supplier) = self.supplier {
            fabric.supplier = Some(supplier);
        }
        if let Some(price) = self.price_per_meter {
            fabric.price_per_meter = price;
        }
        if let Some(stock) = self.stock_meters {
            fabric.stock_meters = stock;
        }
        if let Some(photo) = self.texture_photo {
            fabric.texture_photo = Some(photo);
        }
    }
}
