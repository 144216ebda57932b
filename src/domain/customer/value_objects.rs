use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::domain::GarmentType;

// ============================================================================
// Customer Value Objects
// ============================================================================

/// A named, garment-typed bundle of body measurements.
/// Immutable once taken; order items point at it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementSet {
    pub id: Uuid,
    /// e.g. "Office Suit", "Casual Shirt"
    pub name: String,
    pub garment_type: GarmentType,
    pub values: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Data URLs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasurementSet {
    pub name: String,
    pub garment_type: GarmentType,
    pub values: BTreeMap<String, f64>,
    pub notes: Option<String>,
    pub reference_images: Vec<String>,
}

impl NewMeasurementSet {
    pub fn new(name: impl Into<String>, garment_type: GarmentType) -> Self {
        Self {
            name: name.into(),
            garment_type,
            values: BTreeMap::new(),
            notes: None,
            reference_images: Vec::new(),
        }
    }

    pub fn with_value(mut self, field: impl Into<String>, value: f64) -> Self {
        self.values.insert(field.into(), value);
        self
    }
}

/// Input for registering a customer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub photo: Option<String>,
    pub measurement_sets: Vec<NewMeasurementSet>,
}

impl NewCustomer {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Profile edit; `None` leaves a field untouched, an empty string clears it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub photo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_set_wire_format() {
        let set = MeasurementSet {
            id: Uuid::new_v4(),
            name: "Casual Shirt".to_string(),
            garment_type: GarmentType::Shirt,
            values: BTreeMap::from([("neck".to_string(), 39.0)]),
            notes: None,
            reference_images: vec![],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["garmentType"], "Shirt");
        assert_eq!(json["values"]["neck"], 39.0);
        assert!(json.get("referenceImages").is_none());
    }

    #[test]
    fn test_measurement_set_reads_without_optional_fields() {
        let json = r#"{
            "id": "6f1c1c7e-8d1f-4b59-9a43-2f2b8f0c6a11",
            "name": "Office Suit",
            "garmentType": "Coat",
            "values": {"chest": 100, "arm": 64},
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let set: MeasurementSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.values["chest"], 100.0);
        assert!(set.reference_images.is_empty());
    }
}
