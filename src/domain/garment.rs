use std::fmt;
use serde::{Deserialize, Serialize};

/// Garment kinds shared by measurement sets, order items and fabric categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GarmentType {
    Shirt,
    Trouser,
    Coat,
    Tie,
}

impl GarmentType {
    pub const ALL: [GarmentType; 4] = [
        GarmentType::Shirt,
        GarmentType::Trouser,
        GarmentType::Coat,
        GarmentType::Tie,
    ];

    /// Measurement fields offered when taking a set for this garment
    pub fn measurement_fields(&self) -> &'static [&'static str] {
        match self {
            GarmentType::Shirt => &["chest", "sleeve", "neck", "shoulder", "length"],
            GarmentType::Trouser => &["waist", "hip", "length", "thigh", "rise"],
            GarmentType::Coat => &["chest", "length", "arm", "shoulder"],
            GarmentType::Tie => &["length", "width"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GarmentType::Shirt => "Shirt",
            GarmentType::Trouser => "Trouser",
            GarmentType::Coat => "Coat",
            GarmentType::Tie => "Tie",
        }
    }
}

impl fmt::Display for GarmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
