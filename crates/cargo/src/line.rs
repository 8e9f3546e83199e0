//! Cargo lines: one group of identical physical units within a shipment.

use serde::{Deserialize, Serialize};

use freightdesk_core::{CargoLineId, Entity};

use crate::{lenient, units};

/// How a cargo line is packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagingType {
    #[default]
    Pallet,
    Box,
    Crate,
    Loose,
    Container,
}

/// One payload row of an intake.
///
/// Every field deserializes leniently: `null`, missing, numeric strings and
/// junk all land as a value (junk as zero or the default), matching what form
/// inputs send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoLine {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub id: CargoLineId,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub packaging: PackagingType,
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: u32,
    #[serde(default, rename = "length", deserialize_with = "lenient::measure")]
    pub length_cm: f64,
    #[serde(default, rename = "width", deserialize_with = "lenient::measure")]
    pub width_cm: f64,
    #[serde(default, rename = "height", deserialize_with = "lenient::measure")]
    pub height_cm: f64,
    /// Weight of a single unit.
    #[serde(default, rename = "weight", deserialize_with = "lenient::measure")]
    pub weight_kg: f64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub stackable: bool,
}

impl CargoLine {
    /// A fresh line with quantity one and no measurements.
    pub fn new(packaging: PackagingType) -> Self {
        Self {
            id: CargoLineId::new(),
            packaging,
            quantity: 1,
            length_cm: 0.0,
            width_cm: 0.0,
            height_cm: 0.0,
            weight_kg: 0.0,
            description: String::new(),
            stackable: false,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_dimensions(mut self, length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        self.length_cm = length_cm;
        self.width_cm = width_cm;
        self.height_cm = height_cm;
        self
    }

    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Total weight of the line (unit weight × quantity).
    pub fn total_weight_kg(&self) -> f64 {
        units::measure(self.weight_kg) * f64::from(self.quantity)
    }

    /// Total volume of the line in CBM.
    pub fn total_volume_cbm(&self) -> f64 {
        units::cbm_from_cm(self.length_cm, self.width_cm, self.height_cm) * f64::from(self.quantity)
    }

    pub fn has_weight(&self) -> bool {
        units::measure(self.weight_kg) > 0.0
    }

    /// All three dimensions are filled in with positive values.
    pub fn has_dimensions(&self) -> bool {
        [self.length_cm, self.width_cm, self.height_cm]
            .into_iter()
            .all(|d| units::measure(d) > 0.0)
    }
}

impl Entity for CargoLine {
    type Id = CargoLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
