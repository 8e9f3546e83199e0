//! Commercial parameters: the tunable constants behind chargeable units.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use freightdesk_core::ValueObject;

use crate::mode::Modality;

/// Invalid commercial parameter values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamsError {
    #[error("{field} must be a positive number (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("invalid parameters document: {0}")]
    Malformed(String),
}

/// Per-modality pricing constants.
///
/// Always passed in explicitly; there is no process-wide instance. Missing
/// fields in a JSON document take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommercialParameters {
    /// cm³ per chargeable kg for air freight.
    pub air_volumetric_divisor: f64,
    /// cm³ per chargeable kg for courier/express.
    pub courier_volumetric_divisor: f64,
    /// Minimum billable CBM for sea LCL.
    pub sea_min_lcl_cbm: f64,
    /// kg per CBM used to convert road freight volume to weight.
    pub road_density_kg_per_cbm: f64,
}

impl Default for CommercialParameters {
    fn default() -> Self {
        Self {
            air_volumetric_divisor: 6000.0,
            courier_volumetric_divisor: 5000.0,
            sea_min_lcl_cbm: 1.0,
            road_density_kg_per_cbm: 333.0,
        }
    }
}

impl ValueObject for CommercialParameters {}

impl CommercialParameters {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(raw: &str) -> Result<Self, ParamsError> {
        let params: Self =
            serde_json::from_str(raw).map_err(|e| ParamsError::Malformed(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Volumetric divisor for modalities priced on dimensional weight.
    pub fn volumetric_divisor(&self, modality: Modality) -> Option<f64> {
        match modality {
            Modality::Air => Some(self.air_volumetric_divisor),
            Modality::Courier => Some(self.courier_volumetric_divisor),
            Modality::Sea | Modality::Road => None,
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        positive("airVolumetricDivisor", self.air_volumetric_divisor)?;
        positive("courierVolumetricDivisor", self.courier_volumetric_divisor)?;
        positive("roadDensityKgPerCbm", self.road_density_kg_per_cbm)?;
        if !(self.sea_min_lcl_cbm.is_finite() && self.sea_min_lcl_cbm >= 0.0) {
            return Err(ParamsError::Negative {
                field: "seaMinLclCbm",
                value: self.sea_min_lcl_cbm,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ParamsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NotPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = CommercialParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.volumetric_divisor(Modality::Air), Some(6000.0));
        assert_eq!(params.volumetric_divisor(Modality::Courier), Some(5000.0));
        assert_eq!(params.volumetric_divisor(Modality::Sea), None);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let params =
            CommercialParameters::from_json_str(r#"{ "airVolumetricDivisor": 5000 }"#).unwrap();
        assert_eq!(params.air_volumetric_divisor, 5000.0);
        assert_eq!(params.courier_volumetric_divisor, 5000.0);
        assert_eq!(params.road_density_kg_per_cbm, 333.0);
    }

    #[test]
    fn zero_divisor_is_rejected() {
        let err = CommercialParameters::from_json_str(r#"{ "courierVolumetricDivisor": 0 }"#)
            .unwrap_err();
        assert_eq!(
            err,
            ParamsError::NotPositive {
                field: "courierVolumetricDivisor",
                value: 0.0
            }
        );
    }

    #[test]
    fn negative_lcl_minimum_is_rejected() {
        let params = CommercialParameters {
            sea_min_lcl_cbm: -1.0,
            ..CommercialParameters::default()
        };
        assert!(matches!(params.validate(), Err(ParamsError::Negative { .. })));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = CommercialParameters::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ParamsError::Malformed(_)));
    }
}
