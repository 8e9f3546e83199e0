//! Intake data: the shipment specification collected before quoting.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use freightdesk_cargo::{CargoLine, Modality, Mode, RoadLoad, SeaLoad, lenient};
use freightdesk_core::ValueObject;

/// Sea-specific intake details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeaDetails {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub load_type: Option<SeaLoad>,
    /// Requested container types, e.g. "40HC".
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub container_types: Vec<String>,
}

/// Road-specific intake details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadDetails {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub load_type: Option<RoadLoad>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub tail_lift_required: bool,
}

/// Full shipment specification for one job.
///
/// Treated as a value: edits build a new intake that replaces the old one.
/// Text fields count as missing when absent or blank. Deserialization never
/// rejects a filled-in form: blank, `null` or unreadable values land as the
/// field's empty value. Only `modality` is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeData {
    pub modality: Modality,
    #[serde(default, deserialize_with = "lenient::text")]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub pickup_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub delivery_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub incoterms: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub ready_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub commodity: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub hs_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub cargo_lines: Vec<CargoLine>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub cargo_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub dangerous_goods: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub temperature_controlled: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub shipper: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub consignee: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub special_handling: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub sea: Option<SeaDetails>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub road: Option<RoadDetails>,
}

impl ValueObject for IntakeData {}

impl IntakeData {
    /// An intake with nothing filled in except the modality.
    pub fn new(modality: Modality) -> Self {
        Self {
            modality,
            origin: None,
            destination: None,
            pickup_address: None,
            delivery_address: None,
            incoterms: None,
            ready_date: None,
            commodity: None,
            hs_code: None,
            cargo_lines: Vec::new(),
            cargo_value: None,
            currency: None,
            dangerous_goods: false,
            temperature_controlled: false,
            shipper: None,
            consignee: None,
            special_handling: None,
            sea: None,
            road: None,
        }
    }

    /// Modality plus the consolidation sub-type relevant to it.
    ///
    /// Sub-details that do not belong to the modality are ignored.
    pub fn mode(&self) -> Mode {
        match self.modality {
            Modality::Air => Mode::Air,
            Modality::Courier => Mode::Courier,
            Modality::Sea => Mode::Sea(self.sea.as_ref().and_then(|s| s.load_type)),
            Modality::Road => Mode::Road(self.road.as_ref().and_then(|r| r.load_type)),
        }
    }

    /// Whether `line` satisfies the dimension rule of this intake's mode.
    pub fn line_dimensions_ok(&self, line: &CargoLine) -> bool {
        !self.mode().requires_dimensions() || line.has_dimensions()
    }

    pub fn has_shipper(&self) -> bool {
        present(&self.shipper)
    }

    pub fn has_consignee(&self) -> bool {
        present(&self.consignee)
    }

    pub fn has_incoterms(&self) -> bool {
        present(&self.incoterms)
    }

    pub fn has_currency(&self) -> bool {
        present(&self.currency)
    }

    pub fn has_origin(&self) -> bool {
        present(&self.origin)
    }

    pub fn has_destination(&self) -> bool {
        present(&self.destination)
    }

    pub fn has_commodity(&self) -> bool {
        present(&self.commodity)
    }

    pub fn has_hs_code(&self) -> bool {
        present(&self.hs_code)
    }
}

pub(crate) fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// `YYYY-MM-DD`, optionally followed by a time part as date pickers send it.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient::text(deserializer)?;
    Ok(raw.and_then(|s| {
        let s = s.trim();
        s.get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_not_present() {
        let mut intake = IntakeData::new(Modality::Air);
        intake.shipper = Some("   ".into());
        intake.consignee = Some("ACME GmbH".into());

        assert!(!intake.has_shipper());
        assert!(intake.has_consignee());
        assert!(!intake.has_incoterms());
    }

    #[test]
    fn mode_picks_sub_type_of_own_modality() {
        let mut intake = IntakeData::new(Modality::Sea);
        assert_eq!(intake.mode(), Mode::Sea(None));

        intake.sea = Some(SeaDetails {
            load_type: Some(SeaLoad::Fcl),
            ..SeaDetails::default()
        });
        intake.road = Some(RoadDetails {
            load_type: Some(RoadLoad::Ltl),
            ..RoadDetails::default()
        });
        assert_eq!(intake.mode(), Mode::Sea(Some(SeaLoad::Fcl)));

        intake.modality = Modality::Road;
        assert_eq!(intake.mode(), Mode::Road(Some(RoadLoad::Ltl)));
    }

    #[test]
    fn null_cargo_lines_become_empty() {
        let intake: IntakeData = serde_json::from_value(serde_json::json!({
            "modality": "SEA",
            "cargoLines": null,
            "readyDate": "2025-03-14",
            "sea": { "loadType": "LCL" }
        }))
        .unwrap();

        assert!(intake.cargo_lines.is_empty());
        assert_eq!(intake.ready_date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(intake.mode(), Mode::Sea(Some(SeaLoad::Lcl)));
    }

    #[test]
    fn missing_cargo_lines_become_empty() {
        let intake: IntakeData = serde_json::from_str(r#"{ "modality": "COURIER" }"#).unwrap();
        assert!(intake.cargo_lines.is_empty());
        assert!(!intake.dangerous_goods);
    }

    fn parties_only_air(extra: serde_json::Value) -> IntakeData {
        let mut value = serde_json::json!({
            "modality": "AIR",
            "shipper": "Globex Ltd",
            "consignee": "Initech BV",
            "incoterms": "FCA",
            "currency": "EUR"
        });
        if let (Some(base), Some(extra)) = (value.as_object_mut(), extra.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn blank_or_bad_ready_date_is_absent() {
        assert_eq!(parties_only_air(serde_json::json!({ "readyDate": "" })).ready_date, None);
        assert_eq!(parties_only_air(serde_json::json!({ "readyDate": "soon" })).ready_date, None);
        assert_eq!(parties_only_air(serde_json::json!({ "readyDate": null })).ready_date, None);
        assert_eq!(
            parties_only_air(serde_json::json!({ "readyDate": "2025-06-02T00:00:00.000Z" }))
                .ready_date,
            NaiveDate::from_ymd_opt(2025, 6, 2)
        );
    }

    #[test]
    fn blank_cargo_value_is_absent() {
        assert_eq!(parties_only_air(serde_json::json!({ "cargoValue": "" })).cargo_value, None);
        assert_eq!(parties_only_air(serde_json::json!({ "cargoValue": null })).cargo_value, None);
        assert_eq!(
            parties_only_air(serde_json::json!({ "cargoValue": "18000" })).cargo_value,
            Some(18_000.0)
        );
    }

    #[test]
    fn null_flags_are_false() {
        let intake = parties_only_air(serde_json::json!({
            "dangerousGoods": null,
            "temperatureControlled": null,
            "road": { "loadType": "", "tailLiftRequired": null }
        }));

        assert!(!intake.dangerous_goods);
        assert!(!intake.temperature_controlled);
        assert_eq!(intake.road, Some(RoadDetails::default()));
    }

    #[test]
    fn null_line_description_still_scores() {
        let intake = parties_only_air(serde_json::json!({
            "cargoLines": [{ "quantity": 1, "weight": 12, "description": null }],
            "hsCode": 8471
        }));

        assert_eq!(intake.cargo_lines[0].description, "");
        assert_eq!(intake.hs_code.as_deref(), Some("8471"));
        assert_eq!(crate::completeness::score_completeness(Some(&intake)), 25);
    }
}
