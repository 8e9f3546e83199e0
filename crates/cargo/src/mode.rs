//! Transport modalities and their consolidation sub-types.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use freightdesk_core::DomainError;

/// Transport modality of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    Sea,
    Air,
    Courier,
    Road,
}

impl Modality {
    pub const ALL: [Modality; 4] = [
        Modality::Sea,
        Modality::Air,
        Modality::Courier,
        Modality::Road,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Modality::Sea => "SEA",
            Modality::Air => "AIR",
            Modality::Courier => "COURIER",
            Modality::Road => "ROAD",
        }
    }

    /// Three-letter code used in references (first three letters of the name).
    pub fn code(self) -> &'static str {
        &self.name()[..3]
    }
}

impl core::fmt::Display for Modality {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Modality {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Modality::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::validation(format!("unknown modality: {wanted}")))
    }
}

/// Sea consolidation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeaLoad {
    /// Less than container load (shared box, rated per CBM).
    Lcl,
    /// Full container load.
    Fcl,
}

/// Road consolidation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoadLoad {
    /// Less than truckload.
    Ltl,
    /// Full truckload.
    Ftl,
}

/// Modality together with its sub-type, where one applies.
///
/// `None` means the sub-type was not specified on the intake; the rules that
/// depend on it then do not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Air,
    Courier,
    Sea(Option<SeaLoad>),
    Road(Option<RoadLoad>),
}

impl Mode {
    pub fn modality(self) -> Modality {
        match self {
            Mode::Air => Modality::Air,
            Mode::Courier => Modality::Courier,
            Mode::Sea(_) => Modality::Sea,
            Mode::Road(_) => Modality::Road,
        }
    }

    /// Whether every cargo line needs length, width and height.
    ///
    /// Full loads are priced per container/truck, so dimensions are optional;
    /// an unspecified sub-type gets the benefit of the doubt.
    pub fn requires_dimensions(self) -> bool {
        match self {
            Mode::Air | Mode::Courier => true,
            Mode::Sea(Some(SeaLoad::Lcl)) | Mode::Road(Some(RoadLoad::Ltl)) => true,
            Mode::Sea(Some(SeaLoad::Fcl)) | Mode::Road(Some(RoadLoad::Ftl)) => false,
            Mode::Sea(None) | Mode::Road(None) => false,
        }
    }

    pub fn is_lcl(self) -> bool {
        matches!(self, Mode::Sea(Some(SeaLoad::Lcl)))
    }
}

impl From<Modality> for Mode {
    fn from(value: Modality) -> Self {
        match value {
            Modality::Sea => Mode::Sea(None),
            Modality::Air => Mode::Air,
            Modality::Courier => Mode::Courier,
            Modality::Road => Mode::Road(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_first_three_letters() {
        assert_eq!(Modality::Sea.code(), "SEA");
        assert_eq!(Modality::Air.code(), "AIR");
        assert_eq!(Modality::Courier.code(), "COU");
        assert_eq!(Modality::Road.code(), "ROA");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("courier".parse::<Modality>(), Ok(Modality::Courier));
        assert_eq!(" Sea ".parse::<Modality>(), Ok(Modality::Sea));
        assert!("rail".parse::<Modality>().is_err());
    }

    #[test]
    fn dimension_requirement_by_mode() {
        assert!(Mode::Air.requires_dimensions());
        assert!(Mode::Courier.requires_dimensions());
        assert!(Mode::Sea(Some(SeaLoad::Lcl)).requires_dimensions());
        assert!(Mode::Road(Some(RoadLoad::Ltl)).requires_dimensions());

        assert!(!Mode::Sea(Some(SeaLoad::Fcl)).requires_dimensions());
        assert!(!Mode::Road(Some(RoadLoad::Ftl)).requires_dimensions());
        assert!(!Mode::Sea(None).requires_dimensions());
        assert!(!Mode::Road(None).requires_dimensions());
    }

    #[test]
    fn serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Modality::Courier).unwrap(), "\"COURIER\"");
        let load: SeaLoad = serde_json::from_str("\"LCL\"").unwrap();
        assert_eq!(load, SeaLoad::Lcl);
    }
}
