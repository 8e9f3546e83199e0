//! Cargo metrics calculator.
//!
//! Totals are returned unrounded so callers can format them for display;
//! chargeable units are rounded to two decimals because they feed pricing.
//!
//! Per-modality rule for chargeable units:
//!
//! | mode    | chargeable units                                       | unit |
//! |---------|--------------------------------------------------------|------|
//! | AIR     | max(weight, cbm × 1e6 / air divisor)                   | kg   |
//! | COURIER | max(weight, cbm × 1e6 / courier divisor)               | kg   |
//! | SEA     | max(cbm, weight / 1000), floored at min CBM for LCL    | CBM  |
//! | ROAD    | max(weight, cbm × road density)                        | kg   |

use serde::{Deserialize, Serialize};

use freightdesk_core::ValueObject;

use crate::line::CargoLine;
use crate::mode::{Mode, Modality};
use crate::params::CommercialParameters;
use crate::units;

/// Unit the chargeable figure is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeableUnit {
    Kg,
    Cbm,
}

impl ChargeableUnit {
    pub fn for_modality(modality: Modality) -> Self {
        match modality {
            Modality::Sea => ChargeableUnit::Cbm,
            Modality::Air | Modality::Courier | Modality::Road => ChargeableUnit::Kg,
        }
    }
}

/// Derived cargo figures. Never stored; recompute from the lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoMetrics {
    pub total_actual_weight: f64,
    pub total_volume_cbm: f64,
    pub chargeable_units: f64,
    pub chargeable_unit: ChargeableUnit,
}

impl ValueObject for CargoMetrics {}

/// Aggregate `lines` into totals and the chargeable figure for `mode`.
///
/// Total over all inputs: missing or nonsensical measurements count as zero.
pub fn compute_cargo_metrics(
    lines: &[CargoLine],
    mode: impl Into<Mode>,
    params: &CommercialParameters,
) -> CargoMetrics {
    let mode = mode.into();
    let total_actual_weight: f64 = lines.iter().map(CargoLine::total_weight_kg).sum();
    let total_volume_cbm: f64 = lines.iter().map(CargoLine::total_volume_cbm).sum();

    let chargeable = match mode {
        Mode::Air | Mode::Courier => {
            let divisor = params
                .volumetric_divisor(mode.modality())
                .unwrap_or_default();
            let volumetric = units::volumetric_weight_kg(total_volume_cbm, divisor);
            total_actual_weight.max(volumetric)
        }
        Mode::Sea(_) => {
            let revenue_tons =
                total_volume_cbm.max(units::sea_weight_equivalent_cbm(total_actual_weight));
            if mode.is_lcl() {
                revenue_tons.max(units::measure(params.sea_min_lcl_cbm))
            } else {
                revenue_tons
            }
        }
        Mode::Road(_) => total_actual_weight.max(units::road_weight_equivalent_kg(
            total_volume_cbm,
            params.road_density_kg_per_cbm,
        )),
    };

    CargoMetrics {
        total_actual_weight,
        total_volume_cbm,
        chargeable_units: units::round2(chargeable),
        chargeable_unit: ChargeableUnit::for_modality(mode.modality()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::PackagingType;
    use crate::mode::{RoadLoad, SeaLoad};
    use proptest::prelude::*;

    fn line(qty: u32, l: f64, w: f64, h: f64, kg: f64) -> CargoLine {
        CargoLine::new(PackagingType::Pallet)
            .with_quantity(qty)
            .with_dimensions(l, w, h)
            .with_weight(kg)
    }

    fn defaults() -> CommercialParameters {
        CommercialParameters::default()
    }

    #[test]
    fn air_uses_volumetric_weight_when_heavier() {
        let lines = [line(2, 100.0, 100.0, 100.0, 50.0)];
        let m = compute_cargo_metrics(&lines, Modality::Air, &defaults());

        assert_eq!(m.total_actual_weight, 100.0);
        assert_eq!(m.total_volume_cbm, 2.0);
        assert_eq!(m.chargeable_units, 333.33);
        assert_eq!(m.chargeable_unit, ChargeableUnit::Kg);
    }

    #[test]
    fn air_uses_actual_weight_when_dense() {
        let lines = [line(1, 50.0, 40.0, 30.0, 80.0)];
        let m = compute_cargo_metrics(&lines, Mode::Air, &defaults());
        // 0.06 cbm -> 10 kg volumetric
        assert_eq!(m.chargeable_units, 80.0);
    }

    #[test]
    fn courier_divides_by_five_thousand() {
        let lines = [line(1, 100.0, 100.0, 100.0, 10.0)];
        let m = compute_cargo_metrics(&lines, Modality::Courier, &defaults());
        assert_eq!(m.chargeable_units, 200.0);
    }

    #[test]
    fn divisor_comes_from_parameters() {
        let params = CommercialParameters {
            air_volumetric_divisor: 5000.0,
            ..defaults()
        };
        let lines = [line(1, 100.0, 100.0, 100.0, 10.0)];
        let m = compute_cargo_metrics(&lines, Modality::Air, &params);
        assert_eq!(m.chargeable_units, 200.0);
    }

    #[test]
    fn sea_compares_volume_with_revenue_tons() {
        let heavy = [line(1, 100.0, 100.0, 100.0, 2_500.0)];
        let m = compute_cargo_metrics(&heavy, Modality::Sea, &defaults());
        assert_eq!(m.chargeable_units, 2.5);
        assert_eq!(m.chargeable_unit, ChargeableUnit::Cbm);

        let bulky = [line(3, 100.0, 100.0, 100.0, 100.0)];
        let m = compute_cargo_metrics(&bulky, Modality::Sea, &defaults());
        assert_eq!(m.chargeable_units, 3.0);
    }

    #[test]
    fn lcl_minimum_applies_only_to_lcl() {
        let small = [line(1, 50.0, 50.0, 50.0, 40.0)];

        let lcl = compute_cargo_metrics(&small, Mode::Sea(Some(SeaLoad::Lcl)), &defaults());
        assert_eq!(lcl.chargeable_units, 1.0);

        let fcl = compute_cargo_metrics(&small, Mode::Sea(Some(SeaLoad::Fcl)), &defaults());
        assert_eq!(fcl.chargeable_units, 0.13);

        let unspecified = compute_cargo_metrics(&small, Mode::Sea(None), &defaults());
        assert_eq!(unspecified.chargeable_units, 0.13);
    }

    #[test]
    fn road_converts_volume_at_density() {
        let lines = [line(1, 200.0, 100.0, 150.0, 500.0)];
        let m = compute_cargo_metrics(&lines, Mode::Road(Some(RoadLoad::Ltl)), &defaults());
        // 3 cbm * 333 = 999 kg
        assert_eq!(m.chargeable_units, 999.0);
    }

    #[test]
    fn empty_cargo_is_all_zero() {
        for modality in Modality::ALL {
            let m = compute_cargo_metrics(&[], modality, &defaults());
            assert_eq!(m.total_actual_weight, 0.0);
            assert_eq!(m.total_volume_cbm, 0.0);
            assert_eq!(m.chargeable_units, 0.0);
        }
    }

    #[test]
    fn empty_lcl_still_bills_the_minimum() {
        let m = compute_cargo_metrics(&[], Mode::Sea(Some(SeaLoad::Lcl)), &defaults());
        assert_eq!(m.total_actual_weight, 0.0);
        assert_eq!(m.total_volume_cbm, 0.0);
        assert_eq!(m.chargeable_units, 1.0);
        assert_eq!(m.chargeable_unit, ChargeableUnit::Cbm);

        let fcl = compute_cargo_metrics(&[], Mode::Sea(Some(SeaLoad::Fcl)), &defaults());
        assert_eq!(fcl.chargeable_units, 0.0);
    }

    #[test]
    fn broken_parameters_do_not_panic() {
        let params = CommercialParameters {
            air_volumetric_divisor: 0.0,
            road_density_kg_per_cbm: f64::NAN,
            sea_min_lcl_cbm: -5.0,
            ..defaults()
        };
        let lines = [line(1, 100.0, 100.0, 100.0, 10.0)];

        assert_eq!(compute_cargo_metrics(&lines, Modality::Air, &params).chargeable_units, 10.0);
        assert_eq!(compute_cargo_metrics(&lines, Modality::Road, &params).chargeable_units, 10.0);
        assert_eq!(
            compute_cargo_metrics(&lines, Mode::Sea(Some(SeaLoad::Lcl)), &params).chargeable_units,
            1.0
        );
    }

    fn arb_line() -> impl Strategy<Value = CargoLine> {
        (
            0u32..50,
            -10.0f64..300.0,
            0.0f64..300.0,
            0.0f64..300.0,
            -5.0f64..2_000.0,
        )
            .prop_map(|(q, l, w, h, kg)| line(q, l, w, h, kg))
    }

    fn arb_mode() -> impl Strategy<Value = Mode> {
        prop_oneof![
            Just(Mode::Air),
            Just(Mode::Courier),
            Just(Mode::Sea(None)),
            Just(Mode::Sea(Some(SeaLoad::Lcl))),
            Just(Mode::Sea(Some(SeaLoad::Fcl))),
            Just(Mode::Road(None)),
            Just(Mode::Road(Some(RoadLoad::Ltl))),
            Just(Mode::Road(Some(RoadLoad::Ftl))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Totals equal the per-line sums and are never negative.
        #[test]
        fn totals_are_sums_of_lines(
            lines in prop::collection::vec(arb_line(), 0..8),
            mode in arb_mode(),
        ) {
            let m = compute_cargo_metrics(&lines, mode, &defaults());

            let weight: f64 = lines
                .iter()
                .map(|l| units::measure(l.weight_kg) * f64::from(l.quantity))
                .sum();
            let volume: f64 = lines
                .iter()
                .map(|l| {
                    units::measure(l.length_cm)
                        * units::measure(l.width_cm)
                        * units::measure(l.height_cm)
                        / 1e6
                        * f64::from(l.quantity)
                })
                .sum();

            prop_assert!(m.total_actual_weight >= 0.0);
            prop_assert!(m.total_volume_cbm >= 0.0);
            prop_assert!(m.chargeable_units >= 0.0);
            prop_assert!((m.total_actual_weight - weight).abs() <= 1e-6 * weight.max(1.0));
            prop_assert!((m.total_volume_cbm - volume).abs() <= 1e-9 * volume.max(1.0));
        }

        /// Air never charges less than the actual weight (up to rounding).
        #[test]
        fn air_chargeable_at_least_actual(lines in prop::collection::vec(arb_line(), 0..8)) {
            let m = compute_cargo_metrics(&lines, Modality::Air, &defaults());
            prop_assert!(m.chargeable_units + 0.01 >= m.total_actual_weight);
        }
    }
}
