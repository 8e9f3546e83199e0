//! Unit conversion primitives.
//!
//! Inputs are centimetres and kilograms as typed into intake forms. Anything
//! negative, NaN or infinite is treated as zero so every function is total.

/// Cubic centimetres in one cubic metre.
pub const CM3_PER_CBM: f64 = 1_000_000.0;

/// Sea freight weight/measure ratio: one metric tonne rates as one CBM.
pub const SEA_KG_PER_CBM: f64 = 1_000.0;

/// Clamp a user-entered measurement to a usable non-negative number.
pub fn measure(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Volume of one box in CBM from its dimensions in centimetres.
pub fn cbm_from_cm(length_cm: f64, width_cm: f64, height_cm: f64) -> f64 {
    measure(length_cm) * measure(width_cm) * measure(height_cm) / CM3_PER_CBM
}

/// Volumetric ("dimensional") weight in kg for air and courier pricing.
///
/// A non-positive divisor yields zero.
pub fn volumetric_weight_kg(volume_cbm: f64, divisor: f64) -> f64 {
    let divisor = measure(divisor);
    if divisor == 0.0 {
        return 0.0;
    }
    measure(volume_cbm) * CM3_PER_CBM / divisor
}

/// Sea freight weight expressed in revenue CBM.
pub fn sea_weight_equivalent_cbm(weight_kg: f64) -> f64 {
    measure(weight_kg) / SEA_KG_PER_CBM
}

/// Road freight volume expressed in kg at the given density.
pub fn road_weight_equivalent_kg(volume_cbm: f64, density_kg_per_cbm: f64) -> f64 {
    measure(volume_cbm) * measure(density_kg_per_cbm)
}

/// Round to two decimal places (half away from zero).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
