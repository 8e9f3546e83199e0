//! Commercial parameter loading: file, then environment overrides, then validation.

use std::path::Path;

use anyhow::Context;

use freightdesk_cargo::CommercialParameters;

pub const AIR_DIVISOR_ENV: &str = "FREIGHTDESK_AIR_DIVISOR";
pub const COURIER_DIVISOR_ENV: &str = "FREIGHTDESK_COURIER_DIVISOR";
pub const SEA_MIN_LCL_CBM_ENV: &str = "FREIGHTDESK_SEA_MIN_LCL_CBM";
pub const ROAD_DENSITY_ENV: &str = "FREIGHTDESK_ROAD_DENSITY";

/// Load parameters from `path` (defaults when `None`) and the process environment.
pub fn load_parameters(path: Option<&Path>) -> anyhow::Result<CommercialParameters> {
    load_parameters_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_parameters`] with an explicit environment lookup.
pub fn load_parameters_with<F>(path: Option<&Path>, env: F) -> anyhow::Result<CommercialParameters>
where
    F: Fn(&str) -> Option<String>,
{
    let mut params = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading parameters from {}", path.display()))?;
            serde_json::from_str::<CommercialParameters>(&raw)
                .with_context(|| format!("parsing parameters in {}", path.display()))?
        }
        None => CommercialParameters::default(),
    };

    apply_env_overrides(&mut params, env);
    params.validate().context("invalid commercial parameters")?;
    Ok(params)
}

/// Override individual fields from the environment. Unparseable values are
/// logged and ignored.
pub fn apply_env_overrides<F>(params: &mut CommercialParameters, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let fields: [(&str, &mut f64); 4] = [
        (AIR_DIVISOR_ENV, &mut params.air_volumetric_divisor),
        (COURIER_DIVISOR_ENV, &mut params.courier_volumetric_divisor),
        (SEA_MIN_LCL_CBM_ENV, &mut params.sea_min_lcl_cbm),
        (ROAD_DENSITY_ENV, &mut params.road_density_kg_per_cbm),
    ];

    for (key, slot) in fields {
        let Some(raw) = env(key) else {
            continue;
        };
        match raw.trim().parse::<f64>() {
            Ok(value) => {
                tracing::info!(key, value, "commercial parameter overridden from environment");
                *slot = value;
            }
            Err(err) => {
                tracing::warn!(
                    key,
                    raw = %raw,
                    error = %err,
                    "ignoring unparseable parameter override"
                );
            }
        }
    }
}
