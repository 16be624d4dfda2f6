use crate::core_types::{MassConversion, Methodology};
use serde::{Deserialize, Serialize};

/// Engine configuration
///
/// GWP constants are fixed by the methodology version and are not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Methodology version whose reference catalog the engine loads.
    ///
    /// Default: "2025.0.1" (GHG Protocol Brasil)
    pub methodology_version: String,

    /// Conversion applied to liming and urea CO2 (`quantity × co2Factor`).
    ///
    /// Every other branch divides by 1000 (kg → t). The published liming and
    /// urea factors are applied without that division; `KilogramsToTonnes`
    /// switches them to the uniform rule.
    ///
    /// Default: `Direct`
    pub carbonate_co2_conversion: MassConversion,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            methodology_version: Methodology::ghg_protocol_brasil_2025().version,
            carbonate_co2_conversion: MassConversion::Direct,
        }
    }
}
