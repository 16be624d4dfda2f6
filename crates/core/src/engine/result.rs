use crate::core_types::{ActivityField, Fraction, Gwp, MassConversion, Subcategory, Tonnes};
use serde::{Deserialize, Serialize};

/// Outcome of one emission calculation
///
/// Gas masses and CO2e figures are in tonnes, rounded to 3 decimal places.
/// `total_co2e` is exactly `fossil_co2e + biogenic_co2e`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionResult {
    #[serde(rename = "rawCO2")]
    pub raw_co2: Tonnes,
    #[serde(rename = "rawCH4")]
    pub raw_ch4: Tonnes,
    #[serde(rename = "rawN2O")]
    pub raw_n2o: Tonnes,
    #[serde(rename = "fossilCO2e")]
    pub fossil_co2e: Tonnes,
    #[serde(rename = "biogenicCO2e")]
    pub biogenic_co2e: Tonnes,
    #[serde(rename = "totalCO2e")]
    pub total_co2e: Tonnes,
    pub calculation_details: CalculationDetails,
}

/// Audit trail of a calculation: which factor, which constants, which inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDetails {
    pub subcategory: Subcategory,
    pub methodology: String,
    pub gwp: Gwp,

    // Factor used
    pub factor_name: String,
    pub factor_source: String,
    #[serde(rename = "co2Factor")]
    pub co2_factor: Option<f64>,
    #[serde(rename = "ch4Factor")]
    pub ch4_factor: Option<f64>,
    #[serde(rename = "n2oFactor")]
    pub n2o_factor: Option<f64>,
    pub biogenic_fraction: Fraction,

    // Activity
    pub activity_field: ActivityField,
    pub activity_quantity: f64,
    pub activity_unit: String,

    // Branch-specific conversions
    pub mass_conversion: MassConversion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burning_efficiency: Option<Fraction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nitrogen_conversion: Option<f64>,

    pub contributions: GasContributions,
}

/// CO2e contribution of each gas, rounded to 3 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasContributions {
    #[serde(rename = "fossilCO2")]
    pub fossil_co2: Tonnes,
    #[serde(rename = "biogenicCO2")]
    pub biogenic_co2: Tonnes,
    #[serde(rename = "ch4CO2e")]
    pub ch4_co2e: Tonnes,
    #[serde(rename = "n2oCO2e")]
    pub n2o_co2e: Tonnes,
}
