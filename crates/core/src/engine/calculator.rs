//! Emission calculation per agriculture subcategory
//!
//! Each branch turns `activity quantity × factor` into raw gas masses; a shared
//! post-processing step then splits CO2 into fossil and biogenic parts and
//! weights CH4 and N2O by their AR4 GWPs.
//!
//! # Formulas
//! ```text
//! Enteric fermentation   CH4 = n × EF_CH4 / 1000
//! Manure management      CH4 = n × EF_CH4 / 1000,  N2O = n × EF_N2O / 1000
//! Rice cultivation       CH4 = A × EF_CH4 / 1000
//! Agricultural soils     N2O = N × EF_N2O-N × 44/28 / 1000
//! Residue burning        G   = M × EF_G × Cf / 1000   (G = CO2, CH4, N2O)
//! Liming / urea          CO2 = M × EF_CO2             (no kg→t division)
//!
//! fossil CO2e   = CO2 × (1 - f_bio) + CH4 × 25 + N2O × 298
//! biogenic CO2e = CO2 × f_bio
//! total CO2e    = fossil CO2e + biogenic CO2e
//! ```
//!
//! # References
//! - IPCC (2006). Guidelines Vol. 4, Eq. 10.19, 10.23, 5.1, 11.1, 2.27, 11.12, 11.13
//! - IPCC (2007). AR4 WG1, Table 2.14

use crate::core_types::{
    ActivityData, EmissionFactor, Fraction, Gas, Gwp, MassConversion, Methodology, Percent,
    Subcategory, Tonnes, N2O_N_TO_N2O,
};
use crate::engine::config::EngineConfig;
use crate::engine::result::{CalculationDetails, EmissionResult, GasContributions};
use crate::engine::validator;
use crate::error::EngineError;

/// Combustion efficiency assumed when the caller does not supply one
pub const DEFAULT_BURNING_EFFICIENCY: Fraction = Fraction::new(0.90);

/// Unrounded gas masses produced by a branch
#[derive(Debug, Clone, Copy, Default)]
struct RawGases {
    co2: Tonnes,
    ch4: Tonnes,
    n2o: Tonnes,
}

/// `quantity × factor × scale / divisor`; an absent factor emits nothing.
///
/// The coefficient is formed first so a huge quantity can overflow to +inf
/// but never meets a zero scale as `inf × 0`.
#[inline]
fn gas_mass(quantity: f64, factor: Option<f64>, scale: f64, conversion: MassConversion) -> Tonnes {
    match factor {
        Some(factor) => Tonnes::new(quantity * (factor * scale / conversion.divisor())),
        None => Tonnes::ZERO,
    }
}

fn enteric_fermentation(n: f64, factor: &EmissionFactor, conversion: MassConversion) -> RawGases {
    RawGases {
        ch4: gas_mass(n, factor.ch4_factor, 1.0, conversion),
        ..RawGases::default()
    }
}

fn manure_management(n: f64, factor: &EmissionFactor, conversion: MassConversion) -> RawGases {
    RawGases {
        ch4: gas_mass(n, factor.ch4_factor, 1.0, conversion),
        n2o: gas_mass(n, factor.n2o_factor, 1.0, conversion),
        ..RawGases::default()
    }
}

fn rice_cultivation(area: f64, factor: &EmissionFactor, conversion: MassConversion) -> RawGases {
    RawGases {
        ch4: gas_mass(area, factor.ch4_factor, 1.0, conversion),
        ..RawGases::default()
    }
}

/// N2O-N to N2O by molar mass; no other branch applies 44/28
fn agricultural_soils(nitrogen: f64, factor: &EmissionFactor, conversion: MassConversion) -> RawGases {
    RawGases {
        n2o: gas_mass(nitrogen, factor.n2o_factor, N2O_N_TO_N2O, conversion),
        ..RawGases::default()
    }
}

fn residue_burning(
    residue: f64,
    factor: &EmissionFactor,
    efficiency: Fraction,
    conversion: MassConversion,
) -> RawGases {
    RawGases {
        co2: gas_mass(residue, factor.co2_factor, *efficiency, conversion),
        ch4: gas_mass(residue, factor.ch4_factor, *efficiency, conversion),
        n2o: gas_mass(residue, factor.n2o_factor, *efficiency, conversion),
    }
}

/// Liming and urea. With the default `Direct` conversion the CO2 factor is
/// applied without the /1000 every other branch uses; see `EngineConfig`.
fn carbonate_application(amount: f64, factor: &EmissionFactor, conversion: MassConversion) -> RawGases {
    RawGases {
        co2: gas_mass(amount, factor.co2_factor, 1.0, conversion),
        ..RawGases::default()
    }
}

/// Burning efficiency from the payload, or the 90% default
pub fn burning_efficiency(activity: &ActivityData) -> Fraction {
    activity
        .burning_efficiency_percent
        .and_then(Percent::checked)
        .map_or(DEFAULT_BURNING_EFFICIENCY, Percent::to_fraction)
}

/// Calculate emissions for `activity` with an already-resolved factor.
///
/// Validates the activity payload (and the factor) first; nothing is computed
/// from an incomplete payload. A quantity whose emissions overflow `f64` is
/// reported as `InvalidValue` on the subcategory's activity field.
pub fn calculate_with_factor(
    subcategory: Subcategory,
    factor: &EmissionFactor,
    activity: &ActivityData,
    methodology: &Methodology,
    config: &EngineConfig,
) -> Result<EmissionResult, EngineError> {
    factor.validate()?;
    let quantity = validator::validate(subcategory, activity)?;
    let conversion = subcategory.mass_conversion(config.carbonate_co2_conversion);

    let mut efficiency = None;
    let raw = match subcategory {
        Subcategory::EntericFermentation => enteric_fermentation(quantity, factor, conversion),
        Subcategory::ManureManagement => manure_management(quantity, factor, conversion),
        Subcategory::RiceCultivation => rice_cultivation(quantity, factor, conversion),
        Subcategory::AgriculturalSoils => agricultural_soils(quantity, factor, conversion),
        Subcategory::ResidueBurning => {
            let eff = burning_efficiency(activity);
            efficiency = Some(eff);
            residue_burning(quantity, factor, eff, conversion)
        }
        Subcategory::Liming | Subcategory::UreaApplication => {
            carbonate_application(quantity, factor, conversion)
        }
    };

    // Post-processing shared by every branch
    let gwp = Gwp::AR4;
    let biogenic_co2 = raw.co2 * factor.biogenic_fraction;
    let fossil_co2 = raw.co2 * factor.biogenic_fraction.complement();
    let ch4_co2e = raw.ch4 * gwp.of(Gas::Ch4);
    let n2o_co2e = raw.n2o * gwp.of(Gas::N2o);

    let raw_co2 = raw.co2.rounded();
    let raw_ch4 = raw.ch4.rounded();
    let raw_n2o = raw.n2o.rounded();
    let fossil_co2e = (fossil_co2 + ch4_co2e + n2o_co2e).rounded();
    let biogenic_co2e = biogenic_co2.rounded();
    let total_co2e = fossil_co2e + biogenic_co2e;

    // A quantity that passed validation can still overflow once weighted
    let reported = [raw_co2, raw_ch4, raw_n2o, fossil_co2e, biogenic_co2e, total_co2e];
    if reported.iter().any(|mass| !mass.is_finite()) {
        return Err(EngineError::InvalidValue {
            field: subcategory.required_field(),
            value: quantity,
        });
    }

    Ok(EmissionResult {
        raw_co2,
        raw_ch4,
        raw_n2o,
        fossil_co2e,
        biogenic_co2e,
        total_co2e,
        calculation_details: CalculationDetails {
            subcategory,
            methodology: methodology.to_string(),
            gwp,
            factor_name: factor.name.clone(),
            factor_source: factor.source.clone(),
            co2_factor: factor.co2_factor,
            ch4_factor: factor.ch4_factor,
            n2o_factor: factor.n2o_factor,
            biogenic_fraction: factor.biogenic_fraction,
            activity_field: subcategory.required_field(),
            activity_quantity: quantity,
            activity_unit: factor.activity_unit.clone(),
            mass_conversion: conversion,
            burning_efficiency: efficiency,
            nitrogen_conversion: (subcategory == Subcategory::AgriculturalSoils)
                .then_some(N2O_N_TO_N2O),
            contributions: GasContributions {
                fossil_co2: fossil_co2.rounded(),
                biogenic_co2: biogenic_co2.rounded(),
                ch4_co2e: ch4_co2e.rounded(),
                n2o_co2e: n2o_co2e.rounded(),
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::ActivityField;
    use approx::assert_relative_eq;

    fn factor(
        subcategory: Subcategory,
        co2: Option<f64>,
        ch4: Option<f64>,
        n2o: Option<f64>,
        biogenic: f64,
    ) -> EmissionFactor {
        EmissionFactor {
            name: format!("Teste - {subcategory}"),
            category: "Agricultura".into(),
            subcategory: subcategory.label().into(),
            source: "IPCC 2006".into(),
            co2_factor: co2,
            ch4_factor: ch4,
            n2o_factor: n2o,
            activity_unit: "u".into(),
            biogenic_fraction: Fraction::new(biogenic),
            applicable_species: None,
            applicable_systems: None,
            uncertainty_range: None,
        }
    }

    fn run(
        subcategory: Subcategory,
        factor: &EmissionFactor,
        activity: &ActivityData,
    ) -> Result<EmissionResult, EngineError> {
        calculate_with_factor(
            subcategory,
            factor,
            activity,
            &Methodology::ghg_protocol_brasil_2025(),
            &EngineConfig::default(),
        )
    }

    #[test]
    fn test_enteric_dairy_scenario() {
        let f = factor(Subcategory::EntericFermentation, None, Some(128.0), None, 0.0);
        let activity = ActivityData::new().with(ActivityField::AnimalCount, 1000.0);
        let r = run(Subcategory::EntericFermentation, &f, &activity).unwrap();

        assert_eq!(*r.raw_ch4, 128.0);
        assert_eq!(*r.raw_n2o, 0.0);
        assert_eq!(*r.raw_co2, 0.0);
        assert_eq!(*r.fossil_co2e, 3200.0);
        assert_eq!(*r.biogenic_co2e, 0.0);
        assert_eq!(*r.total_co2e, 3200.0);
    }

    #[test]
    fn test_manure_emits_ch4_and_n2o() {
        let f = factor(Subcategory::ManureManagement, None, Some(2.0), Some(0.5), 0.0);
        let activity = ActivityData::new().with(ActivityField::AnimalCount, 200.0);
        let r = run(Subcategory::ManureManagement, &f, &activity).unwrap();

        assert_relative_eq!(*r.raw_ch4, 0.4, epsilon = 1e-12);
        assert_relative_eq!(*r.raw_n2o, 0.1, epsilon = 1e-12);
        // 0.4 × 25 + 0.1 × 298
        assert_relative_eq!(*r.fossil_co2e, 39.8, epsilon = 1e-9);
    }

    #[test]
    fn test_rice_divides_by_thousand() {
        let f = factor(Subcategory::RiceCultivation, None, Some(156.0), None, 0.0);
        let activity = ActivityData::new().with(ActivityField::CultivatedArea, 50.0);
        let r = run(Subcategory::RiceCultivation, &f, &activity).unwrap();
        assert_relative_eq!(*r.raw_ch4, 7.8, epsilon = 1e-12);
        assert_relative_eq!(*r.total_co2e, 195.0, epsilon = 1e-9);
    }

    #[test]
    fn test_soils_apply_nitrogen_molar_ratio() {
        let f = factor(Subcategory::AgriculturalSoils, None, None, Some(0.01), 0.0);
        let activity = ActivityData::new().with(ActivityField::NitrogenAmount, 28_000.0);
        let r = run(Subcategory::AgriculturalSoils, &f, &activity).unwrap();

        // 28000 kg N × 0.01 × 44/28 = 440 kg N2O
        assert_relative_eq!(*r.raw_n2o, 0.44, epsilon = 1e-12);
        assert_relative_eq!(*r.fossil_co2e, 131.12, epsilon = 1e-9);
        assert_eq!(
            r.calculation_details.nitrogen_conversion,
            Some(N2O_N_TO_N2O)
        );
    }

    #[test]
    fn test_nitrogen_ratio_only_on_soils() {
        let f = factor(Subcategory::ManureManagement, None, None, Some(0.01), 0.0);
        let activity = ActivityData::new().with(ActivityField::AnimalCount, 28_000.0);
        let r = run(Subcategory::ManureManagement, &f, &activity).unwrap();
        assert_relative_eq!(*r.raw_n2o, 0.28, epsilon = 1e-12);
        assert_eq!(r.calculation_details.nitrogen_conversion, None);
    }

    #[test]
    fn test_residue_burning_sugarcane_scenario() {
        let f = factor(
            Subcategory::ResidueBurning,
            Some(1515.0),
            Some(2.7),
            Some(0.07),
            1.0,
        );
        let activity = ActivityData::new().with(ActivityField::ResidueAmount, 100.0);
        let r = run(Subcategory::ResidueBurning, &f, &activity).unwrap();

        assert_relative_eq!(*r.raw_co2, 136.35, epsilon = 1e-9);
        assert_relative_eq!(*r.raw_ch4, 0.243, epsilon = 1e-9);
        assert_relative_eq!(*r.raw_n2o, 0.006, epsilon = 1e-9);
        assert_relative_eq!(*r.biogenic_co2e, 136.35, epsilon = 1e-9);
        assert_relative_eq!(*r.fossil_co2e, 7.952, epsilon = 1e-9);
        assert_relative_eq!(*r.total_co2e, 144.302, epsilon = 1e-9);
        assert_eq!(
            r.calculation_details.burning_efficiency,
            Some(DEFAULT_BURNING_EFFICIENCY)
        );
        assert_eq!(*r.calculation_details.contributions.fossil_co2, 0.0);
    }

    #[test]
    fn test_residue_burning_explicit_efficiency() {
        let f = factor(Subcategory::ResidueBurning, Some(1515.0), None, None, 1.0);
        let activity = ActivityData::new()
            .with(ActivityField::ResidueAmount, 100.0)
            .with(ActivityField::BurningEfficiencyPercent, 50.0);
        let r = run(Subcategory::ResidueBurning, &f, &activity).unwrap();
        assert_relative_eq!(*r.raw_co2, 75.75, epsilon = 1e-9);
    }

    #[test]
    fn test_urea_scenario_has_no_kilogram_division() {
        let f = factor(Subcategory::UreaApplication, Some(0.733), None, None, 0.0);
        let activity = ActivityData::new().with(ActivityField::UreaAmount, 10.0);
        let r = run(Subcategory::UreaApplication, &f, &activity).unwrap();

        assert_relative_eq!(*r.raw_co2, 7.33, epsilon = 1e-12);
        assert_relative_eq!(*r.fossil_co2e, 7.33, epsilon = 1e-12);
        assert_eq!(*r.biogenic_co2e, 0.0);
        assert_relative_eq!(*r.total_co2e, 7.33, epsilon = 1e-12);
        assert_eq!(r.calculation_details.mass_conversion, MassConversion::Direct);
    }

    #[test]
    fn test_carbonate_conversion_switch() {
        let f = factor(Subcategory::Liming, Some(0.44), None, None, 0.0);
        let activity = ActivityData::new().with(ActivityField::LimestoneAmount, 1000.0);
        let config = EngineConfig {
            carbonate_co2_conversion: MassConversion::KilogramsToTonnes,
            ..EngineConfig::default()
        };
        let r = calculate_with_factor(
            Subcategory::Liming,
            &f,
            &activity,
            &Methodology::ghg_protocol_brasil_2025(),
            &config,
        )
        .unwrap();
        assert_relative_eq!(*r.raw_co2, 0.44, epsilon = 1e-12);

        let direct = run(Subcategory::Liming, &f, &activity).unwrap();
        assert_relative_eq!(*direct.raw_co2, 440.0, epsilon = 1e-9);
    }

    #[test]
    fn test_partial_biogenic_split() {
        let f = factor(Subcategory::ResidueBurning, Some(1000.0), None, None, 0.25);
        let activity = ActivityData::new()
            .with(ActivityField::ResidueAmount, 1.0)
            .with(ActivityField::BurningEfficiencyPercent, 100.0);
        let r = run(Subcategory::ResidueBurning, &f, &activity).unwrap();
        assert_relative_eq!(*r.biogenic_co2e, 0.25, epsilon = 1e-12);
        assert_relative_eq!(*r.fossil_co2e, 0.75, epsilon = 1e-12);
        assert_eq!(*r.total_co2e, *r.fossil_co2e + *r.biogenic_co2e);
    }

    #[test]
    fn test_missing_field_is_not_zero() {
        let f = factor(Subcategory::RiceCultivation, None, Some(156.0), None, 0.0);
        let err = run(Subcategory::RiceCultivation, &f, &ActivityData::new()).unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingField(ActivityField::CultivatedArea)
        );
    }

    #[test]
    fn test_invalid_factor_is_rejected() {
        let f = factor(Subcategory::RiceCultivation, None, Some(-1.0), None, 0.0);
        let activity = ActivityData::new().with(ActivityField::CultivatedArea, 1.0);
        assert!(matches!(
            run(Subcategory::RiceCultivation, &f, &activity),
            Err(EngineError::InvalidFactor { .. })
        ));
    }

    #[test]
    fn test_overflowing_quantity_is_out_of_range() {
        let f = factor(
            Subcategory::ResidueBurning,
            Some(1515.0),
            Some(2.7),
            Some(0.07),
            1.0,
        );
        let activity = ActivityData::new().with(ActivityField::ResidueAmount, 1e306);
        assert_eq!(
            run(Subcategory::ResidueBurning, &f, &activity),
            Err(EngineError::InvalidValue {
                field: ActivityField::ResidueAmount,
                value: 1e306
            })
        );

        let f = factor(Subcategory::EntericFermentation, None, Some(128.0), None, 0.0);
        let activity = ActivityData::new().with(ActivityField::AnimalCount, 1e307);
        assert_eq!(
            run(Subcategory::EntericFermentation, &f, &activity),
            Err(EngineError::InvalidValue {
                field: ActivityField::AnimalCount,
                value: 1e307
            })
        );
    }

    #[test]
    fn test_huge_residue_without_combustion_emits_nothing() {
        let f = factor(Subcategory::ResidueBurning, Some(1515.0), None, None, 1.0);
        let activity = ActivityData::new()
            .with(ActivityField::ResidueAmount, f64::MAX)
            .with(ActivityField::BurningEfficiencyPercent, 0.0);
        let r = run(Subcategory::ResidueBurning, &f, &activity).unwrap();
        assert_eq!(*r.raw_co2, 0.0);
        assert_eq!(*r.total_co2e, 0.0);
    }

    #[test]
    fn test_large_finite_result_is_kept() {
        let f = factor(Subcategory::EntericFermentation, None, Some(128.0), None, 0.0);
        let activity = ActivityData::new().with(ActivityField::AnimalCount, 1e12);
        let r = run(Subcategory::EntericFermentation, &f, &activity).unwrap();
        assert_relative_eq!(*r.raw_ch4, 1.28e11, max_relative = 1e-12);
        assert_eq!(*r.total_co2e, *r.fossil_co2e + *r.biogenic_co2e);
    }

    #[test]
    fn test_absent_gas_factor_emits_nothing() {
        let f = factor(Subcategory::ManureManagement, None, Some(1.0), None, 0.0);
        let activity = ActivityData::new().with(ActivityField::AnimalCount, 10.0);
        let r = run(Subcategory::ManureManagement, &f, &activity).unwrap();
        assert_eq!(*r.raw_n2o, 0.0);
        assert_eq!(*r.calculation_details.contributions.n2o_co2e, 0.0);
    }
}
