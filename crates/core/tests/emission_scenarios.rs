//! Emission Scenario Validation
//!
//! End-to-end checks of the engine against hand-computed inventory scenarios
//! using the reference catalog (GHG Protocol Brasil 2025.0.1).
//!
//! # Test Categories
//! 1. Worked scenarios (enteric, urea, residue burning, soils)
//! 2. Factor resolution order
//! 3. Input rejection
//!
//! # References
//! - IPCC (2006) Guidelines Vol. 4, Chapters 2, 5, 10, 11
//! - IPCC (2007) AR4 WG1 Table 2.14 (GWP CH4 = 25, N2O = 298)
//!
//! Run tests with: `cargo test --test emission_scenarios`

use approx::assert_relative_eq;
use ghg_engine_core::{
    ActivityData, ActivityField, EmissionEngine, EngineConfig, EngineError, MassConversion,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 1: WORKED SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════════

/// 1000 dairy cattle at 128 kg CH4/head
/// Expected: 128 t CH4 → 3200 t CO2e, all fossil
#[test]
fn test_enteric_fermentation_dairy_cattle() {
    let engine = EmissionEngine::default();
    let activity = ActivityData::new()
        .with(ActivityField::AnimalCount, 1000.0)
        .with_species("Bovinos de Leite");

    let result = engine
        .calculate_emissions("Fermentação Entérica", &activity)
        .unwrap();

    assert_eq!(*result.raw_ch4, 128.0);
    assert_eq!(*result.fossil_co2e, 3200.0);
    assert_eq!(*result.biogenic_co2e, 0.0);
    assert_eq!(*result.total_co2e, 3200.0);
    assert_eq!(result.calculation_details.ch4_factor, Some(128.0));
    assert_eq!(result.calculation_details.gwp.ch4, 25.0);
}

/// 10 t urea at 0.733 t CO2/t, fossil carbon
/// Expected: 7.33 t CO2 with no kg→t division
#[test]
fn test_urea_application() {
    let engine = EmissionEngine::default();
    let activity = ActivityData::new().with(ActivityField::UreaAmount, 10.0);

    let result = engine
        .calculate_emissions("Aplicação de Ureia", &activity)
        .unwrap();

    assert_relative_eq!(*result.raw_co2, 7.33, epsilon = 1e-12);
    assert_relative_eq!(*result.fossil_co2e, 7.33, epsilon = 1e-12);
    assert_eq!(*result.biogenic_co2e, 0.0);
    assert_relative_eq!(*result.total_co2e, 7.33, epsilon = 1e-12);
}

/// Same urea batch with carbonate CO2 switched to the uniform kg→t rule
#[test]
fn test_urea_application_uniform_conversion() {
    let engine = EmissionEngine::new(EngineConfig {
        carbonate_co2_conversion: MassConversion::KilogramsToTonnes,
        ..EngineConfig::default()
    })
    .unwrap();
    let activity = ActivityData::new().with(ActivityField::UreaAmount, 10.0);

    let result = engine
        .calculate_emissions("Aplicação de Ureia", &activity)
        .unwrap();

    assert_relative_eq!(*result.raw_co2, 0.007, epsilon = 1e-12);
    assert_eq!(
        result.calculation_details.mass_conversion,
        MassConversion::KilogramsToTonnes
    );
}

/// 100 t sugarcane residue, default 90% combustion efficiency
/// CO2 = 136.35 t (biogenic), CH4 = 0.243 t, N2O = 0.0063 t
/// fossil CO2e = 0.243 × 25 + 0.0063 × 298 = 7.9524 → 7.952
#[test]
fn test_sugarcane_residue_burning() {
    let engine = EmissionEngine::default();
    let activity = ActivityData {
        residue_amount: Some(100.0),
        crop_type: Some("Cana-de-açúcar".to_string()),
        ..ActivityData::default()
    };

    let result = engine
        .calculate_emissions("Queima de Resíduos Agrícolas", &activity)
        .unwrap();

    assert_relative_eq!(*result.raw_co2, 136.35, epsilon = 1e-9);
    assert_relative_eq!(*result.raw_ch4, 0.243, epsilon = 1e-9);
    assert_relative_eq!(*result.biogenic_co2e, 136.35, epsilon = 1e-9);
    assert_relative_eq!(*result.fossil_co2e, 7.952, epsilon = 1e-9);
    assert_relative_eq!(*result.total_co2e, 144.302, epsilon = 1e-9);

    let contributions = result.calculation_details.contributions;
    assert_eq!(*contributions.fossil_co2, 0.0);
    assert_relative_eq!(*contributions.ch4_co2e, 6.075, epsilon = 1e-9);
    assert_relative_eq!(*contributions.n2o_co2e, 1.877, epsilon = 1e-9);
}

/// 20 t dolomite at 0.477 t CO2/t
#[test]
fn test_liming_dolomite() {
    let engine = EmissionEngine::default();
    let activity = ActivityData {
        limestone_amount: Some(20.0),
        limestone_type: Some("Calcário Dolomítico".to_string()),
        ..ActivityData::default()
    };

    let result = engine.calculate_emissions("Calagem", &activity).unwrap();

    assert_relative_eq!(*result.raw_co2, 9.54, epsilon = 1e-9);
    assert_relative_eq!(*result.total_co2e, 9.54, epsilon = 1e-9);
}

/// 10 t synthetic N (10 000 kg N) at EF1 = 0.01
/// N2O = 10000 × 0.01 × 44/28 / 1000 = 0.157 t → 46.829 t CO2e
#[test]
fn test_synthetic_fertilizer_on_soils() {
    let engine = EmissionEngine::default();
    let activity = ActivityData {
        nitrogen_amount: Some(10_000.0),
        fertilizer_type: Some("Fertilizante Sintético".to_string()),
        ..ActivityData::default()
    };

    let result = engine
        .calculate_emissions("Solos Agrícolas", &activity)
        .unwrap();

    assert_relative_eq!(*result.raw_n2o, 0.157, epsilon = 1e-9);
    assert_relative_eq!(*result.fossil_co2e, 46.829, epsilon = 1e-9);
}

/// 1000 kg N deposited by grazing cattle at EF3PRP = 0.02
/// N2O = 1000 × 0.02 × 44/28 / 1000 = 0.0314 t → 9.366 t CO2e
#[test]
fn test_pasture_deposits_on_soils() {
    let engine = EmissionEngine::default();
    let activity = ActivityData {
        nitrogen_amount: Some(1000.0),
        fertilizer_type: Some("Urina e Esterco em Pastagem".to_string()),
        ..ActivityData::default()
    };

    let result = engine
        .calculate_emissions("Solos Agrícolas", &activity)
        .unwrap();

    assert_eq!(
        result.calculation_details.factor_name,
        "Solos agrícolas - Urina e esterco em pastagem (bovinos)"
    );
    assert_eq!(result.calculation_details.n2o_factor, Some(0.02));
    assert_relative_eq!(*result.raw_n2o, 0.031, epsilon = 1e-9);
    assert_relative_eq!(*result.fossil_co2e, 9.366, epsilon = 1e-9);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 2: FACTOR RESOLUTION ORDER
// ═══════════════════════════════════════════════════════════════════════════════

/// Dairy row is declared before beef: both a dairy query and a broad query pick it
#[test]
fn test_dairy_row_resolves_before_beef() {
    let engine = EmissionEngine::default();

    let dairy = engine
        .resolve_factor("Fermentação Entérica", Some("Bovinos de Leite"), None)
        .unwrap();
    assert!(dairy
        .applicable_species
        .as_ref()
        .unwrap()
        .iter()
        .any(|s| s == "Bovinos de Leite"));

    let broad = engine
        .resolve_factor("fermentação entérica", None, None)
        .unwrap();
    assert_eq!(broad.name, dairy.name);

    let beef = engine
        .resolve_factor("FERMENTAÇÃO ENTÉRICA", Some("Bovinos de Corte"), None)
        .unwrap();
    assert_ne!(beef.name, dairy.name);
}

/// Rice regime qualifier selects the water-management row
#[test]
fn test_rice_regime_selects_factor() {
    let engine = EmissionEngine::default();
    let activity = ActivityData {
        cultivated_area: Some(10.0),
        rice_type: Some("Inundação Intermitente".to_string()),
        ..ActivityData::default()
    };

    let result = engine
        .calculate_emissions("Cultivo de Arroz", &activity)
        .unwrap();

    assert_eq!(
        result.calculation_details.factor_name,
        "Cultivo de arroz - Inundação intermitente"
    );
    assert_relative_eq!(*result.raw_ch4, 0.811, epsilon = 1e-9);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 3: INPUT REJECTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Empty rice payload must fail, never yield a zero result
#[test]
fn test_rice_without_area_is_rejected() {
    let engine = EmissionEngine::default();
    let err = engine
        .calculate_emissions("Cultivo de Arroz", &ActivityData::new())
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::MissingField(ActivityField::CultivatedArea)
    );
}

#[test]
fn test_negative_animal_count_is_rejected() {
    let engine = EmissionEngine::default();
    let activity = ActivityData::new().with(ActivityField::AnimalCount, -5.0);
    assert!(matches!(
        engine.calculate_emissions("Fermentação Entérica", &activity),
        Err(EngineError::InvalidValue {
            field: ActivityField::AnimalCount,
            ..
        })
    ));
}

#[test]
fn test_unknown_species_has_no_factor() {
    let engine = EmissionEngine::default();
    let activity = ActivityData::new()
        .with(ActivityField::AnimalCount, 10.0)
        .with_species("Avestruzes");
    assert_eq!(
        engine
            .calculate_emissions("Fermentação Entérica", &activity)
            .unwrap_err(),
        EngineError::FactorNotFound("Fermentação Entérica".to_string())
    );
}

#[test]
fn test_typo_in_subcategory_is_unknown() {
    let engine = EmissionEngine::default();
    let activity = ActivityData::new().with(ActivityField::UreaAmount, 1.0);
    assert!(matches!(
        engine.calculate_emissions("Aplicacao de Urea", &activity),
        Err(EngineError::UnknownSubcategory(_))
    ));
}

/// Finite quantities whose weighted emissions overflow f64 are out of range
#[test]
fn test_overflowing_quantities_are_rejected() {
    let engine = EmissionEngine::default();

    let residue = ActivityData {
        residue_amount: Some(1e306),
        crop_type: Some("Cana-de-açúcar".to_string()),
        ..ActivityData::default()
    };
    assert_eq!(
        engine
            .calculate_emissions("Queima de Resíduos Agrícolas", &residue)
            .unwrap_err(),
        EngineError::InvalidValue {
            field: ActivityField::ResidueAmount,
            value: 1e306
        }
    );

    let herd = ActivityData::new()
        .with(ActivityField::AnimalCount, 1e307)
        .with_species("Bovinos de Leite");
    assert_eq!(
        engine
            .calculate_emissions("Fermentação Entérica", &herd)
            .unwrap_err(),
        EngineError::InvalidValue {
            field: ActivityField::AnimalCount,
            value: 1e307
        }
    );
}
