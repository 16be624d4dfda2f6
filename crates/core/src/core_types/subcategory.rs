//! Agriculture subcategories: the dispatch key of the calculator
//!
//! Catalog rows and callers name subcategories by free text (Portuguese labels,
//! English equivalents, unaccented spellings). Parsing maps every known alias to
//! one variant so that a typo fails as `UnknownSubcategory` instead of quietly
//! resolving nothing.

use crate::core_types::activity::{non_blank, ActivityData, ActivityField};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a branch turns `quantity × factor` into tonnes of gas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MassConversion {
    /// Factor is in kg gas per activity unit: divide by 1000
    KilogramsToTonnes,
    /// Factor is already t gas per activity unit: use as is
    #[default]
    Direct,
}

impl MassConversion {
    /// Divisor applied to `quantity × factor`
    pub fn divisor(self) -> f64 {
        match self {
            MassConversion::KilogramsToTonnes => 1000.0,
            MassConversion::Direct => 1.0,
        }
    }
}

/// Calculation branches of the agriculture engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subcategory {
    #[serde(rename = "Fermentação Entérica")]
    EntericFermentation,
    #[serde(rename = "Manejo de Dejetos")]
    ManureManagement,
    #[serde(rename = "Cultivo de Arroz")]
    RiceCultivation,
    #[serde(rename = "Solos Agrícolas")]
    AgriculturalSoils,
    #[serde(rename = "Queima de Resíduos Agrícolas")]
    ResidueBurning,
    #[serde(rename = "Calagem")]
    Liming,
    #[serde(rename = "Aplicação de Ureia")]
    UreaApplication,
}

/// Species/system qualifiers extracted from an activity payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qualifiers<'a> {
    pub species: Option<&'a str>,
    pub system: Option<&'a str>,
}

impl Subcategory {
    pub const ALL: [Subcategory; 7] = [
        Subcategory::EntericFermentation,
        Subcategory::ManureManagement,
        Subcategory::RiceCultivation,
        Subcategory::AgriculturalSoils,
        Subcategory::ResidueBurning,
        Subcategory::Liming,
        Subcategory::UreaApplication,
    ];

    /// Canonical label used by the reference catalog
    pub fn label(self) -> &'static str {
        match self {
            Subcategory::EntericFermentation => "Fermentação Entérica",
            Subcategory::ManureManagement => "Manejo de Dejetos",
            Subcategory::RiceCultivation => "Cultivo de Arroz",
            Subcategory::AgriculturalSoils => "Solos Agrícolas",
            Subcategory::ResidueBurning => "Queima de Resíduos Agrícolas",
            Subcategory::Liming => "Calagem",
            Subcategory::UreaApplication => "Aplicação de Ureia",
        }
    }

    /// Other spellings accepted for this subcategory (matched lowercase)
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Subcategory::EntericFermentation => &[
                "fermentacao enterica",
                "enteric fermentation",
            ],
            Subcategory::ManureManagement => &[
                "manejo de dejetos animais",
                "manejo de esterco",
                "manure management",
            ],
            Subcategory::RiceCultivation => &[
                "cultivo de arroz irrigado",
                "rice cultivation",
            ],
            Subcategory::AgriculturalSoils => &[
                "solos agricolas",
                "solos manejados",
                "agricultural soils",
                "managed soils",
            ],
            Subcategory::ResidueBurning => &[
                "queima de residuos agricolas",
                "queima de resíduos",
                "queima de residuos",
                "residue burning",
                "field burning of agricultural residues",
            ],
            Subcategory::Liming => &["liming", "calcário", "calcario"],
            Subcategory::UreaApplication => &[
                "aplicacao de ureia",
                "aplicação de uréia",
                "fertilização com ureia",
                "urea application",
                "urea fertilization",
            ],
        }
    }

    /// Field that must be present for this branch to compute anything
    pub fn required_field(self) -> ActivityField {
        match self {
            Subcategory::EntericFermentation | Subcategory::ManureManagement => {
                ActivityField::AnimalCount
            }
            Subcategory::RiceCultivation => ActivityField::CultivatedArea,
            Subcategory::AgriculturalSoils => ActivityField::NitrogenAmount,
            Subcategory::ResidueBurning => ActivityField::ResidueAmount,
            Subcategory::Liming => ActivityField::LimestoneAmount,
            Subcategory::UreaApplication => ActivityField::UreaAmount,
        }
    }

    /// Liming and urea CO2 factors are applied without the kg→t division
    pub fn is_carbonate_source(self) -> bool {
        matches!(self, Subcategory::Liming | Subcategory::UreaApplication)
    }

    /// Conversion for this branch, given the one configured for carbonate sources
    pub fn mass_conversion(self, carbonate: MassConversion) -> MassConversion {
        if self.is_carbonate_source() {
            carbonate
        } else {
            MassConversion::KilogramsToTonnes
        }
    }

    /// Pick the species/system qualifiers this branch resolves factors with
    pub fn qualifiers(self, activity: &ActivityData) -> Qualifiers<'_> {
        match self {
            Subcategory::EntericFermentation => Qualifiers {
                species: non_blank(activity.species.as_deref()),
                system: None,
            },
            Subcategory::ManureManagement => Qualifiers {
                species: non_blank(activity.species.as_deref()),
                system: non_blank(activity.manure_system.as_deref()),
            },
            Subcategory::RiceCultivation => Qualifiers {
                species: None,
                system: non_blank(activity.rice_type.as_deref()),
            },
            Subcategory::AgriculturalSoils => Qualifiers {
                species: None,
                system: non_blank(activity.fertilizer_type.as_deref()),
            },
            Subcategory::ResidueBurning => Qualifiers {
                species: non_blank(activity.crop_type.as_deref()),
                system: None,
            },
            Subcategory::Liming => Qualifiers {
                species: None,
                system: non_blank(activity.limestone_type.as_deref()),
            },
            Subcategory::UreaApplication => Qualifiers::default(),
        }
    }
}

impl FromStr for Subcategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Subcategory::ALL
            .into_iter()
            .find(|sub| sub.label().to_lowercase() == needle || sub.aliases().contains(&needle.as_str()))
            .ok_or_else(|| EngineError::UnknownSubcategory(s.to_string()))
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_labels_case_insensitive() {
        for sub in Subcategory::ALL {
            assert_eq!(sub.label().parse::<Subcategory>().unwrap(), sub);
            assert_eq!(sub.label().to_uppercase().parse::<Subcategory>().unwrap(), sub);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "Enteric Fermentation".parse::<Subcategory>().unwrap(),
            Subcategory::EntericFermentation
        );
        assert_eq!(
            "  queima de residuos ".parse::<Subcategory>().unwrap(),
            Subcategory::ResidueBurning
        );
        assert_eq!(
            "Solos Manejados".parse::<Subcategory>().unwrap(),
            Subcategory::AgriculturalSoils
        );
    }

    #[test]
    fn test_aliases_are_lowercase() {
        for sub in Subcategory::ALL {
            for alias in sub.aliases() {
                assert_eq!(*alias, alias.to_lowercase(), "{sub}: {alias}");
            }
        }
    }

    #[test]
    fn test_unknown_subcategory() {
        let err = "Fermentacao Enterca".parse::<Subcategory>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownSubcategory(s) if s == "Fermentacao Enterca"));
    }

    #[test]
    fn test_carbonate_conversion_is_configurable() {
        assert_eq!(
            Subcategory::Liming.mass_conversion(MassConversion::Direct),
            MassConversion::Direct
        );
        assert_eq!(
            Subcategory::UreaApplication.mass_conversion(MassConversion::KilogramsToTonnes),
            MassConversion::KilogramsToTonnes
        );
        assert_eq!(
            Subcategory::ResidueBurning.mass_conversion(MassConversion::Direct),
            MassConversion::KilogramsToTonnes
        );
    }

    #[test]
    fn test_qualifiers_per_branch() {
        let activity = ActivityData {
            species: Some("Bovinos de Leite".into()),
            manure_system: Some("Pastagem".into()),
            crop_type: Some("Cana-de-açúcar".into()),
            ..ActivityData::default()
        };
        let manure = Subcategory::ManureManagement.qualifiers(&activity);
        assert_eq!(manure.species, Some("Bovinos de Leite"));
        assert_eq!(manure.system, Some("Pastagem"));

        let burning = Subcategory::ResidueBurning.qualifiers(&activity);
        assert_eq!(burning.species, Some("Cana-de-açúcar"));
        assert_eq!(burning.system, None);

        assert_eq!(
            Subcategory::UreaApplication.qualifiers(&activity),
            Qualifiers::default()
        );
    }
}
