//! Caller-supplied activity data
//!
//! Numeric fields are optional so that an absent value can be told apart from
//! a zero. The validator rejects missing required fields instead of assuming 0.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric activity fields, named by their wire (camelCase) names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityField {
    /// Head of livestock
    AnimalCount,
    /// Harvested rice area (ha)
    CultivatedArea,
    /// Nitrogen applied to soils (kg N)
    NitrogenAmount,
    /// Crop residue burned (t dry matter)
    ResidueAmount,
    /// Combustion efficiency of residue burning (%)
    BurningEfficiencyPercent,
    /// Limestone or dolomite applied (t)
    LimestoneAmount,
    /// Urea applied (t)
    UreaAmount,
}

impl ActivityField {
    pub const ALL: [ActivityField; 7] = [
        ActivityField::AnimalCount,
        ActivityField::CultivatedArea,
        ActivityField::NitrogenAmount,
        ActivityField::ResidueAmount,
        ActivityField::BurningEfficiencyPercent,
        ActivityField::LimestoneAmount,
        ActivityField::UreaAmount,
    ];

    /// Field name as it appears in serialized activity payloads
    pub fn wire_name(self) -> &'static str {
        match self {
            ActivityField::AnimalCount => "animalCount",
            ActivityField::CultivatedArea => "cultivatedArea",
            ActivityField::NitrogenAmount => "nitrogenAmount",
            ActivityField::ResidueAmount => "residueAmount",
            ActivityField::BurningEfficiencyPercent => "burningEfficiencyPercent",
            ActivityField::LimestoneAmount => "limestoneAmount",
            ActivityField::UreaAmount => "ureaAmount",
        }
    }
}

impl fmt::Display for ActivityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Activity payload for a single calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultivated_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nitrogen_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residue_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burning_efficiency_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limestone_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urea_amount: Option<f64>,

    // Qualifiers used to pick a factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manure_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rice_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fertilizer_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limestone_type: Option<String>,
}

impl ActivityData {
    /// Empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a numeric field
    pub fn get(&self, field: ActivityField) -> Option<f64> {
        match field {
            ActivityField::AnimalCount => self.animal_count,
            ActivityField::CultivatedArea => self.cultivated_area,
            ActivityField::NitrogenAmount => self.nitrogen_amount,
            ActivityField::ResidueAmount => self.residue_amount,
            ActivityField::BurningEfficiencyPercent => self.burning_efficiency_percent,
            ActivityField::LimestoneAmount => self.limestone_amount,
            ActivityField::UreaAmount => self.urea_amount,
        }
    }

    /// Write a numeric field
    pub fn set(&mut self, field: ActivityField, value: Option<f64>) {
        let slot = match field {
            ActivityField::AnimalCount => &mut self.animal_count,
            ActivityField::CultivatedArea => &mut self.cultivated_area,
            ActivityField::NitrogenAmount => &mut self.nitrogen_amount,
            ActivityField::ResidueAmount => &mut self.residue_amount,
            ActivityField::BurningEfficiencyPercent => &mut self.burning_efficiency_percent,
            ActivityField::LimestoneAmount => &mut self.limestone_amount,
            ActivityField::UreaAmount => &mut self.urea_amount,
        };
        *slot = value;
    }

    /// Builder-style numeric setter
    pub fn with(mut self, field: ActivityField, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Builder-style species qualifier
    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    /// Every numeric field that is present, in `ActivityField::ALL` order
    pub fn present_fields(&self) -> impl Iterator<Item = (ActivityField, f64)> + '_ {
        ActivityField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }
}

/// Blank qualifiers are treated as absent
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
