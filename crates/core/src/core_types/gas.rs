//! Greenhouse gases and their global warming potentials
//!
//! # Scientific References
//! - IPCC (2007). Fourth Assessment Report (AR4), WG1 Chapter 2, Table 2.14
//!   (100-year GWP: CH4 = 25, N2O = 298)
//! - GHG Protocol Brasil (2025). Especificações do Programa Brasileiro GHG Protocol

use serde::{Deserialize, Serialize};
use std::fmt;

/// Molar mass ratio N2O / N2 (44/28), converts N2O-N to N2O
pub const N2O_N_TO_N2O: f64 = 44.0 / 28.0;

/// Gases reported by the agriculture engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gas {
    /// Carbon dioxide
    #[serde(rename = "CO2")]
    Co2,
    /// Methane
    #[serde(rename = "CH4")]
    Ch4,
    /// Nitrous oxide
    #[serde(rename = "N2O")]
    N2o,
}

impl Gas {
    /// Chemical formula
    pub fn formula(self) -> &'static str {
        match self {
            Gas::Co2 => "CO2",
            Gas::Ch4 => "CH4",
            Gas::N2o => "N2O",
        }
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formula())
    }
}

/// 100-year global warming potentials applied to raw gas masses
///
/// Fixed to AR4 values: the published methodology version pins them, so they
/// are not part of the engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gwp {
    pub co2: f64,
    pub ch4: f64,
    pub n2o: f64,
}

impl Gwp {
    /// IPCC AR4, 100-year horizon
    pub const AR4: Gwp = Gwp {
        co2: 1.0,
        ch4: 25.0,
        n2o: 298.0,
    };

    /// GWP for a single gas
    pub fn of(&self, gas: Gas) -> f64 {
        match gas {
            Gas::Co2 => self.co2,
            Gas::Ch4 => self.ch4,
            Gas::N2o => self.n2o,
        }
    }
}

/// Methodology a catalog (and every result computed from it) is published under
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Methodology {
    pub name: String,
    pub version: String,
}

impl Methodology {
    /// Programa Brasileiro GHG Protocol, 2025 edition
    pub fn ghg_protocol_brasil_2025() -> Self {
        Self {
            name: "GHG Protocol Brasil".to_string(),
            version: "2025.0.1".to_string(),
        }
    }
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
