//! Reference agriculture factors, GHG Protocol Brasil 2025.0.1
//!
//! Tier 1 defaults, declared in resolution order: within a subcategory the
//! first row whose qualifiers admit a query wins, so broader rows must come
//! after the specific ones they would otherwise shadow.
//!
//! # Scientific References
//! - IPCC (2006). Guidelines for National GHG Inventories, Vol. 4 (AFOLU):
//!   Table 10.10/10.11 (enteric CH4), Tables 10.14-10.16 and 10.21 (manure),
//!   Table 5.11-5.13 (rice), Table 11.1 (direct N2O, EF1/EF3PRP),
//!   Table 2.5 (residue burning, g/kg dry matter), Eq. 11.12-11.13 (liming, urea)
//! - MCTI (2020). Quarta Comunicação Nacional do Brasil, Agropecuária

use crate::core_types::{EmissionFactor, Fraction, Subcategory};

pub(crate) const CATEGORY: &str = "Agricultura";
pub(crate) const SOURCE: &str = "IPCC 2006 / GHG Protocol Brasil";

/// Static row, turned into an owned `EmissionFactor` when the catalog is built
struct FactorRow {
    name: &'static str,
    subcategory: Subcategory,
    co2: Option<f64>,
    ch4: Option<f64>,
    n2o: Option<f64>,
    unit: &'static str,
    biogenic: f64,
    species: &'static [&'static str],
    systems: &'static [&'static str],
    uncertainty: &'static str,
}

impl FactorRow {
    fn to_factor(&self) -> EmissionFactor {
        let labels = |list: &[&str]| {
            (!list.is_empty()).then(|| list.iter().map(ToString::to_string).collect())
        };
        EmissionFactor {
            name: self.name.to_string(),
            category: CATEGORY.to_string(),
            subcategory: self.subcategory.label().to_string(),
            source: SOURCE.to_string(),
            co2_factor: self.co2,
            ch4_factor: self.ch4,
            n2o_factor: self.n2o,
            activity_unit: self.unit.to_string(),
            biogenic_fraction: Fraction::new(self.biogenic),
            applicable_species: labels(self.species),
            applicable_systems: labels(self.systems),
            uncertainty_range: Some(self.uncertainty.to_string()),
        }
    }
}

const HEAD: &str = "cabeças";

const ENTERIC: Subcategory = Subcategory::EntericFermentation;
const MANURE: Subcategory = Subcategory::ManureManagement;
const RICE: Subcategory = Subcategory::RiceCultivation;
const SOILS: Subcategory = Subcategory::AgriculturalSoils;
const BURNING: Subcategory = Subcategory::ResidueBurning;
const LIMING: Subcategory = Subcategory::Liming;
const UREA: Subcategory = Subcategory::UreaApplication;

// Residue burning, IPCC Table 2.5 agricultural residues (kg per t dry matter)
const RESIDUE_CO2: Option<f64> = Some(1515.0);
const RESIDUE_CH4: Option<f64> = Some(2.7);
const RESIDUE_N2O: Option<f64> = Some(0.07);

const ROWS: &[FactorRow] = &[
    // ═══════════════════════════════════════════════════════════════════
    // ENTERIC FERMENTATION (kg CH4 / head / year)
    // ═══════════════════════════════════════════════════════════════════
    FactorRow {
        name: "Fermentação entérica - Bovinos de leite",
        subcategory: ENTERIC,
        co2: None,
        ch4: Some(128.0),
        n2o: None,
        unit: HEAD,
        biogenic: 0.0,
        species: &["Bovinos de Leite", "Vacas Leiteiras"],
        systems: &[],
        uncertainty: "±20%",
    },
    FactorRow {
        name: "Fermentação entérica - Bovinos de corte",
        subcategory: ENTERIC,
        co2: None,
        ch4: Some(56.0),
        n2o: None,
        unit: HEAD,
        biogenic: 0.0,
        species: &["Bovinos de Corte", "Gado de Corte"],
        systems: &[],
        uncertainty: "±20%",
    },
    FactorRow {
        name: "Fermentação entérica - Bubalinos",
        subcategory: ENTERIC,
        co2: None,
        ch4: Some(55.0),
        n2o: None,
        unit: HEAD,
        biogenic: 0.0,
        species: &["Bubalinos", "Búfalos"],
        systems: &[],
        uncertainty: "±30-50%",
    },
    FactorRow {
        name: "Fermentação entérica - Ovinos",
        subcategory: ENTERIC,
        co2: None,
        ch4: Some(5.0),
        n2o: None,
        unit: HEAD,
        biogenic: 0.0,
        species: &["Ovinos"],
        systems: &[],
        uncertainty: "±30-50%",
    },
    FactorRow {
        name: "Fermentação entérica - Caprinos",
        subcategory: ENTERIC,
        co2: None,
        ch4: Some(5.0),
        n2o: None,
        unit: HEAD,
        biogenic: 0.0,
        species: &["Caprinos"],
        systems: &[],
        uncertainty: "±30-50%",
    },
    FactorRow {
        name: "Fermentação entérica - Equinos",
        subcategory: ENTERIC,
        co2: None,
        ch4: Some(18.0),
        n2o: None,
        unit: HEAD,
        biogenic: 0.0,
        species: &["Equinos"],
        systems: &[],
        uncertainty: "±30-50%",
    },
    FactorRow {
        name: "Fermentação entérica - Muares e asininos",
        subcategory: ENTERIC,
        co2: None,
        ch4: Some(10.0),
        n2o: None,
        unit: HEAD,
        biogenic: 0.0,
        species: &["Muares", "Asininos"],
        systems: &[],
        uncertainty: "±30-50%",
    },
    FactorRow {
        name: "Fermentação entérica - Suínos",
        subcategory: ENTERIC,
        co2: None,
        ch4: Some(1.0),
        n2o: None,
        unit: HEAD,
        biogenic: 0.0,
        species: &["Suínos"],
        systems: &[],
        uncertainty: "±30-50%",
    },
    // ═══════════════════════════════════════════════════════════════════
    // MANURE MANAGEMENT (kg CH4 and kg N2O / head / year)
    // ═══════════════════════════════════════════════════════════════════
    FactorRow {
        name: "Manejo de dejetos - Bovinos de leite em lagoa anaeróbica",
        subcategory: MANURE,
        co2: None,
        ch4: Some(22.0),
        n2o: Some(0.0),
        unit: HEAD,
        biogenic: 0.0,
        species: &["Bovinos de Leite", "Vacas Leiteiras"],
        systems: &["Lagoa Anaeróbica", "Sistema Líquido"],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Manejo de dejetos - Bovinos de leite em armazenamento sólido",
        subcategory: MANURE,
        co2: None,
        ch4: Some(2.0),
        n2o: Some(0.55),
        unit: HEAD,
        biogenic: 0.0,
        species: &["Bovinos de Leite", "Vacas Leiteiras"],
        systems: &["Armazenamento Sólido", "Esterqueira"],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Manejo de dejetos - Bovinos de leite em pastagem",
        subcategory: MANURE,
        co2: None,
        ch4: Some(1.0),
        n2o: Some(1.1),
        unit: HEAD,
        biogenic: 0.0,
        species: &["Bovinos de Leite", "Vacas Leiteiras"],
        systems: &["Pastagem", "Pasto"],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Manejo de dejetos - Bovinos de corte em pastagem",
        subcategory: MANURE,
        co2: None,
        ch4: Some(1.0),
        n2o: Some(0.88),
        unit: HEAD,
        biogenic: 0.0,
        species: &["Bovinos de Corte", "Gado de Corte"],
        systems: &["Pastagem", "Pasto"],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Manejo de dejetos - Bovinos de corte em confinamento",
        subcategory: MANURE,
        co2: None,
        ch4: Some(1.5),
        n2o: Some(0.44),
        unit: HEAD,
        biogenic: 0.0,
        species: &["Bovinos de Corte", "Gado de Corte"],
        systems: &["Confinamento", "Lote Seco"],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Manejo de dejetos - Suínos em lagoa anaeróbica",
        subcategory: MANURE,
        co2: None,
        ch4: Some(10.0),
        n2o: Some(0.0),
        unit: HEAD,
        biogenic: 0.0,
        species: &["Suínos"],
        systems: &["Lagoa Anaeróbica", "Sistema Líquido"],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Manejo de dejetos - Suínos em cama sobreposta",
        subcategory: MANURE,
        co2: None,
        ch4: Some(3.0),
        n2o: Some(0.16),
        unit: HEAD,
        biogenic: 0.0,
        species: &["Suínos"],
        systems: &["Cama Sobreposta", "Compostagem"],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Manejo de dejetos - Aves em cama de aviário",
        subcategory: MANURE,
        co2: None,
        ch4: Some(0.02),
        n2o: Some(0.001),
        unit: HEAD,
        biogenic: 0.0,
        species: &["Aves", "Frangos de Corte", "Galinhas Poedeiras"],
        systems: &["Cama de Aviário"],
        uncertainty: "±50%",
    },
    FactorRow {
        name: "Manejo de dejetos - Pequenos ruminantes em pastagem",
        subcategory: MANURE,
        co2: None,
        ch4: Some(0.15),
        n2o: Some(0.13),
        unit: HEAD,
        biogenic: 0.0,
        species: &["Ovinos", "Caprinos"],
        systems: &["Pastagem", "Pasto"],
        uncertainty: "±50%",
    },
    // ═══════════════════════════════════════════════════════════════════
    // RICE CULTIVATION (kg CH4 / ha / season)
    // Baseline 1.30 kg CH4/ha/day × 120 days, scaled by water regime
    // ═══════════════════════════════════════════════════════════════════
    FactorRow {
        name: "Cultivo de arroz - Inundação contínua",
        subcategory: RICE,
        co2: None,
        ch4: Some(156.0),
        n2o: None,
        unit: "ha",
        biogenic: 0.0,
        species: &[],
        systems: &["Irrigado por Inundação Contínua", "Inundação Contínua"],
        uncertainty: "±40%",
    },
    FactorRow {
        name: "Cultivo de arroz - Inundação intermitente",
        subcategory: RICE,
        co2: None,
        ch4: Some(81.12),
        n2o: None,
        unit: "ha",
        biogenic: 0.0,
        species: &[],
        systems: &["Inundação Intermitente", "Intermitente"],
        uncertainty: "±40%",
    },
    FactorRow {
        name: "Cultivo de arroz - Sequeiro",
        subcategory: RICE,
        co2: None,
        ch4: Some(0.0),
        n2o: None,
        unit: "ha",
        biogenic: 0.0,
        species: &[],
        systems: &["Sequeiro", "Terras Altas"],
        uncertainty: "n/a",
    },
    // ═══════════════════════════════════════════════════════════════════
    // AGRICULTURAL SOILS, direct N2O (kg N2O-N / kg N)
    // ═══════════════════════════════════════════════════════════════════
    FactorRow {
        name: "Solos agrícolas - Fertilizantes nitrogenados sintéticos",
        subcategory: SOILS,
        co2: None,
        ch4: None,
        n2o: Some(0.01),
        unit: "kg N",
        biogenic: 0.0,
        species: &[],
        systems: &["Fertilizante Sintético", "Fertilizante Nitrogenado", "Sintético"],
        uncertainty: "0.003-0.03",
    },
    // Ahead of the organic row: its "Esterco" label is contained in this one
    FactorRow {
        name: "Solos agrícolas - Urina e esterco em pastagem (bovinos)",
        subcategory: SOILS,
        co2: None,
        ch4: None,
        n2o: Some(0.02),
        unit: "kg N",
        biogenic: 0.0,
        species: &[],
        systems: &["Urina e Esterco em Pastagem"],
        uncertainty: "0.007-0.06",
    },
    FactorRow {
        name: "Solos agrícolas - Adubos orgânicos",
        subcategory: SOILS,
        co2: None,
        ch4: None,
        n2o: Some(0.01),
        unit: "kg N",
        biogenic: 0.0,
        species: &[],
        systems: &["Adubo Orgânico", "Esterco", "Dejetos"],
        uncertainty: "0.003-0.03",
    },
    FactorRow {
        name: "Solos agrícolas - Resíduos de colheita",
        subcategory: SOILS,
        co2: None,
        ch4: None,
        n2o: Some(0.01),
        unit: "kg N",
        biogenic: 0.0,
        species: &[],
        systems: &["Resíduos de Colheita", "Resíduos Culturais"],
        uncertainty: "0.003-0.03",
    },
    // ═══════════════════════════════════════════════════════════════════
    // RESIDUE BURNING (kg gas / t dry matter burned), fully biogenic CO2
    // ═══════════════════════════════════════════════════════════════════
    FactorRow {
        name: "Queima de resíduos - Cana-de-açúcar",
        subcategory: BURNING,
        co2: RESIDUE_CO2,
        ch4: RESIDUE_CH4,
        n2o: RESIDUE_N2O,
        unit: "t",
        biogenic: 1.0,
        species: &["Cana-de-açúcar", "Cana"],
        systems: &[],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Queima de resíduos - Milho",
        subcategory: BURNING,
        co2: RESIDUE_CO2,
        ch4: RESIDUE_CH4,
        n2o: RESIDUE_N2O,
        unit: "t",
        biogenic: 1.0,
        species: &["Milho"],
        systems: &[],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Queima de resíduos - Arroz",
        subcategory: BURNING,
        co2: RESIDUE_CO2,
        ch4: RESIDUE_CH4,
        n2o: RESIDUE_N2O,
        unit: "t",
        biogenic: 1.0,
        species: &["Arroz"],
        systems: &[],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Queima de resíduos - Trigo",
        subcategory: BURNING,
        co2: RESIDUE_CO2,
        ch4: RESIDUE_CH4,
        n2o: RESIDUE_N2O,
        unit: "t",
        biogenic: 1.0,
        species: &["Trigo"],
        systems: &[],
        uncertainty: "±30%",
    },
    FactorRow {
        name: "Queima de resíduos - Algodão",
        subcategory: BURNING,
        co2: RESIDUE_CO2,
        ch4: RESIDUE_CH4,
        n2o: RESIDUE_N2O,
        unit: "t",
        biogenic: 1.0,
        species: &["Algodão"],
        systems: &[],
        uncertainty: "±30%",
    },
    // ═══════════════════════════════════════════════════════════════════
    // LIMING AND UREA (t CO2 / t applied), fossil carbonate carbon
    // ═══════════════════════════════════════════════════════════════════
    FactorRow {
        name: "Calagem - Calcário calcítico",
        subcategory: LIMING,
        co2: Some(0.44),
        ch4: None,
        n2o: None,
        unit: "t",
        biogenic: 0.0,
        species: &[],
        systems: &["Calcário Calcítico", "Calcítico", "CaCO3"],
        uncertainty: "-50%",
    },
    FactorRow {
        name: "Calagem - Calcário dolomítico",
        subcategory: LIMING,
        co2: Some(0.477),
        ch4: None,
        n2o: None,
        unit: "t",
        biogenic: 0.0,
        species: &[],
        systems: &["Calcário Dolomítico", "Dolomita", "CaMg(CO3)2"],
        uncertainty: "-50%",
    },
    FactorRow {
        name: "Aplicação de ureia",
        subcategory: UREA,
        co2: Some(0.733),
        ch4: None,
        n2o: None,
        unit: "t",
        biogenic: 0.0,
        species: &[],
        systems: &[],
        uncertainty: "-50%",
    },
];

/// Reference rows in declaration order, paired with their typed subcategory
pub(crate) fn reference_factors() -> Vec<(Subcategory, EmissionFactor)> {
    ROWS.iter()
        .map(|row| (row.subcategory, row.to_factor()))
        .collect()
}
