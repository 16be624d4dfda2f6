//! Inventory batches: many independent activity records in one call
//!
//! Records are computed in parallel and reported in input order. A failing
//! record is reported next to the others; it never aborts the batch.

use crate::core_types::{ActivityData, Subcategory, Tonnes};
use crate::engine::{EmissionEngine, EmissionResult};
use crate::error::EngineError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::info;

/// One line of an activity inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub subcategory: String,
    #[serde(flatten)]
    pub activity: ActivityData,
}

fn error_message<S: Serializer>(error: &EngineError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Result of one record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RecordOutcome {
    Calculated {
        id: Option<String>,
        result: EmissionResult,
    },
    Failed {
        id: Option<String>,
        subcategory: String,
        #[serde(serialize_with = "error_message")]
        error: EngineError,
    },
}

impl RecordOutcome {
    pub fn result(&self) -> Option<&EmissionResult> {
        match self {
            RecordOutcome::Calculated { result, .. } => Some(result),
            RecordOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&EngineError> {
        match self {
            RecordOutcome::Calculated { .. } => None,
            RecordOutcome::Failed { error, .. } => Some(error),
        }
    }
}

/// Summed gas masses and CO2e of a set of results
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionTotals {
    pub record_count: usize,
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
}

impl EmissionTotals {
    fn add(&mut self, result: &EmissionResult) {
        self.record_count += 1;
        self.raw_co2 += result.raw_co2;
        self.raw_ch4 += result.raw_ch4;
        self.raw_n2o += result.raw_n2o;
        self.fossil_co2e += result.fossil_co2e;
        self.biogenic_co2e += result.biogenic_co2e;
    }

    /// Drop float noise from the sums and re-derive the total from its parts
    fn finish(mut self) -> Self {
        for value in [
            &mut self.raw_co2,
            &mut self.raw_ch4,
            &mut self.raw_n2o,
            &mut self.fossil_co2e,
            &mut self.biogenic_co2e,
        ] {
            *value = value.rounded();
        }
        self.total_co2e = self.fossil_co2e + self.biogenic_co2e;
        self
    }
}

/// Per-record outcomes plus grand and per-subcategory totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub outcomes: Vec<RecordOutcome>,
    pub totals: EmissionTotals,
    pub by_subcategory: BTreeMap<Subcategory, EmissionTotals>,
    pub failed_count: usize,
}

impl InventoryReport {
    fn from_outcomes(outcomes: Vec<RecordOutcome>) -> Self {
        let mut totals = EmissionTotals::default();
        let mut by_subcategory: BTreeMap<Subcategory, EmissionTotals> = BTreeMap::new();
        let mut failed_count = 0;

        for outcome in &outcomes {
            match outcome.result() {
                Some(result) => {
                    totals.add(result);
                    by_subcategory
                        .entry(result.calculation_details.subcategory)
                        .or_default()
                        .add(result);
                }
                None => failed_count += 1,
            }
        }

        Self {
            outcomes,
            totals: totals.finish(),
            by_subcategory: by_subcategory
                .into_iter()
                .map(|(sub, t)| (sub, t.finish()))
                .collect(),
            failed_count,
        }
    }
}

impl EmissionEngine {
    /// Calculate a single inventory record.
    pub fn calculate_record(&self, record: &ActivityRecord) -> RecordOutcome {
        match self.calculate_emissions(&record.subcategory, &record.activity) {
            Ok(result) => RecordOutcome::Calculated {
                id: record.id.clone(),
                result,
            },
            Err(error) => RecordOutcome::Failed {
                id: record.id.clone(),
                subcategory: record.subcategory.clone(),
                error,
            },
        }
    }

    /// Calculate every record of an inventory in parallel.
    pub fn calculate_inventory(&self, records: &[ActivityRecord]) -> InventoryReport {
        let outcomes: Vec<RecordOutcome> = records
            .par_iter()
            .map(|record| self.calculate_record(record))
            .collect();

        let report = InventoryReport::from_outcomes(outcomes);
        info!(
            "Calculated inventory of {} records ({} failed): {:.3} t CO2e",
            records.len(),
            report.failed_count,
            *report.totals.total_co2e
        );
        report
    }
}
