//! Engine error taxonomy
//!
//! Every failure is terminal for the single call that produced it. Nothing in
//! the engine substitutes a zero for an invalid input.

use crate::core_types::ActivityField;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// No calculation branch exists for this subcategory string
    #[error("unknown subcategory: {0:?}")]
    UnknownSubcategory(String),

    /// The catalog has no factor matching subcategory and qualifiers
    #[error("no emission factor found for subcategory {0:?}")]
    FactorNotFound(String),

    /// A field required by the subcategory is absent
    #[error("missing required activity field: {0}")]
    MissingField(ActivityField),

    /// A numeric field is negative, non-finite or out of range
    #[error("invalid value for activity field {field}: {value}")]
    InvalidValue { field: ActivityField, value: f64 },

    /// A catalog row breaks the factor invariants
    #[error("invalid emission factor {name:?}: {reason}")]
    InvalidFactor { name: String, reason: String },

    /// No reference catalog is published for this methodology version
    #[error("unknown methodology version: {0:?}")]
    UnknownMethodology(String),
}
