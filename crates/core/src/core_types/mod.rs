//! Core types and utilities

pub mod activity;
pub mod factor;
pub mod gas;
pub mod subcategory;
pub mod units;

// Re-export
pub use activity::{ActivityData, ActivityField};
pub use factor::EmissionFactor;
pub use gas::{Gas, Gwp, Methodology, N2O_N_TO_N2O};
pub use subcategory::{MassConversion, Qualifiers, Subcategory};
pub use units::{round3, Fraction, Percent, Tonnes};
