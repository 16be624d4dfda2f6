//! Activity payload validation
//!
//! A payload is accepted only when the subcategory's required field is present
//! and every numeric field that is present is finite and non-negative.

use crate::core_types::{ActivityData, ActivityField, Subcategory};
use crate::error::EngineError;

/// Validate `activity` for `subcategory`, returning the activity quantity.
pub fn validate(subcategory: Subcategory, activity: &ActivityData) -> Result<f64, EngineError> {
    let required = subcategory.required_field();
    let quantity = activity
        .get(required)
        .ok_or(EngineError::MissingField(required))?;

    for (field, value) in activity.present_fields() {
        check_value(field, value)?;
    }

    Ok(quantity)
}

fn check_value(field: ActivityField, value: f64) -> Result<(), EngineError> {
    let in_range = match field {
        ActivityField::BurningEfficiencyPercent => (0.0..=100.0).contains(&value),
        _ => value.is_finite() && value >= 0.0,
    };
    if in_range {
        Ok(())
    } else {
        Err(EngineError::InvalidValue { field, value })
    }
}
