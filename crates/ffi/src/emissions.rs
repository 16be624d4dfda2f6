use ghg_engine_core::{ActivityData, EmissionFactor, EmissionResult};
use std::os::raw::c_char;

use crate::error::{DefaultGhgError, GhgErrorCode};
use crate::helpers::{
    copy_to_buffer, instance_from_ptr, optional_str, required_str, track_error, track_result,
};
use crate::instance::GhgEngineInstance;

/// Activity payload. Numeric fields set to NaN are treated as absent;
/// qualifier strings may be null.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GhgActivity {
    pub animal_count: f64,
    pub cultivated_area: f64,
    pub nitrogen_amount: f64,
    pub residue_amount: f64,
    pub burning_efficiency_percent: f64,
    pub limestone_amount: f64,
    pub urea_amount: f64,
    pub species: *const c_char,
    pub manure_system: *const c_char,
    pub rice_type: *const c_char,
    pub fertilizer_type: *const c_char,
    pub crop_type: *const c_char,
    pub limestone_type: *const c_char,
}

fn present(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

impl GhgActivity {
    /// Copy into an owned `ActivityData`.
    ///
    /// # Safety
    /// Every non-null qualifier pointer must be a NUL-terminated string.
    unsafe fn to_activity_data(&self) -> Result<ActivityData, DefaultGhgError> {
        let owned = |ptr: *const c_char, name: &str| {
            // SAFETY: forwarded from this function's contract.
            unsafe { optional_str(ptr, name) }.map(|s| s.map(str::to_string))
        };
        Ok(ActivityData {
            animal_count: present(self.animal_count),
            cultivated_area: present(self.cultivated_area),
            nitrogen_amount: present(self.nitrogen_amount),
            residue_amount: present(self.residue_amount),
            burning_efficiency_percent: present(self.burning_efficiency_percent),
            limestone_amount: present(self.limestone_amount),
            urea_amount: present(self.urea_amount),
            species: owned(self.species, "species")?,
            manure_system: owned(self.manure_system, "manure_system")?,
            rice_type: owned(self.rice_type, "rice_type")?,
            fertilizer_type: owned(self.fertilizer_type, "fertilizer_type")?,
            crop_type: owned(self.crop_type, "crop_type")?,
            limestone_type: owned(self.limestone_type, "limestone_type")?,
        })
    }
}

/// Gas masses and CO2e totals in tonnes, rounded to 3 decimals.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GhgEmissionResult {
    pub raw_co2: f64,
    pub raw_ch4: f64,
    pub raw_n2o: f64,
    pub fossil_co2e: f64,
    pub biogenic_co2e: f64,
    pub total_co2e: f64,
}

impl From<&EmissionResult> for GhgEmissionResult {
    fn from(result: &EmissionResult) -> Self {
        Self {
            raw_co2: *result.raw_co2,
            raw_ch4: *result.raw_ch4,
            raw_n2o: *result.raw_n2o,
            fossil_co2e: *result.fossil_co2e,
            biogenic_co2e: *result.biogenic_co2e,
            total_co2e: *result.total_co2e,
        }
    }
}

/// Numeric view of a resolved factor. Absent gas factors are NaN.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhgFactorInfo {
    pub co2_factor: f64,
    pub ch4_factor: f64,
    pub n2o_factor: f64,
    pub biogenic_fraction: f64,
}

impl From<&EmissionFactor> for GhgFactorInfo {
    fn from(factor: &EmissionFactor) -> Self {
        Self {
            co2_factor: factor.co2_factor.unwrap_or(f64::NAN),
            ch4_factor: factor.ch4_factor.unwrap_or(f64::NAN),
            n2o_factor: factor.n2o_factor.unwrap_or(f64::NAN),
            biogenic_fraction: *factor.biogenic_fraction,
        }
    }
}

/// Calculate emissions for one activity.
///
/// Returns
/// - `GhgErrorCode::Ok` (0) with `out_result` filled
/// - `NullPointer`, `InvalidString` for bad arguments
/// - `UnknownSubcategory`, `FactorNotFound`, `MissingField`, `InvalidValue`,
///   `InvalidFactor` from the engine
///
/// `out_result` is left untouched on failure; call `ghg_get_last_error()` for details.
///
/// # Safety
/// - `engine` must be a live pointer returned by `ghg_engine_new`.
/// - `subcategory` must be a NUL-terminated string.
/// - `activity` must point to a valid `GhgActivity` whose non-null strings are NUL-terminated.
/// - `out_result` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn ghg_calculate_emissions(
    engine: *const GhgEngineInstance,
    subcategory: *const c_char,
    activity: *const GhgActivity,
    out_result: *mut GhgEmissionResult,
) -> GhgErrorCode {
    if out_result.is_null() {
        return track_error(&DefaultGhgError::null_pointer("out_result"));
    }

    let calculated = (|| {
        // SAFETY: pointer contracts are documented above.
        let instance = unsafe { instance_from_ptr(engine) }?;
        let subcategory = unsafe { required_str(subcategory, "subcategory") }?;
        let activity = unsafe { activity.as_ref() }
            .ok_or_else(|| DefaultGhgError::null_pointer("activity"))?;
        let data = unsafe { activity.to_activity_data() }?;
        let result = instance.engine.calculate_emissions(subcategory, &data)?;
        Ok::<_, DefaultGhgError>(GhgEmissionResult::from(&result))
    })();

    match track_result(calculated) {
        Ok(result) => {
            unsafe {
                *out_result = result;
            }
            GhgErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Resolve the first catalog factor matching subcategory, species and system.
///
/// Parameters
/// - `species`, `system`: optional qualifiers, null when not restricting.
/// - `out_info`: receives the factor's numbers.
/// - `name_buf`, `name_len`: optional buffer for the factor name (NUL-terminated,
///   truncated to fit). Pass null/0 to skip.
/// - `out_name_len`: optional, receives the untruncated name length in bytes.
///
/// # Safety
/// - `engine` must be a live pointer returned by `ghg_engine_new`.
/// - String arguments must be null or NUL-terminated (`subcategory` non-null).
/// - `out_info` must be valid for writes; `name_buf` null or valid for `name_len` bytes.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn ghg_resolve_factor(
    engine: *const GhgEngineInstance,
    subcategory: *const c_char,
    species: *const c_char,
    system: *const c_char,
    out_info: *mut GhgFactorInfo,
    name_buf: *mut c_char,
    name_len: usize,
    out_name_len: *mut usize,
) -> GhgErrorCode {
    if out_info.is_null() {
        return track_error(&DefaultGhgError::null_pointer("out_info"));
    }

    let resolved = (|| {
        // SAFETY: pointer contracts are documented above.
        let instance = unsafe { instance_from_ptr(engine) }?;
        let subcategory = unsafe { required_str(subcategory, "subcategory") }?;
        let species = unsafe { optional_str(species, "species") }?;
        let system = unsafe { optional_str(system, "system") }?;
        let factor = instance
            .engine
            .resolve_factor(subcategory, species, system)?;
        Ok::<_, DefaultGhgError>(factor)
    })();

    match track_result(resolved) {
        Ok(factor) => {
            unsafe {
                *out_info = GhgFactorInfo::from(factor);
                let full_len = copy_to_buffer(&factor.name, name_buf, name_len);
                if !out_name_len.is_null() {
                    *out_name_len = full_len;
                }
            }
            GhgErrorCode::Ok
        }
        Err(code) => code,
    }
}
