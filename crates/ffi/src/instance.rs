use ghg_engine_core::{EmissionEngine, EngineConfig, MassConversion};
use std::os::raw::c_char;
use std::ptr;

use crate::error::{DefaultGhgError, GhgErrorCode};
use crate::helpers::{optional_str, track_error, track_result};

/// How liming and urea CO2 factors are applied to the activity mass.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhgMassConversion {
    /// `mass × factor` (reference behavior).
    Direct = 0,
    /// `mass × factor / 1000`, as for every other subcategory.
    KilogramsToTonnes = 1,
}

impl From<GhgMassConversion> for MassConversion {
    fn from(conversion: GhgMassConversion) -> Self {
        match conversion {
            GhgMassConversion::Direct => MassConversion::Direct,
            GhgMassConversion::KilogramsToTonnes => MassConversion::KilogramsToTonnes,
        }
    }
}

/// An emission engine bound to one methodology catalog.
///
/// # Thread Safety
/// The engine holds no mutable state. One instance may be used from any
/// number of threads at once without locking.
pub struct GhgEngineInstance {
    pub(crate) engine: EmissionEngine,
}

impl GhgEngineInstance {
    pub(crate) fn new(config: EngineConfig) -> Result<Box<Self>, DefaultGhgError> {
        let engine = EmissionEngine::new(config)?;
        Ok(Box::new(Self { engine }))
    }
}

/// Create an engine and return it via out-parameter.
///
/// Parameters
/// - `methodology_version`: version of the reference catalog (e.g. `"2025.0.1"`),
///   or null for the current one.
/// - `carbonate_conversion`: mass conversion for liming and urea CO2.
/// - `out_instance`: receives the engine on success, null on failure.
///
/// Returns
/// - `GhgErrorCode::Ok` (0) on success
/// - `GhgErrorCode::NullPointer` if `out_instance` is null
/// - `GhgErrorCode::InvalidString` if `methodology_version` is not UTF-8
/// - `GhgErrorCode::UnknownMethodology` if no catalog exists for the version
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - `methodology_version` must be null or a NUL-terminated string.
/// - The caller owns the returned instance and MUST call `ghg_engine_destroy`
///   exactly once.
///
/// Example (C)
/// ```c
/// GhgEngineInstance* engine = NULL;
/// if (ghg_engine_new(NULL, Direct, &engine) != Ok) {
///     fprintf(stderr, "%s\n", ghg_get_last_error());
///     return;
/// }
/// // ... use engine ...
/// ghg_engine_destroy(engine);
/// ```
#[no_mangle]
pub unsafe extern "C" fn ghg_engine_new(
    methodology_version: *const c_char,
    carbonate_conversion: GhgMassConversion,
    out_instance: *mut *mut GhgEngineInstance,
) -> GhgErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultGhgError::null_pointer("out_instance"));
    }

    // SAFETY: `methodology_version` is null or NUL-terminated per the contract above.
    let built = unsafe { optional_str(methodology_version, "methodology_version") }.and_then(
        |version| {
            let defaults = EngineConfig::default();
            GhgEngineInstance::new(EngineConfig {
                methodology_version: version.map_or(defaults.methodology_version, str::to_string),
                carbonate_co2_conversion: carbonate_conversion.into(),
            })
        },
    );

    match track_result(built) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            GhgErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroy an engine created by `ghg_engine_new`. Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `ghg_engine_new` and not freed already.
/// - The caller must not use the pointer again afterwards.
#[no_mangle]
pub unsafe extern "C" fn ghg_engine_destroy(ptr: *mut GhgEngineInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `ghg_engine_new` and is
    // released exactly once.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
