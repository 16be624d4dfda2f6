use ghg_engine_core::EngineError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// # Design
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait GhgError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> GhgErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `GhgError`: a code plus its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultGhgError {
    code: GhgErrorCode,
    msg: String,
}

impl DefaultGhgError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_result"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: GhgErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a C string that is not valid UTF-8.
    pub fn invalid_string(param_name: &str) -> Self {
        Self {
            code: GhgErrorCode::InvalidString,
            msg: format!("Parameter '{param_name}' is not valid UTF-8"),
        }
    }
}

impl GhgError for DefaultGhgError {
    fn code(&self) -> GhgErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<EngineError> for DefaultGhgError {
    fn from(error: EngineError) -> Self {
        let code = match error {
            EngineError::UnknownSubcategory(_) => GhgErrorCode::UnknownSubcategory,
            EngineError::FactorNotFound(_) => GhgErrorCode::FactorNotFound,
            EngineError::MissingField(_) => GhgErrorCode::MissingField,
            EngineError::InvalidValue { .. } => GhgErrorCode::InvalidValue,
            EngineError::InvalidFactor { .. } => GhgErrorCode::InvalidFactor,
            EngineError::UnknownMethodology(_) => GhgErrorCode::UnknownMethodology,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

/// FFI error codes returned by engine functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhgErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A C string argument was not valid UTF-8.
    InvalidString = 2,

    /// Subcategory text names no calculation branch.
    UnknownSubcategory = 3,

    /// No catalog factor matches subcategory, species and system.
    FactorNotFound = 4,

    /// The activity lacks the quantity its subcategory requires.
    MissingField = 5,

    /// An activity value is negative, non-finite or out of range.
    InvalidValue = 6,

    /// The resolved emission factor violates a factor invariant.
    InvalidFactor = 7,

    /// No reference catalog is published for the requested methodology version.
    UnknownMethodology = 8,
}

impl From<DefaultGhgError> for GhgErrorCode {
    fn from(error: DefaultGhgError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is kept here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, GhgErrorCode)> = const { RefCell::new((None, GhgErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, GhgErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, GhgErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded or no call has been made yet.
///
/// # Thread Safety
/// Error state is per-thread; each thread sees only its own failures.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// GhgEmissionResult result;
/// GhgErrorCode err = ghg_calculate_emissions(engine, "Cultivo de Arroz", &activity, &result);
/// if (err != Ok) {
///     const char* error = ghg_get_last_error();
///     if (error) {
///         fprintf(stderr, "Calculation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn ghg_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
#[no_mangle]
pub extern "C" fn ghg_get_last_error_code() -> GhgErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
