use crate::error::{with_last_error_mut, DefaultGhgError, GhgError, GhgErrorCode};
use crate::instance::GhgEngineInstance;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl GhgError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl GhgError) -> GhgErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the outcome of a fallible call: clear the error state on success,
/// store the error on failure.
pub(crate) fn track_result<T>(result: Result<T, DefaultGhgError>) -> Result<T, GhgErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = GhgErrorCode::Ok;
    });
}

/// Borrow a required UTF-8 C string argument.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn required_str<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<&'a str, DefaultGhgError> {
    // SAFETY: forwarded from the caller's contract.
    let value = unsafe { optional_str(ptr, param_name) }?;
    value.ok_or_else(|| DefaultGhgError::null_pointer(param_name))
}

/// Borrow an optional UTF-8 C string argument; null maps to `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn optional_str<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<Option<&'a str>, DefaultGhgError> {
    if ptr.is_null() {
        return Ok(None);
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    let cstr = unsafe { CStr::from_ptr(ptr) };
    cstr.to_str()
        .map(Some)
        .map_err(|_| DefaultGhgError::invalid_string(param_name))
}

/// Borrow the engine instance behind a handle.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ghg_engine_new`.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const GhgEngineInstance,
) -> Result<&'a GhgEngineInstance, DefaultGhgError> {
    // SAFETY: non-null pointers come from `Box::into_raw` in `ghg_engine_new`.
    let instance = unsafe { ptr.as_ref() };
    instance.ok_or_else(|| DefaultGhgError::null_pointer("engine"))
}

/// Copy `text` into a caller buffer of `len` bytes, truncating and always
/// NUL-terminating. Returns the full byte length of `text`.
///
/// # Safety
/// `buf` must be null or valid for `len` bytes of writes.
pub(crate) unsafe fn copy_to_buffer(text: &str, buf: *mut c_char, len: usize) -> usize {
    if !buf.is_null() && len > 0 {
        let n = text.len().min(len - 1);
        // SAFETY: `n + 1 <= len` bytes are written into a buffer valid for `len`.
        unsafe {
            std::ptr::copy_nonoverlapping(text.as_ptr().cast::<c_char>(), buf, n);
            *buf.add(n) = 0;
        }
    }
    text.len()
}
