pub mod api_entry;

use crate::common::error::UtilError;

use std::ffi::CStr;

use libc::c_char;

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for `'a`.
pub unsafe fn from_c_str<'a>(ptr: *const c_char) -> Result<&'a str, UtilError> {
    if ptr.is_null() {
        return Err(UtilError::InvalidInput("Null string pointer".into()));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|e| UtilError::InvalidInput(format!("String is not UTF-8: {e}")))
}
