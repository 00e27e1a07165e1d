//! Author: [Seclususs](https://github.com/seclususs)
//!
//! C ABI surface. Integer returns follow the native convention: `0` on
//! success and `-1` on failure, unless documented otherwise. Every string
//! argument must be null or a valid NUL-terminated UTF-8 string; null and
//! non-UTF-8 input is rejected with a logged error.

use crate::bindings::from_c_str;
use crate::common::error::UtilError;
use crate::common::logging;
use crate::controllers::{android_impl, preload_impl, process_impl};
use crate::hal::filesystem;
use crate::hal::sched::SchedDescriptor;

use libc::c_char;

fn status_code(result: Result<(), UtilError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

fn count_code(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

macro_rules! c_args {
    ($($name:ident),+ ; $fail:expr) => {
        $(
            let $name = match unsafe { from_c_str($name) } {
                Ok(s) => s,
                Err(e) => {
                    log::error!("FFI: {}: {}", stringify!($name), e);
                    return $fail;
                }
            };
        )+
    };
}

#[unsafe(no_mangle)]
pub extern "C" fn droid_init_logging() {
    logging::init();
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_find_process_id(name: *const c_char) -> i32 {
    c_args!(name; -1);
    process_impl::find_process_id(name)
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_find_thread_id(
    process_name: *const c_char,
    thread_name: *const c_char,
) -> i32 {
    c_args!(process_name, thread_name; -1);
    process_impl::find_thread_id(process_name, thread_name)
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_renice_process(name: *const c_char, priority: i32) -> i32 {
    c_args!(name; -1);
    status_code(process_impl::renice_process(name, priority))
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_renice_thread(
    process_name: *const c_char,
    thread_name: *const c_char,
    priority: i32,
) -> i32 {
    c_args!(process_name, thread_name; -1);
    status_code(process_impl::renice_thread(process_name, thread_name, priority))
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_set_process_affinity(
    name: *const c_char,
    start: i32,
    end: i32,
) -> i32 {
    c_args!(name; -1);
    status_code(process_impl::set_process_affinity(name, start, end))
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_set_thread_affinity(
    process_name: *const c_char,
    thread_name: *const c_char,
    start: i32,
    end: i32,
) -> i32 {
    c_args!(process_name, thread_name; -1);
    status_code(process_impl::set_thread_affinity(
        process_name,
        thread_name,
        start,
        end,
    ))
}

/// `policy` takes the raw `SCHED_*` value, optionally or'ed with
/// `SCHED_RESET_ON_FORK`.
///
/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_set_process_scheduler(
    name: *const c_char,
    policy: i32,
    priority: i32,
) -> i32 {
    c_args!(name; -1);
    status_code(process_impl::set_scheduler(
        &process_impl::resolve_process(name),
        SchedDescriptor::from_raw(policy, priority),
    ))
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_set_thread_scheduler(
    process_name: *const c_char,
    thread_name: *const c_char,
    policy: i32,
    priority: i32,
) -> i32 {
    c_args!(process_name, thread_name; -1);
    status_code(process_impl::set_scheduler(
        &process_impl::resolve_thread(process_name, thread_name),
        SchedDescriptor::from_raw(policy, priority),
    ))
}

/// Returns the number of processes signalled, or `-1` on bad input.
///
/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_kill_process(name: *const c_char) -> i32 {
    c_args!(name; -1);
    count_code(process_impl::kill_process(name))
}

/// Returns the number of threads signalled, or `-1` on bad input.
///
/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_kill_thread(
    process_name: *const c_char,
    thread_name: *const c_char,
) -> i32 {
    c_args!(process_name, thread_name; -1);
    count_code(process_impl::kill_thread(process_name, thread_name))
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_mutate_file(path: *const c_char, value: *const c_char) -> bool {
    c_args!(path, value; false);
    filesystem::mutate_file(path, value)
}

/// Returns the number of entries removed, or `-1` on bad input.
///
/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_remove_path(path: *const c_char) -> i32 {
    c_args!(path; -1);
    count_code(filesystem::remove_path(path))
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_app_exists(package: *const c_char) -> bool {
    c_args!(package; false);
    android_impl::app_exists(package)
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_stop_system_service(name: *const c_char) -> i32 {
    c_args!(name; -1);
    status_code(android_impl::stop_system_service(name))
}

/// # Safety
/// See the module documentation for string arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn droid_preload(
    kind: *const c_char,
    item: *const c_char,
    full: bool,
) -> bool {
    c_args!(kind, item; false);
    preload_impl::preload(kind, item, full)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::ffi::CString;
    use std::ptr;

    #[test]
    fn null_arguments_are_rejected() {
        unsafe {
            assert_eq!(droid_find_process_id(ptr::null()), -1);
            assert_eq!(droid_renice_process(ptr::null(), 0), -1);
            assert_eq!(droid_kill_thread(ptr::null(), ptr::null()), -1);
            assert!(!droid_mutate_file(ptr::null(), ptr::null()));
        }
    }

    #[test]
    fn non_utf8_is_rejected() {
        let bad = CString::new(vec![0xff, 0xfe]).unwrap();
        unsafe {
            assert_eq!(droid_remove_path(bad.as_ptr()), -1);
        }
    }

    #[test]
    fn mutate_file_through_ffi() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knob");
        std::fs::write(&path, "1").unwrap();
        let c_path = CString::new(path.to_str().unwrap()).unwrap();
        let c_value = CString::new("0").unwrap();
        unsafe {
            assert!(droid_mutate_file(c_path.as_ptr(), c_value.as_ptr()));
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn missing_process_reports_failure() {
        let name = CString::new("droid-utils-no-such-process-77aa").unwrap();
        unsafe {
            assert_eq!(droid_find_process_id(name.as_ptr()), -1);
            assert_eq!(droid_renice_process(name.as_ptr(), 0), -1);
            assert_eq!(droid_kill_process(name.as_ptr()), 0);
        }
    }
}
