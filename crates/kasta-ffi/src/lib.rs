//! C FFI bindings for kasta-core
//!
//! This crate provides a C-compatible API so a host application can run
//! conversions in-process. Every call is an independent run; no state is
//! kept between calls.

use kasta_core::{convert_lines, convert_workbook, ConvertOptions};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::slice;

/// Convert a workbook buffer to JSON
///
/// Returns the JSON document, `{"error": "No matching worksheets found"}`, or
/// `{"error": "Error: <message>"}` when the workbook cannot be read.
///
/// # Safety
/// - `data` must point to `len` readable bytes
/// - Returns null if `data` is null
/// - Caller must free the returned string with `kasta_free_string`
#[no_mangle]
pub unsafe extern "C" fn kasta_convert(
    data: *const u8,
    len: usize,
    strip_marketing_suffixes: bool,
    classify_devices: bool,
) -> *mut c_char {
    if data.is_null() {
        return ptr::null_mut();
    }

    let bytes = slice::from_raw_parts(data, len);
    let options = ConvertOptions {
        strip_marketing_suffixes,
        classify_devices,
        ..ConvertOptions::default()
    };

    let json = match convert_workbook(bytes, &options) {
        Ok(output) => serde_json::to_string(&output),
        Err(e) => serde_json::to_string(&serde_json::json!({ "error": format!("Error: {}", e) })),
    };

    json.ok()
        .and_then(|s| CString::new(s).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Convert newline-separated, already flattened lines to JSON
///
/// # Safety
/// - `text` must be a valid C string
/// - Returns null on error
/// - Caller must free the returned string with `kasta_free_string`
#[no_mangle]
pub unsafe extern "C" fn kasta_convert_lines(text: *const c_char) -> *mut c_char {
    if text.is_null() {
        return ptr::null_mut();
    }

    let text = match CStr::from_ptr(text).to_str() {
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let conversion = convert_lines(&lines, &ConvertOptions::default());

    serde_json::to_string(&conversion)
        .ok()
        .and_then(|s| CString::new(s).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a kasta_* function or null
#[no_mangle]
pub unsafe extern "C" fn kasta_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take_string(s: *mut c_char) -> String {
        let owned = CStr::from_ptr(s).to_str().unwrap().to_string();
        kasta_free_string(s);
        owned
    }

    #[test]
    fn test_convert_lines() {
        let input = CString::new("KASTA DEVICE\nNAME:Z2\nPorch\nKASTA SCENE\nNAME:Away\nPorch OFF\n").unwrap();
        let json = unsafe { take_string(kasta_convert_lines(input.as_ptr())) };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["devices"][0]["deviceType"], "Relay Type");
        assert_eq!(value["scenes"][0]["contents"][0]["status"], "OFF");
    }

    #[test]
    fn test_convert_invalid_workbook_reports_error() {
        let data = b"not a workbook";
        let json = unsafe { take_string(kasta_convert(data.as_ptr(), data.len(), false, true)) };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["error"].as_str().unwrap().starts_with("Error: "));
    }

    #[test]
    fn test_null_inputs() {
        unsafe {
            assert!(kasta_convert(ptr::null(), 0, false, true).is_null());
            assert!(kasta_convert_lines(ptr::null()).is_null());
            kasta_free_string(ptr::null_mut());
        }
    }
}
