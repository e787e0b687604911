//! C ABI for vkloc.
//!
//! Name lookups return pointers into static tables that must NOT be freed.
//! Everything else accepts null-terminated C strings and returns a
//! heap-allocated JSON string the caller MUST free with `vkloc_free()`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use vkloc_core::{FieldId, FunctionId, Location, MessageStyle, RefPageId, index_from_raw};
use vkloc_diagnostics::VuidTable;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Convert a C string pointer to a Rust `&str`. Returns `None` if null or invalid UTF-8.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Allocate a C string from a Rust string. Returns null on failure.
fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .map(|c| c.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Serialize a value to a JSON C string.
fn to_json_c<T: Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(json) => to_c_string(&json),
        Err(_) => ptr::null_mut(),
    }
}

fn panic_payload_to_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "unknown panic payload".to_string()
}

/// Run an FFI entrypoint and convert panics into a structured JSON error.
fn guard_ffi_json<F>(f: F) -> *mut c_char
where
    F: FnOnce() -> *mut c_char,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(ptr) => ptr,
        Err(payload) => {
            let out = serde_json::json!({
                "error": "ffi_panic",
                "message": panic_payload_to_message(payload),
            });
            to_json_c(&out)
        }
    }
}

/// Run an FFI entrypoint that returns plain text, mapping a panic to NULL.
fn guard_ffi_text<F>(f: F) -> *mut c_char
where
    F: FnOnce() -> *mut c_char,
{
    catch_unwind(AssertUnwindSafe(f)).unwrap_or(ptr::null_mut())
}

/// Run an FFI free function and swallow panics to prevent unwind across FFI.
fn guard_ffi_void<F>(f: F)
where
    F: FnOnce(),
{
    let _ = catch_unwind(AssertUnwindSafe(f));
}

// ── Render requests ─────────────────────────────────────────────────────

static BUILTIN: OnceLock<VuidTable> = OnceLock::new();

fn builtin_table() -> &'static VuidTable {
    BUILTIN.get_or_init(VuidTable::builtin)
}

/// One step of a requested path. A missing index (or `4294967295`) means
/// "not an array element".
#[derive(Debug, Deserialize)]
struct StepRequest {
    field: FieldId,
    #[serde(default)]
    index: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RenderRequest {
    function: FunctionId,
    page: RefPageId,
    #[serde(default)]
    path: Vec<StepRequest>,
    #[serde(default)]
    style: MessageStyle,
}

#[derive(Debug, Serialize)]
struct RenderResponse {
    message: String,
    fields: String,
    vuid: &'static str,
}

fn render_request(json: &str) -> Result<RenderResponse, String> {
    let req: RenderRequest =
        serde_json::from_str(json).map_err(|e| format!("invalid render request: {e}"))?;

    let loc = req
        .path
        .iter()
        .fold(Location::new(req.function, req.page), |loc, step| {
            loc.descend(step.field, step.index.and_then(index_from_raw))
        });

    Ok(RenderResponse {
        message: loc.render(&req.style),
        fields: loc.fields(),
        vuid: builtin_table().resolve(&loc),
    })
}

// ── Name tables ─────────────────────────────────────────────────────────

/// Name of the function with raw id `raw`, or `"Empty"` if out of range.
///
/// The returned pointer is static and must NOT be freed.
#[unsafe(no_mangle)]
pub extern "C" fn vkloc_function_name(raw: u32) -> *const c_char {
    FunctionId::from_raw(raw)
        .unwrap_or_default()
        .as_c_str()
        .as_ptr()
}

/// Name of the reference page with raw id `raw`, or `"Empty"` if out of
/// range. Reference pages are structures or commands.
///
/// The returned pointer is static and must NOT be freed.
#[unsafe(no_mangle)]
pub extern "C" fn vkloc_ref_page_name(raw: u32) -> *const c_char {
    RefPageId::from_raw(raw)
        .unwrap_or_default()
        .as_c_str()
        .as_ptr()
}

/// Name of the field with raw id `raw`, or `"Empty"` if out of range.
///
/// The returned pointer is static and must NOT be freed.
#[unsafe(no_mangle)]
pub extern "C" fn vkloc_field_name(raw: u32) -> *const c_char {
    FieldId::from_raw(raw).unwrap_or_default().as_c_str().as_ptr()
}

// ── Public API ──────────────────────────────────────────────────────────

/// Render a location. Input is JSON:
/// `{ "function": "vkQueueSubmit", "page": "VkSubmitInfo", "path": [{ "field": "pSubmits", "index": 0 }] }`
/// with an optional `"style"` object.
///
/// Returns `{ "message": ..., "fields": ..., "vuid": ... }` or `{ "error": ... }`.
/// The caller MUST free the returned pointer with `vkloc_free()`.
/// Returns NULL on invalid input.
///
/// # Safety
///
/// `request_json` must be a valid, null-terminated C string pointer (or NULL).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vkloc_render(request_json: *const c_char) -> *mut c_char {
    guard_ffi_json(|| {
        let Some(json) = (unsafe { cstr_to_str(request_json) }) else {
            return ptr::null_mut();
        };

        match render_request(json) {
            Ok(resp) => to_json_c(&resp),
            Err(e) => {
                let out = serde_json::json!({"error": e});
                to_json_c(&out)
            }
        }
    })
}

/// Explain a VUID. Returns the description as a plain C string, or NULL if
/// the VUID is unknown (or the lookup panicked).
///
/// The caller MUST free the returned pointer with `vkloc_free()`.
///
/// # Safety
///
/// `vuid` must be a valid, null-terminated C string pointer (or NULL).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vkloc_explain(vuid: *const c_char) -> *mut c_char {
    guard_ffi_text(|| {
        let Some(vuid) = (unsafe { cstr_to_str(vuid) }) else {
            return ptr::null_mut();
        };

        match vkloc_diagnostics::explain(vuid) {
            Some(text) => to_c_string(text),
            None => ptr::null_mut(),
        }
    })
}

// ── Free ─────────────────────────────────────────────────────────────

/// Free a string previously returned by `vkloc_render` or `vkloc_explain`.
///
/// Passing NULL is safe (no-op).
///
/// # Safety
///
/// `ptr` must be a pointer previously returned by one of those functions, or
/// NULL. Each pointer must be freed exactly once. Name-table pointers must
/// never be passed here.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vkloc_free(ptr: *mut c_char) {
    guard_ffi_void(|| {
        if !ptr.is_null() {
            drop(unsafe { CString::from_raw(ptr) });
        }
    });
}
