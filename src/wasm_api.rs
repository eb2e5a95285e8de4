use crate::api;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main WASM API: score a hand and table
///
/// # Arguments
/// * `request` - JSON object with `hand` and `table` tile arrays (compact strings such
///   as "r5" or full tile objects) and an optional `config`
///
/// # Returns
/// JSON string with `success`, `result` or `error`, and `elapsed_ms`
#[wasm_bindgen]
pub fn solve_rummikub(request: &str) -> String {
    api::solve_request(request)
}

/// Get the git commit hash that this WASM module was built from
///
/// Returns the first 8 characters of the commit hash, or "unknown" if not available
#[wasm_bindgen]
pub fn get_build_commit() -> String {
    env!("BUILD_COMMIT").to_string()
}
