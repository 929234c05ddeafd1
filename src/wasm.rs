use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;

use crate::classify::classify_error as classify_raw_error;
use crate::classify::evidence::EVIDENCE_PATHS;
use crate::format;
use crate::lifecycle::TransactionTracker;
use crate::operations::AdminOperation;
use crate::taxonomy::{ContractError, WalletError};
use crate::types::RawError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;

    #[wasm_bindgen(js_namespace = Reflect, js_name = get, catch)]
    fn reflect_get(target: &JsValue, key: &JsValue) -> Result<JsValue, JsValue>;
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

fn error_result(msg: &str) -> JsValue {
    to_js(&serde_json::json!({"error": msg}))
}

/// Reads a JS value as a raw error.
///
/// The whole-object conversion fails on bigints, cycles and getters that
/// throw, and skips non-enumerable properties such as `Error.message`. The
/// code and each evidence field are therefore read one by one, so a single
/// bad property does not cost the rest.
fn raw_from_js(error: &JsValue) -> RawError {
    if let Some(text) = error.as_string() {
        return RawError::from_message(text);
    }
    let mut raw = RawError::new(
        serde_wasm_bindgen::from_value(error.clone()).unwrap_or(serde_json::Value::Null),
    );
    if !error.is_object() {
        return raw;
    }
    if let Some(code) = property(error, &["code"]) {
        if let Some(n) = code.as_f64().filter(|n| n.fract() == 0.0) {
            raw.set_path(&["code"], serde_json::json!(n as i64));
        } else if let Some(text) = code.as_string() {
            raw.set_path(&["code"], serde_json::Value::String(text));
        }
    }
    for path in EVIDENCE_PATHS {
        if let Some(text) = property(error, path).and_then(|v| v.as_string()) {
            raw.set_path(path, serde_json::Value::String(text));
        }
    }
    raw
}

/// `target[path[0]][path[1]]..`, stopping at the first non-object hop or
/// throwing getter.
fn property(target: &JsValue, path: &[&str]) -> Option<JsValue> {
    let mut cursor = target.clone();
    for key in path {
        if !cursor.is_object() {
            return None;
        }
        cursor = reflect_get(&cursor, &JsValue::from_str(key)).ok()?;
    }
    Some(cursor)
}

/// Classify a thrown wallet/contract error into `{title, message}`.
#[wasm_bindgen(js_name = classifyError)]
pub fn classify_error(error: JsValue) -> JsValue {
    to_js(&classify_raw_error(&raw_from_js(&error)))
}

/// Same as `classifyError` for an already-serialized error.
#[wasm_bindgen(js_name = classifyErrorJson)]
pub fn classify_error_json(json: &str) -> JsValue {
    match RawError::from_json_str(json) {
        Ok(raw) => to_js(&classify_raw_error(&raw)),
        Err(_) => error_result("Invalid JSON"),
    }
}

/// Every taxonomy entry, contract errors first in definition order.
#[wasm_bindgen(js_name = errorTaxonomy)]
pub fn error_taxonomy() -> JsValue {
    let entries: Vec<_> = ContractError::iter()
        .map(ContractError::entry)
        .chain(WalletError::iter().map(WalletError::entry))
        .collect();
    to_js(&entries)
}

#[wasm_bindgen(js_name = TransactionTracker)]
#[derive(Default)]
pub struct WasmTransactionTracker {
    inner: TransactionTracker,
}

#[wasm_bindgen(js_class = TransactionTracker)]
impl WasmTransactionTracker {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// `{status, message, txHash, error}`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> JsValue {
        to_js(self.inner.state())
    }

    #[wasm_bindgen(js_name = setPending)]
    pub fn set_pending(&mut self, message: Option<String>) {
        self.inner.set_pending(message.as_deref());
    }

    #[wasm_bindgen(js_name = setConfirming)]
    pub fn set_confirming(&mut self, tx_hash: String, message: Option<String>) {
        self.inner.set_confirming(tx_hash, message.as_deref());
    }

    #[wasm_bindgen(js_name = setSuccess)]
    pub fn set_success(&mut self, message: Option<String>, tx_hash: Option<String>) {
        self.inner.set_success(message.as_deref(), tx_hash);
    }

    #[wasm_bindgen(js_name = setError)]
    pub fn set_error(&mut self, error: JsValue, message: Option<String>) {
        self.inner.set_error(raw_from_js(&error), message.as_deref());
    }

    /// Classifies `error` and records the classified message. Returns
    /// `{title, message}`.
    pub fn fail(&mut self, error: JsValue) -> JsValue {
        let raw = raw_from_js(&error);
        let classified = classify_raw_error(&raw);
        self.inner.set_error(raw, Some(&classified.message));
        to_js(&classified)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

/// `{method, category, successMessage, error}` for an operation object
/// such as `{"method":"setGracePeriod","days":7}`. `error` is the
/// classified pre-flight failure, or null.
#[wasm_bindgen(js_name = describeAdminOperation)]
pub fn describe_admin_operation(json: &str) -> JsValue {
    let op: AdminOperation = match serde_json::from_str(json) {
        Ok(op) => op,
        Err(_) => return error_result("Unknown admin operation"),
    };
    let error = op.validate().err().map(|code| code.entry());
    to_js(&serde_json::json!({
        "method": op.method(),
        "category": op.category(),
        "successMessage": op.success_message(),
        "error": error,
    }))
}

#[wasm_bindgen(js_name = formatAddress)]
pub fn format_address(address: &str, chars: Option<u32>) -> String {
    format::format_address(address, chars.unwrap_or(4) as usize)
}

#[wasm_bindgen(js_name = isValidAddress)]
pub fn is_valid_address(address: &str) -> bool {
    format::is_valid_address(address)
}

#[wasm_bindgen(js_name = formatDuration)]
pub fn format_duration(seconds: f64) -> String {
    format::format_duration(seconds.max(0.0) as u64)
}

#[wasm_bindgen(js_name = formatRelativeTime)]
pub fn format_relative_time(target_ms: f64, now_ms: f64) -> String {
    format::format_relative_time(target_ms as i64, now_ms as i64)
}

#[wasm_bindgen(js_name = txUrl)]
pub fn tx_url(chain_id: u32, tx_hash: &str) -> Option<String> {
    format::tx_url(u64::from(chain_id), tx_hash)
}

/// `$1,234.56`, or `$1.23M` / `$1.50K` when `compact`.
#[wasm_bindgen(js_name = formatUsd)]
pub fn format_usd(value: f64, compact: Option<bool>, decimals: Option<u32>) -> String {
    format::format_usd(value, compact.unwrap_or(false), decimals.unwrap_or(2) as usize)
}

/// `amount` is a base-unit integer string (a `bigint` stringified).
#[wasm_bindgen(js_name = formatTokenAmount)]
pub fn format_token_amount(amount: &str, decimals: u32, display_decimals: u32) -> JsValue {
    match amount.trim().parse::<u128>() {
        Ok(value) => JsValue::from_str(&format::format_token_amount(
            value,
            decimals,
            display_decimals,
        )),
        Err(_) => error_result("Invalid amount"),
    }
}

/// Base units as a decimal string, or `{error}`.
#[wasm_bindgen(js_name = parseTokenAmount)]
pub fn parse_token_amount(input: &str, decimals: u32) -> JsValue {
    match format::parse_token_amount(input, decimals) {
        Ok(value) => JsValue::from_str(&value.to_string()),
        Err(e) => error_result(&e.to_string()),
    }
}
