use serde::{Deserialize, Serialize};

/// Loosely-structured failure value thrown by the wallet, RPC node or
/// contract-binding layer.
///
/// No schema is assumed. Every accessor probes a fixed path and tolerates
/// absence (or a wrong JSON type) at every level, so `null`, strings and
/// empty objects are all valid raw errors that simply carry no evidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawError(serde_json::Value);

/// Machine code carried by a [`RawError`]: wallets use numbers (`4001`),
/// contract bindings use string markers (`"ACTION_REJECTED"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawCode<'a> {
    Number(i64),
    Text(&'a str),
}

impl RawError {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(json: &str) -> Result<Self, crate::Error> {
        Ok(Self(serde_json::from_str(json)?))
    }

    /// A plain `{ "message": .. }` error, the shape of most local failures
    /// such as "Wallet not connected".
    pub fn from_message(message: impl Into<String>) -> Self {
        Self(serde_json::json!({ "message": message.into() }))
    }

    pub fn with_code(code: &str, message: impl Into<String>) -> Self {
        Self(serde_json::json!({ "code": code, "message": message.into() }))
    }

    pub fn rejected() -> Self {
        Self::with_code("ACTION_REJECTED", "user rejected action")
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::with_code("NETWORK_ERROR", message)
    }

    pub fn timeout() -> Self {
        Self::with_code("TIMEOUT", "request timed out")
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    pub fn code(&self) -> Option<RawCode<'_>> {
        let code = self.0.get("code")?;
        if let Some(n) = code.as_i64() {
            return Some(RawCode::Number(n));
        }
        code.as_str().map(RawCode::Text)
    }

    pub fn has_code(&self, marker: &str) -> bool {
        self.code() == Some(RawCode::Text(marker))
    }

    /// String at a nested object path; `None` when any hop is missing or the
    /// leaf is not a string.
    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        let mut cursor = &self.0;
        for key in path {
            cursor = cursor.get(key)?;
        }
        cursor.as_str()
    }

    /// Writes `value` at a nested object path, turning any non-object hop
    /// (the root included) into an object. Sibling fields are kept.
    pub fn set_path(&mut self, path: &[&str], value: serde_json::Value) {
        if !path.is_empty() {
            insert_at(&mut self.0, path, value);
        }
    }

    pub fn reason(&self) -> Option<&str> {
        self.str_at(&["reason"])
    }

    pub fn message(&self) -> Option<&str> {
        self.str_at(&["message"])
    }
}

fn insert_at(target: &mut serde_json::Value, path: &[&str], value: serde_json::Value) {
    let Some((key, rest)) = path.split_first() else {
        *target = value;
        return;
    };
    if !target.is_object() {
        *target = serde_json::Value::Object(serde_json::Map::new());
    }
    if let serde_json::Value::Object(map) = target {
        let slot = map.entry(*key).or_insert(serde_json::Value::Null);
        insert_at(slot, rest, value);
    }
}

impl From<serde_json::Value> for RawError {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// User-facing `{title, message}` pair, ready for a status display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub title: String,
    pub message: String,
}
