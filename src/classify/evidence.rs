use crate::types::RawError;

/// Fields probed for textual evidence, highest priority first. `data` only
/// counts when it is a string.
pub const EVIDENCE_PATHS: &[&[&str]] = &[
    &["shortMessage"],
    &["revert", "name"],
    &["info", "error", "message"],
    &["info", "error", "data", "message"],
    &["reason"],
    &["message"],
    &["data"],
    &["error", "message"],
    &["error", "reason"],
];

/// Every non-empty text field found on a [`RawError`], in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence<'a> {
    sources: Vec<&'a str>,
}

impl<'a> Evidence<'a> {
    pub fn collect(raw: &'a RawError) -> Self {
        let sources = EVIDENCE_PATHS
            .iter()
            .filter_map(|path| raw.str_at(path))
            .filter(|s| !s.is_empty())
            .collect();
        Self { sources }
    }

    pub fn sources(&self) -> &[&'a str] {
        &self.sources
    }

    pub fn first(&self) -> Option<&'a str> {
        self.sources.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// All sources joined with single spaces; empty when nothing was found.
    pub fn combined(&self) -> String {
        self.sources.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_priority_order() {
        let raw = RawError::new(serde_json::json!({
            "error": { "reason": "nested-reason", "message": "nested-message" },
            "data": "0xdeadbeef",
            "message": "top-message",
            "reason": "top-reason",
            "info": { "error": { "message": "info-message", "data": { "message": "info-data" } } },
            "revert": { "name": "RevertName" },
            "shortMessage": "short",
        }));
        let evidence = Evidence::collect(&raw);
        assert_eq!(
            evidence.sources(),
            &[
                "short",
                "RevertName",
                "info-message",
                "info-data",
                "top-reason",
                "top-message",
                "0xdeadbeef",
                "nested-message",
                "nested-reason",
            ]
        );
        assert_eq!(evidence.first(), Some("short"));
    }

    #[test]
    fn skips_empty_and_non_string_fields() {
        let raw = RawError::new(serde_json::json!({
            "shortMessage": "",
            "data": { "raw": "0x" },
            "reason": null,
            "message": "only this",
        }));
        let evidence = Evidence::collect(&raw);
        assert_eq!(evidence.sources(), &["only this"]);
        assert_eq!(evidence.combined(), "only this");
    }

    #[test]
    fn absent_fields_yield_empty_search_string() {
        for value in [
            serde_json::Value::Null,
            serde_json::json!({}),
            serde_json::json!("bare string"),
            serde_json::json!([1, 2, 3]),
        ] {
            let raw = RawError::new(value);
            let evidence = Evidence::collect(&raw);
            assert!(evidence.is_empty());
            assert_eq!(evidence.combined(), "");
            assert_eq!(evidence.first(), None);
        }
    }
}
