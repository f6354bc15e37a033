//! The settings document and its structural helpers.
//!
//! A document is a JSON object. Top-level string values are root-scoped
//! settings; top-level object values keyed `"[Theme Name]"` are blocks that
//! apply only under that theme. Everything here treats values it does not
//! recognize as opaque.

use serde_json::{Map, Value};

use crate::error::SettingsError;
use crate::keys::marker_keys;

/// A settings document. Key order is preserved.
pub type Document = Map<String, Value>;

/// Parses `text` into a document.
///
/// Blank text reads as an empty document, matching a settings file that
/// exists but was never written.
pub fn parse_document(text: &str) -> Result<Document, SettingsError> {
    if text.trim().is_empty() {
        return Ok(Document::new());
    }
    match serde_json::from_str(text)? {
        Value::Object(map) => Ok(map),
        other => Err(SettingsError::NotAnObject {
            found: json_type_name(&other),
        }),
    }
}

/// The top-level key of the block scoped to `theme_name`.
pub fn theme_block_key(theme_name: &str) -> String {
    format!("[{theme_name}]")
}

/// The theme name a block key scopes to, if `key` has block shape.
pub fn theme_name_of_block(key: &str) -> Option<&str> {
    key.strip_prefix('[')?.strip_suffix(']')
}

/// A marker found at the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Theme whose block this system owns.
    pub theme: String,
    /// Key the marker was found under.
    pub marker_key: &'static str,
}

impl Owner {
    /// True when the marker came from an older release's key.
    pub fn is_legacy(&self) -> bool {
        self.marker_key != crate::keys::OWNER_MARKER_KEY
    }

    /// Top-level key of the owned block.
    pub fn block_key(&self) -> String {
        theme_block_key(&self.theme)
    }
}

/// Looks up the ownership marker.
///
/// The canonical key wins over legacy aliases. A marker only counts when its
/// value is a non-empty string.
pub fn find_owner(doc: &Document) -> Option<Owner> {
    marker_keys().find_map(|marker_key| match doc.get(marker_key) {
        Some(Value::String(theme)) if !theme.is_empty() => Some(Owner {
            theme: theme.clone(),
            marker_key,
        }),
        _ => None,
    })
}

/// Structural equality used to decide whether a write is needed.
///
/// Key order is ignored. Strings that are both hex colors compare
/// case-insensitively, at the root and one level into theme blocks.
pub fn documents_equal(a: &Document, b: &Document) -> bool {
    a.len() == b.len()
        && a.iter().all(|(key, left)| match (left, b.get(key)) {
            (Value::Object(l), Some(Value::Object(r))) => {
                l.len() == r.len()
                    && l.iter()
                        .all(|(k, lv)| r.get(k).is_some_and(|rv| values_equal(lv, rv)))
            }
            (_, Some(right)) => values_equal(left, right),
            (_, None) => false,
        })
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(l), Value::String(r)) if is_hex_color(l) && is_hex_color(r) => {
            l.eq_ignore_ascii_case(r)
        }
        _ => a == b,
    }
}

fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    // ============================================================================
    // Parsing
    // ============================================================================

    #[test]
    fn parse_accepts_objects_and_blank_text() {
        assert!(parse_document("").unwrap().is_empty());
        assert!(parse_document("  \n").unwrap().is_empty());
        let parsed = parse_document(r##"{"a": "#FFF", "[T]": {}}"##).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn parse_rejects_non_objects() {
        assert!(matches!(
            parse_document("[1, 2]"),
            Err(SettingsError::NotAnObject { found: "array" })
        ));
        assert!(matches!(
            parse_document("{ nope"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn parse_preserves_key_order() {
        let parsed = parse_document(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<_> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    // ============================================================================
    // Theme blocks and markers
    // ============================================================================

    #[test]
    fn block_keys_roundtrip() {
        assert_eq!(theme_block_key("Default Dark+"), "[Default Dark+]");
        assert_eq!(theme_name_of_block("[Default Dark+]"), Some("Default Dark+"));
        assert_eq!(theme_name_of_block("editor.background"), None);
    }

    #[test]
    fn canonical_marker_beats_legacy() {
        let d = doc(json!({
            "windowTint.ownedTheme": "Old",
            "tintsync.ownedTheme": "New",
        }));
        let owner = find_owner(&d).unwrap();
        assert_eq!(owner.theme, "New");
        assert!(!owner.is_legacy());
    }

    #[test]
    fn legacy_marker_is_recognized() {
        let d = doc(json!({ "workspaceTint.ownedTheme": "Monokai" }));
        let owner = find_owner(&d).unwrap();
        assert_eq!(owner.theme, "Monokai");
        assert!(owner.is_legacy());
        assert_eq!(owner.block_key(), "[Monokai]");
    }

    #[test]
    fn empty_or_non_string_marker_is_ignored() {
        assert_eq!(find_owner(&doc(json!({ "tintsync.ownedTheme": "" }))), None);
        assert_eq!(find_owner(&doc(json!({ "tintsync.ownedTheme": 3 }))), None);
        let fallback = doc(json!({
            "tintsync.ownedTheme": "",
            "windowTint.ownedTheme": "Legacy",
        }));
        assert_eq!(find_owner(&fallback).unwrap().theme, "Legacy");
    }

    // ============================================================================
    // Equality
    // ============================================================================

    #[test]
    fn equality_ignores_order_and_hex_case() {
        let a = doc(json!({
            "[T]": { "statusBar.background": "#ABCDEF", "x": 1 },
            "editor.fontSize": 14,
        }));
        let b = doc(json!({
            "editor.fontSize": 14,
            "[T]": { "x": 1, "statusBar.background": "#abcdef" },
        }));
        assert!(documents_equal(&a, &b));
    }

    #[test]
    fn equality_keeps_non_hex_strings_case_sensitive() {
        let a = doc(json!({ "tintsync.ownedTheme": "Dark" }));
        let b = doc(json!({ "tintsync.ownedTheme": "dark" }));
        assert!(!documents_equal(&a, &b));
    }

    #[test]
    fn equality_detects_missing_and_extra_keys() {
        let a = doc(json!({ "a": "#FFF" }));
        let b = doc(json!({ "a": "#FFF", "b": "#000" }));
        assert!(!documents_equal(&a, &b));
        assert!(!documents_equal(&b, &a));
        let c = doc(json!({ "[T]": { "a": "#FFF" } }));
        let d = doc(json!({ "[T]": { "a": "#FFF", "b": 1 } }));
        assert!(!documents_equal(&c, &d));
    }
}
