//! Errors raised while loading a settings document.
//!
//! Merging and stripping never fail; only turning text into a [`Document`]
//! can.
//!
//! [`Document`]: crate::Document

use thiserror::Error;

/// Error produced when text cannot be used as a settings document.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The text is not valid JSON.
    #[error("settings document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON is valid but its root is not an object.
    #[error("settings document root must be an object, found {found}")]
    NotAnObject {
        /// JSON type name of the root value.
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_an_object_names_the_found_type() {
        let err = SettingsError::NotAnObject { found: "array" };
        assert_eq!(
            err.to_string(),
            "settings document root must be an object, found array"
        );
    }
}
