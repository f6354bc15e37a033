//! Error types for color parsing.

use thiserror::Error;

/// Errors produced while parsing color values.
///
/// Blending never surfaces these: a malformed theme color makes the blend a
/// no-op instead. They are returned from the explicit parsing entry points
/// ([`Rgb::from_hex`](crate::Rgb::from_hex) and friends).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The value does not start with `#`.
    #[error("invalid hex color '{0}': missing '#' prefix")]
    MissingHash(String),

    /// The value has a digit count other than 3, 6, or 8.
    #[error("invalid hex color '{value}': expected 3, 6 or 8 digits, got {digits}")]
    InvalidLength {
        /// The rejected input.
        value: String,
        /// Number of characters after the `#`.
        digits: usize,
    },

    /// The value contains a non-hexadecimal character.
    #[error("invalid hex color '{0}': non-hexadecimal digit")]
    InvalidDigit(String),
}

/// Result type for color operations.
pub type Result<T> = std::result::Result<T, ColorError>;
