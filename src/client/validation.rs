//! API key validation.

use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Shape of keys issued by the service: two UUIDs written back to back.
pub const DEFAULT_KEY_PATTERN: &str = concat!(
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
    r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
);

static DEFAULT_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_KEY_PATTERN).expect("default key pattern compiles"));

/// Characters that appear unescaped in a URL path segment (RFC 3986 `pchar`).
fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@".contains(c)
}

/// Checks API keys before they are stored on a client.
///
/// Whatever the pattern, a key must be usable verbatim as one URL path
/// segment, so spaces, `/`, `%` and non-ASCII characters are always rejected.
#[derive(Debug, Clone)]
pub struct KeyValidator {
    pattern: Regex,
}

impl KeyValidator {
    /// Validator using a caller-supplied regular expression.
    ///
    /// The pattern is matched against the whole key only if it is anchored.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid key pattern: {}", e),
                ErrorContext::new()
                    .with_field_path("builder.key_pattern")
                    .with_details(pattern),
            )
        })?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn validate(&self, key: &str) -> Result<()> {
        if key.trim().is_empty() {
            return Err(Error::invalid_key("key is empty"));
        }
        if let Some(c) = key.chars().find(|c| !is_path_char(*c)) {
            return Err(Error::invalid_key(format!(
                "key contains {:?}, which cannot appear in a URL path",
                c
            )));
        }
        if key == "." || key == ".." {
            return Err(Error::invalid_key("key cannot be a relative path segment"));
        }
        if !self.pattern.is_match(key) {
            return Err(Error::invalid_key(format!(
                "key does not match the expected format ({} characters given)",
                key.chars().count()
            )));
        }
        Ok(())
    }
}

impl Default for KeyValidator {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_KEY_REGEX.clone(),
        }
    }
}
