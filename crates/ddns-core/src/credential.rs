//! Provider API credential
//!
//! The token is validated for shape before any network call and is never
//! rendered in cleartext by `Debug` or `Display`.

use crate::error::{Error, Result};
use std::fmt;

/// Exact length of a provider API token
pub const TOKEN_LENGTH: usize = 40;

/// Validated bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Validate and wrap a raw token
    ///
    /// The token must be exactly [`TOKEN_LENGTH`] ASCII alphanumeric
    /// characters.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(Error::config("API token is empty"));
        }

        if raw.len() != TOKEN_LENGTH || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::config(format!(
                "API token format incorrect: expected {} alphanumeric characters",
                TOKEN_LENGTH
            )));
        }

        Ok(Self(raw))
    }

    /// The raw token, for building the Authorization header only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Token with all but a short suffix replaced by `*`
    pub fn masked(&self) -> String {
        mask(&self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Mask the leading 80% (rounded up) of `secret`
pub fn mask(secret: &str) -> String {
    let len = secret.chars().count();
    let hidden = (len * 4).div_ceil(5);
    let visible: String = secret.chars().skip(hidden).collect();
    format!("{}{}", "*".repeat(hidden), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(len: usize) -> String {
        "aB3".chars().cycle().take(len).collect()
    }

    #[test]
    fn test_accepts_forty_alphanumeric() {
        assert!(Credential::parse(token(40)).is_ok());
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(Credential::parse(token(39)).is_err());
        assert!(Credential::parse(token(41)).is_err());
        assert!(Credential::parse("xxxx").is_err());
    }

    #[test]
    fn test_rejects_non_alphanumeric() {
        let mut raw = token(39);
        raw.push('-');
        assert_eq!(raw.len(), 40);
        assert!(Credential::parse(raw).is_err());

        let mut raw = token(39);
        raw.push('é');
        assert!(Credential::parse(raw).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        let err = Credential::parse("").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_mask_hides_eighty_percent() {
        assert_eq!(mask("abcdefghij"), "********ij");
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_token_not_exposed_in_debug_or_display() {
        let raw = format!("{}SECRETTAIL", token(30));
        let credential = Credential::parse(raw.clone()).unwrap();

        let debug = format!("{:?}", credential);
        let display = credential.to_string();
        assert!(!debug.contains(&raw));
        assert!(!display.contains(&raw));
        assert!(display.starts_with(&"*".repeat(32)));
        assert!(display.ends_with("CRETTAIL"));
        assert_eq!(credential.expose(), raw);
    }
}
