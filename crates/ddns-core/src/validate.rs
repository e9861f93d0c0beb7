//! Input-format validation for zones and record names

use crate::error::{Error, Result};

/// Maximum length of a domain name (RFC 1035)
const MAX_DOMAIN_LEN: usize = 253;

/// Maximum length of a single label (RFC 1035)
const MAX_LABEL_LEN: usize = 63;

/// Validate that `domain` looks like a zone name ("example.com")
///
/// Basic RFC 1035 checks: at least two labels, each 1-63 alphanumeric or
/// hyphen characters, not starting or ending with a hyphen.
pub fn validate_zone(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(Error::config("Zone cannot be empty"));
    }

    if domain.len() > MAX_DOMAIN_LEN {
        return Err(Error::config(format!(
            "Zone too long: {} chars (max {}). Got: {}",
            domain.len(),
            MAX_DOMAIN_LEN,
            domain
        )));
    }

    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if !domain.contains('.') {
        return Err(Error::config(format!("Invalid domain format: '{}'", domain)));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(Error::config(format!("Zone has empty label: '{}'", domain)));
        }

        if label.len() > MAX_LABEL_LEN {
            return Err(Error::config(format!(
                "Zone label too long: {} chars (max {}). Label: '{}'",
                label.len(),
                MAX_LABEL_LEN,
                label
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::config(format!(
                "Zone label contains invalid characters. Label: '{}'. \
                Valid: alphanumeric and hyphen only.",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::config(format!(
                "Zone label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}

/// Validate a single (already expanded) record name
///
/// Names are host labels relative to the zone: "www", "@", "*",
/// "_acme-challenge", "a.b". They end up in a URL path segment, so "." and
/// ".." are rejected: URL normalisation would drop them from the path.
pub fn validate_record_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::config("Record name cannot be empty"));
    }

    if name == "." || name == ".." {
        return Err(Error::config(format!(
            "Record name '{}' is not a valid host label",
            name
        )));
    }

    if name.len() > MAX_DOMAIN_LEN {
        return Err(Error::config(format!(
            "Record name too long: {} chars (max {})",
            name.len(),
            MAX_DOMAIN_LEN
        )));
    }

    if let Some(bad) = name
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'))
    {
        return Err(Error::config(format!(
            "Record name '{}' contains invalid character {:?}",
            name, bad
        )));
    }

    Ok(())
}
