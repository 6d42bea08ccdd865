//! Publish payload validation
//!
//! Light structural checks applied before a record reaches the store. The
//! boundary layer performs schema-level validation of request bodies; these
//! checks are the ones the core itself guarantees.

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::ServerDetail;
use crate::error::RegistryError;

lazy_static! {
    /// Reverse-DNS server name with exactly one `/` separator,
    /// e.g. `io.github.user/weather`.
    static ref NAME_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9.-]+/[a-zA-Z0-9._-]+$").expect("valid name pattern");

    /// Version range operators rejected on publish.
    static ref RANGE_OPERATORS: Regex =
        Regex::new(r"[\^~><=*x]").expect("valid range pattern");
}

/// Check whether a server name is well-formed.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Check whether a version string may be published. `"latest"` is a
/// reserved resolution token, and ranges are not publishable records.
pub fn is_publishable_version(version: &str) -> bool {
    version != "latest" && !RANGE_OPERATORS.is_match(version)
}

/// Validate a record for the publish path, accumulating every field-level
/// problem rather than stopping at the first.
pub fn validate_publish(record: &ServerDetail) -> Result<(), RegistryError> {
    let mut details = Vec::new();

    if record.name.is_empty() {
        details.push("name is required".to_string());
    } else if !is_valid_name(&record.name) {
        details.push(
            "name must be in reverse-DNS format with one '/' (e.g., 'io.github.user/weather')"
                .to_string(),
        );
    }

    if record.description.is_empty() {
        details.push("description is required".to_string());
    }

    if record.version.is_empty() {
        details.push("version is required".to_string());
    } else if !is_publishable_version(&record.version) {
        details.push("version must be a specific version, not 'latest' or a range".to_string());
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(RegistryError::validation(details))
    }
}
