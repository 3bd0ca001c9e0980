// Domain ids double as namespace names, so they follow RFC 1123 label shape.
// Case is not enforced here; the cluster rejects uppercase names on create.
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, Result};

/// Maximum length of a DNS label.
pub const MAX_ID_LEN: usize = 63;

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([-A-Za-z0-9]*[A-Za-z0-9])?$").expect("Invalid DNS label regex")
});

/// Checks that `id` is non-empty and usable as a namespace name.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(CoreError::invalid_id("id must not be empty"));
    }
    if id.len() > MAX_ID_LEN {
        return Err(CoreError::invalid_id(format!(
            "{id} is longer than {MAX_ID_LEN} characters"
        )));
    }
    if !LABEL_RE.is_match(id) {
        return Err(CoreError::invalid_id(format!(
            "{id} is not an RFC 1123 label"
        )));
    }
    Ok(())
}
