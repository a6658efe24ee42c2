//! Environment-based credential lookup.
//!
//! The provider API key is never stored in `leadrelay.toml`; the config only
//! names the environment variable that holds it.

use secrecy::SecretString;

/// Read an API key from the environment variable `var`.
///
/// Missing, empty, and non-Unicode values all count as absent.
pub fn api_key_from_env(var: &str) -> Option<SecretString> {
    match std::env::var(var) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
        Ok(_) => None,
        // Present but not valid Unicode: secrets must be strings
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!(var, "API key variable is not valid Unicode, ignoring");
            None
        }
        Err(std::env::VarError::NotPresent) => None,
    }
}
