//! Masking for credential-adjacent values

/// Number of leading characters left visible
const VISIBLE_PREFIX: usize = 2;

/// Mask an account identifier for logs and diagnostic output.
///
/// Keeps the first two characters and replaces the rest with `***`.
/// Identifiers of two characters or fewer are fully masked.
pub fn mask_identifier(value: &str) -> String {
    if value.chars().count() <= VISIBLE_PREFIX {
        return "***".to_string();
    }
    let prefix: String = value.chars().take(VISIBLE_PREFIX).collect();
    format!("{}***", prefix)
}
