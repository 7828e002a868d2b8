//! Centralized validation and input limits.

use crate::core::types::StandardId;

/// Maximum size of an ABI document in bytes (DOS protection)
pub const MAX_ABI_SIZE: usize = 4 * 1024 * 1024;

/// Maximum number of functions plus events in a single ABI document
pub const MAX_SIGNATURES: usize = 10_000;

/// Maximum number of inputs or outputs on one signature
pub const MAX_PARAMETERS: usize = 256;

/// Maximum nesting depth of tuple components
pub const MAX_TUPLE_DEPTH: usize = 16;

pub const MAX_STANDARD_ID_LENGTH: usize = 64;

/// Check if adding another signature would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new signature.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_signature_limit(signatures.len()).is_some() {
///     return Err(...);
/// }
/// signatures.push(new_signature); // Safe to add
/// ```
#[must_use]
pub fn check_signature_limit(count: usize) -> Option<String> {
    if count >= MAX_SIGNATURES {
        Some(format!(
            "Too many signatures: adding another would exceed maximum of {MAX_SIGNATURES}"
        ))
    } else {
        None
    }
}

/// Check a parameter list length against [`MAX_PARAMETERS`].
#[must_use]
pub fn check_parameter_limit(name: &str, count: usize) -> Option<String> {
    if count > MAX_PARAMETERS {
        Some(format!(
            "'{name}' declares {count} parameters, maximum is {MAX_PARAMETERS}"
        ))
    } else {
        None
    }
}

/// Security validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty standard ID provided")]
    EmptyStandardId,
    #[error("Standard ID too long: exceeds {MAX_STANDARD_ID_LENGTH} characters")]
    StandardIdTooLong,
    #[error("Invalid standard ID '{0}': only letters, digits, '-', '_' and '.' are allowed")]
    InvalidStandardId(String),
    #[error("ABI document is empty")]
    EmptyAbi,
    #[error("ABI document too large: {0} bytes exceeds maximum of {MAX_ABI_SIZE}")]
    AbiTooLarge(usize),
    #[error("ABI document is not valid UTF-8 text")]
    NotText,
}

/// Validate a standard identifier supplied by a user.
///
/// # Examples
///
/// ```
/// use eip_solver::utils::validation::validate_standard_id;
///
/// assert!(validate_standard_id("ERC20").is_ok());
/// assert!(validate_standard_id("../etc/passwd").is_err());
/// assert!(validate_standard_id("").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyStandardId` for blank input,
/// `ValidationError::StandardIdTooLong` past the length limit, or
/// `ValidationError::InvalidStandardId` for any other character.
pub fn validate_standard_id(id: &str) -> Result<StandardId, ValidationError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::EmptyStandardId);
    }
    if id.len() > MAX_STANDARD_ID_LENGTH {
        return Err(ValidationError::StandardIdTooLong);
    }
    if id.contains("..")
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(ValidationError::InvalidStandardId(id.to_string()));
    }
    Ok(StandardId::new(id))
}

/// Validate raw ABI bytes before parsing and return them as text.
///
/// # Errors
///
/// Returns `ValidationError::AbiTooLarge` past [`MAX_ABI_SIZE`],
/// `ValidationError::NotText` for non-UTF-8 content, or
/// `ValidationError::EmptyAbi` for blank content.
pub fn validate_abi_content(content: &[u8]) -> Result<&str, ValidationError> {
    if content.len() > MAX_ABI_SIZE {
        return Err(ValidationError::AbiTooLarge(content.len()));
    }
    let text = std::str::from_utf8(content).map_err(|_| ValidationError::NotText)?;
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyAbi);
    }
    Ok(text)
}
