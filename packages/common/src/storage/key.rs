use super::error::StorageError;

/// Validates that a blob key is a flat file name inside the store directory.
///
/// Returns the key unchanged on success. Surrounding whitespace is not trimmed:
/// the key must already be exactly the name written to disk.
pub fn validate_key(key: &str) -> Result<&str, StorageError> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty"));
    }

    if key.contains('\0') {
        return Err(StorageError::InvalidKey("null bytes are not allowed"));
    }

    // Control characters would end up in Content-Type guessing and logs.
    if key.chars().any(|c| c.is_ascii_control()) {
        return Err(StorageError::InvalidKey(
            "control characters are not allowed",
        ));
    }

    if key.contains('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey("path separators are not allowed"));
    }

    if key == ".." {
        return Err(StorageError::InvalidKey("'..' is not allowed"));
    }

    if key.starts_with('.') {
        return Err(StorageError::InvalidKey(
            "hidden files (starting with '.') are not allowed",
        ));
    }

    Ok(key)
}
