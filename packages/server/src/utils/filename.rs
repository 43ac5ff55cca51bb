use common::storage::{StorageError, validate_key};

use crate::error::AppError;

/// Extension used when the uploaded file name has none.
pub const DEFAULT_PHOTO_EXTENSION: &str = ".png";

/// Returns the final dot-suffix of `original`, dot included, or `.png` when the
/// name is missing or has no dot. Case is preserved.
pub fn photo_extension(original: Option<&str>) -> &str {
    match original.and_then(|name| name.rfind('.').map(|pos| &name[pos..])) {
        Some(ext) => ext,
        None => DEFAULT_PHOTO_EXTENSION,
    }
}

/// Name under which a contact's photo is stored: `{id}{extension}`.
///
/// Fails when the extension taken from the uploaded name cannot be stored,
/// e.g. `a.b/c` would yield `{id}.b/c`.
pub fn photo_file_name(contact_id: &str, original: Option<&str>) -> Result<String, AppError> {
    let file_name = format!("{contact_id}{}", photo_extension(original));
    match validate_key(&file_name) {
        Ok(_) => Ok(file_name),
        Err(StorageError::InvalidKey(reason)) => Err(AppError::Validation(format!(
            "Uploaded file name '{}' cannot be stored: {reason}",
            original.unwrap_or_default()
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Content type served for a stored photo: JPEG for `.jpg`/`.jpeg`, PNG otherwise.
pub fn photo_content_type(file_name: &str) -> &'static str {
    match mime_guess::from_path(file_name).first() {
        Some(mime) if mime == mime_guess::mime::IMAGE_JPEG => "image/jpeg",
        _ => "image/png",
    }
}
