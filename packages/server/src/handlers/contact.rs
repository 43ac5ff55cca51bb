use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, body::Body};
use tokio_util::io::ReaderStream;
use tracing::{info, instrument};

use crate::contact::contact_service;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppQuery};
use crate::models::contact::*;
use crate::models::shared::Pagination;
use crate::state::AppState;
use crate::utils::filename::{photo_content_type, photo_file_name};
use crate::utils::url::{photo_url, public_base_url};

/// Room for multipart boundaries and part headers on top of the photo itself.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn photo_upload_body_limit(max_photo_size: u64) -> DefaultBodyLimit {
    let limit = max_photo_size.saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Contacts",
    operation_id = "createContact",
    summary = "Create a new contact",
    description = "Creates a contact. The server assigns the `id`; `photoUrl` is only set by the photo upload.",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse,
            headers(("Location" = String, description = "Path of the new contact, `/contacts/{id}`"))),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_contact(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = contact_service(&state.db).create(payload).await?;
    let location = format!("/contacts/{}", model.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ContactResponse::from(model)),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Contacts",
    operation_id = "listContacts",
    summary = "List contacts with pagination",
    description = "Returns one page of contacts sorted by name. Pages past the end are empty.",
    params(ContactListQuery),
    responses(
        (status = 200, description = "Page of contacts", body = ContactListResponse),
        (status = 400, description = "Invalid query parameters (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_contacts(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ContactListQuery>,
) -> Result<Json<ContactListResponse>, AppError> {
    let (page, size) = query.resolve();

    let (contacts, total) = contact_service(&state.db).list(page, size).await?;

    Ok(Json(ContactListResponse {
        data: contacts.into_iter().map(Into::into).collect(),
        pagination: Pagination::new(page, size, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Contacts",
    operation_id = "getContact",
    summary = "Get a contact by ID",
    params(("id" = String, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact details", body = ContactResponse),
        (status = 404, description = "Contact not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContactResponse>, AppError> {
    let model = contact_service(&state.db)
        .get_by_id(&id)
        .await?
        .ok_or_else(contact_not_found)?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/photo",
    tag = "Contacts",
    operation_id = "uploadContactPhoto",
    summary = "Upload a contact photo",
    description = "Stores the `file` multipart field as `{id}{extension}` in the photo directory, \
        replacing any previous photo with that name, and records its URL on the contact. \
        The extension is taken from the uploaded file name and defaults to `.png`.",
    params(PhotoUploadQuery),
    request_body(content_type = "multipart/form-data", description = "Photo upload in the `file` field"),
    responses(
        (status = 200, description = "Public URL of the stored photo", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing file, bad file name or file too large (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Contact not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query, headers, multipart), fields(id = %query.id))]
pub async fn upload_photo(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PhotoUploadQuery>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<String, AppError> {
    let id = query.id;
    info!("Uploading photo for contact ID: {}", id);

    let service = contact_service(&state.db);
    if service.get_by_id(&id).await?.is_none() {
        return Err(contact_not_found());
    }

    let max_size = state.config.storage.max_photo_size;
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;
    let mut too_large = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            let original_name = field.file_name().map(|s| s.to_string());
            match read_field(field, max_size).await? {
                Some(data) => upload = Some((original_name, data)),
                None => too_large = true,
            }
        }
        // Ignore unknown fields.
    }

    if too_large {
        return Err(AppError::Validation(format!(
            "File exceeds maximum size of {max_size} bytes"
        )));
    }

    let (original_name, data) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let file_name = photo_file_name(&id, original_name.as_deref())?;
    state.blob_store.put(&file_name, &data).await?;

    let url = photo_url(
        &public_base_url(&state.config.server, &headers),
        &file_name,
    );
    info!("Photo URL: {}", url);

    // The contact may have been deleted while the file was being written.
    if !service.update_photo_url(&id, &url).await? {
        return Err(contact_not_found());
    }

    Ok(url)
}

#[utoipa::path(
    get,
    path = "/image/{filename}",
    tag = "Contacts",
    operation_id = "getContactPhoto",
    summary = "Download a contact photo",
    description = "Streams a stored photo. Served as `image/jpeg` for `.jpg`/`.jpeg` names and `image/png` otherwise.",
    params(("filename" = String, Path, description = "Stored photo file name, `{id}{extension}`")),
    responses(
        (status = 200, description = "Raw image bytes"),
        (status = 400, description = "Invalid file name (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Image not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_photo(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let reader = state.blob_store.get_stream(&filename).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, photo_content_type(&filename))
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Contacts",
    operation_id = "deleteContact",
    summary = "Delete a contact",
    description = "Removes the contact. Its photo file, if any, is left in the photo directory.",
    params(("id" = String, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Confirmation message", body = String, content_type = "text/plain"),
        (status = 404, description = "Contact not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, AppError> {
    if !contact_service(&state.db).delete_by_id(&id).await? {
        return Err(contact_not_found());
    }

    Ok(format!("Contact with ID {id} has been successfully deleted."))
}

fn contact_not_found() -> AppError {
    AppError::NotFound("Contact not found".into())
}

/// Buffer a multipart field. Returns `None` when it grows past `max_size`
/// bytes; the rest of the field is still read and discarded.
async fn read_field(mut field: Field<'_>, max_size: u64) -> Result<Option<Vec<u8>>, AppError> {
    let mut data = Vec::new();
    let mut too_large = false;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
    {
        if too_large {
            continue;
        }
        if (data.len() + chunk.len()) as u64 > max_size {
            too_large = true;
            data = Vec::new();
            continue;
        }
        data.extend_from_slice(&chunk);
    }

    Ok((!too_large).then_some(data))
}
