use serde::{Deserialize, Serialize};

use crate::entity::contact;

use super::shared::Pagination;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Request body for creating a contact. Unknown fields (including `id` and
/// `photoUrl`) are ignored.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    #[schema(example = "Engineer")]
    pub title: Option<String>,
    #[schema(example = "+55 11 91234-5678")]
    pub phone: Option<String>,
    #[schema(example = "Rua Augusta 100, São Paulo")]
    pub address: Option<String>,
    #[schema(example = "Active")]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: String,
    #[schema(example = "Ana Souza")]
    pub name: String,
    pub email: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    /// Public URL of the contact photo, null until one is uploaded.
    #[schema(example = "http://localhost:8080/contacts/image/01936f0e-1234-7abc-8000-000000000001.png")]
    pub photo_url: Option<String>,
}

impl From<contact::Model> for ContactResponse {
    fn from(model: contact::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            title: model.title,
            phone: model.phone,
            address: model.address,
            status: model.status,
            photo_url: model.photo_url,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContactListResponse {
    pub data: Vec<ContactResponse>,
    pub pagination: Pagination,
}

/// Query parameters for listing contacts.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactListQuery {
    /// Page number (0-based, default 0).
    #[param(example = 0)]
    pub page: Option<u64>,
    /// Items per page (1-100, default 10).
    #[param(example = 10)]
    pub size: Option<u64>,
}

impl ContactListQuery {
    /// Resolve defaults and clamp the page size.
    pub fn resolve(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(0);
        let size = self
            .size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, size)
    }
}

/// Query parameters for uploading a contact photo.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PhotoUploadQuery {
    /// Contact ID.
    pub id: String,
}
