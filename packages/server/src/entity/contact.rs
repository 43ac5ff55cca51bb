use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact")]
pub struct Model {
    /// UUIDv7 in canonical text form, assigned on insert.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    // Contact details, stored verbatim.
    pub email: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,

    /// Public URL of the uploaded photo. Only written by the photo upload.
    pub photo_url: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
