use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::contact;
use crate::models::contact::CreateContactRequest;

/// Gateway to the `contact` table.
///
/// Every method maps to one statement (listing adds a count), so each call is
/// atomic on its own. Errors are returned as the store reports them.
pub struct ContactService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ContactService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Insert a new contact with a freshly generated ID.
    pub async fn create(&self, request: CreateContactRequest) -> Result<contact::Model, DbErr> {
        let model = contact::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            name: Set(request.name),
            email: Set(request.email),
            title: Set(request.title),
            phone: Set(request.phone),
            address: Set(request.address),
            status: Set(request.status),
            photo_url: Set(None),
        };

        model.insert(self.conn).await
    }

    /// List one page of contacts ordered by name, plus the total row count.
    ///
    /// `page` is 0-based. A page past the end yields an empty list.
    pub async fn list(
        &self,
        page: u64,
        size: u64,
    ) -> Result<(Vec<contact::Model>, u64), DbErr> {
        let total = contact::Entity::find().count(self.conn).await?;

        // Offsets past the last row never reach the database, where they
        // would have to fit in an i64.
        let offset = match page.checked_mul(size) {
            Some(offset) if offset < total => offset,
            _ => return Ok((Vec::new(), total)),
        };

        let contacts = contact::Entity::find()
            .order_by_asc(contact::Column::Name)
            .order_by_asc(contact::Column::Id)
            .offset(offset)
            .limit(size)
            .all(self.conn)
            .await?;

        Ok((contacts, total))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<contact::Model>, DbErr> {
        contact::Entity::find_by_id(id.to_owned())
            .one(self.conn)
            .await
    }

    /// Delete a contact. Returns `false` if no row had this ID.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, DbErr> {
        let result = contact::Entity::delete_by_id(id.to_owned())
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Set `photo_url` without touching any other column.
    ///
    /// Returns `false` if no row had this ID.
    pub async fn update_photo_url(&self, id: &str, url: &str) -> Result<bool, DbErr> {
        let result = contact::Entity::update_many()
            .col_expr(contact::Column::PhotoUrl, Expr::value(url))
            .filter(contact::Column::Id.eq(id))
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Create a ContactService with a DatabaseConnection.
pub fn contact_service(db: &DatabaseConnection) -> ContactService<'_, DatabaseConnection> {
    ContactService::new(db)
}
