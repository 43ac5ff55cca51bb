use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder, SqliteQueryBuilder};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr,
};
use tracing::{info, warn};

use crate::entity::contact;

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    // Set connection pool options
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    sync_schema(&db).await?;

    Ok(db)
}

/// Create or update tables for every registered entity, then ensure indexes.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.get_schema_registry("contacts_server::entity::*")
        .sync(db)
        .await?;
    ensure_indexes(db).await;
    Ok(())
}

/// Listings sort by name, so keep an index on it.
pub async fn ensure_indexes(db: &DatabaseConnection) {
    let index = Index::create()
        .if_not_exists()
        .name("idx_contact_name")
        .table(contact::Entity)
        .col(contact::Column::Name)
        .to_owned();

    let stmt = match db.get_database_backend() {
        DbBackend::Sqlite => index.to_string(SqliteQueryBuilder),
        _ => index.to_string(PostgresQueryBuilder),
    };

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_contact_name exists"),
        Err(e) => warn!("Failed to create index idx_contact_name: {}", e),
    }
}
