use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/contacts", contact_routes(config))
}

fn contact_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::contact::upload_photo))
        .layer(handlers::contact::photo_upload_body_limit(
            config.storage.max_photo_size,
        ));

    OpenApiRouter::new()
        .routes(routes!(
            handlers::contact::list_contacts,
            handlers::contact::create_contact
        ))
        .routes(routes!(
            handlers::contact::get_contact,
            handlers::contact::delete_contact
        ))
        .routes(routes!(handlers::contact::get_photo))
        .merge(upload)
}
