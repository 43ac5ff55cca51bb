use axum::http::{HeaderMap, header};

use crate::config::ServerConfig;

/// Base URL (scheme, authority and context path, no trailing slash) used to
/// build links back to this server.
///
/// Prefers the configured `server.public_url`, then the request's `Host`
/// header, then the bind address.
pub fn public_base_url(config: &ServerConfig, headers: &HeaderMap) -> String {
    if let Some(url) = config.public_url.as_deref()
        && !url.trim().is_empty()
    {
        return url.trim().trim_end_matches('/').to_string();
    }

    if let Some(host) = headers.get(header::HOST).and_then(|h| h.to_str().ok())
        && !host.is_empty()
    {
        return format!("http://{host}");
    }

    format!("http://{}:{}", config.host, config.port)
}

/// Public URL of a stored contact photo.
pub fn photo_url(base_url: &str, file_name: &str) -> String {
    format!("{base_url}/contacts/image/{file_name}")
}
