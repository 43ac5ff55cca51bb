mod service;

pub use service::{ContactService, contact_service};
