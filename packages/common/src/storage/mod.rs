mod error;
mod key;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use key::validate_key;
pub use traits::{BlobStore, BoxReader};
