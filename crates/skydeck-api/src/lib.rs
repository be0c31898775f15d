//! Raw async clients for the Skydeck hosted content store: the document
//! service, the blob service, and the identity endpoints. Wire-level types
//! only -- typed domain translation lives in `skydeck-core`.

pub mod auth;
pub mod blobs;
pub mod documents;
pub mod error;
pub mod transport;

pub use auth::{AuthClient, Session};
pub use blobs::BlobClient;
pub use documents::{Document, DocumentClient};
pub use error::Error;
pub use transport::TransportConfig;
