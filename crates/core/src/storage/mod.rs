//! Storage service for item attachments using Apache OpenDAL.
//!
//! Attachments are never proxied through the backend: clients receive a
//! time-limited presigned PUT URL for an object keyed by the item ID and upload
//! directly to the bucket.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! │                   (Unified Storage API)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.presign_write("item-id", ttl)  ->  PUT https://.../item-id?… │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{PresignedUrl, StorageService};
