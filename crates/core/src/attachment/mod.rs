//! Attachment helper.
//!
//! Produces a presigned upload URL for the object keyed by an item's ID and
//! records the object's public URL on that item.

mod service;

pub use service::{AttachmentService, AttachmentUrls};
