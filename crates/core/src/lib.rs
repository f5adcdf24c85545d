//! Core business logic for the todo backend.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the [`todo::TodoRepository`] trait, implemented
//! by the db crate.
//!
//! # Modules
//!
//! - `todo` - Item types, validation and the per-action operations
//! - `attachment` - Presigned upload URLs and attachment recording
//! - `auth` - Bearer-token authorizer and policy documents
//! - `storage` - Object storage access for attachments

pub mod attachment;
pub mod auth;
pub mod storage;
pub mod todo;
