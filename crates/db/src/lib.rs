//! Data-access layer over a DynamoDB table.
//!
//! This crate provides:
//! - Client construction from [`TableConfig`]
//! - Table bootstrap for local and test environments
//! - [`DynamoTodoRepository`], the table-backed [`todo_core::todo::TodoRepository`]

pub mod repositories;

pub use aws_sdk_dynamodb::Client;
pub use repositories::DynamoTodoRepository;

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::error::{BuildError, DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use thiserror::Error;
use todo_shared::config::TableConfig;
use tracing::info;

use repositories::todo::{ITEM_ID, OWNER_ID};

/// Errors raised while bootstrapping the table.
#[derive(Debug, Error)]
pub enum DbError {
    /// A request could not be assembled.
    #[error("invalid request: {0}")]
    Build(#[from] BuildError),

    /// The service rejected the table creation.
    #[error("failed to create table {table}: {message}")]
    CreateTable {
        /// Table name.
        table: String,
        /// Service error detail.
        message: String,
    },
}

/// Builds a client from the ambient AWS configuration.
///
/// `endpoint_url`, when set, overrides the service endpoint (e.g. DynamoDB Local).
pub async fn connect(config: &TableConfig) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(endpoint) = config.endpoint_url.as_deref() {
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

/// Creates the items table keyed by `(ownerId, itemId)` if it does not exist yet.
///
/// Returns `true` if the table was created by this call.
///
/// # Errors
///
/// Returns `DbError::CreateTable` if the service rejects the request for any
/// reason other than the table already existing.
pub async fn ensure_table(client: &Client, table_name: &str) -> Result<bool, DbError> {
    let result = client
        .create_table()
        .table_name(table_name)
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(OWNER_ID)
                .attribute_type(ScalarAttributeType::S)
                .build()?,
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(ITEM_ID)
                .attribute_type(ScalarAttributeType::S)
                .build()?,
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(OWNER_ID)
                .key_type(KeyType::Hash)
                .build()?,
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(ITEM_ID)
                .key_type(KeyType::Range)
                .build()?,
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match result {
        Ok(_) => {
            info!(table = %table_name, "Created table");
            Ok(true)
        }
        Err(SdkError::ServiceError(ref inner))
            if matches!(inner.err(), CreateTableError::ResourceInUseException(_)) =>
        {
            info!(table = %table_name, "Table already exists");
            Ok(false)
        }
        Err(e) => Err(DbError::CreateTable {
            table: table_name.to_string(),
            message: DisplayErrorContext(&e).to_string(),
        }),
    }
}
