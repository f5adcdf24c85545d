//! Storage service implementation using Apache OpenDAL.

use std::time::Duration;

use chrono::{DateTime, Utc};
use opendal::{Operator, services};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Presigned URL for upload.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned PUT URL, including its signature query parameters.
    pub url: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
}

impl PresignedUrl {
    /// The same object URL with the signature query parameters stripped.
    #[must_use]
    pub fn public_url(&self) -> &str {
        strip_query(&self.url)
    }
}

/// Storage service for item attachments.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl std::fmt::Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService")
            .field("bucket", &self.config.provider.bucket)
            .field("region", &self.config.provider.region)
            .field("presign_upload_ttl_secs", &self.config.presign_upload_ttl_secs)
            .finish_non_exhaustive()
    }
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let mut builder = services::S3::default()
            .bucket(&provider.bucket)
            .region(&provider.region);
        if let Some(endpoint) = &provider.endpoint {
            builder = builder.endpoint(endpoint);
        }
        if let (Some(key_id), Some(secret)) =
            (&provider.access_key_id, &provider.secret_access_key)
        {
            builder = builder.access_key_id(key_id).secret_access_key(secret);
        }

        Ok(Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish())
    }

    /// Generate a presigned PUT URL for exactly one object key.
    ///
    /// The key must be a single non-empty path segment, so the object URL's last
    /// path segment is the key itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or presigning fails.
    pub async fn presign_upload(&self, key: &str) -> Result<PresignedUrl, StorageError> {
        validate_key(key)?;

        let ttl_secs = self.config.presign_upload_ttl_secs;
        let presigned = self
            .operator
            .presign_write(key, Duration::from_secs(ttl_secs))
            .await
            .map_err(StorageError::from)?;

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            expires_at: i64::try_from(ttl_secs)
                .ok()
                .and_then(chrono::Duration::try_seconds)
                .and_then(|ttl| Utc::now().checked_add_signed(ttl))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        })
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.config.provider.bucket
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let is_valid = !key.is_empty()
        && key
            .chars()
            .all(|c| !c.is_control() && !matches!(c, '/' | '\\' | '?' | '#'));

    if is_valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM_ID: &str = "6ba7b811-9dad-11d1-80b4-00c04fd430c8";

    fn s3_service() -> StorageService {
        let provider = StorageProvider::s3("todo-attachments", "us-east-1")
            .with_endpoint("http://127.0.0.1:9000")
            .with_static_credentials("test-access-key", "test-secret-key");
        StorageService::from_config(StorageConfig::new(provider).with_upload_ttl(300))
            .expect("should create service")
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(
            strip_query("https://b.s3.amazonaws.com/k?X-Amz-Date=1&X-Amz-Signature=2"),
            "https://b.s3.amazonaws.com/k"
        );
        assert_eq!(strip_query("https://b.s3.amazonaws.com/k"), "https://b.s3.amazonaws.com/k");
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key(ITEM_ID).is_ok());
        assert!(validate_key("missing-id").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a?b").is_err());
    }

    #[tokio::test]
    async fn test_presign_upload_scoped_to_key() {
        let service = s3_service();
        let presigned = service.presign_upload(ITEM_ID).await.unwrap();

        assert!(presigned.url.contains("X-Amz-Signature"));
        assert!(presigned.expires_at > Utc::now());

        let public = presigned.public_url();
        assert!(!public.contains('?'));
        assert_eq!(public.rsplit('/').next(), Some(ITEM_ID));
        assert!(presigned.url.starts_with(public));
    }

    #[tokio::test]
    async fn test_presign_upload_rejects_invalid_key() {
        let service = s3_service();
        let err = service.presign_upload("a/b").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
