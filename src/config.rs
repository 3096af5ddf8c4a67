//! Store connection settings.

use crate::error::{Error, Result};
use crate::object_store::ObjectStoreBackend;
use object_store::aws::AmazonS3Builder;
use std::sync::Arc;

/// Where the served objects live.
///
/// Credentials are not part of the config; they are read from the standard
/// `AWS_*` environment variables when the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Bucket name.
    pub bucket: String,
    /// Region, e.g. `us-east-1`.
    pub region: String,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint: Option<String>,
    /// Permit plain-HTTP endpoints.
    pub allow_http: bool,
}

impl StoreConfig {
    /// Config for `bucket` in `region`, without a custom endpoint.
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
            allow_http: false,
        }
    }

    /// Use a custom endpoint instead of AWS.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Allow or refuse plain-HTTP endpoints.
    pub fn with_allow_http(mut self, allow_http: bool) -> Self {
        self.allow_http = allow_http;
        self
    }

    /// Check that the required fields are set.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(Error::Config("bucket name is empty".to_string()));
        }
        if self.region.trim().is_empty() {
            return Err(Error::Config("region is empty".to_string()));
        }
        if let Some(endpoint) = &self.endpoint {
            if endpoint.starts_with("http://") && !self.allow_http {
                return Err(Error::Config(format!(
                    "endpoint {} uses plain HTTP but allow_http is off",
                    endpoint
                )));
            }
        }
        Ok(())
    }

    /// Build an S3 client for this bucket.
    ///
    /// No request is made; connection and credential problems surface on the
    /// first open.
    pub fn build_client(&self) -> Result<ObjectStoreBackend> {
        self.validate()?;

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&self.bucket)
            .with_region(&self.region)
            .with_allow_http(self.allow_http);
        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_endpoint(endpoint);
        }

        let store = builder.build()?;
        Ok(ObjectStoreBackend::new(Arc::new(store)))
    }
}
