//! S3-backed object store.
//!
//! Wraps one bucket and a fixed key prefix; names handed to callers never
//! include the prefix.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::debug;

use picshelf_core::{ObjectStore, StorageError, StoredObject};

/// Object store client backed by an S3-compatible bucket.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3ObjectStore {
    /// Connect using ambient AWS configuration (credentials, region).
    ///
    /// `endpoint` points the client at an S3-compatible service such as
    /// MinIO; path-style addressing is forced in that case because such
    /// services usually do not resolve virtual-host bucket names.
    pub async fn connect(
        bucket: impl Into<String>,
        prefix: impl Into<String>,
        endpoint: Option<&str>,
    ) -> Self {
        let base = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&base);
        if let Some(url) = endpoint {
            builder = builder.endpoint_url(url).force_path_style(true);
        }
        Self::with_client(Client::from_conf(builder.build()), bucket, prefix)
    }

    /// Build a store around an existing client.
    pub fn with_client(
        client: Client,
        bucket: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    fn full_key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

/// Strip the listing prefix from a returned key. Keys outside the prefix are
/// passed through untouched rather than dropped.
fn strip_prefix_once(key: &str, prefix: &str) -> String {
    key.strip_prefix(prefix).unwrap_or(key).to_string()
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list(&self) -> Result<Vec<String>, StorageError> {
        debug!(bucket = %self.bucket, prefix = %self.prefix, "Listing objects");

        let mut names = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(&self.prefix)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StorageError::Backend(e.to_string()))?;
            for object in page.contents() {
                if let Some(key) = object.key() {
                    names.push(strip_prefix_once(key, &self.prefix));
                }
            }
        }

        Ok(names)
    }

    async fn upload(
        &self,
        name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let key = self.full_key(name);
        debug!(bucket = %self.bucket, key = %key, size = bytes.len(), "Uploading object");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn download(&self, name: &str) -> Result<StoredObject, StorageError> {
        let key = self.full_key(name);
        debug!(bucket = %self.bucket, key = %key, "Downloading object");

        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    StorageError::NotFound(name.to_string())
                } else {
                    StorageError::Backend(err.to_string())
                }
            })?;

        let content_type = resp.content_type().map(str::to_string);
        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(StoredObject {
            bytes: data.into_bytes(),
            content_type,
        })
    }
}
