// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use super::config::StorageConfig;
use super::driver::{
    string_to_path, ByteStream, BytesResponse, ContentResponse, DeleteResponse, ExistsResponse,
    FileMetadata, PutResponse, RenameOutcome, SignedUrlOptions, SignedUrlResponse, StorageDriver,
};
use super::error::{StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use object_store::azure::{MicrosoftAzure, MicrosoftAzureBuilder};
use object_store::signer::Signer;
use object_store::{
    ClientOptions, MultipartUpload, ObjectStore, PutPayload, PutPayloadMut, RetryConfig,
};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Block size for streamed uploads; body chunks are coalesced up to this size
/// before each part upload.
const UPLOAD_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// Storage driver backed by an Azure blob container
///
/// Holds three collaborator handles for its whole lifetime: the
/// container-scoped object store, the shared-key URL signer, and the
/// container base URL. The adapter itself is stateless; concurrent calls
/// are safe because the underlying client is.
pub struct AzureBlobDriver {
    config: StorageConfig,
    store: Arc<dyn ObjectStore>,
    signer: Arc<dyn Signer>,
    container_url: Url,
}

impl AzureBlobDriver {
    /// Create a new driver from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Driver configuration with account identity and transport options
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(AzureBlobDriver)` - A configured driver ready to use
    /// * `Err(StorageError)` - If the Azure client cannot be initialized
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The account key is not a valid shared-key credential
    /// * The configured endpoint is not a valid URL
    /// * The Azure client cannot be created
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let azure = Arc::new(Self::build_store(&config)?);
        let container_url = Self::build_container_url(&config)?;

        Ok(Self {
            store: azure.clone(),
            signer: azure,
            config,
            container_url,
        })
    }

    /// Create a driver over externally supplied collaborator handles.
    ///
    /// This is the substitution seam: any `ObjectStore` implementation (an
    /// in-memory store, a local filesystem) and any `Signer` can stand in
    /// for the Azure client, so translation logic runs without a network.
    ///
    /// # Errors
    ///
    /// This function will return an error if the configured endpoint is not
    /// a valid URL.
    pub fn with_backend(
        config: StorageConfig,
        store: Arc<dyn ObjectStore>,
        signer: Arc<dyn Signer>,
    ) -> StorageResult<Self> {
        let container_url = Self::build_container_url(&config)?;

        Ok(Self {
            config,
            store,
            signer,
            container_url,
        })
    }

    /// Get the underlying object store handle, for callers that need to go
    /// beneath the driver contract.
    pub fn store(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.store)
    }

    /// Get the driver configuration.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Build the Azure client from configuration.
    ///
    /// # Errors
    ///
    /// This function will return an error if required configuration is
    /// invalid or the client cannot be created.
    fn build_store(config: &StorageConfig) -> StorageResult<MicrosoftAzure> {
        let mut builder = MicrosoftAzureBuilder::new()
            .with_account(config.account_name.as_str())
            .with_container_name(config.container.as_str())
            .with_access_key(config.account_key())
            .with_client_options(Self::build_client_options(config))
            .with_retry(Self::build_retry_options(config));

        for (key, value) in &config.options {
            match key.as_str() {
                "endpoint" => builder = builder.with_endpoint(value.clone()),
                // Already handled by `build_client_options` and `build_retry_options`
                "allow_http" | "timeout" | "connect_timeout" | "max_retries" | "retry_timeout"
                | "pool_idle_timeout" | "pool_max_idle_per_host" => (),
                _ => {
                    warn!("Unknown Azure option: {}", key);
                }
            }
        }

        builder
            .build()
            .map_err(|e| StorageError::Config(format!("Failed to create Azure client: {}", e)))
    }

    /// Build connection options from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Driver configuration with optional timeout and connection settings
    ///
    /// # Returns
    ///
    /// A `ClientOptions` instance configured with timeout and connection settings from the config.
    fn build_client_options(config: &StorageConfig) -> ClientOptions {
        let mut client_options = ClientOptions::default();
        if let Some(timeout_str) = config.options.get("timeout") {
            if timeout_str == "0" || timeout_str == "disabled" {
                client_options = client_options.with_timeout_disabled();
            } else if let Ok(sec) = timeout_str.parse::<u64>() {
                client_options = client_options.with_timeout(Duration::from_secs(sec))
            }
        };
        if let Some(connect_timeout_str) = config.options.get("connect_timeout") {
            if connect_timeout_str == "0" || connect_timeout_str == "disabled" {
                client_options = client_options.with_connect_timeout_disabled();
            } else if let Ok(sec) = connect_timeout_str.parse::<u64>() {
                client_options = client_options.with_connect_timeout(Duration::from_secs(sec))
            }
        }
        if let Some(pool_idle_timeout_str) = config.options.get("pool_idle_timeout") {
            if let Ok(sec) = pool_idle_timeout_str.parse::<u64>() {
                client_options = client_options.with_pool_idle_timeout(Duration::from_secs(sec))
            }
        }
        if let Some(pool_max_idle_per_host_str) = config.options.get("pool_max_idle_per_host") {
            if let Ok(max_idle) = pool_max_idle_per_host_str.parse::<usize>() {
                client_options = client_options.with_pool_max_idle_per_host(max_idle)
            }
        }
        if let Some(allow_http_str) = config.options.get("allow_http") {
            if allow_http_str.to_lowercase() == "true" {
                client_options = client_options.with_allow_http(true)
            }
        }
        client_options
    }

    /// Build transport retry options from configuration.
    ///
    /// The driver performs no retries of its own; this only configures the
    /// underlying client's policy.
    ///
    /// # Returns
    ///
    /// A `RetryConfig` instance configured with retry settings from the config.
    fn build_retry_options(config: &StorageConfig) -> RetryConfig {
        let default_retry_config = RetryConfig::default();
        let max_retries = config
            .options
            .get("max_retries")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(default_retry_config.max_retries);
        let retry_timeout = config
            .options
            .get("retry_timeout")
            .and_then(|s| Some(Duration::from_secs(s.parse::<u64>().ok()?)))
            .unwrap_or(default_retry_config.retry_timeout);
        RetryConfig {
            backoff: Default::default(),
            max_retries,
            retry_timeout,
        }
    }

    /// Build the container base URL from the account name or a custom
    /// endpoint (Azurite and sovereign-cloud deployments carry the account
    /// in the endpoint path).
    fn build_container_url(config: &StorageConfig) -> StorageResult<Url> {
        let endpoint = match config.get_option("endpoint") {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.blob.core.windows.net", config.account_name),
        };

        let mut url = Url::parse(&endpoint)?;
        url.path_segments_mut()
            .map_err(|_| StorageError::Config(format!("Endpoint is not a base URL: {}", endpoint)))?
            .pop_if_empty()
            .push(&config.container);
        Ok(url)
    }
}

#[async_trait]
impl StorageDriver for AzureBlobDriver {
    fn container(&self) -> &str {
        &self.config.container
    }

    async fn exists(&self, location: &str) -> StorageResult<ExistsResponse> {
        let path = string_to_path(location);
        match self.store.head(&path).await {
            Ok(_) => Ok(ExistsResponse { exists: true }),
            Err(object_store::Error::NotFound { .. }) => Ok(ExistsResponse { exists: false }),
            Err(e) => Err(StorageError::from_object_store(e, location)),
        }
    }

    async fn get(&self, location: &str) -> StorageResult<ContentResponse> {
        let response = self.get_bytes(location).await?;
        let content =
            String::from_utf8(response.content.to_vec()).map_err(|e| StorageError::Utf8 {
                path: location.to_string(),
                source: e,
            })?;

        Ok(ContentResponse {
            content,
            meta: response.meta,
        })
    }

    async fn get_bytes(&self, location: &str) -> StorageResult<BytesResponse> {
        let path = string_to_path(location);
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| StorageError::from_object_store(e, location))?;

        let meta = result.meta.clone();
        let content = result
            .bytes()
            .await
            .map_err(|e| StorageError::from_object_store(e, location))?;

        Ok(BytesResponse { content, meta })
    }

    fn get_stream(&self, location: &str) -> ByteStream {
        let store = Arc::clone(&self.store);
        let path = string_to_path(location);
        let location = location.to_string();

        // The handle is returned before the fetch runs; a failed fetch is
        // delivered as the first item on the stream.
        stream::once(async move {
            match store.get(&path).await {
                Ok(result) => {
                    let loc = location.clone();
                    result
                        .into_stream()
                        .map(move |chunk| {
                            chunk.map_err(|e| StorageError::from_object_store(e, &loc))
                        })
                        .boxed()
                }
                Err(e) => {
                    let error = StorageError::from_object_store(e, &location);
                    stream::once(async move { Err(error) }).boxed()
                }
            }
        })
        .flatten()
        .boxed()
    }

    async fn put(&self, location: &str, payload: PutPayload) -> StorageResult<PutResponse> {
        let path = string_to_path(location);
        let result = self
            .store
            .put(&path, payload)
            .await
            .map_err(|e| StorageError::from_object_store(e, location))?;

        debug!("put location={} e_tag={:?}", location, result.e_tag);
        Ok(PutResponse::from(result))
    }

    async fn put_stream(
        &self,
        location: &str,
        mut body: BoxStream<'static, std::io::Result<Bytes>>,
    ) -> StorageResult<PutResponse> {
        let path = string_to_path(location);
        let mut upload = self
            .store
            .put_multipart(&path)
            .await
            .map_err(|e| StorageError::from_object_store(e, location))?;

        let mut buffer = PutPayloadMut::new();
        let mut buffered: usize = 0;

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(StorageError::Io(e));
                }
            };

            buffered += chunk.len();
            buffer.push(chunk);

            if buffered >= UPLOAD_CHUNK_SIZE {
                let part = std::mem::replace(&mut buffer, PutPayloadMut::new()).freeze();
                buffered = 0;
                if let Err(e) = upload.put_part(part).await {
                    let _ = upload.abort().await;
                    return Err(StorageError::from_object_store(e, location));
                }
            }
        }

        if buffered > 0 {
            if let Err(e) = upload.put_part(buffer.freeze()).await {
                let _ = upload.abort().await;
                return Err(StorageError::from_object_store(e, location));
            }
        }

        let result = match upload.complete().await {
            Ok(result) => result,
            Err(e) => {
                let _ = upload.abort().await;
                return Err(StorageError::from_object_store(e, location));
            }
        };

        debug!("put_stream location={} e_tag={:?}", location, result.e_tag);
        Ok(PutResponse::from(result))
    }

    async fn delete(&self, location: &str) -> StorageResult<DeleteResponse> {
        let path = string_to_path(location);
        match self.store.delete(&path).await {
            Ok(()) => Ok(DeleteResponse { was_deleted: true }),
            Err(object_store::Error::NotFound { .. }) => {
                Ok(DeleteResponse { was_deleted: false })
            }
            Err(e) => Err(StorageError::from_object_store(e, location)),
        }
    }

    async fn copy(&self, src: &str, dest: &str) -> StorageResult<()> {
        let from = string_to_path(src);
        let to = string_to_path(dest);
        self.store
            .copy(&from, &to)
            .await
            .map_err(|e| StorageError::from_object_store(e, src))
    }

    async fn rename(&self, src: &str, dest: &str) -> StorageResult<RenameOutcome> {
        self.copy(src, dest).await?;

        let from = string_to_path(src);
        match self.store.delete(&from).await {
            // A source that vanished between copy and delete still leaves the
            // rename complete.
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(RenameOutcome::Complete),
            Err(e) => {
                let error = StorageError::from_object_store(e, src);
                warn!(
                    "rename '{}' -> '{}' copied but failed to delete source: {}",
                    src, dest, error
                );
                Ok(RenameOutcome::SourceRetained { error })
            }
        }
    }

    async fn stat(&self, location: &str) -> StorageResult<FileMetadata> {
        let path = string_to_path(location);
        let meta = self
            .store
            .head(&path)
            .await
            .map_err(|e| StorageError::from_object_store(e, location))?;

        Ok(FileMetadata::from(meta))
    }

    fn flat_list(&self, prefix: Option<&str>) -> BoxStream<'_, StorageResult<FileMetadata>> {
        let prefix_path = prefix.filter(|p| !p.is_empty()).map(string_to_path);
        let listed = prefix.unwrap_or_default().to_string();

        self.store
            .list(prefix_path.as_ref())
            .map(move |entry| match entry {
                Ok(meta) => Ok(FileMetadata::from(meta)),
                Err(e) => Err(StorageError::from_object_store(e, &listed)),
            })
            .boxed()
    }

    fn url(&self, location: &str) -> Url {
        let mut url = self.container_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.extend(location.split('/'));
        }
        url
    }

    async fn signed_url(
        &self,
        location: &str,
        options: SignedUrlOptions,
    ) -> StorageResult<SignedUrlResponse> {
        let path = string_to_path(location);
        let url = self
            .signer
            .signed_url(options.method, &path, options.expires_in)
            .await
            .map_err(|e| StorageError::from_object_store(e, location))?;

        Ok(SignedUrlResponse {
            url,
            expires_in: options.expires_in,
        })
    }
}

impl Debug for AzureBlobDriver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AzureBlobDriver(container={}, config={:?})",
            self.config.container, self.config
        )
    }
}
