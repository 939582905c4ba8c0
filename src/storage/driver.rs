// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may obtain a copy
// of the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under
// the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
// OF ANY KIND, either express or implied. See the License for the specific language
// governing permissions and limitations under the License.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use http::Method;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectMeta, PutPayload, PutResult};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;
use url::Url;

use super::error::{StorageError, StorageResult};

/// Default validity window for signed URLs
pub const DEFAULT_SIGNED_URL_EXPIRY: Duration = Duration::from_secs(900);

/// Metadata about an object in storage, returned by `stat` and listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Full key of the object within the container
    pub path: String,

    /// Object size in bytes
    pub size: u64,

    /// Last modified timestamp
    pub last_modified: DateTime<Utc>,
}

impl From<ObjectMeta> for FileMetadata {
    fn from(meta: ObjectMeta) -> Self {
        Self {
            path: meta.location.to_string(),
            size: meta.size,
            last_modified: meta.last_modified,
        }
    }
}

/// Result of an existence check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Text content of an object, with the provider metadata that came with it
#[derive(Debug, Clone)]
pub struct ContentResponse {
    pub content: String,
    pub meta: ObjectMeta,
}

/// Raw byte content of an object, with the provider metadata that came with it
#[derive(Debug, Clone)]
pub struct BytesResponse {
    pub content: Bytes,
    pub meta: ObjectMeta,
}

/// Acknowledgment of a completed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutResponse {
    /// Entity tag of the committed blob, if the provider returned one
    pub e_tag: Option<String>,

    /// Version identifier of the committed blob, if the provider returned one
    pub version: Option<String>,
}

impl From<PutResult> for PutResponse {
    fn from(result: PutResult) -> Self {
        Self {
            e_tag: result.e_tag,
            version: result.version,
        }
    }
}

/// Result of a delete. Deleting a missing key is not an error; it reports
/// `was_deleted: false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResponse {
    pub was_deleted: bool,
}

/// Outcome of a rename (copy followed by source delete)
///
/// A failed source delete after a successful copy leaves both objects in
/// place; that state is reported here instead of being swallowed.
#[derive(Debug)]
pub enum RenameOutcome {
    /// Copy and source delete both completed
    Complete,

    /// The copy completed but the source could not be deleted
    SourceRetained { error: StorageError },
}

impl RenameOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, RenameOutcome::Complete)
    }
}

/// A signed capability URL and the window it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrlResponse {
    pub url: Url,
    pub expires_in: Duration,
}

/// Per-call options for signed URL generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrlOptions {
    /// Validity window starting at issuance. Defaults to 900 seconds.
    pub expires_in: Duration,

    /// HTTP verb the grant is scoped to. Defaults to `GET`.
    pub method: Method,
}

impl Default for SignedUrlOptions {
    fn default() -> Self {
        Self {
            expires_in: DEFAULT_SIGNED_URL_EXPIRY,
            method: Method::GET,
        }
    }
}

/// A lazily-produced stream of object bytes
pub type ByteStream = BoxStream<'static, StorageResult<Bytes>>;

/// Filesystem-shaped contract for a blob storage backend
///
/// Every operation is a single stateless round trip against the backing
/// store; concurrent calls are independent and unordered. Operations that
/// return a stream (`get_stream`, `flat_list`) return it immediately and
/// suspend lazily as it is polled.
#[async_trait]
pub trait StorageDriver: Send + Sync {
    /// Get the container this driver addresses.
    fn container(&self) -> &str;

    /// Check whether an object exists.
    ///
    /// # Arguments
    ///
    /// * `location` - Object key within the container
    ///
    /// # Errors
    ///
    /// This function will return an error if the existence check itself fails
    /// (a missing object is `Ok` with `exists: false`, not an error).
    async fn exists(&self, location: &str) -> StorageResult<ExistsResponse>;

    /// Fetch an object and decode it as UTF-8 text.
    ///
    /// # Arguments
    ///
    /// * `location` - Object key within the container
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The object does not exist (`StorageError::NotFound`)
    /// * The content is not valid UTF-8 (`StorageError::Utf8`)
    /// * Network or storage access errors occur
    async fn get(&self, location: &str) -> StorageResult<ContentResponse>;

    /// Fetch an object's raw bytes.
    ///
    /// # Arguments
    ///
    /// * `location` - Object key within the container
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The object does not exist (`StorageError::NotFound`)
    /// * Network or storage access errors occur
    async fn get_bytes(&self, location: &str) -> StorageResult<BytesResponse>;

    /// Open a byte stream over an object.
    ///
    /// The stream handle is returned immediately; the backing fetch happens
    /// as the stream is polled. A fetch failure (including a missing object)
    /// is delivered as an error item on the stream, never raised at call
    /// time.
    fn get_stream(&self, location: &str) -> ByteStream;

    /// Upload a whole payload as one block upload.
    ///
    /// # Arguments
    ///
    /// * `location` - Object key within the container
    /// * `payload` - Content to store; overwrites any existing object
    ///
    /// # Errors
    ///
    /// This function will return an error if the upload fails.
    async fn put(&self, location: &str, payload: PutPayload) -> StorageResult<PutResponse>;

    /// Upload from a byte stream using chunked block upload, without
    /// buffering the whole body in memory.
    ///
    /// Parts are uploaded sequentially as chunks accumulate. If the body
    /// yields an error, the partial upload is aborted and the error is
    /// returned as `StorageError::Io`.
    async fn put_stream(
        &self,
        location: &str,
        body: BoxStream<'static, std::io::Result<Bytes>>,
    ) -> StorageResult<PutResponse>;

    /// Delete an object if it exists.
    ///
    /// # Arguments
    ///
    /// * `location` - Object key within the container
    ///
    /// # Returns
    ///
    /// `was_deleted` reflects whether an object actually existed and was
    /// removed; deleting a missing key succeeds with `was_deleted: false`.
    ///
    /// # Errors
    ///
    /// This function will return an error only on transport-level faults.
    async fn delete(&self, location: &str) -> StorageResult<DeleteResponse>;

    /// Server-side copy within the container, complete when the call returns.
    ///
    /// # Arguments
    ///
    /// * `src` - Source object key
    /// * `dest` - Destination object key; overwritten if present
    ///
    /// # Errors
    ///
    /// This function will return an error if the copy fails; the error
    /// carries the source key as its location.
    async fn copy(&self, src: &str, dest: &str) -> StorageResult<()>;

    /// Move an object: server-side copy, then delete the source.
    ///
    /// # Returns
    ///
    /// A [`RenameOutcome`]: `Complete` when both steps succeeded, or
    /// `SourceRetained` when the copy landed but the source delete failed.
    ///
    /// # Errors
    ///
    /// This function will return an error if the copy step fails; the
    /// destination is not cleaned up in that case.
    async fn rename(&self, src: &str, dest: &str) -> StorageResult<RenameOutcome>;

    /// Get metadata for an object.
    ///
    /// # Arguments
    ///
    /// * `location` - Object key within the container
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The object does not exist (`StorageError::NotFound`)
    /// * Network or storage access errors occur
    async fn stat(&self, location: &str) -> StorageResult<FileMetadata>;

    /// Lazily enumerate objects in the container.
    ///
    /// # Arguments
    ///
    /// * `prefix` - When set and non-empty, only keys under this prefix are
    ///   listed, using the provider's native prefix listing
    ///
    /// Each call produces a fresh enumeration; enumeration failures arrive
    /// as error items on the stream.
    fn flat_list(&self, prefix: Option<&str>) -> BoxStream<'_, StorageResult<FileMetadata>>;

    /// Get the direct (unsigned) URL of an object. Synchronous and
    /// infallible; no request is made.
    fn url(&self, location: &str) -> Url;

    /// Generate a time-boxed signed URL for an object.
    ///
    /// # Arguments
    ///
    /// * `location` - Object key within the container
    /// * `options` - Validity window (default 900 s) and HTTP verb (default `GET`)
    ///
    /// The driver does not track or revoke issued grants; expiry is enforced
    /// by the service.
    ///
    /// # Errors
    ///
    /// This function will return an error if the signing call fails.
    async fn signed_url(
        &self,
        location: &str,
        options: SignedUrlOptions,
    ) -> StorageResult<SignedUrlResponse>;
}

impl Debug for dyn StorageDriver {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "StorageDriver(container={})", self.container())
    }
}

/// Helper function to create an ObjectPath from a string
pub(crate) fn string_to_path(s: &str) -> ObjectPath {
    ObjectPath::from(s)
}
