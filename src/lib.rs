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

//! # Azure Drive
//!
//! A filesystem-shaped storage driver for Azure Blob Storage.
//!
//! Azure Drive exposes one container behind a uniform driver contract:
//! exists, get (text, bytes, or stream), put (buffer or stream), delete,
//! server-side copy and rename, stat, flat listing, and direct or SAS-signed
//! URLs. Every operation is a single translated call against the
//! `object_store` Azure client; the driver adds no caching, no retries of
//! its own, and no coordination between concurrent calls.
//!
//! ## Features
//!
//! - **Uniform error taxonomy**: every missing-object condition surfaces as
//!   one distinguished not-found kind; everything else keeps the provider
//!   error's classification and source chain
//! - **Streaming both ways**: lazy byte streams for downloads, chunked block
//!   upload for streamed puts
//! - **Signed URLs**: time-boxed, verb-scoped SAS grants (default 900 s)
//! - **Substitutable backend**: the blob client and signer sit behind narrow
//!   handles, so tests run against in-memory or local-filesystem stores
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use azure_drive::{StorageConfig, StorageDriverFactory};
//! use object_store::PutPayload;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StorageConfig::new("myaccount", "ACCOUNT_KEY", "mycontainer");
//! let driver = StorageDriverFactory::from_config(config)?;
//!
//! driver.put("docs/hello.txt", PutPayload::from("hello")).await?;
//! let response = driver.get("docs/hello.txt").await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```
//!
//! ### Signed URLs
//!
//! ```rust,no_run
//! use azure_drive::{SignedUrlOptions, StorageConfig, StorageDriverFactory};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StorageConfig::new("myaccount", "ACCOUNT_KEY", "mycontainer");
//! let driver = StorageDriverFactory::from_config(config)?;
//!
//! let options = SignedUrlOptions {
//!     expires_in: Duration::from_secs(60),
//!     ..SignedUrlOptions::default()
//! };
//! let grant = driver.signed_url("docs/hello.txt", options).await?;
//! println!("{}", grant.url);
//! # Ok(())
//! # }
//! ```
//!
//! ### Azurite / emulators
//!
//! ```rust,no_run
//! use azure_drive::StorageConfig;
//!
//! let config = StorageConfig::new("devstoreaccount1", "ACCOUNT_KEY", "mycontainer")
//!     .with_option("endpoint", "http://127.0.0.1:10000/devstoreaccount1")
//!     .with_option("allow_http", "true");
//! ```
//!
//! ## Modules
//!
//! - [`storage`] - The driver contract, the Azure adapter, configuration, and errors

pub mod storage;

// Re-export commonly used types
pub use storage::{
    AzureBlobDriver, ByteStream, BytesResponse, ContentResponse, DeleteResponse, ExistsResponse,
    FileMetadata, PutResponse, RenameOutcome, SignedUrlOptions, SignedUrlResponse, StorageConfig,
    StorageDriver, StorageDriverFactory, StorageError, StorageResult,
};
