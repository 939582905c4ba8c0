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

//! Azure blob storage driver
//!
//! This module maps a filesystem-shaped driver contract onto an Azure blob
//! container: get, put, delete, copy, rename, stat, list, direct and signed
//! URLs, and byte streams in both directions.
//!
//! The implementation is purely translational. Each operation forwards to the
//! `object_store` Azure client and normalizes the result and error shapes;
//! protocol, authentication, and retry policy all live in that client.

pub mod azure;
pub mod config;
pub mod driver;
pub mod error;
pub mod factory;

// Public exports
pub use azure::AzureBlobDriver;
pub use config::StorageConfig;
pub use driver::{
    ByteStream, BytesResponse, ContentResponse, DeleteResponse, ExistsResponse, FileMetadata,
    PutResponse, RenameOutcome, SignedUrlOptions, SignedUrlResponse, StorageDriver,
    DEFAULT_SIGNED_URL_EXPIRY,
};
pub use error::{StorageError, StorageResult};
pub use factory::StorageDriverFactory;
