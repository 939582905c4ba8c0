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

use thiserror::Error;

/// Errors that can occur during storage operations
///
/// Every missing-object condition, regardless of which operation raised it,
/// surfaces as [`StorageError::NotFound`]; all other provider failures are
/// wrapped as [`StorageError::Backend`] with the provider error preserved as
/// the source.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object not found at '{path}'")]
    NotFound {
        path: String,
        source: object_store::Error,
    },

    #[error("{kind} error at '{path}': {source}")]
    Backend {
        /// Classification name of the underlying provider error
        kind: &'static str,
        path: String,
        source: object_store::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("object at '{path}' is not valid UTF-8")]
    Utf8 {
        path: String,
        source: std::string::FromUtf8Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Translate a provider error into the driver's taxonomy, attaching the
    /// location that was being operated on.
    pub(crate) fn from_object_store(err: object_store::Error, path: &str) -> Self {
        match err {
            object_store::Error::NotFound { .. } => StorageError::NotFound {
                path: path.to_string(),
                source: err,
            },
            err => StorageError::Backend {
                kind: classify(&err),
                path: path.to_string(),
                source: err,
            },
        }
    }

    /// Whether this error is the distinguished missing-object condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Short classification name for a provider error, used to label
/// [`StorageError::Backend`] without losing the source chain.
fn classify(err: &object_store::Error) -> &'static str {
    use object_store::Error;
    match err {
        Error::Generic { .. } => "Generic",
        Error::NotFound { .. } => "NotFound",
        Error::InvalidPath { .. } => "InvalidPath",
        Error::JoinError { .. } => "JoinError",
        Error::NotSupported { .. } => "NotSupported",
        Error::AlreadyExists { .. } => "AlreadyExists",
        Error::Precondition { .. } => "Precondition",
        Error::NotModified { .. } => "NotModified",
        Error::NotImplemented => "NotImplemented",
        Error::PermissionDenied { .. } => "PermissionDenied",
        Error::Unauthenticated { .. } => "Unauthenticated",
        Error::UnknownConfigurationKey { .. } => "UnknownConfigurationKey",
        _ => "Unknown",
    }
}
