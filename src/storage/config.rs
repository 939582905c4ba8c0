// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may obtain a copy
// of the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under
// the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
// OF ANY KIND, either express or implied. See the License for the specific language
// governing permissions and limitations under the License.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

/// Configuration for the Azure blob storage driver
///
/// The three identity fields are fixed at construction; everything else is a
/// transport-tuning option passed through to the underlying client builder.
///
/// # Examples
///
/// ```
/// use azure_drive::StorageConfig;
///
/// let config = StorageConfig::new("myaccount", "BASE64KEY==", "mycontainer")
///     .with_option("timeout", "600");
/// ```
///
/// Running against Azurite or another emulator:
///
/// ```
/// use azure_drive::StorageConfig;
///
/// let config = StorageConfig::new("devstoreaccount1", "BASE64KEY==", "mycontainer")
///     .with_option("endpoint", "http://127.0.0.1:10000/devstoreaccount1")
///     .with_option("allow_http", "true");
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage account name, also used to derive the default endpoint
    pub account_name: String,

    /// Container holding every blob this driver addresses
    pub container: String,

    /// Shared-key credential for the account. Redacted from `Debug` output
    /// and never serialized.
    #[serde(skip_serializing)]
    account_key: String,

    /// Transport-tuning options passed through to the client builder.
    /// Recognized keys:
    /// - timeout: overall request timeout in seconds ("0"/"disabled" to turn off)
    /// - connect_timeout: connection timeout in seconds ("0"/"disabled" to turn off)
    /// - max_retries: transport-level retry budget
    /// - retry_timeout: transport-level retry window in seconds
    /// - pool_idle_timeout: connection pool idle timeout in seconds
    /// - pool_max_idle_per_host: connection pool size per host
    /// - allow_http: "true" to permit plain-HTTP endpoints (emulators)
    /// - endpoint: custom blob endpoint URL (emulators, sovereign clouds)
    #[serde(default = "StorageConfig::default_options")]
    pub options: HashMap<String, String>,
}

impl StorageConfig {
    /// Create a new driver configuration.
    ///
    /// # Arguments
    ///
    /// * `account_name` - Storage account name
    /// * `account_key` - Shared-key credential (base64, as issued by the service)
    /// * `container` - Container name
    pub fn new(
        account_name: impl Into<String>,
        account_key: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            container: container.into(),
            account_key: account_key.into(),
            options: Self::default_options(),
        }
    }

    /// Get default transport options.
    ///
    /// # Returns
    ///
    /// A HashMap containing default timeout, retry, and connection pool settings.
    pub fn default_options() -> HashMap<String, String> {
        [
            ("timeout", "1200"),
            ("connect_timeout", "30"),
            ("pool_idle_timeout", "15"),
            ("pool_max_idle_per_host", "5"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    /// Add a configuration option.
    ///
    /// # Arguments
    ///
    /// * `key` - The option key
    /// * `value` - The option value
    ///
    /// # Returns
    ///
    /// The `StorageConfig` instance with the added option (for method chaining).
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Add multiple configuration options.
    ///
    /// # Arguments
    ///
    /// * `options` - HashMap of options to add
    ///
    /// # Returns
    ///
    /// The `StorageConfig` instance with the added options (for method chaining).
    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }

    /// Get a configuration option.
    ///
    /// # Arguments
    ///
    /// * `key` - The option key to retrieve
    ///
    /// # Returns
    ///
    /// `Some(&String)` if the option exists, `None` otherwise.
    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }

    /// Shared-key credential, available only inside the crate for client
    /// construction.
    pub(crate) fn account_key(&self) -> &str {
        &self.account_key
    }
}

impl Debug for StorageConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StorageConfig")
            .field("account_name", &self.account_name)
            .field("container", &self.container)
            .field("account_key", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_identity_and_defaults() {
        let config = StorageConfig::new("myaccount", "secret==", "mycontainer");

        assert_eq!(config.account_name, "myaccount");
        assert_eq!(config.container, "mycontainer");
        assert_eq!(config.account_key(), "secret==");
        assert!(!config.options.is_empty());
    }

    #[test]
    fn test_default_options() {
        let options = StorageConfig::default_options();
        assert_eq!(options.get("timeout"), Some(&"1200".to_string()));
        assert_eq!(options.get("connect_timeout"), Some(&"30".to_string()));
        assert_eq!(options.get("pool_idle_timeout"), Some(&"15".to_string()));
        assert_eq!(
            options.get("pool_max_idle_per_host"),
            Some(&"5".to_string())
        );
    }

    #[test]
    fn test_with_option() {
        let config = StorageConfig::new("acct", "key==", "files")
            .with_option("endpoint", "http://127.0.0.1:10000/acct")
            .with_option("allow_http", "true");

        assert_eq!(
            config.get_option("endpoint"),
            Some(&"http://127.0.0.1:10000/acct".to_string())
        );
        assert_eq!(config.get_option("allow_http"), Some(&"true".to_string()));
    }

    #[test]
    fn test_with_options() {
        let mut custom_options = HashMap::new();
        custom_options.insert("timeout".to_string(), "600".to_string());
        custom_options.insert("max_retries".to_string(), "3".to_string());

        let config = StorageConfig::new("acct", "key==", "files").with_options(custom_options);

        assert_eq!(config.get_option("timeout"), Some(&"600".to_string()));
        assert_eq!(config.get_option("max_retries"), Some(&"3".to_string()));
        // Untouched defaults should still be present
        assert_eq!(config.get_option("connect_timeout"), Some(&"30".to_string()));
    }

    #[test]
    fn test_option_override() {
        let config = StorageConfig::new("acct", "key==", "files")
            .with_option("timeout", "600")
            .with_option("timeout", "900");

        assert_eq!(config.get_option("timeout"), Some(&"900".to_string()));
    }

    #[test]
    fn test_get_option_missing() {
        let config = StorageConfig::new("acct", "key==", "files");
        assert_eq!(config.get_option("nonexistent"), None);
    }

    #[test]
    fn test_serialization_skips_account_key() {
        let config = StorageConfig::new("acct", "topsecret==", "files");

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"account_name\":\"acct\""));
        assert!(json.contains("\"container\":\"files\""));
        assert!(!json.contains("topsecret"));
    }

    #[test]
    fn test_deserialization() {
        let json = r#"{
            "account_name": "acct",
            "account_key": "key==",
            "container": "files",
            "options": {"timeout": "60"}
        }"#;
        let config: StorageConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.account_name, "acct");
        assert_eq!(config.account_key(), "key==");
        assert_eq!(config.get_option("timeout"), Some(&"60".to_string()));
    }

    #[test]
    fn test_deserialization_defaults_options() {
        let json = r#"{
            "account_name": "acct",
            "account_key": "key==",
            "container": "files"
        }"#;
        let config: StorageConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.get_option("timeout"), Some(&"1200".to_string()));
    }

    #[test]
    fn test_debug_redacts_account_key() {
        let config = StorageConfig::new("acct", "topsecret==", "files");

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("StorageConfig"));
        assert!(debug_str.contains("<redacted>"));
        assert!(!debug_str.contains("topsecret"));
    }

    #[test]
    fn test_clone() {
        let config1 = StorageConfig::new("acct", "key==", "files").with_option("timeout", "60");
        let config2 = config1.clone();

        assert_eq!(config1.account_name, config2.account_name);
        assert_eq!(config1.account_key(), config2.account_key());
        assert_eq!(config1.get_option("timeout"), config2.get_option("timeout"));
    }
}
