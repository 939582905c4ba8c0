use std::sync::Arc;

use super::azure::AzureBlobDriver;
use super::config::StorageConfig;
use super::driver::StorageDriver;
use super::error::StorageResult;

/// Factory for creating storage drivers
pub struct StorageDriverFactory;

impl StorageDriverFactory {
    /// Create a storage driver from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The driver configuration with account identity and options
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Arc<dyn StorageDriver>)` - A thread-safe reference to the initialized driver
    /// * `Err(StorageError)` - If the driver cannot be created
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The account key is not a valid shared-key credential
    /// * The configured endpoint is invalid
    pub fn from_config(config: StorageConfig) -> StorageResult<Arc<dyn StorageDriver>> {
        let driver = AzureBlobDriver::new(config)?;
        Ok(Arc::new(driver))
    }
}
