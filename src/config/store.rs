//! Config store with snapshot reads.

use super::{ClientConfig, Config, merge_configs};
use crate::error::Result;
use std::sync::{Arc, PoisonError, RwLock};

/// Holds a client's current configuration.
///
/// Readers take an `Arc` snapshot; updates swap in a freshly merged config
/// and never mutate one that a reader may hold.
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<ClientConfig>>,
}

impl ConfigStore {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Current config, shared.
    pub fn snapshot(&self) -> Arc<ClientConfig> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Current config, copied.
    pub fn get(&self) -> ClientConfig {
        ClientConfig::clone(&self.snapshot())
    }

    /// Merge `overrides` into the stored config and return the result.
    pub fn update(&self, overrides: &Config) -> Result<Arc<ClientConfig>> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let merged = Arc::new(merge_configs(&guard, overrides)?);
        *guard = Arc::clone(&merged);
        Ok(merged)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(ClientConfig::create_default())
    }
}
