//! Client surface.
//!
//! A [`Client`] owns a [`ConfigStore`] and runs every call against a snapshot
//! of it, so `set_config` never affects requests already in flight.

mod options;
mod result;
mod verbs;

pub use options::RequestOptions;
pub use result::{Payload, RequestResult};

use crate::config::{ClientConfig, Config, ConfigStore, merge_configs};
use crate::error::Result;
use crate::execution::orchestrator;
use std::sync::Arc;

/// HTTP client for generated API bindings. Cheap to clone; clones share
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct Client {
    store: Arc<ConfigStore>,
}

impl Client {
    /// Merge `config` onto the default configuration.
    pub fn new(config: impl Into<Config>) -> Result<Self> {
        let resolved = merge_configs(&ClientConfig::create_default(), &config.into())?;
        Ok(Self::from_client_config(resolved))
    }

    /// Use a fully resolved configuration as-is.
    pub fn from_client_config(config: ClientConfig) -> Self {
        Self {
            store: Arc::new(ConfigStore::new(config)),
        }
    }

    /// Copy of the current configuration.
    pub fn get_config(&self) -> ClientConfig {
        self.store.get()
    }

    /// Merge `config` into the client's configuration and return the result.
    pub fn set_config(&self, config: impl Into<Config>) -> Result<ClientConfig> {
        let updated = self.store.update(&config.into())?;
        Ok(ClientConfig::clone(&updated))
    }

    /// Send a request with the method given in `options`.
    pub async fn request(&self, options: RequestOptions) -> Result<RequestResult> {
        let snapshot = self.store.snapshot();
        orchestrator::execute(&snapshot, options).await
    }
}

/// Shorthand for [`Client::new`].
pub fn create_client(config: impl Into<Config>) -> Result<Client> {
    Client::new(config)
}
