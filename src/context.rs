//! Network context shared by every codec operation
//!
//! Bundles the active [`ConfigManager`] with the [`TransactionRegistry`] so
//! callers pass one value around instead of relying on process globals. A
//! context is `Send + Sync`; swapping networks or registering custom
//! transaction types takes `&mut self`.

use crate::config::{ConfigError, ConfigManager, NetworkConfig};
use crate::transactions::TransactionRegistry;

#[derive(Clone)]
pub struct NetworkContext {
    config: ConfigManager,
    registry: TransactionRegistry,
}

impl NetworkContext {
    pub fn new(config: NetworkConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: ConfigManager::new(config)?,
            registry: TransactionRegistry::with_builtins(),
        })
    }

    /// Context for a bundled network (`mainnet`, `testnet`)
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            config: ConfigManager::from_preset(name)?,
            registry: TransactionRegistry::with_builtins(),
        })
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigManager {
        &mut self.config
    }

    pub fn registry(&self) -> &TransactionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TransactionRegistry {
        &mut self.registry
    }

    /// Address version byte (`pubKeyHash`) of the active network
    pub fn network_version(&self) -> u8 {
        self.config.network().pub_key_hash
    }

    pub fn wif_version(&self) -> u8 {
        self.config.network().wif
    }
}

impl std::fmt::Debug for NetworkContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkContext")
            .field("network", &self.config.network().name)
            .field("height", &self.config.height())
            .field("registered_types", &self.registry.len())
            .finish()
    }
}
