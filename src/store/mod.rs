pub mod memory;
pub mod remote;
pub mod util;

use crate::core::config::StoreConfig;
use crate::core::store::RecordStore;
use anyhow::{Result, bail};
use std::sync::Arc;
use tracing::debug;

pub use memory::MemoryStore;
pub use remote::RemoteStore;

/// Builds the configured store. A remote store takes precedence over a
/// memory store when both are configured.
pub fn from_config(config: &StoreConfig) -> Result<Arc<dyn RecordStore>> {
    if let Some(remote) = &config.remote {
        debug!("Using remote store at {}", remote.base_url);
        return Ok(Arc::new(RemoteStore::new(&remote.base_url)));
    }
    if let Some(memory) = &config.memory {
        debug!(
            "Using memory store with {} currencies and {} rates",
            memory.currencies.len(),
            memory.rates.len()
        );
        return Ok(Arc::new(MemoryStore::from_config(memory)));
    }
    bail!("No record store configured; add a `store.remote` or `store.memory` section")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{MemoryStoreConfig, RemoteStoreConfig};

    #[test]
    fn test_from_config_requires_a_store() {
        let err = from_config(&StoreConfig::default()).err().unwrap();
        assert!(err.to_string().contains("No record store configured"));
    }

    #[tokio::test]
    async fn test_from_config_memory() {
        let config = StoreConfig {
            remote: None,
            memory: Some(MemoryStoreConfig::default()),
        };
        let store = from_config(&config).unwrap();
        assert!(store.fetch_currencies().await.unwrap().is_empty());
    }

    #[test]
    fn test_from_config_prefers_remote() {
        let config = StoreConfig {
            remote: Some(RemoteStoreConfig {
                base_url: "http://localhost:1".to_string(),
            }),
            memory: Some(MemoryStoreConfig::default()),
        };
        assert!(from_config(&config).is_ok());
    }
}
