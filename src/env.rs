//! Environment handle for risk operations.
//!
//! Every operation receives its capabilities explicitly: the entity store
//! it reads from and the immutable configuration it scores with. Nothing
//! is read from ambient global state.
//!
//! ```rust,ignore
//! use riskmap::env::RiskEnv;
//! use riskmap::store::InMemoryStore;
//!
//! let env = RiskEnv::new(InMemoryStore::from_path(path)?, RiskmapConfig::default());
//! let dashboard = riskmap::risk::dashboard(&env).await?;
//! ```

use std::sync::Arc;

use crate::config::RiskmapConfig;
use crate::store::EntityStore;

/// Store plus configuration. Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct RiskEnv {
    store: Arc<dyn EntityStore>,
    config: Arc<RiskmapConfig>,
}

impl RiskEnv {
    pub fn new(store: impl EntityStore + 'static, config: RiskmapConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    pub fn from_shared(store: Arc<dyn EntityStore>, config: RiskmapConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &RiskmapConfig {
        &self.config
    }

    /// Same store, different configuration.
    pub fn with_config(&self, config: RiskmapConfig) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::new(config),
        }
    }
}

impl std::fmt::Debug for RiskEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskEnv")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EmployeeFilter, InMemoryStore};

    #[tokio::test]
    async fn with_config_shares_the_store() {
        let env = RiskEnv::new(InMemoryStore::default(), RiskmapConfig::default());
        let mut tuned = RiskmapConfig::default();
        tuned.scoring.priority = 1.0;
        let other = env.with_config(tuned);

        assert_eq!(other.config().scoring.priority, 1.0);
        assert_eq!(env.config().scoring.priority, 0.6);
        assert_eq!(
            other.store().count_employees(&EmployeeFilter::live()).await.unwrap(),
            0
        );
    }
}
