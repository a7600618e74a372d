use crate::config::HealthConfig;
use crate::services::user_store::UserStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Debug)]
pub struct HealthService {
    store: Arc<dyn UserStore>,
    config: HealthConfig,
}

impl HealthService {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, config: HealthConfig) -> Self {
        Self { store, config }
    }

    /// Checks store connectivity.
    ///
    /// # Errors
    /// Returns a string describing the failure if the store is unreachable.
    pub async fn check_store(&self) -> Result<(), String> {
        let store_timeout = Duration::from_millis(self.config.store_timeout_ms);

        match timeout(store_timeout, self.store.ping()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(format!("Store connection failed: {e}")),
            Err(_) => Err("Store connection timed out".to_string()),
        }
    }
}
