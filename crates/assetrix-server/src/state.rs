use std::sync::Arc;

use assetrix_config::ServerConfig;
use assetrix_core::{Clock, SystemClock};

pub struct ServerState {
    pub config: ServerConfig,
    pub clock: Arc<dyn Clock>,
}

impl ServerState {
    /// State backed by the system clock; uptime counts from this call.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(config: ServerConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn environment(&self) -> &str {
        &self.config.environment
    }
}
