use std::sync::Arc;

use anyhow::Result;
use roomcal_core::remote::Upstream;

use crate::config::Config;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Upstream,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let upstream = Upstream::new(&config.schedule_url, &config.token, config.timeout())?;
        Ok(AppState {
            config: Arc::new(config),
            upstream,
        })
    }
}
