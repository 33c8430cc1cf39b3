//! Application state shared by the handlers.

use crate::services::upstream::UpstreamClient;
use std::sync::Arc;
use std::time::Duration;
use studyai_core::Config;

/// Configuration plus the upstream client. Nothing here changes per request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let upstream = UpstreamClient::new(
            config.upstream_upload_url(),
            Duration::from_secs(config.upstream_timeout_secs()),
        )?;

        Ok(Self { config, upstream })
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
