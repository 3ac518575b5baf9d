use cinedex_core::{Config, MovieQueryService, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    query: MovieQueryService,
}

impl AppState {
    pub fn new(config: Config, query: MovieQueryService) -> Self {
        Self { config, query }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn query(&self) -> &MovieQueryService {
        &self.query
    }
}
