use std::sync::Arc;

use crate::config::Config;
use crate::gemini::UpstreamClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The upstream transport behind a trait object so tests can inject a
    /// canned upstream. Production wires in `GeminiClient`.
    pub upstream: Arc<dyn UpstreamClient>,
    pub config: Config,
}
