use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. Nothing here is mutable: each submission is an independent,
/// stateless run from prompt construction through document serialization.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    #[allow(dead_code)]
    pub config: Config,
}
