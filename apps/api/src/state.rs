use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::portfolio::PortfolioData;
use crate::storage::Store;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    /// Repository for resumes, conversations, and messages. Behind a trait
    /// so the in-memory backend can be swapped for a persistent one.
    pub store: Arc<dyn Store>,
    pub llm: LlmClient,
    /// Static showcase data, built once at startup.
    pub portfolio: Arc<PortfolioData>,
}
