//! Application state: config, the document store, the daily content store and the session tracker.
//!
//! The store handle is built once here and shared by the content store and the
//! tracker. If no Gemini key is configured, generation runs on the static corpus.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::GameConfig;
use crate::content::DailyContent;
use crate::gemini::{GeminiClient, TextGenerator};
use crate::generator::{ContentGenerator, ContentSource};
use crate::progress::ProgressTracker;
use crate::store::{DocumentStore, MemoryStore};

pub struct AppState {
    pub config: GameConfig,
    pub content: DailyContent,
    pub tracker: ProgressTracker,
}

impl AppState {
    /// Build state from config: in-memory store, optional Gemini client, generators.
    #[instrument(level = "info", skip_all)]
    pub fn new(config: GameConfig) -> Self {
        let gemini = GeminiClient::from_env(&config.generation);
        if let Some(g) = &gemini {
            info!(target: "cropgen_backend", base_url = %g.base_url, model = %g.model, "Gemini enabled.");
        } else {
            info!(target: "cropgen_backend", "Gemini disabled (no GEMINI_API_KEY). Serving the built-in corpus.");
        }

        let client = gemini.map(|g| Arc::new(g) as Arc<dyn TextGenerator>);
        let source = Arc::new(ContentGenerator::new(client, config.prompts.clone(), &config.generation));
        Self::with_parts(config, Arc::new(MemoryStore::new()), source)
    }

    /// Assemble state around an explicit store and content source.
    pub fn with_parts(config: GameConfig, store: Arc<dyn DocumentStore>, source: Arc<dyn ContentSource>) -> Self {
        let content = DailyContent::new(store.clone(), source, config.retry.clone());
        let tracker = ProgressTracker::new(store);
        info!(
            target: "cropgen_backend",
            retry_attempts = config.retry.attempts,
            dev_routes = config.server.dev_routes,
            "Application state ready"
        );
        Self { config, content, tracker }
    }
}
