//! Application state shared by every request handler.
//!
//! Built once at startup and never mutated afterwards.

use docscribe::advisor::{QualityAnalyzer, SemanticMapper};
use docscribe::config::DocscribeConfig;
use docscribe::extract::SchemaExtractor;
use docscribe::fetch::{default_fetcher, PageFetcher};
use docscribe::health::HealthProber;
use docscribe::llm::ProviderSet;
use docscribe::redact::Redactor;
use std::sync::Arc;

pub struct AppState {
    pub extractor: SchemaExtractor,
    pub fetcher: Arc<dyn PageFetcher>,
    pub prober: HealthProber,
    pub quality: QualityAnalyzer,
    pub mapper: SemanticMapper,
    pub redactor: Redactor,
}

impl AppState {
    /// Assemble state from explicit collaborators.
    pub fn new(providers: ProviderSet, fetcher: Arc<dyn PageFetcher>, secrets: Vec<String>) -> Self {
        let advisory = providers.advisory();
        let redactor = Redactor::new(secrets);
        Self {
            extractor: SchemaExtractor::new(providers),
            fetcher,
            prober: HealthProber::new(),
            quality: QualityAnalyzer::new(advisory.clone(), redactor.clone()),
            mapper: SemanticMapper::new(advisory, redactor.clone()),
            redactor,
        }
    }

    /// Real providers and browser, as configured.
    pub async fn from_config(config: &DocscribeConfig) -> Self {
        let providers = ProviderSet::from_config(config);
        let fetcher = default_fetcher(config).await;
        Self::new(providers, fetcher, config.secrets())
    }
}
