use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::ai::SummaryGenerator;
use crate::config::AppConfig;
use crate::news::NewsFetcher;
use crate::Result;

/// Lazily built, shared pipeline components.
///
/// Each component is created on first use and reused afterwards. A failed
/// creation is not cached.
pub struct Components {
    config: Arc<AppConfig>,
    fetcher: OnceCell<Arc<NewsFetcher>>,
    summarizer: OnceCell<Arc<SummaryGenerator>>,
}

impl Components {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            fetcher: OnceCell::new(),
            summarizer: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Arc<AppConfig> {
        &self.config
    }

    pub fn fetcher(&self) -> Result<Arc<NewsFetcher>> {
        self.fetcher
            .get_or_try_init(|| {
                tracing::debug!("Initializing news fetcher");
                NewsFetcher::new(&self.config).map(Arc::new)
            })
            .cloned()
    }

    pub fn summarizer(&self) -> Result<Arc<SummaryGenerator>> {
        self.summarizer
            .get_or_try_init(|| {
                tracing::debug!("Initializing summary generator");
                SummaryGenerator::new(&self.config).map(Arc::new)
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Arc<AppConfig> {
        let mut config = AppConfig::default();
        config.news.api_key = Some("news".to_string());
        config.ai.api_key = Some("llm".to_string());
        Arc::new(config)
    }

    #[test]
    fn test_components_initialize_once() {
        let components = Components::new(configured());

        let first = components.fetcher().unwrap();
        let second = components.fetcher().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let first = components.summarizer().unwrap();
        let second = components.summarizer().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_credentials_not_cached() {
        let components = Components::new(Arc::new(AppConfig::default()));

        assert!(components.fetcher().is_err());
        assert!(components.fetcher().is_err());
        assert!(components.summarizer().is_err());
    }
}
