use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{CatalogRepository, JsonCatalogRepository},
    services::{
        CandidateService, ExtractionService, GeminiModel, GenerativeModel, PageFetcher,
        ResultCache, SearchService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<SearchService>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub result_cache: Arc<ResultCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let model: Arc<dyn GenerativeModel> = Arc::new(GeminiModel::new(&config)?);

        let search_service = Arc::new(SearchService::new(
            CandidateService::new(model.clone()),
            PageFetcher::new(&config)?,
            ExtractionService::new(model),
            config.strict_country_match,
        ));
        let catalog = Arc::new(JsonCatalogRepository::new(&config.catalog_path));

        Ok(Self {
            search_service,
            catalog,
            result_cache: Arc::new(ResultCache::new()),
            config: Arc::new(config),
        })
    }
}
