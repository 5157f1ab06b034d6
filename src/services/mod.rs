pub mod candidate_service;
pub mod export_service;
pub mod extraction_service;
pub mod filter_service;
pub mod model_service;
pub mod result_cache;
pub mod scrape_service;
pub mod search_service;

pub use candidate_service::CandidateService;
pub use extraction_service::ExtractionService;
pub use model_service::{GeminiModel, GenerativeModel};
pub use result_cache::ResultCache;
pub use scrape_service::PageFetcher;
pub use search_service::SearchService;
