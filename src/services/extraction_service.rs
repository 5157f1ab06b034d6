use serde_json::Value;
use std::sync::Arc;

use crate::{
    constants::{prompts::page_extraction_prompt, MIN_PAGE_TEXT_LEN},
    models::domain::ScrapedDetails,
    services::model_service::{strip_code_fences, GenerativeModel},
};

/// Turns scraped page text into a structured supplemental record via a
/// model call. Best-effort: every failure yields the empty record.
pub struct ExtractionService {
    model: Arc<dyn GenerativeModel>,
}

impl ExtractionService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn extract_fields(&self, page_text: &str, source_url: &str) -> ScrapedDetails {
        if page_text.len() < MIN_PAGE_TEXT_LEN {
            log::debug!(
                "page text for {} too short ({} bytes), skipping extraction",
                source_url,
                page_text.len()
            );
            return ScrapedDetails::default();
        }

        let prompt = page_extraction_prompt(page_text);
        let reply = match self.model.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("extraction model call failed for {}: {}", source_url, e);
                return ScrapedDetails::default();
            }
        };

        match serde_json::from_str::<Value>(strip_code_fences(&reply)) {
            Ok(parsed) => ScrapedDetails::from_reply(&parsed, source_url),
            Err(e) => {
                log::warn!("extraction reply for {} was not valid JSON: {}", source_url, e);
                ScrapedDetails::default()
            }
        }
    }
}
