use serde_json::Value;
use std::sync::Arc;

use crate::{
    constants::prompts::candidate_search_prompt,
    services::model_service::{strip_code_fences, GenerativeModel},
};

/// Asks the model for candidate university records matching the criteria.
/// Any model or parse failure degrades to zero candidates; a search then
/// legitimately returns an empty result set instead of an error.
pub struct CandidateService {
    model: Arc<dyn GenerativeModel>,
}

impl CandidateService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn generate_candidates(
        &self,
        budget: f64,
        gpa: f64,
        country: &str,
        degree: &str,
    ) -> Vec<Value> {
        let prompt = candidate_search_prompt(budget, gpa, country, degree);
        let reply = match self.model.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("candidate generation failed: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(strip_code_fences(&reply)) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                log::warn!(
                    "candidate reply was not a JSON array (got {})",
                    json_type_name(&other)
                );
                Vec::new()
            }
            Err(e) => {
                log::warn!("candidate reply was not valid JSON: {}", e);
                Vec::new()
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
