use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::constants::SUPPORTED_COUNTRIES;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(range(min = 0.0, message = "budget must be non-negative"))]
    pub budget: f64,

    #[validate(range(min = 0.0, max = 4.0, message = "gpa must be between 0 and 4.0"))]
    pub gpa: f64,

    /// Accepted but unused by the pipeline; kept for client compatibility.
    pub linkedin: Option<String>,

    #[validate(custom(function = validate_country))]
    pub preferred_country: String,

    #[validate(length(min = 1, message = "degree must not be empty"))]
    pub degree: String,
}

fn validate_country(value: &str) -> Result<(), ValidationError> {
    if SUPPORTED_COUNTRIES.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_country")
            .with_message("preferred_country must be one of USA, Canada, UK, Germany, Australia".into()))
    }
}
