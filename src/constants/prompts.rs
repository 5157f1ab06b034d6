//! Prompt templates for the generative model.
//!
//! Both prompts pin an explicit JSON response contract; the model's reply is
//! still treated as untrusted text (fence-stripped, then parsed) by the
//! calling service.

use crate::constants::{CANDIDATE_COUNT, PROMPT_TEXT_LIMIT};

pub fn candidate_search_prompt(budget: f64, gpa: f64, country: &str, degree: &str) -> String {
    format!(
        r#"Find {count} accredited, real universities that match these criteria:
- Maximum Budget: ${budget} per year
- Minimum GPA: {gpa}
- Country: {country}
- Degree: {degree}

For each university, provide:
- university_name (string)
- city_country (string, format: "City, Country")
- program_title (string)
- program_page (valid URL to the program page)
- application_link (valid URL to the application page)
- tuition_fees (number in USD)
- program_duration (string or null)
- application_deadline (string or null)
- requirements: {{
    "GPA": string,
    "IELTS": string or null,
    "TOEFL": string or null,
    "GRE": string or null,
    "GMAT": string or null
}}
- scholarships (array of objects with a "name" field; use [] if none are known)

Format the response as a JSON array of objects with exactly these fields.
Ensure all URLs are real and valid. Do not wrap the JSON in markdown."#,
        count = CANDIDATE_COUNT,
        budget = budget,
        gpa = gpa,
        country = country,
        degree = degree,
    )
}

pub fn page_extraction_prompt(page_text: &str) -> String {
    // Bound the embedded text so the prompt stays inside model token limits.
    let end = floor_char_boundary(page_text, PROMPT_TEXT_LIMIT);
    format!(
        r#"Extract the following information from this university webpage content:
- Program title
- Tuition fees (in USD)
- GPA requirements
- IELTS requirements
- TOEFL requirements
- GRE requirements
- GMAT requirements
- Application deadlines
- Program duration

Webpage content:
{content}

Format the response as a JSON object with these exact keys:
program_title, tuition_fees, requirements (nested object with GPA, IELTS, TOEFL, GRE, GMAT),
application_deadline, program_duration, additional_notes

If a piece of information is not found, use null. Do not wrap the JSON in markdown."#,
        content = &page_text[..end],
    )
}

/// Largest index `<= max` that falls on a UTF-8 character boundary.
pub(crate) fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}
