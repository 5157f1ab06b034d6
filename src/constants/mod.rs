pub mod prompts;

/// Countries the search request accepts.
pub const SUPPORTED_COUNTRIES: &[&str] = &["USA", "Canada", "UK", "Germany", "Australia"];

/// Number of candidate records requested from the model per search.
pub const CANDIDATE_COUNT: usize = 5;

/// Page text shorter than this is not worth a model call.
pub const MIN_PAGE_TEXT_LEN: usize = 100;

/// How much page text is embedded into the extraction prompt.
pub const PROMPT_TEXT_LIMIT: usize = 4000;
