use crate::{
    models::{domain::UniversityRecord, dto::SearchRequest},
    services::{
        filter_service::filter_universities, CandidateService, ExtractionService, PageFetcher,
    },
};

/// Runs the generate -> validate -> scrape -> extract -> merge -> filter
/// pipeline for one search request. Candidates are processed strictly in
/// generation order, one at a time; the final result preserves catalog order
/// followed by candidate order.
pub struct SearchService {
    candidates: CandidateService,
    fetcher: PageFetcher,
    extractor: ExtractionService,
    strict_country_match: bool,
}

impl SearchService {
    pub fn new(
        candidates: CandidateService,
        fetcher: PageFetcher,
        extractor: ExtractionService,
        strict_country_match: bool,
    ) -> Self {
        Self {
            candidates,
            fetcher,
            extractor,
            strict_country_match,
        }
    }

    pub async fn search(
        &self,
        request: &SearchRequest,
        catalog: Vec<UniversityRecord>,
    ) -> Vec<UniversityRecord> {
        let raw_candidates = self
            .candidates
            .generate_candidates(
                request.budget,
                request.gpa,
                &request.preferred_country,
                &request.degree,
            )
            .await;
        log::info!("model proposed {} candidate(s)", raw_candidates.len());

        let mut enriched = Vec::with_capacity(raw_candidates.len());
        for raw in &raw_candidates {
            let Some(mut record) = UniversityRecord::from_candidate(raw) else {
                continue;
            };

            if let Some(url) = record.program_page.clone() {
                let page_text = self.fetcher.fetch_text(&url).await;
                if !page_text.is_empty() {
                    let details = self.extractor.extract_fields(&page_text, &url).await;
                    record.merge_supplement(&details);
                }
            }

            enriched.push(record);
        }
        log::info!(
            "{} candidate(s) survived validation and enrichment",
            enriched.len()
        );

        let mut all = catalog;
        all.extend(enriched);

        let results = filter_universities(
            &all,
            request.budget,
            request.gpa,
            &request.preferred_country,
            &request.degree,
            self.strict_country_match,
        );
        log::info!("{} record(s) match the search criteria", results.len());
        results
    }
}
