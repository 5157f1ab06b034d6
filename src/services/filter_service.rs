use crate::models::domain::UniversityRecord;

/// Applies the search criteria over the unified catalog + candidate set.
/// Pure: the output is always an in-order subset of `records`.
///
/// Country matching is substring containment against `city_country`
/// (case-sensitive, so "India" also matches "Indiana, USA"); callers can opt
/// into `strict_country` to compare the country segment after the comma
/// exactly. Degree matching is case-insensitive substring containment.
pub fn filter_universities(
    records: &[UniversityRecord],
    budget: f64,
    gpa: f64,
    country: &str,
    degree: &str,
    strict_country: bool,
) -> Vec<UniversityRecord> {
    let degree_lower = degree.to_lowercase();

    records
        .iter()
        .filter(|uni| {
            if !country_matches(&uni.city_country, country, strict_country) {
                return false;
            }

            if !uni.program_title.to_lowercase().contains(&degree_lower) {
                return false;
            }

            match uni.tuition_fees {
                Some(tuition) if tuition <= budget => {}
                _ => return false,
            }

            // Validated records always carry a numeric GPA; catalog entries
            // might not, and are skipped rather than failing the filter.
            match uni.requirements.parsed_gpa() {
                Some(min_gpa) => min_gpa <= gpa,
                None => {
                    log::warn!(
                        "skipping '{}': GPA requirement missing or not numeric",
                        uni.university_name
                    );
                    false
                }
            }
        })
        .cloned()
        .collect()
}

fn country_matches(city_country: &str, country: &str, strict: bool) -> bool {
    if strict {
        city_country
            .rsplit(',')
            .next()
            .map(str::trim)
            .map_or(false, |segment| segment == country)
    } else {
        city_country.contains(country)
    }
}
