use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Admission requirements. Wire keys are the uppercase exam names; `None`
/// means "not stated".
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RequirementSet {
    #[serde(rename = "GPA", default)]
    pub gpa: Option<String>,
    #[serde(rename = "IELTS", default)]
    pub ielts: Option<String>,
    #[serde(rename = "TOEFL", default)]
    pub toefl: Option<String>,
    #[serde(rename = "GRE", default)]
    pub gre: Option<String>,
    #[serde(rename = "GMAT", default)]
    pub gmat: Option<String>,
}

impl RequirementSet {
    /// Builds a requirement set from an untrusted JSON value. Anything that
    /// is not an object yields the all-null default; numeric score values
    /// are stringified so "3.0" and 3.0 read the same.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(obj) = value.and_then(Value::as_object) else {
            return Self::default();
        };
        Self {
            gpa: coerce_score(obj.get("GPA")),
            ielts: coerce_score(obj.get("IELTS")),
            toefl: coerce_score(obj.get("TOEFL")),
            gre: coerce_score(obj.get("GRE")),
            gmat: coerce_score(obj.get("GMAT")),
        }
    }

    /// The minimum GPA as a decimal, if stated and parseable.
    pub fn parsed_gpa(&self) -> Option<f64> {
        self.gpa.as_deref().and_then(|g| g.trim().parse::<f64>().ok())
    }

    /// Fills null slots from `other`; slots that already hold a value are
    /// never overwritten.
    pub fn fill_missing_from(&mut self, other: &RequirementSet) {
        fill_string(&mut self.gpa, &other.gpa);
        fill_string(&mut self.ielts, &other.ielts);
        fill_string(&mut self.toefl, &other.toefl);
        fill_string(&mut self.gre, &other.gre);
        fill_string(&mut self.gmat, &other.gmat);
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Scholarship {
    pub name: String,
}

/// One university program entry, either from the static catalog or from
/// the generate-scrape-merge pipeline.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UniversityRecord {
    pub university_name: String,
    /// "City, Country"
    pub city_country: String,
    pub program_title: String,
    #[serde(default)]
    pub program_page: Option<String>,
    #[serde(default)]
    pub application_link: Option<String>,
    #[serde(default)]
    pub tuition_fees: Option<f64>,
    #[serde(default)]
    pub program_duration: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<String>,
    #[serde(default)]
    pub requirements: RequirementSet,
    #[serde(default)]
    pub scholarships: Vec<Scholarship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub scraped: bool,
}

impl UniversityRecord {
    /// Validates one raw candidate from the model. Returns `None` when any
    /// identity field (`university_name`, `city_country`, `program_title`)
    /// is missing or empty, or when `requirements.GPA` is absent or not a
    /// decimal number. Tuition that fails numeric coercion becomes `None`
    /// without discarding the record.
    pub fn from_candidate(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;

        let university_name = required_field(obj.get("university_name"))?;
        let city_country = required_field(obj.get("city_country"))?;
        let program_title = required_field(obj.get("program_title"))?;

        let requirements = RequirementSet::from_value(obj.get("requirements"));
        if requirements.parsed_gpa().is_none() {
            log::debug!(
                "discarding candidate '{}': GPA requirement missing or not numeric",
                university_name
            );
            return None;
        }

        let scholarships = obj
            .get("scholarships")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();

        Some(Self {
            university_name,
            city_country,
            program_title,
            program_page: optional_field(obj.get("program_page")),
            application_link: optional_field(obj.get("application_link")),
            tuition_fees: coerce_tuition(obj.get("tuition_fees")),
            program_duration: optional_field(obj.get("program_duration")),
            application_deadline: optional_field(obj.get("application_deadline")),
            requirements,
            scholarships,
            additional_notes: None,
            source_url: None,
            scraped: false,
        })
    }

    /// Fills gaps from scraped supplemental data. Identity fields
    /// (`university_name`, `city_country`) are never touched, and a field
    /// that already holds a value keeps it.
    pub fn merge_supplement(&mut self, supplement: &ScrapedDetails) {
        // `program_title` is required and therefore always set on the target,
        // so under the fill-gap rule the supplement's title never applies.
        if self.tuition_fees.is_none() {
            self.tuition_fees = supplement.tuition_fees;
        }
        self.requirements.fill_missing_from(&supplement.requirements);
        fill_string(&mut self.application_deadline, &supplement.application_deadline);
        fill_string(&mut self.program_duration, &supplement.program_duration);
        fill_string(&mut self.additional_notes, &supplement.additional_notes);

        if supplement.scraped {
            self.scraped = true;
            if self.source_url.is_none() {
                self.source_url = supplement.source_url.clone();
            }
        }
    }
}

/// Supplemental fields extracted from a scraped program page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrapedDetails {
    pub program_title: Option<String>,
    pub tuition_fees: Option<f64>,
    pub requirements: RequirementSet,
    pub application_deadline: Option<String>,
    pub program_duration: Option<String>,
    pub additional_notes: Option<String>,
    pub source_url: Option<String>,
    pub scraped: bool,
}

impl ScrapedDetails {
    /// Builds supplemental details from the model's parsed reply and stamps
    /// provenance. A non-object reply yields the empty record, unstamped.
    pub fn from_reply(raw: &Value, source_url: &str) -> Self {
        let Some(obj) = raw.as_object() else {
            return Self::default();
        };
        Self {
            program_title: optional_field(obj.get("program_title")),
            tuition_fees: coerce_tuition(obj.get("tuition_fees")),
            requirements: RequirementSet::from_value(obj.get("requirements")),
            application_deadline: optional_field(obj.get("application_deadline")),
            program_duration: optional_field(obj.get("program_duration")),
            additional_notes: optional_field(obj.get("additional_notes")),
            source_url: Some(source_url.to_string()),
            scraped: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.scraped
            && self.program_title.is_none()
            && self.tuition_fees.is_none()
            && self.requirements == RequirementSet::default()
            && self.application_deadline.is_none()
            && self.program_duration.is_none()
            && self.additional_notes.is_none()
    }
}

/// Coerces a JSON value to a tuition amount. Accepts numbers and numeric
/// strings (with optional "$" and thousands separators); anything else is
/// `None`, not an error.
pub fn coerce_tuition(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|t| *t >= 0.0),
        Value::String(s) => {
            let cleaned = s.trim().trim_start_matches('$').replace(',', "");
            cleaned.parse::<f64>().ok().filter(|t| *t >= 0.0)
        }
        _ => None,
    }
}

fn coerce_score(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_field(value: Option<&Value>) -> Option<String> {
    optional_field(value)
}

fn optional_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Writes `supplement` into `target` only when the target is null/empty and
/// the supplement is non-empty.
fn fill_string(target: &mut Option<String>, supplement: &Option<String>) {
    let target_empty = target.as_deref().map_or(true, |s| s.trim().is_empty());
    if !target_empty {
        return;
    }
    if let Some(value) = supplement.as_deref().filter(|s| !s.trim().is_empty()) {
        *target = Some(value.to_string());
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_candidate() -> Value {
        json!({
            "university_name": "Technical University of Munich",
            "city_country": "Munich, Germany",
            "program_title": "MS Data Science",
            "program_page": "https://www.tum.de/ms-data-science",
            "application_link": "https://www.tum.de/apply",
            "tuition_fees": 3000,
            "requirements": {"GPA": "3.0", "IELTS": "6.5"}
        })
    }

    #[test]
    fn test_valid_candidate_is_accepted() {
        let record = UniversityRecord::from_candidate(&valid_candidate()).unwrap();
        assert_eq!(record.university_name, "Technical University of Munich");
        assert_eq!(record.tuition_fees, Some(3000.0));
        assert_eq!(record.requirements.gpa.as_deref(), Some("3.0"));
        assert!(!record.scraped);
        assert!(record.scholarships.is_empty());
    }

    #[test]
    fn test_missing_identity_field_discards_candidate() {
        for field in ["university_name", "city_country", "program_title"] {
            let mut raw = valid_candidate();
            raw.as_object_mut().unwrap().remove(field);
            assert!(
                UniversityRecord::from_candidate(&raw).is_none(),
                "candidate without {} should be discarded",
                field
            );
        }
    }

    #[test]
    fn test_empty_identity_field_discards_candidate() {
        let mut raw = valid_candidate();
        raw["university_name"] = json!("   ");
        assert!(UniversityRecord::from_candidate(&raw).is_none());
    }

    #[test]
    fn test_unparseable_gpa_discards_candidate() {
        let mut raw = valid_candidate();
        raw["requirements"]["GPA"] = json!("competitive");
        assert!(UniversityRecord::from_candidate(&raw).is_none());

        let mut raw = valid_candidate();
        raw["requirements"] = json!({"IELTS": "6.5"});
        assert!(UniversityRecord::from_candidate(&raw).is_none());
    }

    #[test]
    fn test_numeric_gpa_value_is_accepted() {
        let mut raw = valid_candidate();
        raw["requirements"]["GPA"] = json!(3.2);
        let record = UniversityRecord::from_candidate(&raw).unwrap();
        assert_eq!(record.requirements.parsed_gpa(), Some(3.2));
    }

    #[test]
    fn test_tuition_coercion() {
        assert_eq!(coerce_tuition(Some(&json!(12500))), Some(12500.0));
        assert_eq!(coerce_tuition(Some(&json!("12500"))), Some(12500.0));
        assert_eq!(coerce_tuition(Some(&json!("$12,500"))), Some(12500.0));
        assert_eq!(coerce_tuition(Some(&json!("varies"))), None);
        assert_eq!(coerce_tuition(Some(&json!(null))), None);
        assert_eq!(coerce_tuition(None), None);
    }

    #[test]
    fn test_bad_tuition_does_not_discard_candidate() {
        let mut raw = valid_candidate();
        raw["tuition_fees"] = json!("contact the university");
        let record = UniversityRecord::from_candidate(&raw).unwrap();
        assert_eq!(record.tuition_fees, None);
    }

    #[test]
    fn test_merge_with_empty_supplement_is_idempotent() {
        let mut record = UniversityRecord::from_candidate(&valid_candidate()).unwrap();
        let before = record.clone();
        record.merge_supplement(&ScrapedDetails::default());
        assert_eq!(record, before);
    }

    #[test]
    fn test_merge_never_touches_identity_fields() {
        let mut record = UniversityRecord::from_candidate(&valid_candidate()).unwrap();
        let supplement = ScrapedDetails {
            program_title: Some("Different Program".into()),
            source_url: Some("https://example.com/page".into()),
            scraped: true,
            ..ScrapedDetails::default()
        };
        record.merge_supplement(&supplement);
        assert_eq!(record.university_name, "Technical University of Munich");
        assert_eq!(record.city_country, "Munich, Germany");
        // Title was already set by the generator and keeps its value.
        assert_eq!(record.program_title, "MS Data Science");
        assert!(record.scraped);
        assert_eq!(record.source_url.as_deref(), Some("https://example.com/page"));
    }

    #[test]
    fn test_merge_fills_null_requirement_but_keeps_existing() {
        let mut record = UniversityRecord::from_candidate(&valid_candidate()).unwrap();
        record.requirements = RequirementSet {
            gpa: Some("3.0".into()),
            ielts: None,
            ..RequirementSet::default()
        };
        let supplement = ScrapedDetails {
            requirements: RequirementSet {
                gpa: Some("2.5".into()),
                ielts: Some("6.5".into()),
                ..RequirementSet::default()
            },
            ..ScrapedDetails::default()
        };
        record.merge_supplement(&supplement);
        assert_eq!(record.requirements.gpa.as_deref(), Some("3.0"));
        assert_eq!(record.requirements.ielts.as_deref(), Some("6.5"));
    }

    #[test]
    fn test_merge_fills_missing_tuition_and_deadline() {
        let mut raw = valid_candidate();
        raw["tuition_fees"] = json!(null);
        let mut record = UniversityRecord::from_candidate(&raw).unwrap();
        let supplement = ScrapedDetails {
            tuition_fees: Some(4200.0),
            application_deadline: Some("2026-01-15".into()),
            ..ScrapedDetails::default()
        };
        record.merge_supplement(&supplement);
        assert_eq!(record.tuition_fees, Some(4200.0));
        assert_eq!(record.application_deadline.as_deref(), Some("2026-01-15"));
    }

    #[test]
    fn test_merge_keeps_existing_tuition_over_supplement() {
        let mut record = UniversityRecord::from_candidate(&valid_candidate()).unwrap();
        assert_eq!(record.tuition_fees, Some(3000.0));
        let supplement = ScrapedDetails {
            tuition_fees: Some(9999.0),
            ..ScrapedDetails::default()
        };
        record.merge_supplement(&supplement);
        assert_eq!(record.tuition_fees, Some(3000.0));
    }

    #[test]
    fn test_scraped_details_from_reply_stamps_provenance() {
        let reply = json!({
            "program_title": "MSc Robotics",
            "tuition_fees": "4,500",
            "requirements": {"TOEFL": "90"},
            "application_deadline": null,
            "program_duration": "2 years",
            "additional_notes": null
        });
        let details = ScrapedDetails::from_reply(&reply, "https://example.com/p");
        assert!(details.scraped);
        assert_eq!(details.source_url.as_deref(), Some("https://example.com/p"));
        assert_eq!(details.tuition_fees, Some(4500.0));
        assert_eq!(details.requirements.toefl.as_deref(), Some("90"));
        assert!(!details.is_empty());
    }

    #[test]
    fn test_scraped_details_from_non_object_reply_is_empty() {
        let details = ScrapedDetails::from_reply(&json!(["not", "an", "object"]), "https://x");
        assert!(details.is_empty());
        assert!(details.source_url.is_none());
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = UniversityRecord::from_candidate(&valid_candidate()).unwrap();
        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: UniversityRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(record, decoded);
    }
}
