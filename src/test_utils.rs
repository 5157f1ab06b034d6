use crate::models::domain::{RequirementSet, UniversityRecord};

pub mod fixtures {
    use super::*;

    /// A catalog-style record that matches the criteria
    /// `(budget=5000, gpa=3.0, country="Germany", degree="Data Science")`.
    pub fn berlin_record() -> UniversityRecord {
        UniversityRecord {
            university_name: "Humboldt University".to_string(),
            city_country: "Berlin, Germany".to_string(),
            program_title: "MS Data Science".to_string(),
            program_page: Some("https://example.edu/ms-data-science".to_string()),
            application_link: Some("https://example.edu/apply".to_string()),
            tuition_fees: Some(3000.0),
            program_duration: None,
            application_deadline: None,
            requirements: RequirementSet {
                gpa: Some("2.8".to_string()),
                ..RequirementSet::default()
            },
            scholarships: Vec::new(),
            additional_notes: None,
            source_url: None,
            scraped: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_berlin_record_fixture() {
        let record = berlin_record();
        assert_eq!(record.city_country, "Berlin, Germany");
        assert_eq!(record.requirements.parsed_gpa(), Some(2.8));
    }
}
