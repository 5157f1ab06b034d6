use rust_xlsxwriter::{Format, Workbook};

use crate::{errors::AppResult, models::domain::UniversityRecord};

pub const EXPORT_COLUMNS: &[&str] = &[
    "University Name",
    "Location",
    "Program",
    "Tuition Fees",
    "Program Page",
    "Application Link",
    "GPA Requirement",
    "IELTS Requirement",
    "TOEFL Requirement",
    "GRE Requirement",
    "GMAT Requirement",
    "Application Deadline",
    "Program Duration",
    "Scholarships",
];

/// Index of the "Tuition Fees" column; written as a number when present.
const TUITION_COL: usize = 3;

/// Flattens one record into spreadsheet cells, in `EXPORT_COLUMNS` order.
/// Scholarships are joined into a single display string; absent values
/// become empty cells.
pub fn flatten_record(record: &UniversityRecord) -> Vec<String> {
    let scholarships = record
        .scholarships
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        record.university_name.clone(),
        record.city_country.clone(),
        record.program_title.clone(),
        record.tuition_fees.map(|t| t.to_string()).unwrap_or_default(),
        record.program_page.clone().unwrap_or_default(),
        record.application_link.clone().unwrap_or_default(),
        record.requirements.gpa.clone().unwrap_or_default(),
        record.requirements.ielts.clone().unwrap_or_default(),
        record.requirements.toefl.clone().unwrap_or_default(),
        record.requirements.gre.clone().unwrap_or_default(),
        record.requirements.gmat.clone().unwrap_or_default(),
        record.application_deadline.clone().unwrap_or_default(),
        record.program_duration.clone().unwrap_or_default(),
        scholarships,
    ]
}

/// Serializes the records into an in-memory `.xlsx` workbook.
pub fn build_workbook(records: &[UniversityRecord]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Universities")?;

    let header_format = Format::new().set_bold();
    for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (row, record) in records.iter().enumerate() {
        let row = (row + 1) as u32;
        let cells = flatten_record(record);
        for (col, cell) in cells.iter().enumerate() {
            if col == TUITION_COL {
                if let Some(tuition) = record.tuition_fees {
                    worksheet.write_number(row, col as u16, tuition)?;
                }
                continue;
            }
            worksheet.write_string(row, col as u16, cell)?;
        }
    }

    let buffer = workbook.save_to_buffer()?;
    log::info!("exported {} record(s) to spreadsheet", records.len());
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{RequirementSet, Scholarship},
        test_utils::fixtures,
    };

    #[test]
    fn test_flatten_record_preserves_fields_as_separate_columns() {
        let mut record = fixtures::berlin_record();
        record.requirements = RequirementSet {
            gpa: Some("2.8".into()),
            ielts: Some("6.5".into()),
            toefl: Some("90".into()),
            gre: Some("310".into()),
            gmat: Some("650".into()),
        };
        record.scholarships = vec![
            Scholarship { name: "DAAD".into() },
            Scholarship { name: "Deutschlandstipendium".into() },
        ];

        let cells = flatten_record(&record);
        assert_eq!(cells.len(), EXPORT_COLUMNS.len());
        assert_eq!(cells[0], record.university_name);
        assert_eq!(cells[3], "3000");
        assert_eq!(cells[6], "2.8");
        assert_eq!(cells[7], "6.5");
        assert_eq!(cells[8], "90");
        assert_eq!(cells[9], "310");
        assert_eq!(cells[10], "650");
        assert_eq!(cells[13], "DAAD, Deutschlandstipendium");
    }

    #[test]
    fn test_flatten_record_tolerates_absent_fields() {
        let mut record = fixtures::berlin_record();
        record.tuition_fees = None;
        record.scholarships = Vec::new();
        record.program_page = None;

        let cells = flatten_record(&record);
        assert_eq!(cells[3], "");
        assert_eq!(cells[4], "");
        assert_eq!(cells[13], "");
    }

    #[test]
    fn test_build_workbook_produces_xlsx_bytes() {
        let buffer = build_workbook(&[fixtures::berlin_record()]).unwrap();
        // xlsx is a zip container; check the magic bytes.
        assert!(buffer.len() > 4);
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_build_workbook_with_no_records_still_writes_headers() {
        let buffer = build_workbook(&[]).unwrap();
        assert!(!buffer.is_empty());
    }
}
