pub mod university;

pub use university::{RequirementSet, Scholarship, ScrapedDetails, UniversityRecord};
