pub mod search_handler;

pub use search_handler::{check_health, download_excel, search_universities};
