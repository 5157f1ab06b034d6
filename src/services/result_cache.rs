use tokio::sync::RwLock;

use crate::models::domain::UniversityRecord;

/// Single-slot store for the most recent search's results, read by the
/// spreadsheet download. Last writer wins; each successful search overwrites
/// the slot in place.
#[derive(Default)]
pub struct ResultCache {
    slot: RwLock<Option<Vec<UniversityRecord>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, results: Vec<UniversityRecord>) {
        *self.slot.write().await = Some(results);
    }

    pub async fn get(&self) -> Option<Vec<UniversityRecord>> {
        self.slot.read().await.clone()
    }

    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }
}
