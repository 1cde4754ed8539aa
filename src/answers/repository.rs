use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use super::store::KeyValueStore;
use super::types::AnswerSheet;

/// Key holding the JSON object of ratings
pub const ANSWERS_KEY: &str = "consultorNegociosRespuestasV1";
/// Key holding the ISO-8601 timestamp of the last save
pub const LAST_SAVED_KEY: &str = "consultorNegociosLastSaved";

/// Persistence contract for the answer sheet on top of a key-value store
#[derive(Debug, Clone)]
pub struct AnswerRepository<S> {
    store: S,
}

impl<S: KeyValueStore> AnswerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Load saved answers.
    ///
    /// Never fails: missing data is an empty sheet, and unreadable or
    /// malformed data is discarded with a notice.
    pub fn load(&self) -> AnswerSheet {
        let raw = match self.store.get(ANSWERS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return AnswerSheet::new(),
            Err(e) => {
                crate::notice!("Could not read saved answers, starting fresh: {}", e);
                return AnswerSheet::new();
            }
        };

        match AnswerSheet::from_json(&raw) {
            Ok(sheet) => {
                crate::detail!("Loaded {} saved answers", sheet.len());
                sheet
            }
            Err(e) => {
                crate::notice!("Saved answers are corrupted ({}), starting fresh.", e);
                AnswerSheet::new()
            }
        }
    }

    /// Overwrite the stored answers and stamp the save time
    pub fn save(&mut self, sheet: &AnswerSheet) -> Result<DateTime<Utc>> {
        self.save_at(sheet, Utc::now())
    }

    /// Write both keys or neither.
    ///
    /// When the timestamp cannot be written the previous answers are put
    /// back, so the store never holds answers newer than the ones a failed
    /// save reported.
    pub fn save_at(&mut self, sheet: &AnswerSheet, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        // Unreadable old answers are not worth restoring
        let previous = self.store.get(ANSWERS_KEY).ok().flatten();

        self.store
            .set(ANSWERS_KEY, &sheet.to_json())
            .context("Failed to save answers")?;

        let stamped = self
            .store
            .set(LAST_SAVED_KEY, &now.to_rfc3339_opts(SecondsFormat::Millis, true))
            .context("Failed to save timestamp");

        if let Err(e) = stamped {
            let restored = match previous {
                Some(raw) => self.store.set(ANSWERS_KEY, &raw),
                None => self.store.remove(ANSWERS_KEY),
            };
            if let Err(rollback) = restored {
                crate::notice!("Could not restore previous answers: {}", rollback);
            }
            return Err(e);
        }

        Ok(now)
    }

    /// Time of the last successful save, if any
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        let raw = self.store.get(LAST_SAVED_KEY).ok()??;
        DateTime::parse_from_rfc3339(raw.trim())
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    /// Remove both keys.
    ///
    /// The timestamp goes first: if removing the answers then fails, the
    /// answers on disk are still the ones callers hold in memory.
    pub fn clear(&mut self) -> Result<()> {
        self.store
            .remove(LAST_SAVED_KEY)
            .context("Failed to remove save timestamp")?;
        self.store
            .remove(ANSWERS_KEY)
            .context("Failed to remove saved answers")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::store::FailOnKey;
    use crate::answers::MemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_load_missing_returns_empty() {
        let repo = AnswerRepository::new(MemoryStore::new());
        assert!(repo.load().is_empty());
        assert!(repo.last_saved().is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut repo = AnswerRepository::new(MemoryStore::new());
        let mut sheet = AnswerSheet::new();
        sheet.set("marketing-0", 4);
        sheet.set("sistemas-2", 1);

        repo.save(&sheet).unwrap();

        let loaded = repo.load();
        assert_eq!(loaded, sheet);
        assert!(repo.last_saved().is_some());
    }

    #[test]
    fn test_malformed_json_loads_empty() {
        let store = MemoryStore::new().with_entry(ANSWERS_KEY, "{\"marketing-0\": 4,");
        let repo = AnswerRepository::new(store);
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_non_object_json_loads_empty() {
        let store = MemoryStore::new().with_entry(ANSWERS_KEY, "\"hello\"");
        let repo = AnswerRepository::new(store);
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_timestamp_iso_format() {
        let mut repo = AnswerRepository::new(MemoryStore::new());
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        repo.save_at(&AnswerSheet::new(), now).unwrap();

        assert_eq!(
            repo.store().get(LAST_SAVED_KEY).unwrap().as_deref(),
            Some("2024-03-09T14:05:00.000Z")
        );
        assert_eq!(repo.last_saved(), Some(now));
    }

    #[test]
    fn test_unparsable_timestamp_is_none() {
        let store = MemoryStore::new().with_entry(LAST_SAVED_KEY, "yesterday");
        let repo = AnswerRepository::new(store);
        assert!(repo.last_saved().is_none());
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let mut repo = AnswerRepository::new(MemoryStore::new());
        let mut sheet = AnswerSheet::new();
        sheet.set("finanzas-1", 3);
        repo.save(&sheet).unwrap();

        repo.clear().unwrap();

        assert!(!repo.store().contains_key(ANSWERS_KEY));
        assert!(!repo.store().contains_key(LAST_SAVED_KEY));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_failed_timestamp_restores_previous_answers() {
        let store = FailOnKey::new(
            MemoryStore::new().with_entry(ANSWERS_KEY, r#"{"finanzas-0":2}"#),
            LAST_SAVED_KEY,
        );
        let mut repo = AnswerRepository::new(store);

        let mut sheet = AnswerSheet::new();
        sheet.set("finanzas-0", 5);
        assert!(repo.save(&sheet).is_err());

        assert_eq!(repo.load().get("finanzas-0"), Some(2));
    }

    #[test]
    fn test_failed_timestamp_on_first_save_leaves_nothing() {
        let store = FailOnKey::new(MemoryStore::new(), LAST_SAVED_KEY);
        let mut repo = AnswerRepository::new(store);

        let mut sheet = AnswerSheet::new();
        sheet.set("finanzas-0", 5);
        assert!(repo.save(&sheet).is_err());

        assert!(repo.store().inner.is_empty());
    }

    #[test]
    fn test_failed_clear_keeps_answers() {
        let store = FailOnKey::new(
            MemoryStore::new().with_entry(ANSWERS_KEY, r#"{"finanzas-0":2}"#),
            LAST_SAVED_KEY,
        );
        let mut repo = AnswerRepository::new(store);

        assert!(repo.clear().is_err());
        assert_eq!(repo.load().get("finanzas-0"), Some(2));
    }
}
