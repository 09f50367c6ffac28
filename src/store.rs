use crate::errors::StoreError;
use crate::filter::Timestamped;
use crate::models::{JournalEntry, MedicationEntry, SymptomEntry};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Minimal capability the store needs from its backend.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: String);
}

/// In-memory key-value backend. Also the snapshot written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Symptoms,
    Journal,
    Meds,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Symptoms, RecordKind::Journal, RecordKind::Meds];

    pub fn key(self) -> &'static str {
        match self {
            RecordKind::Symptoms => "symptoms",
            RecordKind::Journal => "journal",
            RecordKind::Meds => "meds",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An entry type bound to the partition it lives in.
pub trait Record: Serialize + DeserializeOwned + Clone + Timestamped {
    const KIND: RecordKind;
}

impl Record for SymptomEntry {
    const KIND: RecordKind = RecordKind::Symptoms;
}

impl Record for JournalEntry {
    const KIND: RecordKind = RecordKind::Journal;
}

impl Record for MedicationEntry {
    const KIND: RecordKind = RecordKind::Meds;
}

/// Append-only store with one JSON-array partition per record kind.
///
/// `append` adds to the end, so partitions read oldest first. Nothing is
/// edited or removed in place.
#[derive(Debug, Clone, Default)]
pub struct RecordStore<S> {
    storage: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Adds `entry` to the end of its partition and rewrites the partition.
    ///
    /// A partition that no longer parses is replaced by one holding only `entry`.
    pub fn append<R: Record>(&mut self, entry: R) -> Result<(), StoreError> {
        let mut entries = self.get_all::<R>();
        entries.push(entry);

        let payload = serde_json::to_string(&entries).map_err(|source| StoreError::Serialize {
            partition: R::KIND.key(),
            source,
        })?;
        self.storage.set_item(R::KIND.key(), payload);
        Ok(())
    }

    /// Every entry of `R`'s partition, in the order it was appended.
    ///
    /// Missing or unparseable partitions read as empty.
    pub fn get_all<R: Record>(&self) -> Vec<R> {
        let Some(raw) = self.storage.get_item(R::KIND.key()) else {
            return Vec::new();
        };

        match serde_json::from_str::<Option<Vec<R>>>(&raw) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                warn!(partition = %R::KIND, "ignoring unreadable partition: {err}");
                Vec::new()
            }
        }
    }

    pub fn symptoms(&self) -> Vec<SymptomEntry> {
        self.get_all()
    }

    pub fn journal(&self) -> Vec<JournalEntry> {
        self.get_all()
    }

    pub fn meds(&self) -> Vec<MedicationEntry> {
        self.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, day, 12, 0, 0).unwrap()
    }

    fn symptom(day: u32, joints: &[&str], pain: u8) -> SymptomEntry {
        SymptomEntry {
            timestamp: at(day),
            joints: joints.iter().map(|j| j.to_string()).collect(),
            pain,
            joint_notes: Default::default(),
            notes: None,
        }
    }

    #[test]
    fn unwritten_partition_reads_empty() {
        let store = RecordStore::new(MemoryStorage::new());
        assert!(store.symptoms().is_empty());
        assert!(store.journal().is_empty());
        assert!(store.meds().is_empty());
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut store = RecordStore::new(MemoryStorage::new());
        store.append(symptom(1, &["Knee"], 6)).unwrap();
        store.append(symptom(2, &["Wrist"], 3)).unwrap();
        store.append(symptom(3, &[], 0)).unwrap();

        let days: Vec<_> = store.symptoms().iter().map(|e| e.timestamp).collect();
        assert_eq!(days, vec![at(1), at(2), at(3)]);
    }

    #[test]
    fn partitions_are_independent() {
        let mut store = RecordStore::new(MemoryStorage::new());
        store.append(symptom(1, &["Hip"], 2)).unwrap();
        store
            .append(JournalEntry {
                timestamp: at(1),
                text: "Slept badly".into(),
            })
            .unwrap();

        assert_eq!(store.symptoms().len(), 1);
        assert_eq!(store.journal().len(), 1);
        assert!(store.meds().is_empty());
        assert_eq!(store.storage().len(), 2);
    }

    #[test]
    fn entries_survive_reload_through_text() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let written = vec![symptom(1, &["Knee"], 6), symptom(2, &["Knee", "Wrist"], 8)];
        for entry in &written {
            store.append(entry.clone()).unwrap();
        }
        store
            .append(MedicationEntry {
                timestamp: at(2),
                name: "Naproxen".into(),
                kind: "Tablet".into(),
                details: Some("with food".into()),
            })
            .unwrap();

        let text = serde_json::to_string(store.storage()).unwrap();
        let reloaded = RecordStore::new(serde_json::from_str::<MemoryStorage>(&text).unwrap());

        assert_eq!(reloaded.symptoms(), written);
        assert_eq!(reloaded.meds(), store.meds());
    }

    #[test]
    fn corrupt_partition_reads_empty_and_is_replaced_on_append() {
        let mut storage = MemoryStorage::new();
        storage.set_item("journal", "{not json".into());
        storage.set_item("meds", "null".into());
        let mut store = RecordStore::new(storage);

        assert!(store.journal().is_empty());
        assert!(store.meds().is_empty());

        store
            .append(JournalEntry {
                timestamp: at(4),
                text: "Better today".into(),
            })
            .unwrap();
        assert_eq!(store.journal().len(), 1);
    }

    #[test]
    fn reads_and_extends_partitions_written_by_the_browser_app() {
        let mut storage = MemoryStorage::new();
        storage.set_item(
            "symptoms",
            r#"[{"date":"2026-05-02T08:15:00.000Z","joints":[{"name":"Knee","note":"swollen"},{"name":"Hip","note":""}],"pain":"5"}]"#.into(),
        );
        let mut store = RecordStore::new(storage);

        let entries = store.symptoms();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].joints, vec!["Knee", "Hip"]);
        assert_eq!(entries[0].note_for("Knee"), Some("swollen"));
        assert_eq!(entries[0].note_for("Hip"), None);
        assert_eq!(entries[0].pain, 5);
        assert_eq!(entries[0].timestamp, Utc.with_ymd_and_hms(2026, 5, 2, 8, 15, 0).unwrap());

        store.append(symptom(3, &["Wrist"], 2)).unwrap();
        let entries = store.symptoms();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].note_for("Knee"), Some("swollen"));
        assert_eq!(entries[1].joints, vec!["Wrist"]);
    }

    #[test]
    fn partition_keys_match_storage_names() {
        let keys: Vec<_> = RecordKind::ALL.iter().map(|kind| kind.key()).collect();
        assert_eq!(keys, vec!["symptoms", "journal", "meds"]);
    }
}
