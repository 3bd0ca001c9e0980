use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;
use platform_storage::{DomainRecord, RecordStore, StorageError};
use tracing::debug;

/// In-memory record store using papaya lock-free HashMap.
///
/// Keys are domain ids and values are the stored environments. Every
/// operation is a single map call, so concurrent reconciles of different
/// domains never block each other.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    data: PapayaHashMap<String, Vec<String>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.data.pin().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if a record with this id is stored.
    pub fn contains(&self, id: &str) -> bool {
        self.data.pin().contains_key(id)
    }

    /// All stored records, sorted by id.
    pub fn records(&self) -> Vec<DomainRecord> {
        let guard = self.data.pin();
        let mut records: Vec<DomainRecord> = guard
            .iter()
            .map(|(id, envs)| DomainRecord::new(id.clone(), envs.clone()))
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, id: &str) -> Result<Option<DomainRecord>, StorageError> {
        let guard = self.data.pin();
        Ok(guard
            .get(id)
            .map(|envs| DomainRecord::new(id, envs.clone())))
    }

    async fn create(&self, record: &DomainRecord) -> Result<(), StorageError> {
        let guard = self.data.pin();
        guard
            .try_insert(record.id.clone(), record.environments.clone())
            .map_err(|_| StorageError::already_exists(&record.id))?;
        debug!(id = %record.id, "record created");
        Ok(())
    }

    async fn update(&self, record: &DomainRecord) -> Result<(), StorageError> {
        let guard = self.data.pin();
        guard
            .update(record.id.clone(), |_| record.environments.clone())
            .ok_or_else(|| StorageError::not_found(&record.id))?;
        debug!(id = %record.id, "record updated");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let guard = self.data.pin();
        if guard.remove(id).is_some() {
            debug!(id, "record deleted");
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, envs: &[&str]) -> DomainRecord {
        DomainRecord::new(id, envs.iter().map(|e| e.to_string()).collect())
    }

    #[tokio::test]
    async fn test_store_basic_operations() {
        let store = InMemoryRecordStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("teama").await.unwrap(), None);

        store.create(&record("teama", &["dev"])).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("teama").await.unwrap(),
            Some(record("teama", &["dev"]))
        );

        store.update(&record("teama", &["dev", "prod"])).await.unwrap();
        assert_eq!(
            store.get("teama").await.unwrap(),
            Some(record("teama", &["dev", "prod"]))
        );

        store.delete("teama").await.unwrap();
        assert!(!store.contains("teama"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_conflicts_and_not_found() {
        let store = InMemoryRecordStore::new();
        store.create(&record("teama", &["dev"])).await.unwrap();

        let conflict = store.create(&record("teama", &["prod"])).await;
        assert!(conflict.unwrap_err().is_already_exists());
        // The stored record is untouched.
        assert_eq!(
            store.get("teama").await.unwrap(),
            Some(record("teama", &["dev"]))
        );

        let missing = store.update(&record("teamb", &["dev"])).await;
        assert!(missing.unwrap_err().is_not_found());
        assert!(!store.contains("teamb"));
    }

    #[tokio::test]
    async fn test_delete_absent_is_ok() {
        let store = InMemoryRecordStore::new();
        store.delete("ghost").await.unwrap();
        store.delete("ghost").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_records_sorted() {
        let store = InMemoryRecordStore::new();
        store.create(&record("b", &["dev"])).await.unwrap();
        store.create(&record("a", &["prod"])).await.unwrap();

        let ids: Vec<_> = store.records().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.backend_name(), "memory");
    }
}
