//! In-memory collaborators for reconcile tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use platform_core::{Domain, DomainSpec, DomainStatus, ObjectKey};
use platform_db_memory::InMemoryRecordStore;
use platform_operator::namespace::ownership_labels;
use platform_operator::{
    EntityApi, EntityError, ManagedNamespace, NamespaceApi, NamespaceError, Reconciler,
};
use platform_storage::{DomainRecord, RecordStore, StorageError};

pub const NAMESPACE: &str = "platform";

pub fn domain(name: &str, id: &str, environments: &[&str]) -> Domain {
    let mut d = Domain::new(
        name,
        DomainSpec {
            id: id.to_string(),
            environments: environments.iter().map(|e| e.to_string()).collect(),
        },
    );
    d.metadata.namespace = Some(NAMESPACE.to_string());
    d
}

pub fn with_finalizer(mut d: Domain) -> Domain {
    d.add_finalizer();
    d
}

pub fn deleting(mut d: Domain) -> Domain {
    d.metadata.deletion_timestamp = Some(Time(Default::default()));
    d
}

/// `Domain` objects held in memory. A replace that drops the last finalizer
/// of a deleting object removes it, like the API server does.
#[derive(Default)]
pub struct FakeEntityApi {
    objects: Mutex<HashMap<ObjectKey, Domain>>,
    pub replaces: AtomicUsize,
    pub status_writes: AtomicUsize,
    pub fail_replace: AtomicBool,
    pub fail_status: AtomicBool,
}

impl FakeEntityApi {
    pub fn insert(&self, domain: Domain) -> ObjectKey {
        let key = domain.object_key();
        self.objects.lock().unwrap().insert(key.clone(), domain);
        key
    }

    pub fn stored(&self, key: &ObjectKey) -> Option<Domain> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn writes(&self) -> usize {
        self.replaces.load(Ordering::SeqCst) + self.status_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityApi for FakeEntityApi {
    async fn get(&self, key: &ObjectKey) -> Result<Option<Domain>, EntityError> {
        Ok(self.stored(key))
    }

    async fn replace(&self, domain: &Domain) -> Result<Domain, EntityError> {
        if self.fail_replace.load(Ordering::SeqCst) {
            return Err(EntityError::api("replace rejected"));
        }
        self.replaces.fetch_add(1, Ordering::SeqCst);
        let key = domain.object_key();
        let mut objects = self.objects.lock().unwrap();
        if domain.is_deleting() && domain.metadata.finalizers.as_ref().is_none_or(Vec::is_empty) {
            objects.remove(&key);
        } else {
            objects.insert(key, domain.clone());
        }
        Ok(domain.clone())
    }

    async fn update_status(
        &self,
        domain: &Domain,
        status: DomainStatus,
    ) -> Result<(), EntityError> {
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(EntityError::api("status write rejected"));
        }
        self.status_writes.fetch_add(1, Ordering::SeqCst);
        if let Some(stored) = self.objects.lock().unwrap().get_mut(&domain.object_key()) {
            stored.status = Some(status);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceCall {
    Get(String),
    Create(String),
    Delete(String),
}

impl NamespaceCall {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get(_))
    }
}

/// Cluster namespaces held in memory, recording every call.
#[derive(Default)]
pub struct FakeNamespaceApi {
    namespaces: Mutex<BTreeMap<String, ManagedNamespace>>,
    calls: Mutex<Vec<NamespaceCall>>,
    pub fail_create: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FakeNamespaceApi {
    pub fn insert(&self, name: &str, labels: BTreeMap<String, String>) {
        self.namespaces.lock().unwrap().insert(
            name.to_string(),
            ManagedNamespace {
                name: name.to_string(),
                labels,
            },
        );
    }

    pub fn insert_owned(&self, id: &str) {
        self.insert(id, ownership_labels(id, "domain-operator"));
    }

    pub fn namespace(&self, name: &str) -> Option<ManagedNamespace> {
        self.namespaces.lock().unwrap().get(name).cloned()
    }

    pub fn snapshot(&self) -> BTreeMap<String, ManagedNamespace> {
        self.namespaces.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<NamespaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<NamespaceCall> {
        self.calls().into_iter().filter(NamespaceCall::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: NamespaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl NamespaceApi for FakeNamespaceApi {
    async fn get(&self, name: &str) -> Result<Option<ManagedNamespace>, NamespaceError> {
        self.record(NamespaceCall::Get(name.to_string()));
        Ok(self.namespace(name))
    }

    async fn create(
        &self,
        name: &str,
        labels: BTreeMap<String, String>,
    ) -> Result<(), NamespaceError> {
        self.record(NamespaceCall::Create(name.to_string()));
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(NamespaceError::api("create rejected"));
        }
        let mut namespaces = self.namespaces.lock().unwrap();
        if namespaces.contains_key(name) {
            return Err(NamespaceError::api(format!("namespace {name} already exists")));
        }
        namespaces.insert(
            name.to_string(),
            ManagedNamespace {
                name: name.to_string(),
                labels,
            },
        );
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), NamespaceError> {
        self.record(NamespaceCall::Delete(name.to_string()));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(NamespaceError::api("delete rejected"));
        }
        self.namespaces.lock().unwrap().remove(name);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCall {
    Get(String),
    Create(DomainRecord),
    Update(DomainRecord),
    Delete(String),
}

impl RecordCall {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get(_))
    }
}

/// [`InMemoryRecordStore`] that records calls and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: InMemoryRecordStore,
    calls: Mutex<Vec<RecordCall>>,
    pub fail_get: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl RecordingStore {
    pub fn calls(&self) -> Vec<RecordCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<RecordCall> {
        self.calls().into_iter().filter(RecordCall::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: RecordCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn get(&self, id: &str) -> Result<Option<DomainRecord>, StorageError> {
        self.record(RecordCall::Get(id.to_string()));
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(StorageError::connection_error("connection refused"));
        }
        self.inner.get(id).await
    }

    async fn create(&self, record: &DomainRecord) -> Result<(), StorageError> {
        self.record(RecordCall::Create(record.clone()));
        self.inner.create(record).await
    }

    async fn update(&self, record: &DomainRecord) -> Result<(), StorageError> {
        self.record(RecordCall::Update(record.clone()));
        self.inner.update(record).await
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.record(RecordCall::Delete(id.to_string()));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StorageError::connection_error("connection refused"));
        }
        self.inner.delete(id).await
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

/// A reconciler wired to fresh fakes.
pub struct Harness {
    pub entities: Arc<FakeEntityApi>,
    pub records: Arc<RecordingStore>,
    pub namespaces: Arc<FakeNamespaceApi>,
    pub reconciler: Reconciler,
}

impl Harness {
    pub fn new() -> Self {
        let entities = Arc::new(FakeEntityApi::default());
        let records = Arc::new(RecordingStore::default());
        let namespaces = Arc::new(FakeNamespaceApi::default());
        let reconciler = Reconciler::new(entities.clone(), records.clone(), namespaces.clone());
        Self {
            entities,
            records,
            namespaces,
            reconciler,
        }
    }

    pub fn clear_calls(&self) {
        self.records.clear_calls();
        self.namespaces.clear_calls();
    }
}
