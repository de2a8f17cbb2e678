//! In-memory resource store
//!
//! One [`ResourceStore`] holds every record of a single resource type, keyed
//! by GUID, plus relationship indices mapping a parent GUID to the set of
//! child GUIDs linked to it (for example `space_guid -> users`).
//!
//! Reads share the lock, writes take it exclusively, so GUID assignment and
//! timestamp stamping are atomic with respect to other writers.

use ccapi_core::documents::{Document, Metadata};
use ccapi_core::{QueryFilter, ResourceKind};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Entity types that can be kept in a store
pub trait Resource: Clone + Send + Sync + 'static {
    /// Resource type, which determines the record URL
    const KIND: ResourceKind;

    /// String value of a filterable field, `None` when the entity has no such field
    fn field(&self, name: &str) -> Option<String>;
}

/// A stored resource instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<E> {
    pub guid: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub entity: E,
}

impl<E: Clone> Record<E> {
    /// Shape this record as an API document
    pub fn to_document(&self) -> Document<E> {
        Document {
            metadata: Metadata {
                guid: self.guid.clone(),
                url: self.url.clone(),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            entity: self.entity.clone(),
        }
    }
}

/// relation name -> parent GUID -> child GUIDs
type RelationIndex = HashMap<String, HashMap<String, BTreeSet<String>>>;

struct Inner<E> {
    records: BTreeMap<String, Record<E>>,
    relations: RelationIndex,
}

/// GUID-keyed collection for one resource type
pub struct ResourceStore<E> {
    inner: RwLock<Inner<E>>,
}

impl<E: Resource> Default for ResourceStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Resource> ResourceStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: BTreeMap::new(),
                relations: HashMap::new(),
            }),
        }
    }

    /// Insert a new record with a fresh GUID and the current UTC instant as creation time.
    pub async fn create(&self, entity: E) -> Record<E> {
        let mut inner = self.inner.write().await;

        let guid = loop {
            let candidate = Uuid::new_v4().to_string();
            if !inner.records.contains_key(&candidate) {
                break candidate;
            }
        };

        let record = Record {
            url: E::KIND.resource_path(&guid),
            guid: guid.clone(),
            created_at: Utc::now(),
            updated_at: None,
            entity,
        };
        inner.records.insert(guid, record.clone());

        debug!("Created {} {}", E::KIND, record.guid);
        record
    }

    pub async fn get(&self, guid: &str) -> Option<Record<E>> {
        self.inner.read().await.records.get(guid).cloned()
    }

    pub async fn contains(&self, guid: &str) -> bool {
        self.inner.read().await.records.contains_key(guid)
    }

    /// Mutate an existing record in place and stamp its update time.
    ///
    /// Returns `None` when the GUID is unknown; nothing is created in that case.
    pub async fn update<F>(&self, guid: &str, mutate: F) -> Option<Record<E>>
    where
        F: FnOnce(&mut E),
    {
        let mut inner = self.inner.write().await;
        let record = inner.records.get_mut(guid)?;

        mutate(&mut record.entity);
        record.updated_at = Some(Utc::now());

        debug!("Updated {} {}", E::KIND, guid);
        Some(record.clone())
    }

    /// Remove a record and every relationship entry pointing at it.
    ///
    /// Returns whether the record existed.
    pub async fn delete(&self, guid: &str) -> bool {
        let mut inner = self.inner.write().await;
        if inner.records.remove(guid).is_none() {
            return false;
        }

        for parents in inner.relations.values_mut() {
            for children in parents.values_mut() {
                children.remove(guid);
            }
        }

        debug!("Deleted {} {}", E::KIND, guid);
        true
    }

    /// List records ordered by GUID, optionally scoped by a filter.
    ///
    /// A record matches when its field named by the filter equals the value,
    /// or when the relationship index of that name links it to the value.
    pub async fn list(&self, filter: Option<&QueryFilter>) -> Vec<Record<E>> {
        let inner = self.inner.read().await;

        let Some(filter) = filter else {
            return inner.records.values().cloned().collect();
        };

        let linked = inner
            .relations
            .get(filter.field())
            .and_then(|parents| parents.get(filter.value()));

        inner
            .records
            .values()
            .filter(|record| {
                record.entity.field(filter.field()).as_deref() == Some(filter.value())
                    || linked.is_some_and(|children| children.contains(&record.guid))
            })
            .cloned()
            .collect()
    }

    /// Link `child` to `parent` under `relation`.
    ///
    /// Returns `false` without touching the index when the child does not exist.
    pub async fn link(&self, relation: &str, parent: &str, child: &str) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.records.contains_key(child) {
            return false;
        }

        inner
            .relations
            .entry(relation.to_string())
            .or_default()
            .entry(parent.to_string())
            .or_default()
            .insert(child.to_string());

        debug!("Linked {} {} to {} {}", E::KIND, child, relation, parent);
        true
    }

    /// Remove a link, returning whether it was present
    pub async fn unlink(&self, relation: &str, parent: &str, child: &str) -> bool {
        let mut inner = self.inner.write().await;
        inner
            .relations
            .get_mut(relation)
            .and_then(|parents| parents.get_mut(parent))
            .is_some_and(|children| children.remove(child))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every record and relationship
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.records.clear();
        inner.relations.clear();
    }
}
