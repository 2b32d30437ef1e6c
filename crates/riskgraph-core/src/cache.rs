//! Per-model entity identity cache

use crate::model::Iri;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared record behind every handle to one entity
#[derive(Debug)]
pub struct EntityRecord<K> {
    kind: K,
    iri: Iri,
}

impl<K: Copy> EntityRecord<K> {
    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn iri(&self) -> &Iri {
        &self.iri
    }
}

/// Write-once map from `(kind, identifier)` to the entity record.
///
/// The first lookup of a key creates the record; every later lookup, from any
/// thread, returns the same `Arc`. Entries are never evicted.
#[derive(Debug)]
pub struct EntityCache<K> {
    entries: RwLock<HashMap<(K, Iri), Arc<EntityRecord<K>>>>,
}

impl<K> Default for EntityCache<K> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K> EntityCache<K>
where
    K: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_insert(&self, kind: K, iri: &Iri) -> Arc<EntityRecord<K>> {
        let key = (kind, iri.clone());
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(record) = entries.get(&key) {
                return Arc::clone(record);
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let record = entries.entry(key).or_insert_with(|| {
            Arc::new(EntityRecord {
                kind,
                iri: iri.clone(),
            })
        });
        Arc::clone(record)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Asset,
        Threat,
    }

    #[test]
    fn test_same_key_returns_same_record() {
        let cache = EntityCache::new();
        let iri = Iri::new("http://example.org/system#a1");
        let first = cache.get_or_insert(Kind::Asset, &iri);
        let second = cache.get_or_insert(Kind::Asset, &iri);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_kinds_are_cached_separately() {
        let cache = EntityCache::new();
        let iri = Iri::new("http://example.org/system#x");
        let asset = cache.get_or_insert(Kind::Asset, &iri);
        let threat = cache.get_or_insert(Kind::Threat, &iri);
        assert!(!Arc::ptr_eq(&asset, &threat));
        assert_eq!(threat.kind(), Kind::Threat);
        assert_eq!(threat.iri(), &iri);
    }

    #[test]
    fn test_concurrent_first_access_yields_one_record() {
        let cache = Arc::new(EntityCache::new());
        let iri = Iri::new("http://example.org/system#shared");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let iri = iri.clone();
                thread::spawn(move || cache.get_or_insert(Kind::Asset, &iri))
            })
            .collect();

        let records: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
        assert!(records.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
        assert_eq!(cache.len(), 1);
    }
}
