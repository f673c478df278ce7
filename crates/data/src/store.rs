use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use autoservice_core::{RecordId, TenantId};

use crate::{Record, ScopedQuery, TenantFilter};

/// Tenant-isolated record store.
///
/// Reads take a [`TenantFilter`] (or a [`ScopedQuery`] built from one), so a
/// caller can only ever see the tenant it was granted.
pub trait TenantStore<V: Record>: Send + Sync {
    fn get(&self, filter: TenantFilter, id: RecordId) -> Option<V>;
    fn insert(&self, record: V);
    fn query(&self, query: &ScopedQuery<V>) -> Vec<V>;
    fn remove(&self, filter: TenantFilter, id: RecordId) -> Option<V>;
    /// Drop every record of a tenant (offboarding).
    fn clear_tenant(&self, tenant_id: TenantId);
    /// Record count per tenant. Platform-level; exposes no record content.
    fn tenant_counts(&self) -> BTreeMap<TenantId, usize>;

    fn list(&self, filter: TenantFilter) -> Vec<V> {
        self.query(&filter.query())
    }
}

impl<V, S> TenantStore<V> for Arc<S>
where
    V: Record,
    S: TenantStore<V> + ?Sized,
{
    fn get(&self, filter: TenantFilter, id: RecordId) -> Option<V> {
        (**self).get(filter, id)
    }

    fn insert(&self, record: V) {
        (**self).insert(record)
    }

    fn query(&self, query: &ScopedQuery<V>) -> Vec<V> {
        (**self).query(query)
    }

    fn remove(&self, filter: TenantFilter, id: RecordId) -> Option<V> {
        (**self).remove(filter, id)
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        (**self).clear_tenant(tenant_id)
    }

    fn tenant_counts(&self) -> BTreeMap<TenantId, usize> {
        (**self).tenant_counts()
    }
}

/// In-memory store for tests and the demo server.
#[derive(Debug)]
pub struct InMemoryTenantStore<V> {
    inner: RwLock<Rows<V>>,
}

#[derive(Debug)]
struct Rows<V> {
    next_seq: u64,
    /// Value carries its insertion sequence for stable listing order.
    by_key: HashMap<(TenantId, RecordId), (u64, V)>,
}

impl<V> InMemoryTenantStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                next_seq: 0,
                by_key: HashMap::new(),
            }),
        }
    }
}

impl<V> Default for InMemoryTenantStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Record> TenantStore<V> for InMemoryTenantStore<V> {
    fn get(&self, filter: TenantFilter, id: RecordId) -> Option<V> {
        let rows = self.inner.read().ok()?;
        rows.by_key
            .get(&(filter.tenant_id(), id))
            .map(|(_seq, v)| v.clone())
    }

    fn insert(&self, record: V) {
        if let Ok(mut rows) = self.inner.write() {
            let key = (record.tenant_id(), record.id());
            // Updates keep their original position.
            let existing = rows.by_key.get(&key).map(|(seq, _v)| *seq);
            let seq = match existing {
                Some(seq) => seq,
                None => {
                    rows.next_seq += 1;
                    rows.next_seq
                }
            };
            rows.by_key.insert(key, (seq, record));
        }
    }

    fn query(&self, query: &ScopedQuery<V>) -> Vec<V> {
        let rows = match self.inner.read() {
            Ok(r) => r,
            Err(_) => {
                tracing::error!("tenant store lock poisoned");
                return vec![];
            }
        };

        let mut hits: Vec<&(u64, V)> = rows
            .by_key
            .values()
            .filter(|(_seq, v)| query.matches(v))
            .collect();
        hits.sort_by_key(|(seq, _v)| *seq);
        hits.into_iter().map(|(_seq, v)| v.clone()).collect()
    }

    fn remove(&self, filter: TenantFilter, id: RecordId) -> Option<V> {
        let mut rows = self.inner.write().ok()?;
        rows.by_key
            .remove(&(filter.tenant_id(), id))
            .map(|(_seq, v)| v)
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        if let Ok(mut rows) = self.inner.write() {
            rows.by_key.retain(|(t, _id), _v| *t != tenant_id);
        }
    }

    fn tenant_counts(&self) -> BTreeMap<TenantId, usize> {
        let mut counts = BTreeMap::new();
        if let Ok(rows) = self.inner.read() {
            for (tenant_id, _id) in rows.by_key.keys() {
                *counts.entry(*tenant_id).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Part, TenantOwned};

    fn part(tenant_id: TenantId, sku: &str, qty: u32) -> Part {
        Part::new(tenant_id, sku, "Test part", qty, 2, 100).unwrap()
    }

    #[test]
    fn reads_are_tenant_isolated() {
        let store = InMemoryTenantStore::new();
        let a = TenantId::new();
        let b = TenantId::new();
        let pa = part(a, "A-1", 1);
        let pb = part(b, "B-1", 1);
        store.insert(pa.clone());
        store.insert(pb.clone());

        let fa = TenantFilter::for_tenant(a);
        assert_eq!(store.list(fa), vec![pa.clone()]);
        assert_eq!(store.get(fa, pa.id), Some(pa));
        assert_eq!(store.get(fa, pb.id), None);
        assert_eq!(store.remove(fa, pb.id), None);
        assert_eq!(store.list(TenantFilter::for_tenant(b)).len(), 1);
    }

    #[test]
    fn query_applies_extra_predicates_in_scope() {
        let store = InMemoryTenantStore::new();
        let a = TenantId::new();
        store.insert(part(a, "LOW", 1));
        store.insert(part(a, "HIGH", 50));
        store.insert(part(TenantId::new(), "LOW-OTHER", 0));

        let low = store.query(&TenantFilter::for_tenant(a).and(Part::needs_reorder));
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].sku, "LOW");
        assert!(low.iter().all(|p| p.tenant_id() == a));
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = InMemoryTenantStore::new();
        let a = TenantId::new();
        for sku in ["P1", "P2", "P3"] {
            store.insert(part(a, sku, 5));
        }
        let skus: Vec<String> = store
            .list(TenantFilter::for_tenant(a))
            .into_iter()
            .map(|p| p.sku)
            .collect();
        assert_eq!(skus, vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn clear_and_count_tenants() {
        let store = InMemoryTenantStore::new();
        let a = TenantId::new();
        let b = TenantId::new();
        store.insert(part(a, "A-1", 1));
        store.insert(part(a, "A-2", 1));
        store.insert(part(b, "B-1", 1));

        let counts = store.tenant_counts();
        assert_eq!(counts.get(&a), Some(&2));
        assert_eq!(counts.get(&b), Some(&1));

        store.clear_tenant(a);
        assert!(store.list(TenantFilter::for_tenant(a)).is_empty());
        assert_eq!(store.tenant_counts().get(&a), None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: whatever the layout of tenants, a scoped read only
            /// returns rows of the filtered tenant, and all of them.
            #[test]
            fn scoped_reads_never_leak(owners in proptest::collection::vec(0usize..3, 0..30)) {
                let tenants = [TenantId::new(), TenantId::new(), TenantId::new()];
                let store = InMemoryTenantStore::new();
                for (i, owner) in owners.iter().enumerate() {
                    store.insert(part(tenants[*owner], &format!("P-{i}"), 1));
                }

                for (idx, tenant) in tenants.iter().enumerate() {
                    let rows = store.list(TenantFilter::for_tenant(*tenant));
                    prop_assert!(rows.iter().all(|p| p.tenant_id() == *tenant));
                    prop_assert_eq!(rows.len(), owners.iter().filter(|o| **o == idx).count());
                }
            }
        }
    }
}
