//! Typed tenant filtering.
//!
//! Data access is scoped by constructing a [`TenantFilter`] from the caller's
//! verified tenant and handing it to the store. Extra predicates can be
//! layered on with [`TenantFilter::and`], but the tenant predicate is always
//! evaluated first and cannot be removed.

use core::fmt;

use autoservice_core::TenantId;

/// Types that belong to exactly one tenant.
pub trait TenantOwned {
    fn tenant_id(&self) -> TenantId;
}

impl<T: TenantOwned + ?Sized> TenantOwned for &T {
    fn tenant_id(&self) -> TenantId {
        (**self).tenant_id()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenantFilter {
    tenant_id: TenantId,
}

impl TenantFilter {
    pub fn for_tenant(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn matches<T: TenantOwned + ?Sized>(&self, record: &T) -> bool {
        record.tenant_id() == self.tenant_id
    }

    /// Keep only the records owned by this tenant.
    pub fn apply<I, T>(self, records: I) -> impl Iterator<Item = T>
    where
        I: IntoIterator<Item = T>,
        T: TenantOwned,
    {
        records.into_iter().filter(move |r| self.matches(r))
    }

    /// Query with no predicate beyond the tenant.
    pub fn query<T>(self) -> ScopedQuery<T> {
        ScopedQuery {
            tenant: self,
            predicates: Vec::new(),
        }
    }

    pub fn and<T, P>(self, predicate: P) -> ScopedQuery<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.query().and(predicate)
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Tenant filter plus any number of record predicates, all ANDed.
pub struct ScopedQuery<T> {
    tenant: TenantFilter,
    predicates: Vec<Predicate<T>>,
}

impl<T> ScopedQuery<T> {
    pub fn and<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn tenant(&self) -> TenantFilter {
        self.tenant
    }
}

impl<T: TenantOwned> ScopedQuery<T> {
    pub fn matches(&self, record: &T) -> bool {
        self.tenant.matches(record) && self.predicates.iter().all(|p| p(record))
    }
}

impl<T> fmt::Debug for ScopedQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedQuery")
            .field("tenant", &self.tenant)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}
