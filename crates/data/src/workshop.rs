//! The record stores of one deployment, bundled for the web layer.

use std::collections::BTreeMap;
use std::sync::Arc;

use autoservice_core::TenantId;

use crate::{Customer, Employee, InMemoryTenantStore, Part, ServiceJob, TenantStore, Vehicle};

#[derive(Clone)]
pub struct Workshop {
    pub customers: Arc<dyn TenantStore<Customer>>,
    pub vehicles: Arc<dyn TenantStore<Vehicle>>,
    pub parts: Arc<dyn TenantStore<Part>>,
    pub employees: Arc<dyn TenantStore<Employee>>,
    pub jobs: Arc<dyn TenantStore<ServiceJob>>,
}

impl Workshop {
    pub fn in_memory() -> Self {
        Self {
            customers: Arc::new(InMemoryTenantStore::new()),
            vehicles: Arc::new(InMemoryTenantStore::new()),
            parts: Arc::new(InMemoryTenantStore::new()),
            employees: Arc::new(InMemoryTenantStore::new()),
            jobs: Arc::new(InMemoryTenantStore::new()),
        }
    }

    /// Tenants known to any store, with their total record counts.
    pub fn tenant_overview(&self) -> BTreeMap<TenantId, usize> {
        let mut overview = BTreeMap::new();
        for counts in [
            self.customers.tenant_counts(),
            self.vehicles.tenant_counts(),
            self.parts.tenant_counts(),
            self.employees.tenant_counts(),
            self.jobs.tenant_counts(),
        ] {
            for (tenant_id, n) in counts {
                *overview.entry(tenant_id).or_insert(0) += n;
            }
        }
        overview
    }
}

impl core::fmt::Debug for Workshop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Workshop").finish_non_exhaustive()
    }
}
