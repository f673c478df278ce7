//! `autoservice-data` — tenant-scoped workshop records.
//!
//! Every read is expressed through a [`TenantFilter`]; stores expose no
//! unscoped listing.

pub mod filter;
pub mod fixtures;
pub mod records;
pub mod reports;
pub mod store;
pub mod workshop;

pub use filter::{ScopedQuery, TenantFilter, TenantOwned};
pub use records::{Customer, Employee, JobStatus, Part, Position, Record, ServiceJob, Vehicle};
pub use reports::{ReportPeriod, TechnicianPerformance, technician_performance};
pub use store::{InMemoryTenantStore, TenantStore};
pub use workshop::Workshop;
