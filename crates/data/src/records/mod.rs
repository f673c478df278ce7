//! Workshop records. Constructors validate; stores hold only valid records.

mod customer;
mod employee;
mod job;
mod part;
mod vehicle;

pub use customer::Customer;
pub use employee::{Employee, Position};
pub use job::{JobStatus, ServiceJob};
pub use part::Part;
pub use vehicle::Vehicle;

use autoservice_core::RecordId;

use crate::TenantOwned;

/// A tenant-owned record addressable by id.
pub trait Record: TenantOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> RecordId;
}

macro_rules! impl_record {
    ($($t:ty),+ $(,)?) => {
        $(
            impl TenantOwned for $t {
                fn tenant_id(&self) -> autoservice_core::TenantId {
                    self.tenant_id
                }
            }

            impl Record for $t {
                fn id(&self) -> RecordId {
                    self.id
                }
            }
        )+
    };
}

impl_record!(Customer, Vehicle, Part, Employee, ServiceJob);

pub(crate) fn required(field: &str, value: &str) -> autoservice_core::DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(autoservice_core::DomainError::validation(format!(
            "{field} cannot be empty"
        )));
    }
    Ok(value.to_string())
}
