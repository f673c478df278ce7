use serde::{Deserialize, Serialize};

use autoservice_core::{DomainResult, RecordId, TenantId, UserId};

use super::required;

/// Position held on the shop floor or front desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Technician,
    ServiceAdvisor,
    PartsManager,
    Manager,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    pub tenant_id: TenantId,
    /// Login account, when the employee has one.
    pub user_id: Option<UserId>,
    pub name: String,
    pub position: Position,
    pub active: bool,
}

impl Employee {
    pub fn new(tenant_id: TenantId, name: &str, position: Position) -> DomainResult<Self> {
        Ok(Self {
            id: RecordId::new(),
            tenant_id,
            user_id: None,
            name: required("employee name", name)?,
            position,
            active: true,
        })
    }

    pub fn with_account(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn is_active_technician(&self) -> bool {
        self.active && self.position == Position::Technician
    }
}
