use autoservice_auth::{GrantedAccess, Role};
use autoservice_core::{TenantId, UserId};

/// Verified tenant of the request. Present on every tenant-scoped route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: TenantId,
}

impl TenantContext {
    pub fn new(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// Signed-in user the guard admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    user_id: UserId,
    role: Role,
}

impl PrincipalContext {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> &Role {
        &self.role
    }
}

impl From<&GrantedAccess> for PrincipalContext {
    fn from(access: &GrantedAccess) -> Self {
        Self {
            user_id: access.user_id,
            role: access.role.clone(),
        }
    }
}
