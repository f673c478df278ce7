use serde::{Deserialize, Serialize};

use autoservice_core::{DomainError, DomainResult, RecordId, TenantId};

use super::required;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Customer {
    pub fn new(
        tenant_id: TenantId,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> DomainResult<Self> {
        let email = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(e) if !e.contains('@') => {
                return Err(DomainError::validation("invalid email format"));
            }
            other => other.map(str::to_lowercase),
        };

        Ok(Self {
            id: RecordId::new(),
            tenant_id,
            name: required("customer name", name)?,
            phone: phone.map(str::trim).filter(|p| !p.is_empty()).map(String::from),
            email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_contact_details() {
        let c = Customer::new(TenantId::new(), "  Dana Ruiz ", Some(" "), Some("Dana@Mail.Example"))
            .unwrap();
        assert_eq!(c.name, "Dana Ruiz");
        assert_eq!(c.phone, None);
        assert_eq!(c.email.as_deref(), Some("dana@mail.example"));
    }

    #[test]
    fn rejects_blank_name_and_bad_email() {
        assert!(Customer::new(TenantId::new(), "   ", None, None).is_err());
        assert!(Customer::new(TenantId::new(), "Dana", None, Some("dana")).is_err());
    }
}
