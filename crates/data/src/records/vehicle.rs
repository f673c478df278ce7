use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use autoservice_core::{DomainError, DomainResult, RecordId, TenantId};

use super::required;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub customer_id: RecordId,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub plate: Option<String>,
}

impl Vehicle {
    pub fn new(
        tenant_id: TenantId,
        customer_id: RecordId,
        vin: &str,
        make: &str,
        model: &str,
        year: u16,
        plate: Option<&str>,
    ) -> DomainResult<Self> {
        let vin = normalize_vin(vin)?;

        // Next year's models are sold from autumn on.
        let latest = Utc::now().year() + 1;
        if year < 1900 || i32::from(year) > latest {
            return Err(DomainError::validation(format!(
                "model year must be between 1900 and {latest}"
            )));
        }

        Ok(Self {
            id: RecordId::new(),
            tenant_id,
            customer_id,
            vin,
            make: required("make", make)?,
            model: required("model", model)?,
            year,
            plate: plate
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_uppercase),
        })
    }
}

/// 17 alphanumerics, never `I`, `O` or `Q`.
pub(crate) fn normalize_vin(raw: &str) -> DomainResult<String> {
    let vin = raw.trim().to_ascii_uppercase();
    if vin.len() != 17 {
        return Err(DomainError::validation("VIN must be 17 characters"));
    }
    if let Some(bad) = vin
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() || matches!(c, 'I' | 'O' | 'Q'))
    {
        return Err(DomainError::validation(format!(
            "VIN contains invalid character '{bad}'"
        )));
    }
    Ok(vin)
}
