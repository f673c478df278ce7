use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use autoservice_core::{DomainError, DomainResult, RecordId, TenantId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

/// Repair order line worked by one technician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceJob {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub vehicle_id: RecordId,
    pub technician_id: RecordId,
    pub description: String,
    pub status: JobStatus,
    /// Flat-rate hours charged to the customer.
    pub billed_hours: f64,
    /// Clock hours the technician spent.
    pub actual_hours: f64,
    /// The vehicle came back for the same fault.
    pub comeback: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ServiceJob {
    pub fn open(
        tenant_id: TenantId,
        vehicle_id: RecordId,
        technician_id: RecordId,
        description: &str,
        billed_hours: f64,
    ) -> DomainResult<Self> {
        if !billed_hours.is_finite() || billed_hours < 0.0 {
            return Err(DomainError::validation("billed hours must be non-negative"));
        }
        Ok(Self {
            id: RecordId::new(),
            tenant_id,
            vehicle_id,
            technician_id,
            description: super::required("job description", description)?,
            status: JobStatus::Open,
            billed_hours,
            actual_hours: 0.0,
            comeback: false,
            completed_at: None,
        })
    }

    pub fn complete(&mut self, actual_hours: f64, at: DateTime<Utc>) -> DomainResult<()> {
        match self.status {
            JobStatus::Completed | JobStatus::Cancelled => {
                return Err(DomainError::invariant(format!(
                    "job is already {:?}",
                    self.status
                )));
            }
            JobStatus::Open | JobStatus::InProgress => {}
        }
        if !actual_hours.is_finite() || actual_hours < 0.0 {
            return Err(DomainError::validation("actual hours must be non-negative"));
        }
        self.status = JobStatus::Completed;
        self.actual_hours = actual_hours;
        self.completed_at = Some(at);
        Ok(())
    }

    pub fn mark_comeback(&mut self) {
        self.comeback = true;
    }
}
