use serde::Deserialize;

use autoservice_core::{DomainError, RecordId};
use autoservice_data::Position;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub customer_id: String,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub plate: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub from: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Trailing window in days, default 30.
    pub days: Option<u32>,
}

pub fn parse_record_id(raw: &str) -> Result<RecordId, DomainError> {
    raw.parse()
}
