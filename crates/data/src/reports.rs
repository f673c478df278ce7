//! Technician performance reporting.
//!
//! Efficiency is flat-rate hours billed over clock hours worked, the usual
//! shop-floor productivity measure. Only completed jobs inside the period
//! count.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use autoservice_core::RecordId;

use crate::{JobStatus, TenantFilter, TenantStore, Workshop};

/// Half-open reporting window `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ReportPeriod {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at < self.to
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicianPerformance {
    pub technician_id: RecordId,
    pub name: String,
    pub jobs_completed: u32,
    pub billed_hours: f64,
    pub actual_hours: f64,
    pub efficiency_pct: f64,
    pub comeback_rate_pct: f64,
}

#[derive(Default)]
struct Tally {
    jobs: u32,
    billed: f64,
    actual: f64,
    comebacks: u32,
}

/// One row per active technician of the filtered tenant, best efficiency first.
pub fn technician_performance(
    workshop: &Workshop,
    filter: TenantFilter,
    period: &ReportPeriod,
) -> Vec<TechnicianPerformance> {
    let period = *period;
    let completed = workshop.jobs.query(&filter.and(move |j: &crate::ServiceJob| {
        j.status == JobStatus::Completed && j.completed_at.is_some_and(|at| period.contains(at))
    }));

    let mut tallies: HashMap<RecordId, Tally> = HashMap::new();
    for job in &completed {
        let t = tallies.entry(job.technician_id).or_default();
        t.jobs += 1;
        t.billed += job.billed_hours;
        t.actual += job.actual_hours;
        if job.comeback {
            t.comebacks += 1;
        }
    }

    let mut rows: Vec<TechnicianPerformance> = workshop
        .employees
        .query(&filter.and(|e: &crate::Employee| e.is_active_technician()))
        .into_iter()
        .map(|tech| {
            let t = tallies.remove(&tech.id).unwrap_or_default();
            TechnicianPerformance {
                technician_id: tech.id,
                name: tech.name,
                jobs_completed: t.jobs,
                billed_hours: round1(t.billed),
                actual_hours: round1(t.actual),
                efficiency_pct: percent(t.billed, t.actual),
                comeback_rate_pct: percent(f64::from(t.comebacks), f64::from(t.jobs)),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.efficiency_pct
            .total_cmp(&a.efficiency_pct)
            .then_with(|| a.name.cmp(&b.name))
    });

    tracing::debug!(
        tenant_id = %filter.tenant_id(),
        technicians = rows.len(),
        jobs = completed.len(),
        "technician performance computed"
    );
    rows
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    round1(part / whole * 100.0)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
