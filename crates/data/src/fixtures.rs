//! Demo data for a freshly provisioned tenant.

use chrono::{Duration, Utc};

use autoservice_core::{DomainResult, TenantId};

use crate::{Customer, Employee, Part, Position, ServiceJob, TenantStore, Vehicle, Workshop};

/// What [`seed_demo`] inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub customers: usize,
    pub vehicles: usize,
    pub parts: usize,
    pub employees: usize,
    pub jobs: usize,
}

pub fn seed_demo(workshop: &Workshop, tenant_id: TenantId) -> DomainResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    let customers = [
        Customer::new(
            tenant_id,
            "Maria Gonzalez",
            Some("555-0142"),
            Some("maria@example.com"),
        )?,
        Customer::new(tenant_id, "Tom Becker", Some("555-0178"), None)?,
        Customer::new(tenant_id, "Priya Natarajan", None, Some("priya@example.com"))?,
    ];

    let vehicles = [
        Vehicle::new(
            tenant_id,
            customers[0].id,
            "1HGCM82633A004352",
            "Honda",
            "Accord",
            2003,
            Some("KLM 204"),
        )?,
        Vehicle::new(
            tenant_id,
            customers[1].id,
            "JH4KA7561PC008269",
            "Acura",
            "Legend",
            1993,
            None,
        )?,
        Vehicle::new(
            tenant_id,
            customers[2].id,
            "5YJ3E1EA7KF317000",
            "Tesla",
            "Model 3",
            2019,
            Some("EV 7781"),
        )?,
    ];

    let parts = [
        Part::new(tenant_id, "OF-1042", "Oil filter", 24, 10, 850)?,
        Part::new(tenant_id, "BP-2210", "Front brake pads", 3, 4, 4_250)?,
        Part::new(tenant_id, "WB-0600", "Wiper blade 24in", 12, 6, 1_199)?,
        Part::new(tenant_id, "SP-7700", "Spark plug iridium", 0, 8, 975)?,
    ];

    let ana = Employee::new(tenant_id, "Ana Silva", Position::Technician)?;
    let ben = Employee::new(tenant_id, "Ben Okafor", Position::Technician)?;
    let employees = [
        ana.clone(),
        ben.clone(),
        Employee::new(tenant_id, "Carla Jensen", Position::ServiceAdvisor)?,
        Employee::new(tenant_id, "Dev Patel", Position::PartsManager)?,
    ];

    let now = Utc::now();
    let mut jobs = Vec::new();
    for (vehicle, tech, desc, billed, actual, days_ago) in [
        (&vehicles[0], &ana, "Oil and filter change", 0.5, 0.4, 3),
        (&vehicles[0], &ana, "Front brake pads", 1.8, 1.5, 10),
        (&vehicles[1], &ben, "Timing belt", 4.0, 5.2, 6),
        (&vehicles[2], &ben, "Cabin filter", 0.3, 0.3, 1),
    ] {
        let mut job = ServiceJob::open(tenant_id, vehicle.id, tech.id, desc, billed)?;
        job.complete(actual, now - Duration::days(days_ago))?;
        jobs.push(job);
    }
    jobs.push(ServiceJob::open(tenant_id, vehicles[2].id, ana.id, "Tire rotation", 0.6)?);

    for c in customers {
        workshop.customers.insert(c);
        summary.customers += 1;
    }
    for v in vehicles {
        workshop.vehicles.insert(v);
        summary.vehicles += 1;
    }
    for p in parts {
        workshop.parts.insert(p);
        summary.parts += 1;
    }
    for e in employees {
        workshop.employees.insert(e);
        summary.employees += 1;
    }
    for j in jobs {
        workshop.jobs.insert(j);
        summary.jobs += 1;
    }

    tracing::info!(%tenant_id, ?summary, "demo data seeded");
    Ok(summary)
}
