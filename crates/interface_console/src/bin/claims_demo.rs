//! Claims Demo Binary
//!
//! Drives one claim through the lecturer, coordinator, manager, and HR desks
//! against an in-memory store and logs what each desk sees.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin claims-demo
//!
//! CLAIMS_LOG_LEVEL=debug CLAIMS_CURRENT_LECTURER_ID=2 cargo run --bin claims-demo
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIMS_LOG_LEVEL` - Log level or filter directive (default: info)
//! * `CLAIMS_LOG_JSON` - Emit JSON log lines (default: false)
//! * `CLAIMS_NOTIFICATION_CAPACITY` - Events buffered per subscriber (default: 64)
//! * `CLAIMS_SEED_DEMO_DATA` - Load demo lecturers and claims (default: true)
//! * `CLAIMS_CURRENT_LECTURER_ID` - Lecturer whose desk submits (default: 1)

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tracing::info;

use domain_claims::{DocumentUpload, EnrichedClaim, HoursEntry};
use interface_console::{
    build_service, telemetry, ClaimsFacade, ClaimsRequest, ClaimsResponse, ConsoleConfig,
    CoordinatorDesk, HrDesk, LecturerDesk, ManagerDesk,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConsoleConfig::load().context("invalid configuration")?;
    telemetry::init_tracing(&config)?;

    info!(
        seed_demo_data = config.seed_demo_data,
        lecturer_id = %config.current_lecturer(),
        "Starting claims demo"
    );

    let service = build_service(&config).await?;
    let mut subscription = service.subscribe();
    let listener = tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            info!(claim_id = %event.claim_id(), "notification: claim submitted");
        }
    });

    let lecturer = LecturerDesk::new(service.clone(), config.current_lecturer());
    let profile = lecturer
        .profile()
        .await?
        .ok_or_else(|| anyhow!("lecturer {} does not exist", lecturer.lecturer_id()))?;
    info!(lecturer = %profile.full_name(), rate = %profile.hourly_rate, "lecturer desk opened");

    let claim_id = lecturer
        .submit(
            10,
            2025,
            vec![
                HoursEntry::new(date(2025, 10, 6)?, dec!(8), "Lecture - Distributed Systems"),
                HoursEntry::new(date(2025, 10, 9)?, dec!(4.5), "Tutorial - Consensus"),
            ],
            vec![DocumentUpload::new("Timesheet_Oct.pdf", "uploads/timesheet_oct.pdf", 240_000)],
        )
        .await?;
    log_view("lecturer", &lecturer.claims().await?);

    let mut coordinator = CoordinatorDesk::new(service.clone());
    log_view("coordinator", coordinator.refresh().await?);

    let mut manager = ManagerDesk::new(service.clone());
    manager.set_search("2025");
    log_view("manager", &manager.claims().await?);
    manager
        .verify(claim_id, true, Some("Hours match the timetable".to_string()))
        .await?;
    let approved = manager.approve(claim_id).await?;
    info!(claim_id = %approved.id, status = ?approved.status(), "manager approved claim");

    let hr = HrDesk::new(service.clone());
    log_view("hr", &hr.claims().await?);
    let paid = hr.process_payment(claim_id).await?;
    info!(claim_id = %paid.id, total = %paid.total_amount, "HR processed payment");

    let facade = ClaimsFacade::new(service);
    if let ClaimsResponse::Claims(all) = facade.handle(ClaimsRequest::ListAllClaims).await {
        log_view("all", &all);
    }
    let rejected = facade
        .handle(ClaimsRequest::UpdateStatus {
            claim_id,
            status: "NonExistentStatus".into(),
        })
        .await;
    if let Some(body) = rejected.error() {
        info!(kind = %body.kind, message = %body.message, "facade reported error");
    }

    tokio::task::yield_now().await;
    listener.abort();
    info!("Claims demo complete");
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| anyhow!("invalid date {year}-{month}-{day}"))
}

fn log_view(desk: &str, claims: &[EnrichedClaim]) {
    info!(desk, count = claims.len(), "desk view");
    for claim in claims {
        info!(
            desk,
            claim_id = %claim.id(),
            lecturer = claim.lecturer_name.as_deref().unwrap_or("-"),
            period = %claim.period_label,
            status = claim.status_name.as_deref().unwrap_or("-"),
            total = %claim.claim.total_amount,
            verified = claim.claim.is_verified,
            "claim"
        );
    }
}
