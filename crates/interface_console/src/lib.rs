//! Consumer Layer
//!
//! This crate is the surface UI shells call into: a request/response
//! dispatcher over plain DTOs, per-role desks with filter state and action
//! gating, configuration, and tracing setup.
//!
//! # Architecture
//!
//! - **Facade**: `ClaimsRequest` in, `ClaimsResponse` out
//! - **Desks**: lecturer, coordinator, manager, and HR views
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_console::{ClaimsFacade, ClaimsRequest};
//!
//! let facade = ClaimsFacade::new(service);
//! let response = facade.handle(ClaimsRequest::ListPendingClaims).await;
//! ```

pub mod config;
pub mod desks;
pub mod dto;
pub mod error;
pub mod facade;
pub mod telemetry;

use domain_claims::ClaimService;

pub use config::ConsoleConfig;
pub use desks::{CoordinatorDesk, DeskAction, HrDesk, LecturerDesk, ManagerDesk};
pub use dto::{ClaimsRequest, ClaimsResponse};
pub use error::{ConsoleError, ErrorBody};
pub use facade::ClaimsFacade;

/// Builds the service described by the configuration
///
/// # Errors
///
/// Fails if demo data is requested and cannot be loaded.
pub async fn build_service(config: &ConsoleConfig) -> Result<ClaimService, ConsoleError> {
    let service = ClaimService::in_memory(config.notification_capacity);
    if config.seed_demo_data {
        service.seed_demo_data().await?;
    }
    Ok(service)
}
