//! Domain layer - framework-free contracts.
//!
//! Trait definitions and error taxonomies only; no axum, no sqlx types in the
//! signatures beyond what the classifier consumes. Implementations live in
//! the infrastructure and services layers.

pub mod errors;
pub mod repositories;
pub mod services;

pub use errors::{
    classify_code, classify_read_error, classify_write_error, RepositoryError, ServiceError,
};
pub use repositories::{AuthRepository, DrugRepository, VaccinationRepository};
pub use services::{AuthService, DrugService, VaccinationService};
