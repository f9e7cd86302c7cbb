//! Service implementations: one deadline, one repository flow, narrowed
//! errors.

pub mod auth_service;
pub mod drug_service;
pub mod vaccination_service;

pub use auth_service::AuthServiceImpl;
pub use drug_service::DrugServiceImpl;
pub use vaccination_service::VaccinationServiceImpl;

use std::future::Future;
use std::time::Duration;

use crate::domain::{RepositoryError, ServiceError};

/// Narrow a repository kind for callers. NotFound, Duplicate and NoRecords
/// carry meaning handlers act on; everything else collapses to Internal so
/// store detail never leaks out.
pub(crate) fn map_repository_error(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound,
        RepositoryError::Duplicate => ServiceError::Duplicate,
        RepositoryError::NoRecords => ServiceError::NoRecords,
        other => {
            tracing::error!("repository failure: {}", other);
            ServiceError::Internal
        }
    }
}

/// Run one repository call under the configured deadline. An elapsed
/// deadline reports Timeout no matter what the repository would have
/// returned; dropping the future rolls the in-flight transaction back.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Err(_) => {
            tracing::warn!("repository call exceeded {:?} deadline", deadline);
            Err(ServiceError::Timeout)
        }
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(map_repository_error(err)),
    }
}
