//! Application state shared across all handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::JwtConfig;
use crate::config::Config;
use crate::domain::{AuthService, DrugService, VaccinationService};
use crate::infrastructure::repositories::{
    PgAuthRepository, PgDrugRepository, PgVaccinationRepository,
};
use crate::services::{AuthServiceImpl, DrugServiceImpl, VaccinationServiceImpl};

/// Handlers only see the service traits; everything below them (repositories,
/// the pool) is wired up here once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub drugs: Arc<dyn DrugService>,
    pub vaccinations: Arc<dyn VaccinationService>,
    pub jwt: JwtConfig,
}

impl AppState {
    /// Wire the real services over a PostgreSQL pool.
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let jwt = JwtConfig {
            secret: config.jwt_secret.clone(),
            token_ttl: config.token_ttl,
        };

        let auth = Arc::new(AuthServiceImpl::new(
            Arc::new(PgAuthRepository::new(pool.clone())),
            jwt.clone(),
            config.context_timeout,
        ));
        let drugs = Arc::new(DrugServiceImpl::new(
            Arc::new(PgDrugRepository::new(pool.clone())),
            config.context_timeout,
        ));
        let vaccinations = Arc::new(VaccinationServiceImpl::new(
            Arc::new(PgVaccinationRepository::new(pool)),
            config.context_timeout,
        ));

        Self {
            auth,
            drugs,
            vaccinations,
            jwt,
        }
    }

    /// Assemble state from pre-built services; tests use this to inject
    /// fakes without a database.
    pub fn with_services(
        auth: Arc<dyn AuthService>,
        drugs: Arc<dyn DrugService>,
        vaccinations: Arc<dyn VaccinationService>,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            auth,
            drugs,
            vaccinations,
            jwt,
        }
    }
}
