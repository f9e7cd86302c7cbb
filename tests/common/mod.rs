//! Shared fixtures: fake services wired into a real router.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use vaxtrack::auth::{create_jwt, JwtConfig};
use vaxtrack::domain::{AuthService, DrugService, ServiceError, VaccinationService};
use vaxtrack::infrastructure::AppState;
use vaxtrack::models::{
    AuthResponse, Credentials, Drug, DrugForm, NewDrug, NewUser, NewVaccination, Vaccination,
    VaccinationForm,
};

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        token_ttl: Duration::from_secs(3600),
    }
}

/// A valid bearer header for the test signing key.
pub fn bearer() -> String {
    format!("Bearer {}", create_jwt(&jwt_config(), 1).expect("test token"))
}

pub struct FakeDrugService {
    pub list_result: Result<Vec<Drug>, ServiceError>,
    pub create_result: Result<(), ServiceError>,
    pub update_result: Result<(), ServiceError>,
    pub delete_result: Result<(), ServiceError>,
}

impl Default for FakeDrugService {
    fn default() -> Self {
        Self {
            list_result: Ok(Vec::new()),
            create_result: Ok(()),
            update_result: Ok(()),
            delete_result: Ok(()),
        }
    }
}

#[async_trait]
impl DrugService for FakeDrugService {
    async fn list_drugs(&self) -> Result<Vec<Drug>, ServiceError> {
        self.list_result.clone()
    }

    async fn create_drug(&self, _new_drug: NewDrug) -> Result<(), ServiceError> {
        self.create_result.clone()
    }

    async fn update_drug(&self, _id: i32, _form: DrugForm) -> Result<(), ServiceError> {
        self.update_result.clone()
    }

    async fn delete_drug(&self, _id: i32) -> Result<(), ServiceError> {
        self.delete_result.clone()
    }
}

pub struct FakeVaccinationService {
    pub list_result: Result<Vec<Vaccination>, ServiceError>,
    pub create_result: Result<(), ServiceError>,
    pub update_result: Result<(), ServiceError>,
    pub delete_result: Result<(), ServiceError>,
}

impl Default for FakeVaccinationService {
    fn default() -> Self {
        Self {
            list_result: Ok(Vec::new()),
            create_result: Ok(()),
            update_result: Ok(()),
            delete_result: Ok(()),
        }
    }
}

#[async_trait]
impl VaccinationService for FakeVaccinationService {
    async fn list_vaccinations(&self) -> Result<Vec<Vaccination>, ServiceError> {
        self.list_result.clone()
    }

    async fn create_vaccination(&self, _new: NewVaccination) -> Result<(), ServiceError> {
        self.create_result.clone()
    }

    async fn update_vaccination(&self, _id: i32, _form: VaccinationForm) -> Result<(), ServiceError> {
        self.update_result.clone()
    }

    async fn delete_vaccination(&self, _id: i32) -> Result<(), ServiceError> {
        self.delete_result.clone()
    }
}

pub struct FakeAuthService {
    pub sign_in_result: Result<AuthResponse, ServiceError>,
    pub sign_up_result: Result<(), ServiceError>,
}

impl Default for FakeAuthService {
    fn default() -> Self {
        Self {
            sign_in_result: Ok(AuthResponse {
                access_token: "token".to_string(),
            }),
            sign_up_result: Ok(()),
        }
    }
}

#[async_trait]
impl AuthService for FakeAuthService {
    async fn sign_in(&self, _credentials: Credentials) -> Result<AuthResponse, ServiceError> {
        self.sign_in_result.clone()
    }

    async fn sign_up(&self, _new_user: NewUser) -> Result<(), ServiceError> {
        self.sign_up_result.clone()
    }
}

pub fn test_state(
    auth: FakeAuthService,
    drugs: FakeDrugService,
    vaccinations: FakeVaccinationService,
) -> AppState {
    AppState::with_services(
        Arc::new(auth),
        Arc::new(drugs),
        Arc::new(vaccinations),
        jwt_config(),
    )
}
