//! Service trait definitions.
//!
//! Services own the per-request deadline and the error narrowing; handlers
//! depend on these traits, never on a concrete repository.

use async_trait::async_trait;

use super::ServiceError;
use crate::models::{
    AuthResponse, Credentials, Drug, DrugForm, NewDrug, NewUser, NewVaccination, Vaccination,
    VaccinationForm,
};

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and mint an access token.
    async fn sign_in(&self, credentials: Credentials) -> Result<AuthResponse, ServiceError>;

    /// Register an account; hashes the password before storage.
    async fn sign_up(&self, new_user: NewUser) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait DrugService: Send + Sync {
    async fn list_drugs(&self) -> Result<Vec<Drug>, ServiceError>;
    async fn create_drug(&self, new_drug: NewDrug) -> Result<(), ServiceError>;
    /// Fetch-merge-write: absent form fields leave the stored entity
    /// unchanged.
    async fn update_drug(&self, id: i32, form: DrugForm) -> Result<(), ServiceError>;
    async fn delete_drug(&self, id: i32) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait VaccinationService: Send + Sync {
    async fn list_vaccinations(&self) -> Result<Vec<Vaccination>, ServiceError>;
    async fn create_vaccination(&self, new_vaccination: NewVaccination)
        -> Result<(), ServiceError>;
    async fn update_vaccination(&self, id: i32, form: VaccinationForm)
        -> Result<(), ServiceError>;
    async fn delete_vaccination(&self, id: i32) -> Result<(), ServiceError>;
}
