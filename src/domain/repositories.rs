//! Repository trait definitions.
//!
//! Every operation returns a `RepositoryError` kind, never a raw driver
//! error. Lists report an empty store as `Ok(vec![])`; single-row lookups
//! report it as `NotFound` — that asymmetry is part of the contract.

use async_trait::async_trait;

use super::RepositoryError;
use crate::models::{Drug, NewDrug, NewUser, NewVaccination, User, Vaccination};

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Look up a live account by email; password verification is the
    /// service's job, never the store's.
    async fn find_user_by_email(&self, email: &str) -> Result<User, RepositoryError>;

    /// Insert a new account; `new_user.password` is already hashed.
    async fn create_account(&self, new_user: &NewUser) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait DrugRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Drug>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Drug, RepositoryError>;
    async fn create(&self, new_drug: &NewDrug) -> Result<(), RepositoryError>;
    /// Persist a fully-merged entity; partial-form merging happens in the
    /// service layer.
    async fn update(&self, id: i32, drug: &Drug) -> Result<(), RepositoryError>;
    /// Soft delete: sets `deleted_at`, never removes the row.
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait VaccinationRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Vaccination>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Vaccination, RepositoryError>;
    async fn create(&self, new_vaccination: &NewVaccination) -> Result<(), RepositoryError>;
    async fn update(&self, id: i32, vaccination: &Vaccination) -> Result<(), RepositoryError>;
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}
