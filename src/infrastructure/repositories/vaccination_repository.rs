//! sqlx implementation of VaccinationRepository.
//!
//! Reads join drugs to denormalize the drug name; both sides of the join
//! must be live (non-soft-deleted).

use async_trait::async_trait;
use sqlx::PgPool;

use super::{begin_serializable, finish, settle_guarded_write, settle_insert};
use crate::domain::{classify_read_error, RepositoryError, VaccinationRepository};
use crate::models::{NewVaccination, Vaccination};

pub struct PgVaccinationRepository {
    pool: PgPool,
}

impl PgVaccinationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VaccinationRepository for PgVaccinationRepository {
    async fn list(&self) -> Result<Vec<Vaccination>, RepositoryError> {
        sqlx::query_as::<_, Vaccination>(
            "SELECT v.id, v.name, d.name AS drug, v.drug_id, v.dose, v.applied_at \
             FROM vaccinations v \
             INNER JOIN drugs d ON d.id = v.drug_id \
             WHERE v.deleted_at IS NULL AND d.deleted_at IS NULL \
             ORDER BY v.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("listing vaccinations failed: {}", err);
            classify_read_error(&err)
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Vaccination, RepositoryError> {
        sqlx::query_as::<_, Vaccination>(
            "SELECT v.id, v.name, d.name AS drug, v.drug_id, v.dose, v.applied_at \
             FROM vaccinations v \
             INNER JOIN drugs d ON d.id = v.drug_id \
             WHERE v.deleted_at IS NULL AND d.deleted_at IS NULL AND v.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("fetching vaccination {} failed: {}", id, err);
            classify_read_error(&err)
        })?
        .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, new_vaccination: &NewVaccination) -> Result<(), RepositoryError> {
        let mut tx = begin_serializable(&self.pool).await?;

        let result = sqlx::query(
            "INSERT INTO vaccinations (name, drug_id, dose, applied_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&new_vaccination.name)
        .bind(new_vaccination.drug_id)
        .bind(new_vaccination.dose)
        .bind(new_vaccination.applied_at)
        .execute(&mut *tx)
        .await
        .map(|done| done.rows_affected());

        if let Err(err) = &result {
            tracing::warn!("inserting vaccination failed: {}", err);
        }
        finish(tx, settle_insert(result, RepositoryError::ExecFailed)).await
    }

    async fn update(&self, id: i32, vaccination: &Vaccination) -> Result<(), RepositoryError> {
        let mut tx = begin_serializable(&self.pool).await?;

        let result = sqlx::query(
            "UPDATE vaccinations SET name = $1, drug_id = $2, dose = $3, applied_at = $4, \
             updated_at = NOW() \
             WHERE id = $5 AND deleted_at IS NULL",
        )
        .bind(&vaccination.name)
        .bind(vaccination.drug_id)
        .bind(vaccination.dose)
        .bind(vaccination.applied_at)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map(|done| done.rows_affected());

        if let Err(err) = &result {
            tracing::warn!("updating vaccination {} failed: {}", id, err);
        }
        finish(tx, settle_guarded_write(result, RepositoryError::UpdateFailed)).await
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tx = begin_serializable(&self.pool).await?;

        let result = sqlx::query(
            "UPDATE vaccinations SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map(|done| done.rows_affected());

        if let Err(err) = &result {
            tracing::warn!("deleting vaccination {} failed: {}", id, err);
        }
        finish(tx, settle_guarded_write(result, RepositoryError::DeleteFailed)).await
    }
}
