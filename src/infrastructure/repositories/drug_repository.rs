//! sqlx implementation of DrugRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{begin_serializable, finish, settle_guarded_write, settle_insert};
use crate::domain::{classify_read_error, DrugRepository, RepositoryError};
use crate::models::{Drug, NewDrug};

pub struct PgDrugRepository {
    pool: PgPool,
}

impl PgDrugRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DrugRepository for PgDrugRepository {
    async fn list(&self) -> Result<Vec<Drug>, RepositoryError> {
        // Zero rows is a valid empty list, never an error. Row decode
        // failures surface through fetch_all instead of being swallowed.
        sqlx::query_as::<_, Drug>(
            "SELECT id, name, approved, min_dose, max_dose, available_at \
             FROM drugs WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("listing drugs failed: {}", err);
            classify_read_error(&err)
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Drug, RepositoryError> {
        sqlx::query_as::<_, Drug>(
            "SELECT id, name, approved, min_dose, max_dose, available_at \
             FROM drugs WHERE deleted_at IS NULL AND id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("fetching drug {} failed: {}", id, err);
            classify_read_error(&err)
        })?
        .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, new_drug: &NewDrug) -> Result<(), RepositoryError> {
        let mut tx = begin_serializable(&self.pool).await?;

        let result = sqlx::query(
            "INSERT INTO drugs (name, approved, min_dose, max_dose, available_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&new_drug.name)
        .bind(new_drug.approved)
        .bind(new_drug.min_dose)
        .bind(new_drug.max_dose)
        .bind(new_drug.available_at)
        .execute(&mut *tx)
        .await
        .map(|done| done.rows_affected());

        if let Err(err) = &result {
            tracing::warn!("inserting drug failed: {}", err);
        }
        finish(tx, settle_insert(result, RepositoryError::ExecFailed)).await
    }

    async fn update(&self, id: i32, drug: &Drug) -> Result<(), RepositoryError> {
        let mut tx = begin_serializable(&self.pool).await?;

        let result = sqlx::query(
            "UPDATE drugs SET name = $1, approved = $2, min_dose = $3, max_dose = $4, \
             available_at = $5, updated_at = NOW() \
             WHERE id = $6 AND deleted_at IS NULL",
        )
        .bind(&drug.name)
        .bind(drug.approved)
        .bind(drug.min_dose)
        .bind(drug.max_dose)
        .bind(drug.available_at)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map(|done| done.rows_affected());

        if let Err(err) = &result {
            tracing::warn!("updating drug {} failed: {}", id, err);
        }
        finish(tx, settle_guarded_write(result, RepositoryError::UpdateFailed)).await
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tx = begin_serializable(&self.pool).await?;

        let result =
            sqlx::query("UPDATE drugs SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map(|done| done.rows_affected());

        if let Err(err) = &result {
            tracing::warn!("deleting drug {} failed: {}", id, err);
        }
        finish(tx, settle_guarded_write(result, RepositoryError::DeleteFailed)).await
    }
}
