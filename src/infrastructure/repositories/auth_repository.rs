//! sqlx implementation of AuthRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{begin_serializable, finish, settle_insert};
use crate::domain::{classify_read_error, AuthRepository, RepositoryError};
use crate::models::{NewUser, User};

pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for PgAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, created_at, updated_at \
             FROM users WHERE deleted_at IS NULL AND email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("looking up account failed: {}", err);
            classify_read_error(&err)
        })?
        .ok_or(RepositoryError::NotFound)
    }

    async fn create_account(&self, new_user: &NewUser) -> Result<(), RepositoryError> {
        let mut tx = begin_serializable(&self.pool).await?;

        let result = sqlx::query("INSERT INTO users (name, email, password) VALUES ($1, $2, $3)")
            .bind(&new_user.name)
            .bind(&new_user.email)
            .bind(&new_user.password)
            .execute(&mut *tx)
            .await
            .map(|done| done.rows_affected());

        if let Err(err) = &result {
            tracing::warn!("inserting account failed: {}", err);
        }
        finish(tx, settle_insert(result, RepositoryError::ExecFailed)).await
    }
}
