//! Auth service: credential verification, password hashing and token
//! issuance over the auth repository.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::with_deadline;
use crate::auth::{create_jwt, hash_password, verify_password, JwtConfig};
use crate::domain::{AuthRepository, AuthService, ServiceError};
use crate::models::{AuthResponse, Credentials, NewUser};

pub struct AuthServiceImpl {
    repository: Arc<dyn AuthRepository>,
    jwt: JwtConfig,
    timeout: Duration,
}

impl AuthServiceImpl {
    pub fn new(repository: Arc<dyn AuthRepository>, jwt: JwtConfig, timeout: Duration) -> Self {
        Self {
            repository,
            jwt,
            timeout,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn sign_in(&self, credentials: Credentials) -> Result<AuthResponse, ServiceError> {
        let user = with_deadline(
            self.timeout,
            self.repository.find_user_by_email(&credentials.email),
        )
        .await
        .map_err(|err| match err {
            // An unknown email reads the same as a wrong password.
            ServiceError::NotFound => ServiceError::InvalidCredentials,
            other => other,
        })?;

        match verify_password(&credentials.password, &user.password) {
            Ok(true) => {}
            Ok(false) => return Err(ServiceError::InvalidCredentials),
            Err(err) => {
                tracing::error!("password verification failed: {}", err);
                return Err(ServiceError::Internal);
            }
        }

        let token = create_jwt(&self.jwt, user.id).map_err(|err| {
            tracing::error!("token issuance failed: {}", err);
            ServiceError::Internal
        })?;

        Ok(AuthResponse {
            access_token: token,
        })
    }

    async fn sign_up(&self, new_user: NewUser) -> Result<(), ServiceError> {
        // Hash before the store deadline starts; hashing is CPU, not IO.
        let password = hash_password(&new_user.password).map_err(|err| {
            tracing::error!("password hashing failed: {}", err);
            ServiceError::Internal
        })?;
        let new_user = NewUser {
            password,
            ..new_user
        };

        with_deadline(self.timeout, self.repository.create_account(&new_user)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::decode_jwt;
    use crate::domain::RepositoryError;
    use crate::models::User;
    use std::sync::Mutex;

    struct FakeAuthRepository {
        user: Option<User>,
        create_result: Result<(), RepositoryError>,
        created_with: Mutex<Option<NewUser>>,
        looked_up: Mutex<Option<String>>,
    }

    impl Default for FakeAuthRepository {
        fn default() -> Self {
            Self {
                user: None,
                create_result: Ok(()),
                created_with: Mutex::new(None),
                looked_up: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl AuthRepository for FakeAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<User, RepositoryError> {
            *self.looked_up.lock().unwrap() = Some(email.to_string());
            self.user.clone().ok_or(RepositoryError::NotFound)
        }

        async fn create_account(&self, new_user: &NewUser) -> Result<(), RepositoryError> {
            *self.created_with.lock().unwrap() = Some(new_user.clone());
            self.create_result
        }
    }

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            token_ttl: Duration::from_secs(3600),
        }
    }

    fn kira(password_hash: String) -> User {
        User {
            id: 42,
            name: "Kira".to_string(),
            email: "kira@example.com".to_string(),
            password: password_hash,
            created_at: None,
            updated_at: None,
        }
    }

    fn credentials(password: &str) -> Credentials {
        Credentials {
            email: "kira@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn sign_in_issues_a_decodable_token() {
        let hash = hash_password("hunter2").unwrap();
        let repo = Arc::new(FakeAuthRepository {
            user: Some(kira(hash)),
            ..Default::default()
        });
        let svc = AuthServiceImpl::new(repo.clone(), jwt_config(), Duration::from_secs(1));

        let response = svc.sign_in(credentials("hunter2")).await.unwrap();
        let claims = decode_jwt(&jwt_config(), &response.access_token).unwrap();
        assert_eq!(claims.sub, "42");
        // The store only ever sees the email, never the password.
        assert_eq!(
            repo.looked_up.lock().unwrap().as_deref(),
            Some("kira@example.com")
        );
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let hash = hash_password("hunter2").unwrap();
        let repo = Arc::new(FakeAuthRepository {
            user: Some(kira(hash)),
            ..Default::default()
        });
        let svc = AuthServiceImpl::new(repo, jwt_config(), Duration::from_secs(1));

        let outcome = svc.sign_in(credentials("wrong")).await;
        assert_eq!(outcome.unwrap_err(), ServiceError::InvalidCredentials);
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let repo = Arc::new(FakeAuthRepository::default());
        let svc = AuthServiceImpl::new(repo, jwt_config(), Duration::from_secs(1));

        let outcome = svc.sign_in(credentials("hunter2")).await;
        assert_eq!(outcome.unwrap_err(), ServiceError::InvalidCredentials);
    }

    #[tokio::test]
    async fn sign_up_stores_a_hash_not_the_password() {
        let repo = Arc::new(FakeAuthRepository::default());
        let svc = AuthServiceImpl::new(repo.clone(), jwt_config(), Duration::from_secs(1));

        svc.sign_up(NewUser {
            name: "Kira".to_string(),
            email: "kira@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

        let stored = repo.created_with.lock().unwrap().clone().unwrap();
        assert_ne!(stored.password, "hunter2");
        assert!(verify_password("hunter2", &stored.password).unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_passes_through() {
        let repo = Arc::new(FakeAuthRepository {
            create_result: Err(RepositoryError::Duplicate),
            ..Default::default()
        });
        let svc = AuthServiceImpl::new(repo, jwt_config(), Duration::from_secs(1));

        let outcome = svc
            .sign_up(NewUser {
                name: String::new(),
                email: "kira@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await;
        assert_eq!(outcome, Err(ServiceError::Duplicate));
    }
}
