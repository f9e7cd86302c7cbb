//! Account entity and the sign-up / sign-in forms.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A registered account. The password hash and the bookkeeping timestamps
/// never leave the process as JSON.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Validated sign-up input; `password` is still cleartext here and is hashed
/// by the auth service before it reaches the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Validated sign-in input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterForm {
    pub fn into_new(self) -> Result<NewUser, String> {
        let email = self.email.ok_or("email: this field is required")?;
        if !is_valid_email(&email) {
            return Err("email: bad email format".to_string());
        }
        let password = self.password.ok_or("password: this field is required")?;

        Ok(NewUser {
            name: self.name.unwrap_or_default(),
            email,
            password,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AuthForm {
    pub fn into_credentials(self) -> Result<Credentials, String> {
        let email = self.email.ok_or("email: this field is required")?;
        if !is_valid_email(&email) {
            return Err("email: bad email format".to_string());
        }
        let password = self.password.ok_or("password: this field is required")?;

        Ok(Credentials { email, password })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
}

fn is_valid_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}
