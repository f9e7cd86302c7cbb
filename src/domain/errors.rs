//! Error taxonomies for the repository and service layers.
//!
//! Repositories never leak `sqlx::Error` upward: every operation returns one
//! of the `RepositoryError` kinds below, classified in exactly one place
//! (`classify_write_error`). Services narrow those kinds further into
//! `ServiceError`, which is what handlers branch on.

use std::fmt;

/// Failure kinds a repository operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryError {
    /// The statement could not be prepared.
    PrepareFailed,
    /// The transaction could not be started.
    BeginFailed,
    /// The transaction could not be committed.
    CommitFailed,
    /// The statement failed to execute.
    ExecFailed,
    /// An update statement failed for a non-constraint reason.
    UpdateFailed,
    /// A soft-delete statement failed for a non-constraint reason.
    DeleteFailed,
    /// A single-row lookup matched nothing.
    NotFound,
    /// The write violated a uniqueness constraint.
    Duplicate,
    /// Empty-result sentinel, distinct from NotFound.
    NoRecords,
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::PrepareFailed => write!(f, "failed to prepare query"),
            RepositoryError::BeginFailed => write!(f, "failed to begin transaction"),
            RepositoryError::CommitFailed => write!(f, "failed to commit transaction"),
            RepositoryError::ExecFailed => write!(f, "failed to execute statement"),
            RepositoryError::UpdateFailed => write!(f, "failed to update record"),
            RepositoryError::DeleteFailed => write!(f, "failed to delete record"),
            RepositoryError::NotFound => write!(f, "record not found"),
            RepositoryError::Duplicate => write!(f, "record already exists"),
            RepositoryError::NoRecords => write!(f, "no records"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Failure kinds a service operation can report.
///
/// Only `NotFound`, `Duplicate` and `NoRecords` cross the repository boundary
/// unchanged; anything unrecognized collapses to `Internal` so driver detail
/// never reaches callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The per-request deadline elapsed before the store call returned.
    Timeout,
    /// Passed through from the repository.
    NotFound,
    /// Passed through from the repository.
    Duplicate,
    /// Passed through from the repository.
    NoRecords,
    /// Sign-in with an unknown email or a wrong password.
    InvalidCredentials,
    /// The input failed validation before reaching the store.
    Validation(String),
    /// Catch-all for everything the caller has no business inspecting.
    Internal,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Timeout => write!(f, "operation timed out"),
            ServiceError::NotFound => write!(f, "record not found"),
            ServiceError::Duplicate => write!(f, "record already exists"),
            ServiceError::NoRecords => write!(f, "no records"),
            ServiceError::InvalidCredentials => write!(f, "invalid credentials"),
            ServiceError::Validation(msg) => write!(f, "validation error: {}", msg),
            ServiceError::Internal => write!(f, "internal service error"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// SQLSTATE codes for constraint violations this backend recognizes.
const CONSTRAINT_CODES: &[(&str, RepositoryError)] = &[("23505", RepositoryError::Duplicate)];

/// Map a driver-reported SQLSTATE code to a taxonomy kind.
///
/// Unknown or absent codes fall back to the kind the calling operation
/// supplies (ExecFailed for create, UpdateFailed/DeleteFailed for the
/// others). Pure so it stays testable without a live store.
pub fn classify_code(code: Option<&str>, fallback: RepositoryError) -> RepositoryError {
    match code {
        Some(code) => CONSTRAINT_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, kind)| *kind)
            .unwrap_or(fallback),
        None => fallback,
    }
}

/// Classify a failed write statement.
///
/// sqlx prepares lazily, so preparation problems surface here as protocol
/// errors rather than at a separate prepare step.
pub fn classify_write_error(err: &sqlx::Error, fallback: RepositoryError) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::Database(db) => classify_code(db.code().as_deref(), fallback),
        sqlx::Error::Protocol(_) | sqlx::Error::ColumnNotFound(_) => RepositoryError::PrepareFailed,
        _ => fallback,
    }
}

/// Classify a failed read, mapping "no rows" to `NotFound`.
pub fn classify_read_error(err: &sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::Protocol(_) | sqlx::Error::ColumnNotFound(_) => RepositoryError::PrepareFailed,
        _ => RepositoryError::ExecFailed,
    }
}
