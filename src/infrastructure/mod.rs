//! Infrastructure layer - framework implementations.
//!
//! Repository implementations (sqlx/PostgreSQL) and the shared application
//! state handed to the router.

pub mod repositories;
pub mod state;

pub use repositories::*;
pub use state::AppState;
