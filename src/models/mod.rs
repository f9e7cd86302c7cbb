pub mod drug;
pub mod user;
pub mod vaccination;

pub use drug::{Drug, DrugForm, NewDrug};
pub use user::{AuthForm, AuthResponse, Credentials, NewUser, RegisterForm, User};
pub use vaccination::{NewVaccination, Vaccination, VaccinationForm};

use chrono::NaiveDateTime;

/// Wire format for the timestamp fields carried as strings in forms.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a form timestamp, rejecting anything that does not match the wire
/// format instead of silently zeroing it.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|_| format!("invalid timestamp '{}', expected YYYY-MM-DD HH:MM:SS", value))
}
