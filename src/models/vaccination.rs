//! Vaccination record entity and its partial-update form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::parse_timestamp;

/// A vaccination row joined to its drug; `drug` is the denormalized drug name
/// filled in at read time.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Vaccination {
    pub id: i32,
    pub name: String,
    pub drug: String,
    pub drug_id: i32,
    pub dose: i32,
    #[serde(rename = "date")]
    pub applied_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVaccination {
    pub name: String,
    pub drug_id: i32,
    pub dose: i32,
    pub applied_at: NaiveDateTime,
}

/// Partial-update form; `None` means "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaccinationForm {
    pub name: Option<String>,
    pub drug_id: Option<i32>,
    pub dose: Option<i32>,
    pub applied_at: Option<String>,
}

impl VaccinationForm {
    /// Require every field for a create.
    pub fn into_new(self) -> Result<NewVaccination, String> {
        let name = self.name.ok_or("name: this field is required")?;
        let drug_id = self.drug_id.ok_or("drug_id: this field is required")?;
        let dose = self.dose.ok_or("dose: this field is required")?;
        let applied_at = self
            .applied_at
            .ok_or("applied_at: this field is required")?;
        let applied_at = parse_timestamp(&applied_at)?;

        Ok(NewVaccination {
            name,
            drug_id,
            dose,
            applied_at,
        })
    }

    /// Overwrite only the fields present in the form.
    pub fn apply_to(&self, vaccination: &mut Vaccination) -> Result<(), String> {
        if let Some(name) = &self.name {
            vaccination.name = name.clone();
        }
        if let Some(drug_id) = self.drug_id {
            vaccination.drug_id = drug_id;
        }
        if let Some(dose) = self.dose {
            vaccination.dose = dose;
        }
        if let Some(applied_at) = &self.applied_at {
            vaccination.applied_at = Some(parse_timestamp(applied_at)?);
        }
        Ok(())
    }
}
