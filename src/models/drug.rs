//! Drug entity and its partial-update form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::parse_timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Drug {
    pub id: i32,
    pub name: String,
    pub approved: bool,
    pub min_dose: i32,
    pub max_dose: i32,
    pub available_at: Option<NaiveDateTime>,
}

/// Fully-validated input for a create. Produced from a [`DrugForm`] once every
/// field is known to be present.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDrug {
    pub name: String,
    pub approved: bool,
    pub min_dose: i32,
    pub max_dose: i32,
    pub available_at: NaiveDateTime,
}

/// Partial-update form. A `None` field means "leave unchanged"; an explicit
/// zero value (`false`, `0`) is still a present field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrugForm {
    pub name: Option<String>,
    pub approved: Option<bool>,
    pub min_dose: Option<i32>,
    pub max_dose: Option<i32>,
    pub available_at: Option<String>,
}

impl DrugForm {
    /// Require every field for a create.
    pub fn into_new(self) -> Result<NewDrug, String> {
        let name = self.name.ok_or("name: this field is required")?;
        let approved = self.approved.ok_or("approved: this field is required")?;
        let min_dose = self.min_dose.ok_or("min_dose: this field is required")?;
        let max_dose = self.max_dose.ok_or("max_dose: this field is required")?;
        let available_at = self
            .available_at
            .ok_or("available_at: this field is required")?;
        let available_at = parse_timestamp(&available_at)?;

        Ok(NewDrug {
            name,
            approved,
            min_dose,
            max_dose,
            available_at,
        })
    }

    /// Overwrite only the fields present in the form.
    pub fn apply_to(&self, drug: &mut Drug) -> Result<(), String> {
        if let Some(name) = &self.name {
            drug.name = name.clone();
        }
        if let Some(approved) = self.approved {
            drug.approved = approved;
        }
        if let Some(min_dose) = self.min_dose {
            drug.min_dose = min_dose;
        }
        if let Some(max_dose) = self.max_dose {
            drug.max_dose = max_dose;
        }
        if let Some(available_at) = &self.available_at {
            drug.available_at = Some(parse_timestamp(available_at)?);
        }
        Ok(())
    }
}
