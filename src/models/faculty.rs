use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Faculty {
    pub id: String,
    pub display_name: String,
    pub regular_units: f64,
    pub overload_units: f64,
    pub status: String,
    pub created_at: String,
}

impl Faculty {
    /// Hard ceiling for total assigned units: regular load plus overload.
    pub fn load_ceiling(&self) -> f64 {
        self.regular_units + self.overload_units
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFacultyRequest {
    pub display_name: String,
    pub regular_units: f64,
    #[serde(default)]
    pub overload_units: f64,
}

/// Response body for the current-load query.
#[derive(Debug, Serialize)]
pub struct FacultyLoadSummary {
    pub current_load_units: f64,
    pub assigned_subject_ids: Vec<String>,
}
