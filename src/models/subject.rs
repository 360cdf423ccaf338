use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: String,
    pub subject_code: String,
    pub title: String,
    pub total_hrs: Option<f64>,
    pub lec_hrs: f64,
    pub lab_hrs: f64,
    pub created_at: String,
}

impl Subject {
    /// Unit cost of assigning this subject. A positive `total_hrs` wins;
    /// otherwise the cost is lecture hours plus laboratory hours.
    pub fn resolved_units(&self) -> f64 {
        match self.total_hrs {
            Some(h) if h > 0.0 => h,
            _ => self.lec_hrs + self.lab_hrs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSubjectRequest {
    pub subject_code: String,
    pub title: String,
    #[serde(default)]
    pub total_hrs: Option<f64>,
    #[serde(default)]
    pub lec_hrs: f64,
    #[serde(default)]
    pub lab_hrs: f64,
}
