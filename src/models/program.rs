use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Program {
    pub id: String,
    pub program_name: String,
    pub abbreviation: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProgramRequest {
    pub program_name: String,
    pub abbreviation: String,
}
