use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub id: String,
    pub room_number: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub room_type: String,
    pub capacity: Option<i64>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomAvailability {
    pub id: String,
    pub room_id: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRoomRequest {
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    #[serde(default)]
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoomRequest {
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    #[serde(default)]
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAvailabilityRequest {
    pub availabilities: Vec<AvailabilityWindowInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityWindowInput {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Serialize)]
pub struct RoomWithAvailability {
    #[serde(flatten)]
    pub room: Room,
    pub availabilities: Vec<RoomAvailability>,
}
