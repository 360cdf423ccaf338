use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Kind of teaching slot. Validation errors are keyed by this type so the
/// caller can attach each message to the right part of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotType {
    #[serde(rename = "LEC")]
    Lec,
    #[serde(rename = "LAB")]
    Lab,
}

impl SlotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotType::Lec => "LEC",
            SlotType::Lab => "LAB",
        }
    }

    pub fn conflict_label(&self) -> &'static str {
        match self {
            SlotType::Lec => "Lecture conflict: ",
            SlotType::Lab => "Laboratory conflict: ",
        }
    }
}

impl FromStr for SlotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LEC" => Ok(SlotType::Lec),
            "LAB" => Ok(SlotType::Lab),
            other => Err(format!("unknown slot type: {other}")),
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One committed assignment slot (a section-slot registry row). Immutable
/// once created; the coordinator is the only writer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FacultyLoading {
    pub id: String,
    pub faculty_id: String,
    pub subject_id: String,
    pub room_id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub slot_type: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
}

/// Linkage of one slot to the student group occupying it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SectionBooking {
    pub id: String,
    pub loading_id: String,
    pub program_id: String,
    pub year_level: i64,
    pub section: String,
    pub created_at: String,
}

/// The (program, year level, section) tuple identifying a student group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRef {
    pub program_id: String,
    pub year_level: i64,
    pub section: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignSubjectRequest {
    pub faculty_id: String,
    pub subject_id: String,
    pub schedules: Vec<ScheduleEntry>,
    /// When present the created slots are also booked for this section.
    #[serde(default)]
    pub section: Option<SectionRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    #[serde(rename = "type")]
    pub slot_type: SlotType,
    pub day: String,
    /// "HH:MM-HH:MM"
    pub time: String,
    pub room_id: String,
    /// Extra weekdays on which the same meeting recurs.
    #[serde(default)]
    pub paired_days: Vec<String>,
}

/// Request to book an already-committed slot for a section. The slot is
/// matched by its identifying fields, as submitted by the schedule builder.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSlotRequest {
    pub subject_id: String,
    pub room_id: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub program_id: String,
    pub year_level: i64,
    pub section: String,
}

/// A loading row joined with its display fields.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LoadingDetail {
    pub id: String,
    pub faculty_id: String,
    pub faculty_name: String,
    pub subject_code: String,
    pub subject_title: String,
    pub room_number: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub slot_type: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// A booking joined with everything an operator needs to read it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingDetail {
    pub booking_id: String,
    pub program_id: String,
    pub year_level: i64,
    pub section: String,
    pub subject_code: String,
    pub faculty_name: String,
    pub room_number: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}
