use sqlx::SqlitePool;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{BookSlotRequest, SectionBooking, SectionRef};
use crate::schedule::{TimeOfDay, Weekday};

/// Books an already-committed slot for a student section. A slot carries at
/// most one booking; a second attempt is answered with the existing
/// booking's full detail so the operator sees exactly what occupies it.
pub struct BookingService {
    db: SqlitePool,
}

impl BookingService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn book(&self, req: BookSlotRequest) -> Result<SectionBooking, AppError> {
        let day = req
            .day
            .parse::<Weekday>()
            .map_err(|e| AppError::BadRequest(format!("{e}")))?;
        let start = TimeOfDay::parse(&req.start_time)
            .map_err(|e| AppError::BadRequest(format!("{e}")))?;
        let end =
            TimeOfDay::parse(&req.end_time).map_err(|e| AppError::BadRequest(format!("{e}")))?;
        if start >= end {
            return Err(AppError::BadRequest(
                "End time must be after start time.".to_string(),
            ));
        }
        if req.year_level < 1 || req.year_level > 5 {
            return Err(AppError::BadRequest(
                "Year level must be between 1 and 5.".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        repository::find_program(&mut tx, &req.program_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Program not found: {}", req.program_id)))?;

        let loading = repository::find_loading_by_slot(
            &mut tx,
            &req.subject_id,
            &req.room_id,
            day.as_str(),
            &start.to_hms(),
            &end.to_hms(),
        )
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Invalid schedule: slot not found in faculty loading.".to_string())
        })?;

        if let Some(existing) = repository::booking_for_loading(&mut tx, &loading.id).await? {
            let message = format!(
                "This slot is already assigned to Year {} Section {} for subject {}, taught by {} \
                 in room {} on {} from {} to {}.",
                existing.year_level,
                existing.section,
                existing.subject_code,
                existing.faculty_name,
                existing.room_number,
                existing.day,
                existing.start_time,
                existing.end_time,
            );
            return Err(AppError::AlreadyBooked { message, existing });
        }

        let section = SectionRef {
            program_id: req.program_id.clone(),
            year_level: req.year_level,
            section: req.section.clone(),
        };

        // The same section cannot sit in two classes at once.
        let taken = repository::section_has_overlap(
            &mut tx,
            &section,
            &loading.day,
            &loading.start_time,
            &loading.end_time,
        )
        .await?;
        if taken {
            return Err(AppError::Conflict(format!(
                "Section {} (Year {}, Program {}) already has a class at this time.",
                section.section, section.year_level, section.program_id
            )));
        }

        let booking = repository::insert_booking(&mut tx, &loading.id, &section).await?;
        tx.commit().await?;

        info!(
            "booked slot {} for program {} year {} section {}",
            loading.id, booking.program_id, booking.year_level, booking.section
        );

        Ok(booking)
    }
}
