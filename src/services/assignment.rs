use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{
    AssignSubjectRequest, FacultyLoading, ScheduleEntry, SectionBooking, SlotType, Subject,
};
use crate::schedule::{Interval, ScheduleError, Weekday, parse_time_range};

/// Everything created by one committed assignment request.
#[derive(Debug, Serialize)]
pub struct AssignmentOutcome {
    pub data: Vec<FacultyLoading>,
    pub bookings: Vec<SectionBooking>,
}

/// A fully expanded per-day slot awaiting validation. Errored candidates
/// stay in the list so later candidates in the same request can still
/// detect conflicts against them.
struct Candidate {
    slot_type: SlotType,
    room_id: String,
    interval: Interval,
    errored: bool,
}

/// Total units the faculty is already committed to. Each distinct subject
/// counts once no matter how many slots implement it.
pub fn committed_load(subjects: &[Subject]) -> f64 {
    subjects.iter().map(Subject::resolved_units).sum()
}

pub fn can_add(committed: f64, additional: f64, ceiling: f64) -> bool {
    committed + additional <= ceiling
}

/// Expands a schedule entry into the weekdays it meets on: the primary day
/// plus any paired days, duplicates removed.
pub fn expand_days(entry: &ScheduleEntry) -> Result<Vec<Weekday>, ScheduleError> {
    let mut days = vec![entry.day.parse::<Weekday>()?];
    for paired in &entry.paired_days {
        let day = paired.parse::<Weekday>()?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

type ConflictLog = BTreeMap<SlotType, Vec<String>>;

fn log_conflict(errors: &mut ConflictLog, slot_type: SlotType, message: String) {
    errors.entry(slot_type).or_default().push(message);
}

fn format_conflicts(errors: ConflictLog) -> BTreeMap<SlotType, String> {
    errors
        .into_iter()
        .map(|(slot_type, messages)| {
            let joined = format!("{}{}", slot_type.conflict_label(), messages.join(" "));
            (slot_type, joined)
        })
        .collect()
}

/// The assignment transaction coordinator. Expands the request into per-day
/// candidates, checks the load budget, accumulates every conflict across
/// all candidates, and commits either all slots or none.
pub struct AssignmentService {
    db: SqlitePool,
}

impl AssignmentService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn assign(&self, req: AssignSubjectRequest) -> Result<AssignmentOutcome, AppError> {
        if req.schedules.is_empty() {
            return Err(AppError::BadRequest(
                "At least one schedule entry is required.".to_string(),
            ));
        }

        // Every read and write below shares this transaction, so two
        // concurrent requests cannot both pass the checks and both commit.
        let mut tx = self.db.begin().await?;

        let faculty = repository::find_faculty(&mut tx, &req.faculty_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Faculty not found: {}", req.faculty_id)))?;
        if faculty.status == "archived" {
            return Err(AppError::Validation(format!(
                "Faculty '{}' is archived and cannot take new assignments.",
                faculty.display_name
            )));
        }

        let subject = repository::find_subject(&mut tx, &req.subject_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subject not found: {}", req.subject_id)))?;

        if let Some(section) = &req.section {
            repository::find_program(&mut tx, &section.program_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Program not found: {}", section.program_id))
                })?;
        }

        let new_units = subject.resolved_units();
        if new_units <= 0.0 {
            return Err(AppError::Validation(format!(
                "Cannot assign subject '{}' because its calculated unit load is 0.",
                subject.subject_code
            )));
        }

        let assigned = repository::assigned_subjects(&mut tx, &faculty.id).await?;
        let current = committed_load(&assigned);
        if !can_add(current, new_units, faculty.load_ceiling()) {
            return Err(AppError::LoadLimit {
                current,
                requested: new_units,
                allowed: faculty.load_ceiling(),
            });
        }

        let mut seen: Vec<Candidate> = Vec::new();
        let mut errors = ConflictLog::new();

        for (index, entry) in req.schedules.iter().enumerate() {
            let ordinal = index + 1;
            let slot_type = entry.slot_type;

            let days = match expand_days(entry) {
                Ok(days) => days,
                Err(e) => {
                    log_conflict(&mut errors, slot_type, format!("Schedule #{ordinal}: {e}."));
                    continue;
                }
            };

            let (start, end) = match parse_time_range(&entry.time) {
                Ok(range) => range,
                Err(e) => {
                    log_conflict(&mut errors, slot_type, format!("Schedule #{ordinal}: {e}."));
                    continue;
                }
            };
            if start >= end {
                log_conflict(
                    &mut errors,
                    slot_type,
                    format!("End time must be after start time for schedule #{ordinal}."),
                );
                continue;
            }

            for day in days {
                let interval = Interval { day, start, end };
                let start_text = start.to_hms();
                let end_text = end.to_hms();
                let mut slot_errors: Vec<String> = Vec::new();

                // Intra-request: compare against every candidate already
                // processed, errored ones included, and flag both sides.
                for prev in seen.iter_mut() {
                    if interval.overlaps(&prev.interval) {
                        slot_errors.push(format!(
                            "Conflicts with another selected schedule on {day} ({start_text}-{end_text})."
                        ));
                        log_conflict(
                            &mut errors,
                            prev.slot_type,
                            format!(
                                "Conflicts with another selected schedule on {day} ({}-{}).",
                                prev.interval.start, prev.interval.end
                            ),
                        );
                        prev.errored = true;
                    }
                }

                let faculty_hits = repository::faculty_overlaps(
                    &mut tx,
                    &faculty.id,
                    day.as_str(),
                    &start_text,
                    &end_text,
                )
                .await?;
                if !faculty_hits.is_empty() {
                    slot_errors.push(format!(
                        "Faculty is already assigned a class on {day} from {start_text} to {end_text}."
                    ));
                }

                match repository::find_room(&mut tx, &entry.room_id).await? {
                    None => {
                        slot_errors.push(format!("Room not found (id: {}).", entry.room_id));
                    }
                    Some(room) => {
                        let room_hits = repository::room_overlaps(
                            &mut tx,
                            &room.id,
                            day.as_str(),
                            &start_text,
                            &end_text,
                        )
                        .await?;
                        if !room_hits.is_empty() {
                            slot_errors.push(format!(
                                "Room {} is already occupied on {day} from {start_text} to {end_text}.",
                                room.room_number
                            ));
                        }

                        let windows =
                            repository::room_windows_for_day(&mut tx, &room.id, day.as_str())
                                .await?;
                        let fits = windows.iter().any(|w| {
                            window_interval(day, w).is_some_and(|win| interval.contained_in(&win))
                        });
                        if !fits {
                            slot_errors.push(format!(
                                "Room {} is not available on {day} from {start_text} to {end_text}.",
                                room.room_number
                            ));
                        }
                    }
                }

                if let Some(section) = &req.section {
                    let taken = repository::section_has_overlap(
                        &mut tx,
                        section,
                        day.as_str(),
                        &start_text,
                        &end_text,
                    )
                    .await?;
                    if taken {
                        slot_errors.push(format!(
                            "Section {} (Year {}) already has a class on {day} from {start_text} to {end_text}.",
                            section.section, section.year_level
                        ));
                    }
                }

                let errored = !slot_errors.is_empty();
                for message in slot_errors {
                    log_conflict(&mut errors, slot_type, message);
                }
                seen.push(Candidate {
                    slot_type,
                    room_id: entry.room_id.clone(),
                    interval,
                    errored,
                });
            }
        }

        if !errors.is_empty() {
            tx.rollback().await?;
            return Err(AppError::Conflicts(format_conflicts(errors)));
        }

        let mut created = Vec::new();
        let mut bookings = Vec::new();
        for candidate in seen.into_iter().filter(|c| !c.errored) {
            let loading = repository::insert_loading(
                &mut tx,
                &faculty.id,
                &subject.id,
                &candidate.room_id,
                candidate.slot_type.as_str(),
                candidate.interval.day.as_str(),
                &candidate.interval.start.to_hms(),
                &candidate.interval.end.to_hms(),
            )
            .await?;

            if let Some(section) = &req.section {
                bookings.push(repository::insert_booking(&mut tx, &loading.id, section).await?);
            }
            created.push(loading);
        }

        tx.commit().await?;

        info!(
            "assigned subject {} to faculty {}: {} slot(s), {} booking(s)",
            subject.subject_code,
            faculty.display_name,
            created.len(),
            bookings.len()
        );

        Ok(AssignmentOutcome { data: created, bookings })
    }
}

/// An availability window row as a comparable interval on the given day.
/// Rows with unparseable times never contain anything.
fn window_interval(day: Weekday, window: &crate::models::RoomAvailability) -> Option<Interval> {
    use crate::schedule::TimeOfDay;

    let start = TimeOfDay::parse(&window.start_time).ok()?;
    let end = TimeOfDay::parse(&window.end_time).ok()?;
    Interval::new(day, start, end).ok()
}
