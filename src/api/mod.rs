use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{delete, post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::schedule::{Interval, TimeOfDay, Weekday};
use crate::services::{AssignmentService, BookingService};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/assignments", get(list_assignments).post(assign_subject))
        .route("/bookings", post(book_slot))
        .route("/schedules", get(list_schedules))
        .route("/faculties", get(list_faculties).post(create_faculty))
        .route("/faculties/{id}/load", get(faculty_load))
        .route("/faculties/{id}/schedule", get(faculty_schedule))
        .route("/subjects", get(list_subjects).post(create_subject))
        .route("/programs", get(list_programs).post(create_program))
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/{id}", put(update_room))
        .route(
            "/rooms/{id}/availability",
            get(room_availability).post(add_room_availability),
        )
        .route("/availability/{id}", delete(delete_availability))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Assignment engine
// ---------------------------------------------------------------------------

async fn assign_subject(
    State(state): State<AppState>,
    Json(req): Json<AssignSubjectRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let outcome = AssignmentService::new(state.db.clone()).assign(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Subject assigned successfully.",
            "data": outcome.data,
            "bookings": outcome.bookings,
        })),
    ))
}

async fn list_assignments(
    State(state): State<AppState>,
) -> Result<Json<Vec<LoadingDetail>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let loadings = repository::fetch_all_loadings(&mut conn).await?;
    Ok(Json(loadings))
}

async fn book_slot(
    State(state): State<AppState>,
    Json(req): Json<BookSlotRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let booking = BookingService::new(state.db.clone()).book(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Class schedule created successfully!",
            "data": booking,
        })),
    ))
}

#[derive(Deserialize)]
struct ScheduleQueryParams {
    program_id: Option<String>,
    year_level: Option<i64>,
    section: Option<String>,
}

async fn list_schedules(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQueryParams>,
) -> Result<Json<Vec<BookingDetail>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let bookings = repository::fetch_bookings(
        &mut conn,
        params.program_id.as_deref(),
        params.year_level,
        params.section.as_deref(),
    )
    .await?;
    Ok(Json(bookings))
}

// ---------------------------------------------------------------------------
// Faculty directory
// ---------------------------------------------------------------------------

async fn list_faculties(State(state): State<AppState>) -> Result<Json<Vec<Faculty>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let faculties = repository::fetch_faculties(&mut conn).await?;
    Ok(Json(faculties))
}

async fn create_faculty(
    State(state): State<AppState>,
    Json(req): Json<NewFacultyRequest>,
) -> Result<(StatusCode, Json<Faculty>), AppError> {
    if req.regular_units < 0.0 || req.overload_units < 0.0 {
        return Err(AppError::Validation(
            "Load budgets cannot be negative.".to_string(),
        ));
    }
    let mut conn = state.db.acquire().await?;
    let faculty = repository::insert_faculty(&mut conn, req).await?;
    Ok((StatusCode::CREATED, Json(faculty)))
}

async fn faculty_load(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FacultyLoadSummary>, AppError> {
    let mut conn = state.db.acquire().await?;
    repository::find_faculty(&mut conn, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Faculty not found: {id}")))?;

    let subjects = repository::assigned_subjects(&mut conn, &id).await?;
    let current_load_units = crate::services::assignment::committed_load(&subjects);
    let assigned_subject_ids = subjects.into_iter().map(|s| s.id).collect();

    Ok(Json(FacultyLoadSummary {
        current_load_units,
        assigned_subject_ids,
    }))
}

async fn faculty_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LoadingDetail>>, AppError> {
    let mut conn = state.db.acquire().await?;
    repository::find_faculty(&mut conn, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Faculty not found: {id}")))?;

    let schedule = repository::fetch_loadings_for_faculty(&mut conn, &id).await?;
    Ok(Json(schedule))
}

// ---------------------------------------------------------------------------
// Subject and program catalogs
// ---------------------------------------------------------------------------

async fn list_subjects(State(state): State<AppState>) -> Result<Json<Vec<Subject>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let subjects = repository::fetch_subjects(&mut conn).await?;
    Ok(Json(subjects))
}

async fn create_subject(
    State(state): State<AppState>,
    Json(req): Json<NewSubjectRequest>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let mut conn = state.db.acquire().await?;
    let subject = repository::insert_subject(&mut conn, req).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

async fn list_programs(State(state): State<AppState>) -> Result<Json<Vec<Program>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let programs = repository::fetch_programs(&mut conn).await?;
    Ok(Json(programs))
}

async fn create_program(
    State(state): State<AppState>,
    Json(req): Json<NewProgramRequest>,
) -> Result<(StatusCode, Json<Program>), AppError> {
    let mut conn = state.db.acquire().await?;
    let program = repository::insert_program(&mut conn, req).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

// ---------------------------------------------------------------------------
// Room directory and availability windows
// ---------------------------------------------------------------------------

fn validate_room_type(room_type: &str) -> Result<(), AppError> {
    if room_type != "Lecture" && room_type != "Laboratory" {
        return Err(AppError::Validation(
            "Room type must be 'Lecture' or 'Laboratory'.".to_string(),
        ));
    }
    Ok(())
}

async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomWithAvailability>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let rooms = repository::fetch_rooms(&mut conn).await?;

    let mut out = Vec::with_capacity(rooms.len());
    for room in rooms {
        let availabilities = repository::fetch_room_availabilities(&mut conn, &room.id).await?;
        out.push(RoomWithAvailability {
            room,
            availabilities,
        });
    }
    Ok(Json(out))
}

async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<NewRoomRequest>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    validate_room_type(&req.room_type)?;
    if req.room_number.trim().is_empty() {
        return Err(AppError::Validation(
            "Room number is required.".to_string(),
        ));
    }
    if matches!(req.capacity, Some(c) if c < 1) {
        return Err(AppError::Validation(
            "Capacity must be at least 1.".to_string(),
        ));
    }

    let mut conn = state.db.acquire().await?;
    if repository::room_number_taken(&mut conn, &req.room_number, None).await? {
        return Err(AppError::Validation(format!(
            "Room number '{}' already exists.",
            req.room_number
        )));
    }

    let room = repository::insert_room(&mut conn, req).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRoomRequest>,
) -> Result<Json<Room>, AppError> {
    validate_room_type(&req.room_type)?;

    let mut conn = state.db.acquire().await?;
    // The room being edited may keep its own number.
    if repository::room_number_taken(&mut conn, &req.room_number, Some(&id)).await? {
        return Err(AppError::Validation(format!(
            "Room number '{}' already exists.",
            req.room_number
        )));
    }

    let room = repository::update_room(&mut conn, &id, req)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room not found: {id}")))?;
    Ok(Json(room))
}

async fn room_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RoomAvailability>>, AppError> {
    let mut conn = state.db.acquire().await?;
    repository::find_room(&mut conn, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room not found: {id}")))?;

    let availabilities = repository::fetch_room_availabilities(&mut conn, &id).await?;
    Ok(Json(availabilities))
}

async fn add_room_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewAvailabilityRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if req.availabilities.is_empty() {
        return Err(AppError::BadRequest(
            "At least one availability window is required.".to_string(),
        ));
    }

    let mut tx = state.db.begin().await?;
    repository::find_room(&mut tx, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room not found: {id}")))?;

    // Normalize and validate every window before writing any of them.
    let mut normalized: Vec<AvailabilityWindowInput> = Vec::with_capacity(req.availabilities.len());
    for window in &req.availabilities {
        let day = window
            .day
            .parse::<Weekday>()
            .map_err(|e| AppError::Validation(format!("{e}")))?;
        let start = TimeOfDay::parse(&window.start_time)
            .map_err(|e| AppError::Validation(format!("{e}")))?;
        let end = TimeOfDay::parse(&window.end_time)
            .map_err(|e| AppError::Validation(format!("{e}")))?;
        Interval::new(day, start, end).map_err(|_| {
            AppError::Validation(format!(
                "End time must be after start time for the {day} window."
            ))
        })?;

        let candidate = AvailabilityWindowInput {
            day: day.as_str().to_string(),
            start_time: start.to_hms(),
            end_time: end.to_hms(),
        };

        let dup_in_batch = normalized.iter().any(|w| {
            w.day == candidate.day
                && w.start_time == candidate.start_time
                && w.end_time == candidate.end_time
        });
        let dup_in_db = repository::availability_exists(
            &mut tx,
            &id,
            &candidate.day,
            &candidate.start_time,
            &candidate.end_time,
        )
        .await?;
        if dup_in_batch || dup_in_db {
            return Err(AppError::Validation(format!(
                "The availability slot for {} from {} to {} already exists for this room.",
                candidate.day, candidate.start_time, candidate.end_time
            )));
        }

        normalized.push(candidate);
    }

    let mut created = Vec::with_capacity(normalized.len());
    for window in &normalized {
        created.push(repository::insert_availability(&mut tx, &id, window).await?);
    }
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Availability slots added successfully to the room!",
            "availabilities": created,
        })),
    ))
}

async fn delete_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut conn = state.db.acquire().await?;
    if repository::delete_availability(&mut conn, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "Availability slot not found: {id}"
        )))
    }
}
