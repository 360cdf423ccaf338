use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::models::{
    AvailabilityWindowInput, BookingDetail, Faculty, FacultyLoading, LoadingDetail,
    NewFacultyRequest, NewProgramRequest, NewRoomRequest, NewSubjectRequest, Program, Room,
    RoomAvailability, SectionBooking, SectionRef, Subject, UpdateRoomRequest,
};

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// Weekday ordering for listing queries; SQLite has no FIELD().
const DAY_ORDER: &str = "CASE day \
    WHEN 'Monday' THEN 1 WHEN 'Tuesday' THEN 2 WHEN 'Wednesday' THEN 3 \
    WHEN 'Thursday' THEN 4 WHEN 'Friday' THEN 5 WHEN 'Saturday' THEN 6 \
    WHEN 'Sunday' THEN 7 ELSE 8 END";

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

pub async fn insert_program(
    conn: &mut SqliteConnection,
    req: NewProgramRequest,
) -> Result<Program, sqlx::Error> {
    let program = Program {
        id: new_id(),
        program_name: req.program_name,
        abbreviation: req.abbreviation,
        status: "active".to_string(),
        created_at: now(),
    };

    sqlx::query(
        "INSERT INTO programs (id, program_name, abbreviation, status, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&program.id)
    .bind(&program.program_name)
    .bind(&program.abbreviation)
    .bind(&program.status)
    .bind(&program.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(program)
}

pub async fn fetch_programs(conn: &mut SqliteConnection) -> Result<Vec<Program>, sqlx::Error> {
    sqlx::query_as::<_, Program>(
        "SELECT id, program_name, abbreviation, status, created_at \
         FROM programs ORDER BY program_name ASC",
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn find_program(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Program>, sqlx::Error> {
    sqlx::query_as::<_, Program>(
        "SELECT id, program_name, abbreviation, status, created_at FROM programs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

// ---------------------------------------------------------------------------
// Faculties
// ---------------------------------------------------------------------------

pub async fn insert_faculty(
    conn: &mut SqliteConnection,
    req: NewFacultyRequest,
) -> Result<Faculty, sqlx::Error> {
    let faculty = Faculty {
        id: new_id(),
        display_name: req.display_name,
        regular_units: req.regular_units,
        overload_units: req.overload_units,
        status: "active".to_string(),
        created_at: now(),
    };

    sqlx::query(
        "INSERT INTO faculties (id, display_name, regular_units, overload_units, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&faculty.id)
    .bind(&faculty.display_name)
    .bind(faculty.regular_units)
    .bind(faculty.overload_units)
    .bind(&faculty.status)
    .bind(&faculty.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(faculty)
}

pub async fn fetch_faculties(conn: &mut SqliteConnection) -> Result<Vec<Faculty>, sqlx::Error> {
    sqlx::query_as::<_, Faculty>(
        "SELECT id, display_name, regular_units, overload_units, status, created_at \
         FROM faculties ORDER BY display_name ASC",
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn find_faculty(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Faculty>, sqlx::Error> {
    sqlx::query_as::<_, Faculty>(
        "SELECT id, display_name, regular_units, overload_units, status, created_at \
         FROM faculties WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

pub async fn insert_subject(
    conn: &mut SqliteConnection,
    req: NewSubjectRequest,
) -> Result<Subject, sqlx::Error> {
    let subject = Subject {
        id: new_id(),
        subject_code: req.subject_code,
        title: req.title,
        total_hrs: req.total_hrs,
        lec_hrs: req.lec_hrs,
        lab_hrs: req.lab_hrs,
        created_at: now(),
    };

    sqlx::query(
        "INSERT INTO subjects (id, subject_code, title, total_hrs, lec_hrs, lab_hrs, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&subject.id)
    .bind(&subject.subject_code)
    .bind(&subject.title)
    .bind(subject.total_hrs)
    .bind(subject.lec_hrs)
    .bind(subject.lab_hrs)
    .bind(&subject.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(subject)
}

pub async fn fetch_subjects(conn: &mut SqliteConnection) -> Result<Vec<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(
        "SELECT id, subject_code, title, total_hrs, lec_hrs, lab_hrs, created_at \
         FROM subjects ORDER BY subject_code ASC",
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn find_subject(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(
        "SELECT id, subject_code, title, total_hrs, lec_hrs, lab_hrs, created_at \
         FROM subjects WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

/// The distinct subjects a faculty currently holds at least one slot for.
/// The load ledger sums unit costs over this set, so a subject meeting as
/// LEC+LAB or on paired days is charged once.
pub async fn assigned_subjects(
    conn: &mut SqliteConnection,
    faculty_id: &str,
) -> Result<Vec<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(
        "SELECT DISTINCT s.id, s.subject_code, s.title, s.total_hrs, s.lec_hrs, s.lab_hrs, \
                s.created_at \
         FROM subjects s \
         JOIN faculty_loadings fl ON fl.subject_id = s.id \
         WHERE fl.faculty_id = ?",
    )
    .bind(faculty_id)
    .fetch_all(&mut *conn)
    .await
}

// ---------------------------------------------------------------------------
// Rooms and availability windows
// ---------------------------------------------------------------------------

pub async fn insert_room(
    conn: &mut SqliteConnection,
    req: NewRoomRequest,
) -> Result<Room, sqlx::Error> {
    let room = Room {
        id: new_id(),
        room_number: req.room_number,
        room_type: req.room_type,
        capacity: req.capacity,
        created_at: now(),
    };

    sqlx::query(
        "INSERT INTO rooms (id, room_number, type, capacity, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&room.id)
    .bind(&room.room_number)
    .bind(&room.room_type)
    .bind(room.capacity)
    .bind(&room.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(room)
}

pub async fn update_room(
    conn: &mut SqliteConnection,
    id: &str,
    req: UpdateRoomRequest,
) -> Result<Option<Room>, sqlx::Error> {
    let rows = sqlx::query("UPDATE rooms SET room_number = ?, type = ?, capacity = ? WHERE id = ?")
        .bind(&req.room_number)
        .bind(&req.room_type)
        .bind(req.capacity)
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    if rows == 0 {
        return Ok(None);
    }
    find_room(conn, id).await
}

pub async fn fetch_rooms(conn: &mut SqliteConnection) -> Result<Vec<Room>, sqlx::Error> {
    sqlx::query_as::<_, Room>(
        "SELECT id, room_number, type, capacity, created_at FROM rooms \
         ORDER BY room_number ASC",
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn find_room(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Room>, sqlx::Error> {
    sqlx::query_as::<_, Room>(
        "SELECT id, room_number, type, capacity, created_at FROM rooms WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

/// Uniqueness check for room numbers; `exclude_id` skips the record being
/// edited so an unchanged number does not trip over itself.
pub async fn room_number_taken(
    conn: &mut SqliteConnection,
    room_number: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM rooms WHERE room_number = ?1 AND (?2 IS NULL OR id != ?2)",
    )
    .bind(room_number)
    .bind(exclude_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count > 0)
}

pub async fn insert_availability(
    conn: &mut SqliteConnection,
    room_id: &str,
    window: &AvailabilityWindowInput,
) -> Result<RoomAvailability, sqlx::Error> {
    let availability = RoomAvailability {
        id: new_id(),
        room_id: room_id.to_string(),
        day: window.day.clone(),
        start_time: window.start_time.clone(),
        end_time: window.end_time.clone(),
        created_at: now(),
    };

    sqlx::query(
        "INSERT INTO room_availabilities (id, room_id, day, start_time, end_time, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&availability.id)
    .bind(&availability.room_id)
    .bind(&availability.day)
    .bind(&availability.start_time)
    .bind(&availability.end_time)
    .bind(&availability.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(availability)
}

pub async fn availability_exists(
    conn: &mut SqliteConnection,
    room_id: &str,
    day: &str,
    start_time: &str,
    end_time: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM room_availabilities \
         WHERE room_id = ? AND day = ? AND start_time = ? AND end_time = ?",
    )
    .bind(room_id)
    .bind(day)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count > 0)
}

pub async fn fetch_room_availabilities(
    conn: &mut SqliteConnection,
    room_id: &str,
) -> Result<Vec<RoomAvailability>, sqlx::Error> {
    let sql = format!(
        "SELECT id, room_id, day, start_time, end_time, created_at \
         FROM room_availabilities WHERE room_id = ? \
         ORDER BY {DAY_ORDER}, start_time ASC"
    );
    sqlx::query_as::<_, RoomAvailability>(&sql)
        .bind(room_id)
        .fetch_all(&mut *conn)
        .await
}

/// Availability windows of a room restricted to one weekday.
pub async fn room_windows_for_day(
    conn: &mut SqliteConnection,
    room_id: &str,
    day: &str,
) -> Result<Vec<RoomAvailability>, sqlx::Error> {
    sqlx::query_as::<_, RoomAvailability>(
        "SELECT id, room_id, day, start_time, end_time, created_at \
         FROM room_availabilities WHERE room_id = ? AND day = ? ORDER BY start_time ASC",
    )
    .bind(room_id)
    .bind(day)
    .fetch_all(&mut *conn)
    .await
}

pub async fn delete_availability(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM room_availabilities WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(rows > 0)
}

// ---------------------------------------------------------------------------
// Faculty loadings (assignment slots)
// ---------------------------------------------------------------------------

pub async fn insert_loading(
    conn: &mut SqliteConnection,
    faculty_id: &str,
    subject_id: &str,
    room_id: &str,
    slot_type: &str,
    day: &str,
    start_time: &str,
    end_time: &str,
) -> Result<FacultyLoading, sqlx::Error> {
    let loading = FacultyLoading {
        id: new_id(),
        faculty_id: faculty_id.to_string(),
        subject_id: subject_id.to_string(),
        room_id: room_id.to_string(),
        slot_type: slot_type.to_string(),
        day: day.to_string(),
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        created_at: now(),
    };

    sqlx::query(
        "INSERT INTO faculty_loadings \
             (id, faculty_id, subject_id, room_id, type, day, start_time, end_time, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&loading.id)
    .bind(&loading.faculty_id)
    .bind(&loading.subject_id)
    .bind(&loading.room_id)
    .bind(&loading.slot_type)
    .bind(&loading.day)
    .bind(&loading.start_time)
    .bind(&loading.end_time)
    .bind(&loading.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(loading)
}

/// Existing slots of a faculty overlapping the half-open candidate range
/// on the given day. Fixed-width HH:MM:SS strings compare correctly.
pub async fn faculty_overlaps(
    conn: &mut SqliteConnection,
    faculty_id: &str,
    day: &str,
    start_time: &str,
    end_time: &str,
) -> Result<Vec<FacultyLoading>, sqlx::Error> {
    sqlx::query_as::<_, FacultyLoading>(
        "SELECT id, faculty_id, subject_id, room_id, type, day, start_time, end_time, created_at \
         FROM faculty_loadings \
         WHERE faculty_id = ? AND day = ? AND start_time < ? AND end_time > ?",
    )
    .bind(faculty_id)
    .bind(day)
    .bind(end_time)
    .bind(start_time)
    .fetch_all(&mut *conn)
    .await
}

pub async fn room_overlaps(
    conn: &mut SqliteConnection,
    room_id: &str,
    day: &str,
    start_time: &str,
    end_time: &str,
) -> Result<Vec<FacultyLoading>, sqlx::Error> {
    sqlx::query_as::<_, FacultyLoading>(
        "SELECT id, faculty_id, subject_id, room_id, type, day, start_time, end_time, created_at \
         FROM faculty_loadings \
         WHERE room_id = ? AND day = ? AND start_time < ? AND end_time > ?",
    )
    .bind(room_id)
    .bind(day)
    .bind(end_time)
    .bind(start_time)
    .fetch_all(&mut *conn)
    .await
}

/// True when the student group already has a booked class overlapping the
/// candidate range on the given day.
pub async fn section_has_overlap(
    conn: &mut SqliteConnection,
    section: &SectionRef,
    day: &str,
    start_time: &str,
    end_time: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) \
         FROM section_bookings sb \
         JOIN faculty_loadings fl ON fl.id = sb.loading_id \
         WHERE sb.program_id = ? AND sb.year_level = ? AND sb.section = ? \
           AND fl.day = ? AND fl.start_time < ? AND fl.end_time > ?",
    )
    .bind(&section.program_id)
    .bind(section.year_level)
    .bind(&section.section)
    .bind(day)
    .bind(end_time)
    .bind(start_time)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count > 0)
}

/// Finds a committed slot by its identifying fields, as the schedule
/// builder submits them.
pub async fn find_loading_by_slot(
    conn: &mut SqliteConnection,
    subject_id: &str,
    room_id: &str,
    day: &str,
    start_time: &str,
    end_time: &str,
) -> Result<Option<FacultyLoading>, sqlx::Error> {
    sqlx::query_as::<_, FacultyLoading>(
        "SELECT id, faculty_id, subject_id, room_id, type, day, start_time, end_time, created_at \
         FROM faculty_loadings \
         WHERE subject_id = ? AND room_id = ? AND day = ? AND start_time = ? AND end_time = ?",
    )
    .bind(subject_id)
    .bind(room_id)
    .bind(day)
    .bind(start_time)
    .bind(end_time)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn count_loadings(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM faculty_loadings")
        .fetch_one(&mut *conn)
        .await
}

pub async fn fetch_all_loadings(
    conn: &mut SqliteConnection,
) -> Result<Vec<LoadingDetail>, sqlx::Error> {
    let sql = format!(
        "SELECT fl.id, fl.faculty_id, f.display_name AS faculty_name, \
                s.subject_code, s.title AS subject_title, r.room_number, \
                fl.type, fl.day, fl.start_time, fl.end_time \
         FROM faculty_loadings fl \
         JOIN faculties f ON f.id = fl.faculty_id \
         JOIN subjects s ON s.id = fl.subject_id \
         JOIN rooms r ON r.id = fl.room_id \
         ORDER BY faculty_name ASC, {}, fl.start_time ASC",
        DAY_ORDER.replace("CASE day", "CASE fl.day")
    );
    sqlx::query_as::<_, LoadingDetail>(&sql)
        .fetch_all(&mut *conn)
        .await
}

/// One faculty's slots, weekday order then start time.
pub async fn fetch_loadings_for_faculty(
    conn: &mut SqliteConnection,
    faculty_id: &str,
) -> Result<Vec<LoadingDetail>, sqlx::Error> {
    let sql = format!(
        "SELECT fl.id, fl.faculty_id, f.display_name AS faculty_name, \
                s.subject_code, s.title AS subject_title, r.room_number, \
                fl.type, fl.day, fl.start_time, fl.end_time \
         FROM faculty_loadings fl \
         JOIN faculties f ON f.id = fl.faculty_id \
         JOIN subjects s ON s.id = fl.subject_id \
         JOIN rooms r ON r.id = fl.room_id \
         WHERE fl.faculty_id = ? \
         ORDER BY {}, fl.start_time ASC",
        DAY_ORDER.replace("CASE day", "CASE fl.day")
    );
    sqlx::query_as::<_, LoadingDetail>(&sql)
        .bind(faculty_id)
        .fetch_all(&mut *conn)
        .await
}

// ---------------------------------------------------------------------------
// Section bookings
// ---------------------------------------------------------------------------

pub async fn insert_booking(
    conn: &mut SqliteConnection,
    loading_id: &str,
    section: &SectionRef,
) -> Result<SectionBooking, sqlx::Error> {
    let booking = SectionBooking {
        id: new_id(),
        loading_id: loading_id.to_string(),
        program_id: section.program_id.clone(),
        year_level: section.year_level,
        section: section.section.clone(),
        created_at: now(),
    };

    sqlx::query(
        "INSERT INTO section_bookings (id, loading_id, program_id, year_level, section, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&booking.id)
    .bind(&booking.loading_id)
    .bind(&booking.program_id)
    .bind(booking.year_level)
    .bind(&booking.section)
    .bind(&booking.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(booking)
}

/// The booking occupying a slot, with full operator-facing detail.
pub async fn booking_for_loading(
    conn: &mut SqliteConnection,
    loading_id: &str,
) -> Result<Option<BookingDetail>, sqlx::Error> {
    sqlx::query_as::<_, BookingDetail>(
        "SELECT sb.id AS booking_id, sb.program_id, sb.year_level, sb.section, \
                s.subject_code, f.display_name AS faculty_name, r.room_number, \
                fl.day, fl.start_time, fl.end_time \
         FROM section_bookings sb \
         JOIN faculty_loadings fl ON fl.id = sb.loading_id \
         JOIN subjects s ON s.id = fl.subject_id \
         JOIN faculties f ON f.id = fl.faculty_id \
         JOIN rooms r ON r.id = fl.room_id \
         WHERE sb.loading_id = ?",
    )
    .bind(loading_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Booking list with optional program/year/section filters.
pub async fn fetch_bookings(
    conn: &mut SqliteConnection,
    program_id: Option<&str>,
    year_level: Option<i64>,
    section: Option<&str>,
) -> Result<Vec<BookingDetail>, sqlx::Error> {
    let sql = format!(
        "SELECT sb.id AS booking_id, sb.program_id, sb.year_level, sb.section, \
                s.subject_code, f.display_name AS faculty_name, r.room_number, \
                fl.day, fl.start_time, fl.end_time \
         FROM section_bookings sb \
         JOIN faculty_loadings fl ON fl.id = sb.loading_id \
         JOIN subjects s ON s.id = fl.subject_id \
         JOIN faculties f ON f.id = fl.faculty_id \
         JOIN rooms r ON r.id = fl.room_id \
         WHERE (?1 IS NULL OR sb.program_id = ?1) \
           AND (?2 IS NULL OR sb.year_level = ?2) \
           AND (?3 IS NULL OR sb.section = ?3) \
         ORDER BY sb.year_level ASC, sb.section ASC, {}, fl.start_time ASC",
        DAY_ORDER.replace("CASE day", "CASE fl.day")
    );
    sqlx::query_as::<_, BookingDetail>(&sql)
        .bind(program_id)
        .bind(year_level)
        .bind(section)
        .fetch_all(&mut *conn)
        .await
}

pub async fn count_bookings(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM section_bookings")
        .fetch_one(&mut *conn)
        .await
}

#[cfg(test)]
mod tests {
    use sqlx::SqlitePool;

    use super::*;

    async fn setup_test_db() -> SqlitePool {
        // A single connection keeps every query on the same in-memory database.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    #[tokio::test]
    async fn test_insert_and_fetch_room() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let room = insert_room(
            &mut conn,
            NewRoomRequest {
                room_number: "101".to_string(),
                room_type: "Lecture".to_string(),
                capacity: Some(40),
            },
        )
        .await
        .expect("Failed to insert room");

        assert_eq!(room.room_number, "101");

        let rooms = fetch_rooms(&mut conn).await.expect("Failed to fetch rooms");
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, room.id);
    }

    #[tokio::test]
    async fn test_room_number_uniqueness_with_exclusion() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let room = insert_room(
            &mut conn,
            NewRoomRequest {
                room_number: "101".to_string(),
                room_type: "Lecture".to_string(),
                capacity: None,
            },
        )
        .await
        .unwrap();

        assert!(room_number_taken(&mut conn, "101", None).await.unwrap());
        // Editing the same room keeps its own number legal.
        assert!(
            !room_number_taken(&mut conn, "101", Some(&room.id))
                .await
                .unwrap()
        );
        assert!(!room_number_taken(&mut conn, "102", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_overlap_queries_use_half_open_ranges() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let faculty = insert_faculty(
            &mut conn,
            NewFacultyRequest {
                display_name: "Dr. Reyes".to_string(),
                regular_units: 12.0,
                overload_units: 0.0,
            },
        )
        .await
        .unwrap();
        let subject = insert_subject(
            &mut conn,
            NewSubjectRequest {
                subject_code: "CS101".to_string(),
                title: "Intro to Computing".to_string(),
                total_hrs: Some(3.0),
                lec_hrs: 0.0,
                lab_hrs: 0.0,
            },
        )
        .await
        .unwrap();
        let room = insert_room(
            &mut conn,
            NewRoomRequest {
                room_number: "101".to_string(),
                room_type: "Lecture".to_string(),
                capacity: None,
            },
        )
        .await
        .unwrap();

        insert_loading(
            &mut conn,
            &faculty.id,
            &subject.id,
            &room.id,
            "LEC",
            "Monday",
            "08:00:00",
            "10:00:00",
        )
        .await
        .unwrap();

        // Overlapping range hits.
        let hits = faculty_overlaps(&mut conn, &faculty.id, "Monday", "09:00:00", "11:00:00")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        // Touching range does not.
        let hits = faculty_overlaps(&mut conn, &faculty.id, "Monday", "10:00:00", "12:00:00")
            .await
            .unwrap();
        assert!(hits.is_empty());

        // Different day does not.
        let hits = room_overlaps(&mut conn, &room.id, "Tuesday", "08:00:00", "10:00:00")
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_assigned_subjects_are_distinct() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let faculty = insert_faculty(
            &mut conn,
            NewFacultyRequest {
                display_name: "Dr. Reyes".to_string(),
                regular_units: 12.0,
                overload_units: 3.0,
            },
        )
        .await
        .unwrap();
        let subject = insert_subject(
            &mut conn,
            NewSubjectRequest {
                subject_code: "CS102".to_string(),
                title: "Programming".to_string(),
                total_hrs: None,
                lec_hrs: 2.0,
                lab_hrs: 3.0,
            },
        )
        .await
        .unwrap();
        let room = insert_room(
            &mut conn,
            NewRoomRequest {
                room_number: "L1".to_string(),
                room_type: "Laboratory".to_string(),
                capacity: None,
            },
        )
        .await
        .unwrap();

        // LEC and LAB slots of the same subject.
        insert_loading(
            &mut conn,
            &faculty.id,
            &subject.id,
            &room.id,
            "LEC",
            "Monday",
            "08:00:00",
            "10:00:00",
        )
        .await
        .unwrap();
        insert_loading(
            &mut conn,
            &faculty.id,
            &subject.id,
            &room.id,
            "LAB",
            "Wednesday",
            "08:00:00",
            "11:00:00",
        )
        .await
        .unwrap();

        let subjects = assigned_subjects(&mut conn, &faculty.id).await.unwrap();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].resolved_units(), 5.0);
    }

    #[tokio::test]
    async fn test_duplicate_availability_window_detected() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let room = insert_room(
            &mut conn,
            NewRoomRequest {
                room_number: "101".to_string(),
                room_type: "Lecture".to_string(),
                capacity: None,
            },
        )
        .await
        .unwrap();

        let window = AvailabilityWindowInput {
            day: "Monday".to_string(),
            start_time: "08:00:00".to_string(),
            end_time: "12:00:00".to_string(),
        };
        insert_availability(&mut conn, &room.id, &window)
            .await
            .unwrap();

        assert!(
            availability_exists(&mut conn, &room.id, "Monday", "08:00:00", "12:00:00")
                .await
                .unwrap()
        );
        assert!(
            !availability_exists(&mut conn, &room.id, "Tuesday", "08:00:00", "12:00:00")
                .await
                .unwrap()
        );
    }
}
