pub mod faculty;
pub mod loading;
pub mod program;
pub mod room;
pub mod subject;

pub use faculty::{Faculty, FacultyLoadSummary, NewFacultyRequest};
pub use loading::{
    AssignSubjectRequest, BookSlotRequest, BookingDetail, FacultyLoading, LoadingDetail,
    ScheduleEntry, SectionBooking, SectionRef, SlotType,
};
pub use program::{NewProgramRequest, Program};
pub use room::{
    AvailabilityWindowInput, NewAvailabilityRequest, NewRoomRequest, Room, RoomAvailability,
    RoomWithAvailability, UpdateRoomRequest,
};
pub use subject::{NewSubjectRequest, Subject};
