pub mod assignment;
pub mod booking;

pub use assignment::{AssignmentOutcome, AssignmentService};
pub use booking::BookingService;
