pub mod interval;

pub use interval::{Interval, ScheduleError, TimeOfDay, Weekday, parse_time_range};
