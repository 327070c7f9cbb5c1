//! Timetabling domain models.
//!
//! Provides the entities the timetable is built from (courses, teachers,
//! rooms, groups, availability windows) and the values it is made of
//! (time slots, conflicts).
//!
//! # Domain Mappings
//!
//! | u-timetable | Meaning |
//! |-------------|---------|
//! | Course | Subject taught N times per week |
//! | Group | Cohort of students attending together |
//! | Room | Lab or standard classroom |
//! | TimeSlot | One placed session |
//! | Conflict | Detected rule violation |

mod conflict;
mod course;
mod group;
mod room;
mod teacher;
mod time;
mod timeslot;

pub use conflict::{Conflict, ConflictKind, ConflictRecord, ConflictReport, Severity};
pub use course::Course;
pub use group::Group;
pub use room::{Room, RoomType};
pub use teacher::{Teacher, TeacherAvailability};
pub use time::{hm, TimeWindow, Weekday};
pub use timeslot::{ResourceKind, TimeSlot};
