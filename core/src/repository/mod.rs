pub mod file;
pub mod reminder;
pub mod traits;

// Re-export
pub use file::FileAttendanceRepository;
pub use reminder::FileReminderRepository;
pub use traits::{AttendanceRepository, ReminderRepository};
