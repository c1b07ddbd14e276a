pub mod attendance_service;
pub mod dto;
pub mod reminder_service;
