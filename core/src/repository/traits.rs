use crate::model::record::AttendanceRecord;
use crate::model::reminder::ReminderSettings;
use anyhow::Result;

pub trait AttendanceRepository {
    fn load(&self) -> Result<AttendanceRecord>;
    fn save(&self, record: &AttendanceRecord) -> Result<()>;
}

pub trait ReminderRepository {
    fn load(&self) -> Result<ReminderSettings>;
    fn save(&self, settings: &ReminderSettings) -> Result<()>;
}
