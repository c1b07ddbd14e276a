use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};

use crate::model::record::AttendanceRecord;
use crate::repository::traits::AttendanceRepository;

const DEFAULT_FILE_NAME: &str = "attendance.json";

#[derive(Clone)]
pub struct FileAttendanceRepository {
    file_path: PathBuf,
}

impl FileAttendanceRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".attendance-planner")
            }
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        Ok(FileAttendanceRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl AttendanceRepository for FileAttendanceRepository {
    /// A missing or unreadable record yields the default record.
    fn load(&self) -> Result<AttendanceRecord> {
        if !self.file_path.exists() {
            debug!(path = %self.file_path.display(), "no attendance record yet");
            return Ok(AttendanceRecord::default());
        }

        let file = File::open(&self.file_path)
            .with_context(|| format!("Failed to open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, AttendanceRecord>(reader) {
            Ok(record) => {
                debug!(path = %self.file_path.display(), "loaded attendance record");
                Ok(record)
            }
            Err(err) => {
                warn!(path = %self.file_path.display(), error = %err, "corrupt attendance record, using defaults");
                Ok(AttendanceRecord::default())
            }
        }
    }

    fn save(&self, record: &AttendanceRecord) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, record)?;
        writer.flush()?;
        debug!(path = %self.file_path.display(), "saved attendance record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let repo = FileAttendanceRepository::new(Some(dir.path().to_path_buf())).unwrap();
        let record = repo.load().unwrap();
        assert_eq!(record.attended, 0);
        assert_eq!(record.target, 75.0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = FileAttendanceRepository::new(Some(dir.path().to_path_buf())).unwrap();

        let mut record = AttendanceRecord::default();
        record.attended = 42;
        record.total = 50;
        record.remaining = 30;
        record.target = 80.0;
        repo.save(&record).unwrap();

        assert_eq!(repo.load().unwrap(), record);
        assert!(repo.path().ends_with("attendance.json"));
    }

    #[test]
    fn test_corrupt_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let repo = FileAttendanceRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(repo.path(), "{ not json").unwrap();

        let record = repo.load().unwrap();
        assert_eq!(record.total, 0);
        assert_eq!(record.target, 75.0);
    }

    #[test]
    fn test_creates_nested_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let repo = FileAttendanceRepository::new(Some(nested.clone())).unwrap();
        repo.save(&AttendanceRecord::default()).unwrap();
        assert!(nested.join("attendance.json").exists());
    }
}
