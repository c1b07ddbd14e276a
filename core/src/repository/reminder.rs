use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use anyhow::{anyhow, Result};
use tracing::{debug, warn};
use crate::model::reminder::ReminderSettings;
use crate::repository::traits::ReminderRepository;

const REMINDER_FILE_NAME: &str = "reminder_settings.json";

pub struct FileReminderRepository {
    file_path: PathBuf,
}

impl FileReminderRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".attendance-planner")
            }
        };
        fs::create_dir_all(&path)?;
        path.push(REMINDER_FILE_NAME);

        Ok(FileReminderRepository { file_path: path })
    }
}

impl ReminderRepository for FileReminderRepository {
    fn load(&self) -> Result<ReminderSettings> {
        if !self.file_path.exists() {
            return Ok(ReminderSettings::default());
        }
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                warn!(error = %err, "unreadable reminder settings, using defaults");
                Ok(ReminderSettings::default())
            }
        }
    }

    fn save(&self, settings: &ReminderSettings) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, settings)?;
        writer.flush()?;
        debug!(path = %self.file_path.display(), "saved reminder settings");
        Ok(())
    }
}
