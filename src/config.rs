use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DATA_DIR: &str = "data";
const DB_FILE: &str = "cricket.db";
const SAMPLE_CSV_FILE: &str = "bat.csv";
const LOG_FILE: &str = "cricket_terminal.log";
const DEFAULT_LIVE_TIMEOUT_SECS: u64 = 5;

/// Runtime settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub sample_csv: PathBuf,
    pub export_dir: PathBuf,
    pub live_url: String,
    pub live_timeout: Duration,
}

impl AppConfig {
    /// Loads `.env.local` and `.env` (if present) and reads the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        };

        let data_dir = non_empty("CRICKET_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let db_path = non_empty("CRICKET_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DB_FILE));
        let sample_csv = non_empty("CRICKET_SAMPLE_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(SAMPLE_CSV_FILE));
        let export_dir = non_empty("CRICKET_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.clone());
        let live_url = non_empty("CRICKET_LIVE_URL").unwrap_or_default();
        let live_timeout_secs = non_empty("CRICKET_LIVE_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_LIVE_TIMEOUT_SECS)
            .clamp(1, 60);

        Self {
            data_dir,
            db_path,
            sample_csv,
            export_dir,
            live_url,
            live_timeout: Duration::from_secs(live_timeout_secs),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
