use dirs::home_dir;
use std::{env, path::PathBuf};

pub const HOME_ENV: &str = "GIFT_LEDGER_HOME";
pub const DATABASE_ENV: &str = "GIFT_LEDGER_DB";
const DEFAULT_DIR_NAME: &str = ".gift_ledger";
const DATABASE_FILE: &str = "gift_tracker.db";

/// Returns the application data directory, defaulting to `~/.gift_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Database file used when neither config nor environment name one.
pub fn default_database_path(home: &std::path::Path) -> PathBuf {
    home.join(DATABASE_FILE)
}
