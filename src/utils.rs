use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Once,
};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".resep_core";
const WORKBOOK_DIR: &str = "workbooks";
const CONFIG_FILE: &str = "config.json";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("resep_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.resep_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("RESEP_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Absolute path to the managed workbooks directory.
pub fn workbooks_dir() -> PathBuf {
    app_data_dir().join(WORKBOOK_DIR)
}

/// Resolves the canonical file path for a workbook name.
pub fn workbook_file(name: &str) -> PathBuf {
    workbooks_dir().join(format!("{}.json", name))
}

/// Path to the persisted application configuration.
pub fn config_file() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
