use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "CYBERSAFE_LOG";
const LOG_FILE: &str = "cybersafe.log";

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "cybersafe", "cybersafe")
}

/// Per-user data directory; falls back to `./.data` when no home is known.
pub fn data_dir() -> PathBuf {
    project_directory().map_or_else(
        || PathBuf::from(".").join(".data"),
        |dirs| dirs.data_local_dir().to_path_buf(),
    )
}

/// File-based logging under the data directory.
///
/// The filter comes from `RUST_LOG`, then `CYBERSAFE_LOG`, then defaults to
/// `info` for the workspace crates.
pub fn initialize_logging() -> std::io::Result<PathBuf> {
    let directory = data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(LOG_FILE);
    let log_file = std::fs::File::create(&log_path)?;

    let level = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV))
        .unwrap_or_else(|_| "cybersafe=info,services=info,storage=info,ui=info".to_string());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(level));

    tracing_subscriber::registry().with(file_layer).init();

    Ok(log_path)
}
