mod logging;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AnalyzerService, AppServices, CertificateService, ProgressService, RemoteDetectorService,
    ServicesConfig,
};
use tracing::{error, info};
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    export_dir: PathBuf,
}

impl UiApp for DesktopApp {
    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn analyzer(&self) -> Arc<AnalyzerService> {
        self.services.analyzer()
    }

    fn remote_detector(&self) -> Arc<RemoteDetectorService> {
        self.services.remote_detector()
    }

    fn certificates(&self) -> Arc<CertificateService> {
        self.services.certificates()
    }

    fn export_dir(&self) -> PathBuf {
        self.export_dir.clone()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cybersafe [ui] [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://<data dir>/cybersafe.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CYBERSAFE_DB_URL, CYBERSAFE_DETECT_BASE_URL, CYBERSAFE_THINKING_MS,");
    eprintln!("  CYBERSAFE_LOG (or RUST_LOG)");
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Help,
    Ui(Args),
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
}

impl Args {
    fn parse(
        argv: impl IntoIterator<Item = String>,
        default_db_url: String,
    ) -> Result<Parsed, ArgsError> {
        let mut args = argv.into_iter().peekable();
        match args.peek().map(String::as_str) {
            Some("ui") => {
                args.next();
            }
            Some("--help" | "-h") | None => {}
            Some(first) if first.starts_with("--") => {}
            Some(first) => return Err(ArgsError::UnknownCommand(first.to_string())),
        }

        let mut db_url = default_db_url;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Ui(Self { db_url }))
    }
}

fn default_db_url(data_dir: &Path) -> String {
    std::env::var("CYBERSAFE_DB_URL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map_or_else(
            || format!("sqlite://{}", data_dir.join("cybersafe.sqlite3").display()),
            normalize_sqlite_url,
        )
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || ArgsError::InvalidDbUrl {
        raw: db_url.to_string(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid().into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = logging::data_dir();
    let parsed = Args::parse(std::env::args().skip(1), default_db_url(&data_dir)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Ui(args) => args,
    };

    match logging::initialize_logging() {
        Ok(path) => info!(log = %path.display(), "Logging initialized."),
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    prepare_sqlite_file(&args.db_url)?;
    let services = AppServices::new_sqlite(&args.db_url, ServicesConfig::from_env())
        .await
        .inspect_err(|err| error!(error = %err, "Failed to start services."))?;
    info!(db = %args.db_url, "Storage ready.");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        export_dir: data_dir.join("certificates"),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("CyberSafe")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
