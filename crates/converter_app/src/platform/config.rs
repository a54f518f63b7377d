//! Command line and RON file configuration.
//!
//! Precedence: command line / environment, then the config file, then
//! built-in defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use converter_engine::ClientSettings;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "pdfconv.ron";

#[derive(Debug, Parser)]
#[command(
    name = "converter_app",
    version,
    about = "Upload PDF files to a conversion server and preview the Markdown it returns"
)]
pub struct Cli {
    /// PDF files to preselect for upload.
    pub files: Vec<PathBuf>,

    /// Base address of the conversion server, e.g. http://localhost:5000.
    #[arg(long, env = "PDFCONV_SERVER")]
    pub server: Option<String>,

    /// RON configuration file (defaults to ./pdfconv.ron when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Mirror log output into this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown log level {label:?} (expected off, error, warn, info, debug or trace)")]
    LogLevel { label: String },
}

/// Effective settings after merging every source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub settings: ClientSettings,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// The file the settings were read from, if any.
    pub source: Option<PathBuf>,
}

/// Loads the named file, or `./pdfconv.ron` if it exists, or defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => match read_config(Path::new(DEFAULT_CONFIG_FILE)) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(FileConfig::default())
            }
            other => other,
        },
    }
}

fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: FileConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

/// Runs before logging is set up, so every problem is returned rather than logged.
pub fn resolve(cli: &Cli, file: FileConfig) -> Result<ResolvedConfig, ConfigError> {
    let mut settings = ClientSettings::default();
    if let Some(url) = cli.server.clone().or(file.server_url) {
        settings.base_url = url;
    }
    settings.connect_timeout = file.connect_timeout_secs.map(Duration::from_secs);
    settings.request_timeout = file.request_timeout_secs.map(Duration::from_secs);
    if let Some(max_bytes) = file.max_response_bytes {
        settings.max_bytes = max_bytes;
    }

    let file_level = match file.log_level {
        Some(label) => match client_logging::parse_level(&label) {
            Some(level) => level,
            None => return Err(ConfigError::LogLevel { label }),
        },
        None => LevelFilter::Info,
    };
    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        file_level
    };

    Ok(ResolvedConfig {
        settings,
        log_file: cli.log_file.clone().or(file.log_file),
        log_level,
        source: file.source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["converter_app"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn defaults_without_any_source() {
        let resolved = resolve(&cli(&[]), FileConfig::default()).unwrap();
        assert_eq!(resolved.settings, ClientSettings::default());
        assert_eq!(resolved.log_level, LevelFilter::Info);
        assert_eq!(resolved.log_file, None);
    }

    #[test]
    fn reads_ron_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                server_url: Some("http://convert.internal:8080"),
                request_timeout_secs: Some(120),
                log_level: Some("warn"),
            )"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        let resolved = resolve(&cli(&[]), config).unwrap();

        assert_eq!(resolved.settings.base_url, "http://convert.internal:8080");
        assert_eq!(
            resolved.settings.request_timeout,
            Some(Duration::from_secs(120))
        );
        assert_eq!(resolved.settings.connect_timeout, None);
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn command_line_overrides_file() {
        let config = FileConfig {
            server_url: Some("http://from-file:5000".into()),
            log_file: Some("file.log".into()),
            log_level: Some("error".into()),
            ..FileConfig::default()
        };
        let resolved = resolve(
            &cli(&[
                "--server",
                "http://from-cli:5000",
                "--log-file",
                "cli.log",
                "-v",
                "a.pdf",
            ]),
            config,
        )
        .unwrap();

        assert_eq!(resolved.settings.base_url, "http://from-cli:5000");
        assert_eq!(resolved.log_file, Some(PathBuf::from("cli.log")));
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("absent.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(server_url: 42)").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_log_level_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"(log_level: Some("verbos"))"#).unwrap();
        let config = load_config(Some(file.path())).unwrap();

        let err = resolve(&cli(&[]), config.clone()).unwrap_err();
        assert!(matches!(&err, ConfigError::LogLevel { label } if label == "verbos"));

        // The verbose flag does not hide a broken file.
        let err = resolve(&cli(&["-v"]), config).unwrap_err();
        assert!(matches!(err, ConfigError::LogLevel { .. }));
    }
}
