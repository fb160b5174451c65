use crate::route::ActiveKey;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    time::Duration,
};

/// User-facing config for the console session
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The base url of the backend REST api
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// One of off, error, warn, info, debug, trace
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: default_backend_url(),
            request_timeout_ms: default_request_timeout_ms(),
            log_level: None,
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

/// State persisted between sessions.  Not relied upon for correctness.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFile {
    pub last_active: Option<ActiveKey>,
}

pub fn dotdir_path() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(crate::env::CONSOLE_DIR) {
        return Ok(PathBuf::from(dir));
    }

    let mut dir = dirs::home_dir().ok_or_else(|| anyhow::Error::msg("home_dir not found"))?;

    dir.push(".console");

    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    let mut path = dotdir_path()?;
    path.push("console.yml");
    Ok(path)
}

pub fn session_path() -> Result<PathBuf> {
    let mut path = dotdir_path()?;
    path.push("session.yml");
    Ok(path)
}

pub fn session_log() -> Result<PathBuf> {
    let mut path = dotdir_path()?;
    path.push("session.log");
    Ok(path)
}

/// Loads the config file, writing the default config if it does not exist.
///
/// `CONSOLE_BACKEND_URL` overrides the configured backend url.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    let mut config = load_config_at(path.as_path())?;

    if let Some(url) = crate::env::backend_url_override() {
        log::debug!("backend url overridden by environment: {}", url);
        config.backend_url = url;
    }

    Ok(config)
}

pub fn load_config_at(path: &Path) -> Result<Config> {
    if !path.is_file() {
        let config = Config::default();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.to_string_lossy()))?;
        }

        write_yaml(path, &config)?;

        return Ok(config);
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_yaml::from_reader(reader)
        .with_context(|| format!("parse config {}", path.to_string_lossy()))?;

    Ok(config)
}

pub fn load_session_at(path: &Path) -> Result<SessionFile> {
    if !path.is_file() {
        log::debug!("File {:?} does not exist", path);
        return Ok(SessionFile::default());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let session = serde_yaml::from_reader(reader)?;

    Ok(session)
}

pub fn write_session_at(path: &Path, session: &SessionFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    write_yaml(path, session)
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_yaml::to_writer(writer, value)?;
    Ok(())
}
