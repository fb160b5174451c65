//! Environment variables recognized by the console session.

/// Overrides the dot directory (`~/.console`).  The integration tests point this at a temporary directory.
pub const CONSOLE_DIR: &str = "CONSOLE_DIR";

/// Overrides the backend url from the config file.
pub const CONSOLE_BACKEND_URL: &str = "CONSOLE_BACKEND_URL";

pub fn backend_url_override() -> Option<String> {
    std::env::var(CONSOLE_BACKEND_URL)
        .ok()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Overrides the `log_level` config property, e.g. `CONSOLE_LOG=debug`.
pub const CONSOLE_LOG: &str = "CONSOLE_LOG";

pub fn log_level_override() -> Option<log::LevelFilter> {
    std::env::var(CONSOLE_LOG)
        .ok()
        .and_then(|name| crate::log::parse_level(name.as_str()))
}
