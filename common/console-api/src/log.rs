//! A global, configurable level filter.
//!
//! The session honors this level on startup, ahead of the `log_level` config property.
//! `console_session::launch` sets it from the `CONSOLE_LOG` environment variable.
//!
//! get_level() returns None unless set_level has been called.
use std::sync::atomic::{AtomicU8, Ordering};

use log::LevelFilter;

static LOG_LEVEL: AtomicU8 = AtomicU8::new(0);

pub fn set_level(level: LevelFilter) {
    LOG_LEVEL.store(discriminant_of(level), Ordering::SeqCst);
}

pub fn get_level() -> Option<LevelFilter> {
    level_of(LOG_LEVEL.load(Ordering::SeqCst))
}

/// Parses a config level name, e.g. `debug`
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Resolves the effective level: the global override, then the configured name, then info.
pub fn effective_level(configured: Option<&str>) -> LevelFilter {
    get_level()
        .or_else(|| configured.and_then(parse_level))
        .unwrap_or(LevelFilter::Info)
}

// LevelFilter has a from_usize method, but it's private
// we have to redo the cases here, and support None as 0
fn discriminant_of(filter: LevelFilter) -> u8 {
    match filter {
        LevelFilter::Trace => 1,
        LevelFilter::Debug => 2,
        LevelFilter::Info => 3,
        LevelFilter::Warn => 4,
        LevelFilter::Error => 5,
        LevelFilter::Off => 6,
    }
}

fn level_of(filter: u8) -> Option<LevelFilter> {
    match filter {
        0 => None,
        1 => Some(LevelFilter::Trace),
        2 => Some(LevelFilter::Debug),
        3 => Some(LevelFilter::Info),
        4 => Some(LevelFilter::Warn),
        5 => Some(LevelFilter::Error),
        6 => Some(LevelFilter::Off),
        _ => unreachable!("unreachable level discriminant"),
    }
}
