//! RUST_LOG handling for the notifications panel.
//!
//! Directives use the familiar `target=level` form, comma separated. Each
//! worker reports under its own target (`foodshare::feeds`,
//! `foodshare::claims`, `foodshare::creations`), so
//! `RUST_LOG=info,foodshare::claims=debug` shows claim failure causes without
//! the feed chatter. The longest matching target wins; a bare level sets the
//! default and a bare target enables everything under it.

use crate::error_classifier::LogLevel;
use std::env;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityFilter {
    default: LogLevel,
    directives: Vec<(String, LogLevel)>,
}

impl Default for ActivityFilter {
    fn default() -> Self {
        Self {
            default: LogLevel::Info,
            directives: Vec::new(),
        }
    }
}

impl ActivityFilter {
    pub fn from_env() -> Self {
        env::var("RUST_LOG")
            .map(|spec| Self::parse(&spec))
            .unwrap_or_default()
    }

    /// Unknown levels are skipped rather than rejected.
    pub fn parse(spec: &str) -> Self {
        let mut filter = Self::default();
        for directive in spec.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((target, level)) => {
                    if let Some(level) = parse_level(level) {
                        filter.directives.push((target.trim().to_string(), level));
                    }
                }
                None => match parse_level(directive) {
                    Some(level) => filter.default = level,
                    None => filter.directives.push((directive.to_string(), LogLevel::Trace)),
                },
            }
        }
        filter
    }

    /// Lowest level shown for `target`.
    pub fn threshold(&self, target: &str) -> LogLevel {
        self.directives
            .iter()
            .filter(|(prefix, _)| matches_target(target, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, level)| *level)
            .unwrap_or(self.default)
    }

    pub fn allows(&self, target: &str, level: LogLevel) -> bool {
        level >= self.threshold(target)
    }
}

/// `foodshare` covers `foodshare::claims` but not `foodshare_extra`.
fn matches_target(target: &str, prefix: &str) -> bool {
    target
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

fn parse_level(level: &str) -> Option<LogLevel> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" | "warning" => Some(LogLevel::Warn),
        "error" => Some(LogLevel::Error),
        _ => None,
    }
}
