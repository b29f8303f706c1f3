use crate::donations::ServiceError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Severity of a failed feed refresh.
    pub fn classify_feed_error(&self, error: &ServiceError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            ServiceError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            ServiceError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth, malformed responses
            ServiceError::Http { status, .. } if *status == 401 || *status == 403 => {
                LogLevel::Error
            }
            ServiceError::Decode(_) | ServiceError::InvalidUrl(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    /// Severity of a failed claim or create action.
    pub fn classify_action_error(&self, error: &ServiceError) -> LogLevel {
        match error {
            // Expected races: someone else claimed first, listing withdrawn
            ServiceError::Rejected(_) | ServiceError::NotFound(_) => LogLevel::Info,
            ServiceError::Http { status, .. } if *status == 409 => LogLevel::Info,
            other => self.classify_feed_error(other),
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
