use std::fmt;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A transient, user-visible message produced by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(level: Level, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { level, title: title.into(), description: description.into() }
    }

    pub fn success(description: impl Into<String>) -> Self {
        Self::new(Level::Success, "Success", description)
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::new(Level::Error, "Error", description)
    }

    pub fn logged_out() -> Self {
        Self::new(Level::Info, "Logged out", "You have been logged out successfully")
    }

    /// Converts a failure into an error notification.
    pub fn from_error(err: &DashboardError, fallback: &str) -> Self {
        Self::error(err.user_message(fallback))
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.title, self.description)
    }
}
