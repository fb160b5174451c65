use std::fmt::Display;

/// A user-facing toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Error(String),
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Notification::Info(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Info(message) | Notification::Error(message) => message.as_str(),
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::Info(message) => write!(f, "info: {}", message),
            Notification::Error(message) => write!(f, "error: {}", message),
        }
    }
}
