//! Error reporting for the binary
//!
//! Errors say whether the user can act on them. Actionable errors are logged
//! with their own message; everything else is logged with the operation that
//! failed, and the details go to debug output.

use crate::core::logging::LoggingError;
use crate::profile::ProfileError;

/// Errors that distinguish user-actionable failures from system failures
///
/// When `is_user_actionable()` is true, `user_message()` returns `Some`.
pub trait ContextualError: std::error::Error {
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<String>;
}

/// Log a fatal error at the detail level it deserves
pub fn log_error_with_context<E: ContextualError>(error: &E, operation_context: &str) {
    match error.user_message().filter(|_| error.is_user_actionable()) {
        Some(message) => log::error!("FATAL: {}", message),
        None => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

impl ContextualError for ProfileError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ProfileError::Io { .. })
    }

    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}

impl ContextualError for LoggingError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, LoggingError::Level { .. } | LoggingError::File { .. })
    }

    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}
