//! Process-level error type.
//!
//! The lower layers (fetching, extraction, fitting) each have their own typed
//! errors; the app layer folds them into an `AppError` carrying the message
//! shown to the operator and the process exit code.
//!
//! Exit code convention:
//! - `2`: usage/configuration errors (unknown country, bad flags)
//! - `3`: data errors (extraction, fitting)
//! - `4`: network or output I/O errors (fetch, plot writing)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
