use axum::http::StatusCode;
use thiserror::Error;

/// Append or delete could not be persisted.
#[derive(Debug, Error)]
pub enum StoreWriteError {
    #[error("failed to serialize kicks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write data file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to log kick. Please try again.")]
    Log(#[source] StoreWriteError),

    #[error("Failed to remove kick")]
    Undo(#[source] StoreWriteError),

    #[error("No kick to undo")]
    NoUndoTarget,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': expected a port number")]
    InvalidPort { var: &'static str, value: String },

    #[error("invalid {var} '{value}': expected YYYY-MM-DD")]
    InvalidDate { var: &'static str, value: String },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::NoUndoTarget => StatusCode::CONFLICT,
            CommandError::Log(_) | CommandError::Undo(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
