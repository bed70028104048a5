/// One flat error type for the whole dashboard. None of these are fatal:
/// pages keep their last good state and stay interactive.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// A data source could not produce a snapshot.
    DataUnavailable(String),
    /// View state outside its valid range. Controllers clamp instead of returning this.
    InvalidViewState(String),
    /// Watchlist persistence failed.
    Storage(String),
    /// Rejected user input (transactions, config overrides).
    Validation(String),
    /// Browser globals (`window`, `document`) were unavailable.
    Browser(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::DataUnavailable(msg) => write!(f, "Data Unavailable: {}", msg),
            AppError::InvalidViewState(msg) => write!(f, "Invalid View State: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Browser(msg) => write!(f, "Browser Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Validation(error.to_string())
    }
}

pub type DataResult<T> = Result<T, AppError>;
pub type StorageResult<T> = Result<T, AppError>;
