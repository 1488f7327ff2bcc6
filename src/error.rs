use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Service { status: Option<u16>, message: String },

    #[error("Data interpretation error, please retry.")]
    Interpretation,

    #[error("API key error: set GEMINI_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl PlannerError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlannerError::Validation(message.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        PlannerError::Service {
            status: None,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
