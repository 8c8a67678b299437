use std::process::ExitCode;

/// Errors that cause issueboard to exit with a specific code.
#[derive(Debug, thiserror::Error)]
pub enum ExitError {
    #[error("config error: {0}")]
    Config(String),

    #[error("environment variable not set: {name}")]
    MissingEnv { name: String },

    #[error("api request failed ({status}): {url}")]
    Api { status: u16, url: String },

    #[error("template error: {0}")]
    Template(String),

    #[error("doctor found problems")]
    DoctorFailed,

    #[error("{message}")]
    WithCode { code: u8, message: String },

    #[error("{0}")]
    Other(String),
}

impl ExitError {
    pub fn new(code: u8, message: String) -> Self {
        ExitError::WithCode { code, message }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            ExitError::Config(_) => ExitCode::from(2),
            ExitError::MissingEnv { .. } => ExitCode::from(3),
            ExitError::Api { .. } => ExitCode::from(4),
            ExitError::Template(_) => ExitCode::from(5),
            ExitError::DoctorFailed => ExitCode::from(6),
            ExitError::WithCode { code, .. } => ExitCode::from(*code),
            ExitError::Other(_) => ExitCode::from(1),
        }
    }
}
