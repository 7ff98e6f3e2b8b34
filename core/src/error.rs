use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cmake was not found on PATH")]
    ToolNotFound,

    #[error("malformed line in captured environment: {line:?}")]
    MalformedCapture { line: String },

    #[error("external command exited with code {code}")]
    ExternalProcessFailure { code: i32 },

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("failed to read target table {path}: {source}")]
    TableRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse target table: {0}")]
    TableParse(#[from] serde_json::Error),

    #[error("invalid target table: {0}")]
    Configuration(String),
}

impl DriverError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::ExternalProcessFailure { code } => *code,
            _ => 1,
        }
    }
}
