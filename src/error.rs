use thiserror::Error;

#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Not a numeric value: {0:?}")]
    InvalidDigit(String),

    #[error("Target not found: {0}")]
    UnresolvableTarget(String),

    #[error("Cell index {index} out of range (group has {len} cells)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Programmatic set is disabled for this group")]
    ProgrammaticSetDisabled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Form error: {0}")]
    Form(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, OtpError>;
