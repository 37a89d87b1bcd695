use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown field data type: {0}")]
    UnknownDataType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
