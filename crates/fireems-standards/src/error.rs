use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("embedded schema {id} is malformed: {source}")]
    Embedded {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown tool '{id}' (run `fireems tools` to list built-in tools)")]
    UnknownTool { id: String },

    #[error("schema {schema} declares no fields")]
    EmptySchema { schema: String },

    #[error("schema {schema} declares field '{field}' more than once")]
    DuplicateField { schema: String, field: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
