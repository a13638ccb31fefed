use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConlluError {
    #[error("line {line}: expected 10 tab-separated columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line {line}: invalid ID '{value}'")]
    InvalidId { line: usize, value: String },

    #[error("line {line}: invalid HEAD '{value}'")]
    InvalidHead { line: usize, value: String },

    #[error("line {line}: word {id} has no HEAD")]
    MissingHead { line: usize, id: u32 },

    #[error("line {line}: sentence block has comments but no token rows")]
    NoTokens { line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
