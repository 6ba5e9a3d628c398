use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, LrudError>;

/// Errors surfaced by the navigation engine and its FFI surface.
#[derive(Debug, Error)]
pub enum LrudError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("node `{id}` has no parent but `{root}` is already the root")]
    RootConflict { id: String, root: String },
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid node props: {0}")]
    Props(serde_json::Error),
    #[error("engine not initialized, call lrud_init() first")]
    NotInitialized,
    #[error("engine already initialized, call lrud_shutdown() first")]
    AlreadyInitialized,
    #[error("null pointer passed for `{0}`")]
    NullPointer(&'static str),
    #[error("invalid UTF-8 in `{0}`")]
    InvalidUtf8(&'static str),
}
