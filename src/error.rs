use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArgusError {
    #[error("issue {0} not found")]
    IssueNotFound(u64),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("server error ({0}): {1}")]
    Server(u16, String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid sort key '{0}'")]
    InvalidSortKey(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ArgusError>;

/// Clonable classification of a gateway failure, suitable for display
/// models. Controllers keep the latest failure here rather than crashing
/// the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Validation(String),
    NotFound(String),
    Transport(String),
    Server(String),
}

impl ErrorKind {
    pub fn message(&self) -> &str {
        match self {
            ErrorKind::Validation(m)
            | ErrorKind::NotFound(m)
            | ErrorKind::Transport(m)
            | ErrorKind::Server(m) => m,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Validation(_) => "validation",
            ErrorKind::NotFound(_) => "not found",
            ErrorKind::Transport(_) => "transport",
            ErrorKind::Server(_) => "server",
        }
    }
}

impl From<&ArgusError> for ErrorKind {
    fn from(err: &ArgusError) -> Self {
        match err {
            ArgusError::IssueNotFound(id) => ErrorKind::NotFound(format!("issue {id} not found")),
            ArgusError::Validation(msg) => ErrorKind::Validation(msg.clone()),
            ArgusError::Transport(msg) => ErrorKind::Transport(msg.clone()),
            ArgusError::Server(status, msg) => ErrorKind::Server(format!("{status}: {msg}")),
            other => ErrorKind::Transport(other.to_string()),
        }
    }
}

impl From<ErrorKind> for ArgusError {
    fn from(kind: ErrorKind) -> Self {
        ArgusError::Other(kind.to_string())
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {}", self.label(), self.message())
    }
}
