use std::fmt;

/// Broad classification of a [`ZedError`], used by the CLI to pick exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced token or context does not exist
    NotFound,
    /// Resolution attempted without an explicit or active context
    NoContextSelected,
    /// A context points at a token that is no longer stored
    DanglingTokenReference,
    /// Trust roots or the TLS backend could not be set up
    TlsSetup,
    /// The durable store could not be read or written
    Persistence,
    /// User input rejected before touching any store
    InvalidArgument,
    /// The RPC itself failed (network, status, decoding)
    Rpc,
}

impl ErrorKind {
    /// Process exit code for this kind of failure
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Rpc => 1,
            ErrorKind::InvalidArgument => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::NoContextSelected => 4,
            ErrorKind::DanglingTokenReference => 5,
            ErrorKind::TlsSetup => 6,
            ErrorKind::Persistence => 7,
        }
    }
}

/// Custom error type for context, credential and RPC operations
#[derive(Debug)]
pub enum ZedError {
    /// A named token or context is missing (`what` is "token" or "context")
    NotFound { what: &'static str, name: String },
    /// No context given and none active
    NoContextSelected,
    /// Context exists but its token was removed
    DanglingTokenReference { context: String, token: String },
    /// Trust store / TLS backend failure
    TlsSetup(String),
    /// Store I/O failure (read, write, lock)
    Persistence(String),
    /// Store file exists but cannot be parsed
    CorruptStore { path: String, message: String },
    /// Rejected input
    InvalidArgument(String),
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// JSON encoding or decoding error
    Json(String),
}

impl ZedError {
    /// Shorthand for a missing token
    pub fn token_not_found(name: &str) -> Self {
        ZedError::NotFound {
            what: "token",
            name: name.to_string(),
        }
    }

    /// Shorthand for a missing context
    pub fn context_not_found(name: &str) -> Self {
        ZedError::NotFound {
            what: "context",
            name: name.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ZedError::NotFound { .. } => ErrorKind::NotFound,
            ZedError::NoContextSelected => ErrorKind::NoContextSelected,
            ZedError::DanglingTokenReference { .. } => ErrorKind::DanglingTokenReference,
            ZedError::TlsSetup(_) => ErrorKind::TlsSetup,
            ZedError::Persistence(_) | ZedError::CorruptStore { .. } => ErrorKind::Persistence,
            ZedError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ZedError::Http(_) | ZedError::Api { .. } | ZedError::Json(_) => ErrorKind::Rpc,
        }
    }
}

impl fmt::Display for ZedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZedError::NotFound { what, name } => write!(f, "{} '{}' not found", what, name),
            ZedError::NoContextSelected => write!(
                f,
                "No context selected. Select one with 'zed config use-context <name>' \
                 or specify one with --context <name>"
            ),
            ZedError::DanglingTokenReference { context, token } => write!(
                f,
                "Context '{}' references token '{}', which no longer exists. \
                 Re-create it with 'zed config set-token {} <secret>'",
                context, token, token
            ),
            ZedError::TlsSetup(msg) => write!(f, "TLS setup failed: {}", msg),
            ZedError::Persistence(msg) => write!(f, "{}", msg),
            ZedError::CorruptStore { path, message } => {
                write!(f, "Failed to parse config store {}: {}", path, message)
            }
            ZedError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ZedError::Http(e) => write!(f, "HTTP request failed: {}", e),
            ZedError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            ZedError::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for ZedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ZedError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ZedError {
    fn from(err: reqwest::Error) -> Self {
        ZedError::Http(err)
    }
}

impl From<serde_json::Error> for ZedError {
    fn from(err: serde_json::Error) -> Self {
        ZedError::Json(err.to_string())
    }
}

impl From<std::io::Error> for ZedError {
    fn from(err: std::io::Error) -> Self {
        ZedError::Persistence(err.to_string())
    }
}

/// Result type alias for zed operations
pub type Result<T> = std::result::Result<T, ZedError>;
