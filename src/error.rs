use thiserror::Error;

/// Failure reported by a demangling backend. Always recovered by the caller.
#[derive(Error, Debug)]
pub enum DemangleError {
    #[error("DEMANGLER_UNAVAILABLE: Could not run '{program}': {source}. Is it installed and in your PATH?")]
    Unavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("DEMANGLING_FAILED: Could not demangle '{symbol}': {reason}")]
    Failed { symbol: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("UNKNOWN_BACKEND: '{0}' is not a demangler backend (expected cxxfilt, itanium or auto).")]
    UnknownBackend(String),

    #[error("USAGE: {0}")]
    Usage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
