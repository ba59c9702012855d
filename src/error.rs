/// Error type for ebuild-util parsing and operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid dotted or revisioned version string.
    #[error("invalid version: {0}")]
    InvalidVersion(String),

    /// Invalid revision segment (expected `r<digits>`).
    #[error("invalid revision: {0}")]
    InvalidRevision(String),

    /// Path or filename that does not describe an ebuild.
    #[error("invalid ebuild path: {0}")]
    InvalidPath(String),

    /// Keyword entry that could not be parsed.
    #[error("invalid keyword: {0}")]
    InvalidKeyword(String),

    /// Stabilization requested on an ebuild that is not a 9999 ebuild.
    #[error("source for stabilizing must be unstable: {0}")]
    NotUnstable(String),

    /// The unstable keyword marker did not occur exactly once.
    #[error("unexpected keyword count in ebuild: {marker} found {count} times")]
    KeywordCount { marker: String, count: usize },

    /// A category is required for the requested operation.
    #[error("ebuild has no category: {0}")]
    MissingCategory(String),

    /// Error from the portage-atom parser.
    #[error("atom error: {0}")]
    Atom(String),

    /// Underlying filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}

/// Result type for ebuild-util operations.
pub type Result<T> = std::result::Result<T, Error>;
