use snafu::Snafu;

/// Recoverable failures of tree operations. Paths are always reported as
/// the caller wrote them, never as the segment that failed.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(super)))]
pub enum FilesystemError {
    #[snafu(display("{path}: No such file or directory"))]
    NotFound { path: String },
    #[snafu(display("{path}: Directory not empty"))]
    NotEmpty { path: String },
    #[snafu(display("{path}: Not a directory"))]
    NotADirectory { path: String },
    #[snafu(display("{path}: Is a directory"))]
    NotAFile { path: String },
    #[snafu(display("{path}: Invalid name"))]
    InvalidName { path: String },
    #[snafu(display("invalid mode: {mode}"))]
    InvalidMode { mode: String },
}
