use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WraithError>;

/// Errors raised by the builder, its accessors, and the provisioning step.
///
/// Validation and configuration errors are raised synchronously at the call
/// site, before any script text is emitted. The engine's exit status is
/// never mapped to an error; engine-side failures surface as ordinary
/// output lines.
#[derive(Debug, Error)]
pub enum WraithError {
    /// Invalid argument structure passed to a builder method
    #[error("{0}")]
    InvalidArgument(String),
    /// Requested engine option was never set
    #[error("option \"{0}\" not set")]
    OptionNotSet(String),
    /// Configured binary directory does not exist
    #[error("binary directory does not exist: {0}")]
    BinDirNotFound(PathBuf),
    /// No release archive is published for the detected platform
    #[error("no {tool} package is available for platform \"{platform}\"")]
    UnsupportedPlatform { tool: String, platform: String },
    /// Extracted archive did not contain the expected launcher
    #[error("launcher \"{launcher}\" not found under {dir}")]
    LauncherNotFound { launcher: String, dir: PathBuf },
    /// Filesystem failure (temp script file, vendor directory, symlink)
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Release download failure
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),
    /// Release archive could not be unpacked
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}
