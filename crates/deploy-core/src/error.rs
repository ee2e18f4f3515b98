//! Error types for deployment operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DeployError
pub type Result<T> = std::result::Result<T, DeployError>;

/// Main error type for deployment operations
///
/// The pipeline distinguishes three failure classes: fatal errors (these
/// variants, surfaced once and aborting the run), degraded continuations
/// (modeled as `Option` returns plus a warning at the call site) and
/// non-blocking provisioning failures (reported booleans, never errors).
#[derive(Debug, Error)]
pub enum DeployError {
    /// App path passed on the command line does not exist
    #[error("app path does not exist: {0}")]
    AppPathMissing(PathBuf),

    /// One or more blocking prerequisite checks failed
    #[error("prerequisites not met")]
    PrerequisitesNotMet,

    /// No template with the given name in any search directory
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// No project definition file found in the app path
    #[error("no {pattern} file found in {path}")]
    ProjectNotFound { pattern: &'static str, path: PathBuf },

    /// Native build tool exited non-zero
    #[error("build failed with exit code {code}")]
    BuildFailed { code: i32, output: String },

    /// Build completed but no artifact matched the expected pattern
    #[error("no build artifact found under {0}")]
    ArtifactNotFound(PathBuf),

    /// External command exited non-zero under fail-fast invocation
    #[error("command `{command}` exited with code {code}")]
    ToolInvocation {
        command: String,
        code: i32,
        output: String,
    },

    /// IO errors (filesystem mutation, interactive prompt)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
