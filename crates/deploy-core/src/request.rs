//! Deployment request and pipeline state types

use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix appended to the app name to form the automation project directory
const PROJECT_SUFFIX: &str = "-Automation";

/// Target mobile platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
        }
    }

    /// Name of the platform-specific template search directory
    pub fn template_dir(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Immutable deployment input, built once from CLI arguments
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    /// Path to the app project source tree
    pub app_path: PathBuf,
    /// Directory to create the automation project in (default: app parent)
    pub output_dir: Option<PathBuf>,
    /// Override for the auto-detected app name
    pub app_name: Option<String>,
    /// Skip the native build, reusing an existing artifact if present
    pub skip_build: bool,
    /// Skip virtual environment creation and dependency installation
    pub skip_env: bool,
}

impl DeploymentRequest {
    /// Destination directory for the automation project:
    /// `<output_dir or app parent>/<app_name>-Automation`
    ///
    /// `app_path` is the resolved (canonicalized) app path, not the raw
    /// request field: a relative input like `.` has no usable parent until
    /// it is made absolute.
    pub fn project_dir(&self, app_path: &Path, app_name: &str) -> PathBuf {
        let parent = self
            .output_dir
            .clone()
            .unwrap_or_else(|| app_path.parent().unwrap_or(app_path).to_path_buf());
        parent.join(format!("{}{}", app_name, PROJECT_SUFFIX))
    }
}

/// Mutable state accumulated across pipeline steps
///
/// Owned exclusively by the running pipeline; each step reads prior fields
/// and sets its own, never overwriting an earlier step's value.
#[derive(Debug, Clone, Default)]
pub struct DeploymentContext {
    /// Resolved app name (override or detected from the project file)
    pub app_name: String,
    /// Built (or pre-existing) artifact path, empty when degraded
    pub artifact: Option<PathBuf>,
    /// Bundle identifier read from the artifact manifest, best effort
    pub bundle_id: Option<String>,
    /// Resolved destination project directory
    pub project_dir: PathBuf,
}

/// Terminal result of one platform deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Pipeline ran to completion
    Completed { project_dir: PathBuf },
    /// User declined to overwrite an existing destination; clean abort
    Cancelled,
    /// Platform deployer is not yet available; nothing was executed
    Unsupported { platform: Platform },
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeployOutcome::Completed { .. })
    }
}

/// Detect the app name from the project source tree: the project file stem
/// when one exists, otherwise the directory name.
pub fn detect_app_name(app_path: &Path, project_file: Option<&Path>) -> String {
    if let Some(stem) = project_file.and_then(|p| p.file_stem()) {
        return stem.to_string_lossy().into_owned();
    }
    app_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "App".to_string())
}
