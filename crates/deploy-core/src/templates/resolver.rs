//! Template lookup across ordered search directories

use crate::error::{DeployError, Result};
use crate::request::Platform;
use std::path::{Path, PathBuf};

/// Environment variable overriding the template root directory
pub const TEMPLATE_ROOT_ENV: &str = "APPIUM_DEPLOY_TEMPLATES";

/// Shared templates live here; platform directories are searched after it
const COMMON_DIR: &str = "common";

/// Resolve the template root: explicit flag, then environment override,
/// then a `templates/` directory next to the executable, then `./templates`.
pub fn template_root(override_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }
    if let Ok(dir) = std::env::var(TEMPLATE_ROOT_ENV) {
        return PathBuf::from(dir);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(sibling) = exe.parent().map(|d| d.join("templates")) {
            if sibling.exists() {
                return sibling;
            }
        }
    }
    PathBuf::from("templates")
}

/// Locates named templates by searching an ordered list of directories and
/// returning the first existing match. Pure lookup, no side effects.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    search_dirs: Vec<PathBuf>,
}

impl TemplateResolver {
    /// Standard search order: `<root>/common`, then the platform directory
    pub fn new(root: &Path, platform: Platform) -> Self {
        Self {
            search_dirs: vec![root.join(COMMON_DIR), root.join(platform.template_dir())],
        }
    }

    pub fn with_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// First existing `<dir>/<name>` across the search directories
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        for dir in &self.search_dirs {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
        Err(DeployError::TemplateNotFound(name.to_string()))
    }
}
