//! Isolated Python environment provisioning
//!
//! Both steps are independently fail-soft: a failure is reported and the
//! deployment continues, since a scaffolded project without a working venv
//! is still useful.

use crate::console::Reporter;
use crate::exec::Invoker;
use std::path::Path;

const VENV_DIR: &str = "venv";
const REQUIREMENTS: &str = "requirements.txt";

/// Create the venv (idempotent) and install dependencies into it.
/// Returns false when either step failed; never errors.
pub async fn provision(invoker: &Invoker, reporter: &Reporter, project_dir: &Path) -> bool {
    if !create(invoker, reporter, project_dir).await {
        return false;
    }
    install_dependencies(invoker, reporter, project_dir).await
}

/// Create the virtual environment; a no-op with a warning when one exists
pub async fn create(invoker: &Invoker, reporter: &Reporter, project_dir: &Path) -> bool {
    let venv_path = project_dir.join(VENV_DIR);

    if venv_path.exists() {
        reporter.warning("Virtual environment already exists");
        return true;
    }

    reporter.info("Creating virtual environment...");
    let command = format!("python3 -m venv \"{}\"", venv_path.display());
    match invoker.run(&command).await {
        Ok(_) => {
            reporter.success("Virtual environment created");
            true
        }
        Err(e) => {
            reporter.error(&format!("Virtual environment creation failed: {}", e));
            false
        }
    }
}

/// Install the dependency manifest into the venv
pub async fn install_dependencies(
    invoker: &Invoker,
    reporter: &Reporter,
    project_dir: &Path,
) -> bool {
    let venv_path = project_dir.join(VENV_DIR);
    let requirements = project_dir.join(REQUIREMENTS);

    if !venv_path.exists() {
        reporter.error("Virtual environment not found");
        return false;
    }
    if !requirements.exists() {
        reporter.error("requirements.txt not found");
        return false;
    }

    reporter.info("Installing dependencies...");
    let command = format!(
        "\"{}\" install -r \"{}\"",
        venv_path.join("bin/pip").display(),
        requirements.display()
    );
    match invoker.run(&command).await {
        Ok(_) => {
            reporter.success("Dependencies installed");
            true
        }
        Err(e) => {
            reporter.error(&format!("Dependency installation failed: {}", e));
            false
        }
    }
}
