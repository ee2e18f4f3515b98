//! iOS build driver
//!
//! Wraps xcodebuild and PlistBuddy: locates the project file, builds the app
//! for the simulator SDK, finds the produced `.app` bundle and reads its
//! bundle identifier. Ambiguous matches are resolved deterministically by
//! sorting candidates on their path string and taking the first.

use crate::console::Reporter;
use crate::error::{DeployError, Result};
use crate::exec::Invoker;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const PROJECT_EXTENSION: &str = "xcodeproj";
const ARTIFACT_EXTENSION: &str = "app";
/// Directory xcodebuild emits simulator builds into
const ARTIFACT_PARENT: &str = "Debug-iphonesimulator";

/// All `*.xcodeproj` entries directly under the app path, sorted by path
pub fn project_file_candidates(app_path: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(app_path)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == PROJECT_EXTENSION))
        .collect();
    candidates.sort();
    candidates
}

/// Locate the project definition file, warning on ambiguity; `None` when
/// the app path contains no project at all
pub fn first_project_file(app_path: &Path, reporter: &Reporter) -> Option<PathBuf> {
    let mut candidates = project_file_candidates(app_path).into_iter();
    let first = candidates.next()?;

    if candidates.next().is_some() {
        reporter.warning(&format!(
            "Multiple .xcodeproj files found, using: {}",
            first.file_name().unwrap_or_default().to_string_lossy()
        ));
    }
    Some(first)
}

/// Renders the build command line for a project/scheme/build directory;
/// substitutable in tests so the pipeline can run without Xcode
pub type BuildCommand = fn(&Path, &str, &Path) -> String;

/// The real simulator build invocation
pub fn xcodebuild_command(project: &Path, scheme: &str, build_dir: &Path) -> String {
    format!(
        "xcodebuild -project \"{}\" -scheme \"{}\" -sdk iphonesimulator \
         -configuration Debug -derivedDataPath \"{}\" build",
        project.display(),
        scheme,
        build_dir.display()
    )
}

/// Build the app for the simulator and return the produced `.app` bundle
pub async fn build_app(
    invoker: &Invoker,
    reporter: &Reporter,
    app_path: &Path,
    project: &Path,
    build_command: BuildCommand,
) -> Result<PathBuf> {
    reporter.info(&format!(
        "Found project: {}",
        project.file_name().unwrap_or_default().to_string_lossy()
    ));

    // Scheme name is assumed to match the project file stem; xcodebuild
    // rejects the build if the assumption does not hold.
    let scheme = project
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let build_dir = app_path.join("build");
    let command = build_command(project, &scheme, &build_dir);

    reporter.info(&format!("Building {} for simulator...", scheme));
    reporter.info("This may take a few minutes...");

    match invoker.capture(&command).await {
        Ok(_) => reporter.success("Build completed successfully"),
        Err(DeployError::ToolInvocation { code, output, .. }) => {
            return Err(DeployError::BuildFailed { code, output });
        }
        Err(other) => return Err(other),
    }

    let artifact = locate_artifact(&build_dir, reporter)?;
    reporter.success(&format!(
        "App bundle found: {}",
        artifact.file_name().unwrap_or_default().to_string_lossy()
    ));
    Ok(artifact)
}

/// All `.app` bundles under `root` in `Debug-iphonesimulator` output
/// directories, sorted by path
pub fn artifact_candidates(root: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == ARTIFACT_EXTENSION)
                && path
                    .parent()
                    .and_then(|p| p.file_name())
                    .is_some_and(|name| name == ARTIFACT_PARENT)
        })
        .collect();
    candidates.sort();
    candidates
}

/// Find the built artifact under the build output directory
pub fn locate_artifact(build_dir: &Path, reporter: &Reporter) -> Result<PathBuf> {
    let candidates = artifact_candidates(build_dir);

    match candidates.len() {
        0 => Err(DeployError::ArtifactNotFound(build_dir.to_path_buf())),
        1 => Ok(candidates.into_iter().next().expect("len checked")),
        _ => {
            let first = candidates.into_iter().next().expect("len checked");
            reporter.warning(&format!(
                "Multiple .app bundles found, using: {}",
                first.display()
            ));
            Ok(first)
        }
    }
}

/// Search for a pre-existing artifact anywhere under the app path; used by
/// skip-build mode where "not found" is tolerated.
pub fn existing_artifact(app_path: &Path) -> Option<PathBuf> {
    artifact_candidates(app_path).into_iter().next()
}

/// Read the bundle identifier out of the artifact's Info.plist. Best effort:
/// a missing manifest or a failing tool yields `None` and a warning.
pub async fn extract_bundle_id(
    invoker: &Invoker,
    reporter: &Reporter,
    artifact: &Path,
) -> Option<String> {
    let info_plist = artifact.join("Info.plist");

    if !info_plist.exists() {
        reporter.warning("Info.plist not found");
        return None;
    }

    let command = format!(
        "/usr/libexec/PlistBuddy -c \"Print :CFBundleIdentifier\" \"{}\"",
        info_plist.display()
    );

    match invoker.capture_unchecked(&command).await {
        Ok(output) if output.success() => {
            let bundle_id = output.stdout.trim().to_string();
            reporter.success(&format!("Bundle ID: {}", bundle_id));
            Some(bundle_id)
        }
        _ => {
            reporter.warning("Failed to extract bundle ID");
            None
        }
    }
}
