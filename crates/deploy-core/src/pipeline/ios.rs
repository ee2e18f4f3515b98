//! iOS deployment pipeline
//!
//! Fixed sequential workflow, no branching back:
//! validate, resolve app name, build (or locate an existing artifact),
//! extract metadata, resolve the destination, confirm overwrite, materialize
//! the skeleton and templates, write the README, provision the environment,
//! report next steps. Steps after the overwrite confirmation are destructive
//! and are not rolled back on failure.

use crate::console::Reporter;
use crate::device::{self, DeviceDescriptor};
use crate::error::{DeployError, Result};
use crate::exec::Invoker;
use crate::pipeline::{OverwritePolicy, PlatformDeployer};
use crate::request::{
    detect_app_name, DeployOutcome, DeploymentContext, DeploymentRequest, Platform,
};
use crate::scaffold::{self, IOS_TEMPLATES};
use crate::templates::{copy_template, ParameterSet, TemplateResolver};
use crate::toolchain::{self, Severity, ToolCheck};
use crate::venv;
use crate::xcodebuild;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Fixed iOS prerequisite checklist
const IOS_PREREQUISITES: &[ToolCheck] = &[
    ToolCheck {
        name: "Python 3",
        command: "python3 --version",
        severity: Severity::Blocking,
        min_version: Some((3, 8)),
        expect_in_output: None,
        install_hint: None,
    },
    ToolCheck {
        name: "Xcode",
        command: "xcodebuild -version",
        severity: Severity::Blocking,
        min_version: None,
        expect_in_output: None,
        install_hint: None,
    },
    ToolCheck {
        name: "iOS Simulators",
        command: "xcrun simctl list devices available",
        severity: Severity::Blocking,
        min_version: None,
        expect_in_output: Some("iPhone"),
        install_hint: None,
    },
    ToolCheck {
        name: "Appium",
        command: "appium --version",
        severity: Severity::Advisory,
        min_version: None,
        expect_in_output: None,
        install_hint: Some("npm install -g appium"),
    },
    ToolCheck {
        name: "XCUITest driver",
        command: "appium driver list",
        severity: Severity::Advisory,
        min_version: None,
        expect_in_output: Some("xcuitest"),
        install_hint: Some("appium driver install xcuitest"),
    },
];

/// Orchestrates iOS automation project deployment
pub struct IosDeployment {
    reporter: Reporter,
    invoker: Invoker,
    template_root: PathBuf,
    checks: &'static [ToolCheck],
    build_command: xcodebuild::BuildCommand,
    overwrite: OverwritePolicy,
}

impl IosDeployment {
    pub fn new(reporter: Reporter, template_root: PathBuf) -> Self {
        Self {
            reporter,
            invoker: Invoker::new(reporter),
            template_root,
            checks: IOS_PREREQUISITES,
            build_command: xcodebuild::xcodebuild_command,
            overwrite: OverwritePolicy::Prompt,
        }
    }

    /// Replace the overwrite confirmation policy (non-interactive use)
    pub fn with_overwrite_policy(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    /// Replace the prerequisite checklist (tests)
    #[cfg(test)]
    fn with_checks(mut self, checks: &'static [ToolCheck]) -> Self {
        self.checks = checks;
        self
    }

    /// Replace the build command line (tests)
    #[cfg(test)]
    fn with_build_command(mut self, build_command: xcodebuild::BuildCommand) -> Self {
        self.build_command = build_command;
        self
    }

    async fn run(&self, request: &DeploymentRequest) -> Result<DeployOutcome> {
        let app_path = request
            .app_path
            .canonicalize()
            .map_err(|_| DeployError::AppPathMissing(request.app_path.clone()))?;

        // Hard gate: nothing on disk is touched before validation passes
        self.reporter.header("Validating iOS Prerequisites");
        let report = toolchain::validate(&self.invoker, &self.reporter, self.checks).await;
        if !report.passed() {
            return Err(DeployError::PrerequisitesNotMet);
        }

        let project_file = xcodebuild::first_project_file(&app_path, &self.reporter);
        let app_name = request
            .app_name
            .clone()
            .unwrap_or_else(|| detect_app_name(&app_path, project_file.as_deref()));
        self.reporter.info(&format!("App name: {}", app_name));

        let artifact = self
            .resolve_artifact(request, &app_path, project_file.as_deref())
            .await?;

        let bundle_id = match &artifact {
            Some(artifact) => {
                xcodebuild::extract_bundle_id(&self.invoker, &self.reporter, artifact).await
            }
            None => None,
        };

        let context = DeploymentContext {
            project_dir: request.project_dir(&app_path, &app_name),
            app_name,
            artifact,
            bundle_id,
        };

        if !self.confirm_overwrite(&context.project_dir)? {
            self.reporter.info("Deployment cancelled");
            return Ok(DeployOutcome::Cancelled);
        }
        self.reporter.info(&format!(
            "Creating automation project at: {}",
            context.project_dir.display()
        ));

        self.materialize(&context).await?;

        if request.skip_env {
            self.reporter.info("Skipping environment setup");
        } else {
            venv::provision(&self.invoker, &self.reporter, &context.project_dir).await;
        }

        self.print_next_steps(&context.project_dir);
        Ok(DeployOutcome::Completed {
            project_dir: context.project_dir,
        })
    }

    /// Build the app, or search for a pre-existing artifact when the build
    /// is skipped (tolerating "not found" as a degraded continuation)
    async fn resolve_artifact(
        &self,
        request: &DeploymentRequest,
        app_path: &Path,
        project_file: Option<&Path>,
    ) -> Result<Option<PathBuf>> {
        if request.skip_build {
            self.reporter
                .info("Skipping build - looking for existing .app...");
            match xcodebuild::existing_artifact(app_path) {
                Some(artifact) => {
                    self.reporter
                        .success(&format!("Found existing app: {}", artifact.display()));
                    Ok(Some(artifact))
                }
                None => {
                    self.reporter.warning("No existing .app found");
                    Ok(None)
                }
            }
        } else {
            let project = project_file.ok_or_else(|| DeployError::ProjectNotFound {
                pattern: "*.xcodeproj",
                path: app_path.to_path_buf(),
            })?;
            self.reporter.header("Building iOS Application");
            let artifact = xcodebuild::build_app(
                &self.invoker,
                &self.reporter,
                app_path,
                project,
                self.build_command,
            )
            .await?;
            Ok(Some(artifact))
        }
    }

    /// Explicit affirmative confirmation before touching an existing
    /// destination; declining is a clean abort, not an error
    fn confirm_overwrite(&self, project_dir: &Path) -> Result<bool> {
        if !project_dir.exists() {
            return Ok(true);
        }
        self.reporter
            .warning(&format!("Project already exists: {}", project_dir.display()));
        match self.overwrite {
            OverwritePolicy::Always => Ok(true),
            OverwritePolicy::Never => Ok(false),
            OverwritePolicy::Prompt => {
                let confirmed = cliclack::confirm("Overwrite?")
                    .initial_value(false)
                    .interact()?;
                Ok(confirmed)
            }
        }
    }

    /// Materialize the skeleton, render the templates, write the README
    async fn materialize(&self, context: &DeploymentContext) -> Result<()> {
        self.reporter.header("Creating Project Structure");
        scaffold::materialize(&context.project_dir, &scaffold::project_layout())?;
        self.reporter.success("Project structure created");

        self.reporter.header("Copying Templates");
        let device = match device::first_available_iphone(&self.invoker).await {
            Some(device) => device,
            None => {
                self.reporter
                    .warning("Simulator inventory unavailable, using default device");
                device::fallback_device()
            }
        };

        let params = parameter_set(context, &device);
        let resolver = TemplateResolver::new(&self.template_root, Platform::Ios);
        for spec in IOS_TEMPLATES {
            copy_template(
                &resolver,
                spec.name,
                &context.project_dir.join(spec.dest),
                &params,
                &self.reporter,
            )
            .await?;
        }
        self.reporter.success("Templates copied and configured");

        tokio::fs::write(
            context.project_dir.join("README.md"),
            scaffold::readme(&context.app_name),
        )
        .await?;
        self.reporter.success("Project README created");
        Ok(())
    }

    fn print_next_steps(&self, project_dir: &Path) {
        self.reporter.header("Deployment Complete!");

        println!("{}", "Automation project created at:".green());
        println!("  {}\n", project_dir.display().to_string().bold());

        println!("{}\n", "Next Steps:".bold());
        println!("1. Navigate to project:");
        println!("   cd {}\n", project_dir.display());
        println!("2. Activate virtual environment:");
        println!("   source venv/bin/activate\n");
        println!("3. Install/Start Appium (if not running):");
        println!("   npm install -g appium");
        println!("   appium driver install xcuitest");
        println!("   appium  # In separate terminal\n");
        println!("4. Update page object locators:");
        println!("   - Edit pages/ios/home_page.py");
        println!("   - Use Appium Inspector to find accessibility IDs\n");
        println!("5. Run smoke tests:");
        println!("   pytest tests/ios/ -m smoke -v\n");
        println!("6. Run all iOS tests:");
        println!("   pytest tests/ios/ -v\n");
        println!("{}", "Useful Commands:".bold());
        println!("   pytest tests/ios/ --html=reports/ios/report.html");
        println!("   pytest tests/ios/ -m smoke --tb=short");
        println!("   pytest tests/ios/test_smoke.py::test_app_launches -v\n");
        println!(
            "{}",
            "See README.md in project for full documentation".cyan()
        );
    }
}

/// Placeholder values for the primary workflow
fn parameter_set(context: &DeploymentContext, device: &DeviceDescriptor) -> ParameterSet {
    ParameterSet::from([
        ("app_name".to_string(), context.app_name.clone()),
        (
            "app_path".to_string(),
            context
                .artifact
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        ),
        (
            "bundle_id".to_string(),
            context.bundle_id.clone().unwrap_or_default(),
        ),
        ("ios_version".to_string(), device.platform_version.clone()),
        ("device_name".to_string(), device.name.clone()),
    ])
}

impl PlatformDeployer for IosDeployment {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    async fn deploy(&self, request: &DeploymentRequest) -> Result<DeployOutcome> {
        self.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PASSING_CHECKS: &[ToolCheck] = &[ToolCheck {
        name: "stub tool",
        command: "true",
        severity: Severity::Blocking,
        min_version: None,
        expect_in_output: None,
        install_hint: None,
    }];

    const FAILING_CHECKS: &[ToolCheck] = &[ToolCheck {
        name: "stub tool",
        command: "exit 1",
        severity: Severity::Blocking,
        min_version: None,
        expect_in_output: None,
        install_hint: None,
    }];

    struct Fixture {
        app: TempDir,
        output: TempDir,
        templates: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let fixture = Self {
                app: TempDir::new().unwrap(),
                output: TempDir::new().unwrap(),
                templates: TempDir::new().unwrap(),
            };
            fs::create_dir(fixture.app.path().join("Demo.xcodeproj")).unwrap();

            let common = fixture.templates.path().join("common");
            let ios = fixture.templates.path().join("ios");
            fs::create_dir_all(&common).unwrap();
            fs::create_dir_all(&ios).unwrap();
            for spec in IOS_TEMPLATES {
                let dir = if spec.dest.contains("ios") { &ios } else { &common };
                fs::write(dir.join(spec.name), "app={{app_name}} id={{bundle_id}}\n").unwrap();
            }
            fixture
        }

        fn request(&self) -> DeploymentRequest {
            DeploymentRequest {
                app_path: self.app.path().to_path_buf(),
                output_dir: Some(self.output.path().to_path_buf()),
                app_name: None,
                skip_build: true,
                skip_env: true,
            }
        }

        fn deployer(&self, checks: &'static [ToolCheck]) -> IosDeployment {
            IosDeployment::new(Reporter::new(false), self.templates.path().to_path_buf())
                .with_checks(checks)
        }
    }

    #[tokio::test]
    async fn test_validation_failure_aborts_before_any_write() {
        let fixture = Fixture::new();
        let err = fixture
            .deployer(FAILING_CHECKS)
            .deploy(&fixture.request())
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::PrerequisitesNotMet));
        assert!(!fixture.output.path().join("Demo-Automation").exists());
    }

    #[tokio::test]
    async fn test_missing_app_path_is_fatal() {
        let fixture = Fixture::new();
        let mut request = fixture.request();
        request.app_path = PathBuf::from("/nonexistent/app");

        let err = fixture
            .deployer(PASSING_CHECKS)
            .deploy(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::AppPathMissing(_)));
    }

    #[tokio::test]
    async fn test_skip_build_without_artifact_degrades_and_completes() {
        let fixture = Fixture::new();
        let outcome = fixture
            .deployer(PASSING_CHECKS)
            .deploy(&fixture.request())
            .await
            .unwrap();

        let project_dir = fixture.output.path().join("Demo-Automation");
        assert_eq!(
            outcome,
            DeployOutcome::Completed { project_dir: project_dir.clone() }
        );
        assert!(project_dir.join("tests/ios/__init__.py").exists());
        assert!(project_dir.join("README.md").exists());
        // Degraded run renders an empty bundle id
        let caps = fs::read_to_string(project_dir.join("config/ios/capabilities.json")).unwrap();
        assert!(caps.contains("app=Demo id=\n"));
    }

    #[tokio::test]
    async fn test_skip_build_picks_up_existing_artifact() {
        let fixture = Fixture::new();
        let artifact = fixture
            .app
            .path()
            .join("build/Build/Products/Debug-iphonesimulator/Demo.app");
        fs::create_dir_all(&artifact).unwrap();

        fixture
            .deployer(PASSING_CHECKS)
            .deploy(&fixture.request())
            .await
            .unwrap();

        let reqs = fs::read_to_string(
            fixture
                .output
                .path()
                .join("Demo-Automation/requirements.txt"),
        )
        .unwrap();
        assert!(reqs.contains("app=Demo"));
    }

    #[tokio::test]
    async fn test_declined_overwrite_is_clean_abort_and_touches_nothing() {
        let fixture = Fixture::new();
        let project_dir = fixture.output.path().join("Demo-Automation");
        fs::create_dir_all(&project_dir).unwrap();
        fs::write(project_dir.join("keep.txt"), "untouched").unwrap();

        let outcome = fixture
            .deployer(PASSING_CHECKS)
            .with_overwrite_policy(OverwritePolicy::Never)
            .deploy(&fixture.request())
            .await
            .unwrap();

        assert_eq!(outcome, DeployOutcome::Cancelled);
        assert!(!project_dir.join("README.md").exists());
        assert_eq!(
            fs::read_to_string(project_dir.join("keep.txt")).unwrap(),
            "untouched"
        );
    }

    #[tokio::test]
    async fn test_confirmed_overwrite_merges_into_existing_destination() {
        let fixture = Fixture::new();
        let project_dir = fixture.output.path().join("Demo-Automation");
        fs::create_dir_all(&project_dir).unwrap();
        fs::write(project_dir.join("notes.txt"), "mine").unwrap();

        fixture
            .deployer(PASSING_CHECKS)
            .with_overwrite_policy(OverwritePolicy::Always)
            .deploy(&fixture.request())
            .await
            .unwrap();

        // Stale files are preserved; new skeleton lands alongside them
        assert!(project_dir.join("notes.txt").exists());
        assert!(project_dir.join("pytest.ini").exists());
    }

    #[tokio::test]
    async fn test_build_path_runs_to_completion() {
        let fixture = Fixture::new();
        let mut request = fixture.request();
        request.skip_build = false;

        // Stands in for xcodebuild: emits the artifact where the real build
        // would and exits zero
        let outcome = fixture
            .deployer(PASSING_CHECKS)
            .with_build_command(|_, _, build_dir| {
                format!(
                    "mkdir -p \"{}/Build/Products/Debug-iphonesimulator/Demo.app\"",
                    build_dir.display()
                )
            })
            .deploy(&request)
            .await
            .unwrap();

        let project_dir = fixture.output.path().join("Demo-Automation");
        assert_eq!(
            outcome,
            DeployOutcome::Completed { project_dir: project_dir.clone() }
        );
        assert!(project_dir.join("README.md").exists());
        let caps = std::fs::read_to_string(project_dir.join("config/ios/capabilities.json")).unwrap();
        assert!(caps.contains("app=Demo"));
    }

    #[tokio::test]
    async fn test_failed_build_aborts_with_captured_output() {
        let fixture = Fixture::new();
        let mut request = fixture.request();
        request.skip_build = false;

        let err = fixture
            .deployer(PASSING_CHECKS)
            .with_build_command(|_, _, _| "echo no signing identity >&2; exit 65".to_string())
            .deploy(&request)
            .await
            .unwrap_err();

        match err {
            DeployError::BuildFailed { code, output } => {
                assert_eq!(code, 65);
                assert!(output.contains("no signing identity"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!fixture.output.path().join("Demo-Automation").exists());
    }

    #[tokio::test]
    async fn test_ambiguous_projects_under_skip_build_pick_sorted_first() {
        let fixture = Fixture::new();
        fs::create_dir(fixture.app.path().join("Alpha.xcodeproj")).unwrap();

        fixture
            .deployer(PASSING_CHECKS)
            .deploy(&fixture.request())
            .await
            .unwrap();

        assert!(fixture.output.path().join("Alpha-Automation").exists());
        assert!(!fixture.output.path().join("Demo-Automation").exists());
    }

    #[tokio::test]
    async fn test_app_name_override_wins_over_detection() {
        let fixture = Fixture::new();
        let mut request = fixture.request();
        request.app_name = Some("Renamed".to_string());

        fixture
            .deployer(PASSING_CHECKS)
            .deploy(&request)
            .await
            .unwrap();

        assert!(fixture.output.path().join("Renamed-Automation").exists());
    }
}
