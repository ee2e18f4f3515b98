//! appium-deploy - scaffold Appium test-automation projects for mobile apps

use clap::{ArgGroup, Parser, Subcommand};
use deploy_core::{
    template_root, AndroidDeployment, DeployError, DeployOutcome, DeploymentRequest,
    IosDeployment, PlatformDeployer, Reporter,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "appium-deploy")]
#[command(about = "Deploy self-contained Appium automation projects for mobile apps")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Deploy an iOS automation project
    Ios(DeployArgs),
    /// Deploy an Android automation project (coming soon)
    Android(DeployArgs),
    /// Deploy automation for both platforms
    Both(BothArgs),
}

#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Path to the app project directory
    #[arg(long = "app-path")]
    pub app_path: PathBuf,

    /// Directory where the automation project will be created (default: app parent)
    #[arg(long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Override the auto-detected app name
    #[arg(long = "app-name")]
    pub app_name: Option<String>,

    /// Skip building the app (use an existing artifact)
    #[arg(long = "skip-build")]
    pub skip_build: bool,

    /// Skip creating the virtual environment and installing dependencies
    #[arg(long = "skip-env")]
    pub skip_env: bool,

    /// Local directory to use as the template root
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl DeployArgs {
    fn request(&self) -> DeploymentRequest {
        DeploymentRequest {
            app_path: self.app_path.clone(),
            output_dir: self.output_dir.clone(),
            app_name: self.app_name.clone(),
            skip_build: self.skip_build,
            skip_env: self.skip_env,
        }
    }
}

#[derive(Parser, Debug)]
#[command(group(
    ArgGroup::new("paths").required(true).multiple(true).args(["ios_path", "android_path"])
))]
pub struct BothArgs {
    /// Path to the iOS app project
    #[arg(long = "ios-path")]
    pub ios_path: Option<PathBuf>,

    /// Path to the Android app project
    #[arg(long = "android-path")]
    pub android_path: Option<PathBuf>,

    /// Directory where the automation project will be created
    #[arg(long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// App name (must be the same for both platforms)
    #[arg(long = "app-name")]
    pub app_name: Option<String>,

    /// Skip building the apps
    #[arg(long = "skip-build")]
    pub skip_build: bool,

    /// Skip creating the virtual environment and installing dependencies
    #[arg(long = "skip-env")]
    pub skip_env: bool,

    /// Local directory to use as the template root
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl BothArgs {
    fn request(&self, app_path: &PathBuf) -> DeploymentRequest {
        DeploymentRequest {
            app_path: app_path.clone(),
            output_dir: self.output_dir.clone(),
            app_name: self.app_name.clone(),
            skip_build: self.skip_build,
            skip_env: self.skip_env,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let code = match args.command {
        Command::Ios(deploy_args) => {
            let reporter = Reporter::new(deploy_args.verbose);
            let root = template_root(deploy_args.template_dir.clone());
            let deployer = IosDeployment::new(reporter, root);
            run_platform(&deployer, &deploy_args.request(), &reporter).await
        }
        Command::Android(deploy_args) => {
            let reporter = Reporter::new(deploy_args.verbose);
            let deployer = AndroidDeployment::new(reporter);
            run_platform(&deployer, &deploy_args.request(), &reporter).await
        }
        Command::Both(both_args) => {
            let reporter = Reporter::new(both_args.verbose);
            let root = template_root(both_args.template_dir.clone());
            let ios = both_args.ios_path.clone().map(|p| both_args.request(&p));
            let android = both_args.android_path.clone().map(|p| both_args.request(&p));
            if deploy_core::deploy_both(reporter, root, ios, android).await {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    code
}

/// Run one platform deployment and fold its outcome into an exit code
async fn run_platform<D: PlatformDeployer>(
    deployer: &D,
    request: &DeploymentRequest,
    reporter: &Reporter,
) -> ExitCode {
    match deployer.deploy(request).await {
        Ok(DeployOutcome::Completed { .. }) => ExitCode::SUCCESS,
        // Clean aborts: already reported by the pipeline
        Ok(DeployOutcome::Cancelled) | Ok(DeployOutcome::Unsupported { .. }) => ExitCode::FAILURE,
        Err(e) => {
            if let DeployError::BuildFailed { output, .. }
            | DeployError::ToolInvocation { output, .. } = &e
            {
                eprint!("{}", output);
            }
            reporter.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
