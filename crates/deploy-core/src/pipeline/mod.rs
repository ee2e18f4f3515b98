//! Deployment orchestration
//!
//! One `PlatformDeployer` per target platform; the iOS deployer implements
//! the full pipeline, the Android deployer is a not-yet-available stub that
//! reports a structured unsupported outcome instead of partially executing.

pub mod android;
pub mod ios;

use crate::console::Reporter;
use crate::error::Result;
use crate::request::{DeployOutcome, DeploymentRequest, Platform};
use std::path::PathBuf;

pub use android::AndroidDeployment;
pub use ios::IosDeployment;

/// How the pipeline resolves the overwrite confirmation when the
/// destination already exists. The CLI always prompts; `Always`/`Never`
/// exist for non-interactive embedders and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    #[default]
    Prompt,
    Always,
    Never,
}

/// A single-platform deployment workflow
#[allow(async_fn_in_trait)]
pub trait PlatformDeployer {
    fn platform(&self) -> Platform;

    /// Run the full pipeline for one request. `Err` is a fatal abort;
    /// `Ok(Cancelled)` and `Ok(Unsupported)` are clean non-error halts.
    async fn deploy(&self, request: &DeploymentRequest) -> Result<DeployOutcome>;
}

/// Run one platform deployment, folding every non-completed outcome into a
/// boolean for the multi-platform sequence
async fn run_platform<D: PlatformDeployer>(
    deployer: &D,
    request: &DeploymentRequest,
    reporter: &Reporter,
) -> bool {
    let platform = deployer.platform();
    match deployer.deploy(request).await {
        Ok(DeployOutcome::Completed { .. }) => true,
        Ok(DeployOutcome::Cancelled) => {
            reporter.warning(&format!("{} deployment cancelled", platform));
            false
        }
        Ok(DeployOutcome::Unsupported { .. }) => false,
        Err(e) => {
            reporter.error(&format!("{} deployment failed: {}", platform, e));
            false
        }
    }
}

/// Deploy automation for both platforms, one after another in the same
/// thread. An iOS failure marks the run failed but does not prevent the
/// Android attempt; Android being unsupported does not fail the overall run.
pub async fn deploy_both(
    reporter: Reporter,
    template_root: PathBuf,
    ios: Option<DeploymentRequest>,
    android: Option<DeploymentRequest>,
) -> bool {
    reporter.header("Multi-Platform Deployment");

    let mut success = true;

    if let Some(request) = ios {
        reporter.info("Deploying iOS automation...");
        let deployer = IosDeployment::new(reporter, template_root.clone());
        if !run_platform(&deployer, &request, &reporter).await {
            reporter.warning("iOS deployment failed");
            success = false;
        }
    }

    if let Some(request) = android {
        reporter.info("Deploying Android automation...");
        let deployer = AndroidDeployment::new(reporter);
        if !run_platform(&deployer, &request, &reporter).await {
            // Android is a stub; its absence never fails the overall run
            reporter.warning("Android deployment not yet available");
        }
    }

    success
}
