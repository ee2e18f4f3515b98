//! Android deployment stub
//!
//! Android support is not implemented yet. The deployer never partially
//! executes pipeline steps; it reports the roadmap and returns a structured
//! unsupported outcome so callers can branch uniformly across platforms.

use crate::console::Reporter;
use crate::error::Result;
use crate::pipeline::PlatformDeployer;
use crate::request::{DeployOutcome, DeploymentRequest, Platform};

pub struct AndroidDeployment {
    reporter: Reporter,
}

impl AndroidDeployment {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }
}

impl PlatformDeployer for AndroidDeployment {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    async fn deploy(&self, _request: &DeploymentRequest) -> Result<DeployOutcome> {
        self.reporter.header("Android Deployment (Coming Soon)");

        self.reporter.info("Android support is not yet implemented.");
        self.reporter
            .info("The framework architecture is ready for Android.");
        println!();

        self.reporter.info("Planned Android features:");
        for feature in [
            "UIAutomator2 driver integration",
            "Android emulator support",
            "Real device support",
            "APK building and installation",
            "Package name extraction",
            "Android page objects with UiSelector",
            "Same testing framework as iOS",
            "Cross-platform test support",
        ] {
            println!("  - {}", feature);
        }
        println!();

        self.reporter.warning("Use the `ios` command for iOS apps");

        Ok(DeployOutcome::Unsupported {
            platform: Platform::Android,
        })
    }
}
