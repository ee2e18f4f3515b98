//! Deploy Core - library for scaffolding mobile test-automation projects
//!
//! Turns a path to an app project into a runnable Appium automation project:
//! validates the host toolchain, builds the app, extracts runtime metadata,
//! materializes a parameterized skeleton from templates, and provisions an
//! isolated Python environment.
//!
//! # Architecture
//!
//! Leaves first:
//!
//! - **Pure components** - template resolution/substitution (`templates`),
//!   tree materialization (`scaffold`), request/context types (`request`)
//! - **Toolchain boundary** - external command invocation (`exec`),
//!   prerequisite validation (`toolchain`), build driver (`xcodebuild`),
//!   device inventory (`device`), environment provisioning (`venv`)
//! - **Orchestration** - per-platform deployment pipelines (`pipeline`)
//!
//! Execution is fully sequential: one deployment per process, every external
//! tool blocking until exit, no timeouts and no retries. Filesystem mutation
//! is non-transactional; the pipeline confirms with the user before touching
//! an existing destination.

pub mod console;
pub mod device;
pub mod error;
pub mod exec;
pub mod pipeline;
pub mod request;
pub mod scaffold;
pub mod templates;
pub mod toolchain;
pub mod venv;
pub mod xcodebuild;

// Re-export main types for convenience
pub use console::Reporter;
pub use error::{DeployError, Result};
pub use pipeline::{
    deploy_both, AndroidDeployment, IosDeployment, OverwritePolicy, PlatformDeployer,
};
pub use request::{DeployOutcome, DeploymentRequest, Platform};
pub use templates::{template_root, TemplateResolver, TEMPLATE_ROOT_ENV};
