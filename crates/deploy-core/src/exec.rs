//! External command invocation
//!
//! The sole I/O boundary to the native toolchain (xcodebuild, xcrun, appium,
//! PlistBuddy, python3). Commands are full shell lines run through `sh -c`;
//! callers consume only the exit code and captured text. Invocations block
//! until the subprocess exits and are never retried here.

use crate::console::Reporter;
use crate::error::{DeployError, Result};
use std::process::Stdio;
use tokio::process::Command;

/// Structured result of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit code, -1 when terminated by signal
    pub code: i32,
    /// Captured standard output, empty unless capture was requested
    pub stdout: String,
    /// Captured standard error, empty unless capture was requested
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs external commands on behalf of the pipeline
#[derive(Debug, Clone, Copy)]
pub struct Invoker {
    reporter: Reporter,
}

impl Invoker {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    /// Run a command with inherited stdio, failing fast on non-zero exit
    pub async fn run(&self, command: &str) -> Result<CommandOutput> {
        let output = self.spawn(command, false).await?;
        self.check(command, output)
    }

    /// Run a command capturing its output, failing fast on non-zero exit
    pub async fn capture(&self, command: &str) -> Result<CommandOutput> {
        let output = self.spawn(command, true).await?;
        self.check(command, output)
    }

    /// Run a command capturing its output, returning the result regardless
    /// of exit status (the caller interprets the code)
    pub async fn capture_unchecked(&self, command: &str) -> Result<CommandOutput> {
        self.spawn(command, true).await
    }

    async fn spawn(&self, command: &str, capture: bool) -> Result<CommandOutput> {
        self.reporter.detail(&format!("Running: {}", command));

        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);

        if capture {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
            let out = cmd.output().await?;
            Ok(CommandOutput {
                code: out.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            })
        } else {
            let status = cmd.status().await?;
            Ok(CommandOutput {
                code: status.code().unwrap_or(-1),
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }

    fn check(&self, command: &str, output: CommandOutput) -> Result<CommandOutput> {
        if output.success() {
            Ok(output)
        } else {
            Err(DeployError::ToolInvocation {
                command: command.to_string(),
                code: output.code,
                output: format!("{}{}", output.stdout, output.stderr),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoker() -> Invoker {
        Invoker::new(Reporter::new(false))
    }

    #[tokio::test]
    async fn test_capture_collects_stdout() {
        let out = invoker().capture("echo hello").await.unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_capture_fails_fast_on_nonzero_exit() {
        let err = invoker().capture("exit 3").await.unwrap_err();
        match err {
            DeployError::ToolInvocation { code, .. } => assert_eq!(code, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_capture_unchecked_returns_failure_result() {
        let out = invoker().capture_unchecked("echo oops >&2; exit 1").await.unwrap();
        assert!(!out.success());
        assert_eq!(out.stderr.trim(), "oops");
    }
}
