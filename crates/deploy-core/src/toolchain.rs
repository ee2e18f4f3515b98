//! Host toolchain prerequisite validation
//!
//! A fixed, data-driven checklist is run through the [`Invoker`]; nothing in
//! here errors past its own boundary. Every failure is captured into the
//! report and the caller reads a single aggregate verdict.

use crate::console::Reporter;
use crate::exec::Invoker;

/// Whether a missing tool halts deployment or only warns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Blocking,
    Advisory,
}

/// One entry of the prerequisite checklist
#[derive(Debug, Clone, Copy)]
pub struct ToolCheck {
    /// Display name for user-facing messages
    pub name: &'static str,
    /// Shell command that probes the tool (usually a version query)
    pub command: &'static str,
    pub severity: Severity,
    /// Minimum `(major, minor)` version, checked tolerantly when present
    pub min_version: Option<(u64, u64)>,
    /// Token that should appear in the command output; absence only warns
    pub expect_in_output: Option<&'static str>,
    /// Shown when the tool is missing
    pub install_hint: Option<&'static str>,
}

/// Outcome of a single check
#[derive(Debug, Clone)]
pub struct ToolCheckResult {
    pub name: &'static str,
    pub found: bool,
    pub version: Option<String>,
    pub severity: Severity,
    /// Found and meeting the minimum version, if one applies
    pub passed: bool,
}

/// Aggregated validation results, discarded once the verdict is read
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub results: Vec<ToolCheckResult>,
}

impl ValidationReport {
    /// True only if every blocking check passed
    pub fn passed(&self) -> bool {
        self.results
            .iter()
            .filter(|r| r.severity == Severity::Blocking)
            .all(|r| r.passed)
    }
}

/// Run the checklist sequentially, reporting each result as it lands
pub async fn validate(
    invoker: &Invoker,
    reporter: &Reporter,
    checks: &[ToolCheck],
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for check in checks {
        let result = run_check(invoker, reporter, check).await;
        report.results.push(result);
    }

    report
}

async fn run_check(invoker: &Invoker, reporter: &Reporter, check: &ToolCheck) -> ToolCheckResult {
    let output = match invoker.capture_unchecked(check.command).await {
        Ok(output) if output.success() => output,
        _ => {
            match check.severity {
                Severity::Blocking => reporter.error(&format!("{} not found", check.name)),
                Severity::Advisory => reporter.warning(&format!("{} not installed", check.name)),
            }
            if let Some(hint) = check.install_hint {
                reporter.info(&format!("Install: {}", hint));
            }
            return ToolCheckResult {
                name: check.name,
                found: false,
                version: None,
                severity: check.severity,
                passed: false,
            };
        }
    };
    let first_line = output.stdout.lines().next().unwrap_or("").trim().to_string();
    let version = extract_version(&output.stdout);

    // Version parsing fails open: an unparseable version string is reported
    // as unknown, never as a validator failure.
    let mut passed = true;
    if let (Some(min), Some(v)) = (check.min_version, version.as_deref()) {
        if !version_at_least(v, min) {
            reporter.error(&format!(
                "{} {}.{}+ required (found {})",
                check.name, min.0, min.1, v
            ));
            passed = false;
        }
    }

    if passed {
        if first_line.is_empty() {
            reporter.success(&format!("{} found", check.name));
        } else {
            reporter.success(&format!("{} found: {}", check.name, first_line));
        }
    }

    if let Some(token) = check.expect_in_output {
        // Some tools list to stderr, so search both streams.
        let combined = format!("{}\n{}", output.stdout, output.stderr).to_lowercase();
        if !combined.contains(&token.to_lowercase()) {
            reporter.warning(&format!("{}: no {} detected", check.name, token));
            if let Some(hint) = check.install_hint {
                reporter.info(&format!("Install: {}", hint));
            }
        }
    }

    ToolCheckResult {
        name: check.name,
        found: true,
        version,
        severity: check.severity,
        passed,
    }
}

/// Extract the first dotted-numeric token (e.g. `3.11.2` out of
/// `Python 3.11.2`). Returns `None` when no such token exists.
pub fn extract_version(text: &str) -> Option<String> {
    for raw in text.split_whitespace() {
        let token = raw.trim_start_matches('v');
        let token = token.trim_matches(|c: char| !c.is_ascii_digit());
        if token.contains('.')
            && !token.is_empty()
            && token.chars().all(|c| c.is_ascii_digit() || c == '.')
        {
            return Some(token.to_string());
        }
    }
    None
}

/// Tolerant `major.minor` comparison; unparseable components fail open
fn version_at_least(version: &str, min: (u64, u64)) -> bool {
    let mut parts = version.split('.');
    let major: Option<u64> = parts.next().and_then(|p| p.parse().ok());
    let minor: u64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

    match major {
        Some(major) => (major, minor) >= min,
        None => true,
    }
}
