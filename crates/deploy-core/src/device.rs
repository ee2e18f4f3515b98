//! Simulator inventory queries
//!
//! Wraps `xcrun simctl list devices available -j`. The query returns an
//! explicit `Option` so the pipeline decides the fallback descriptor itself
//! instead of relying on an implicit default.

use crate::exec::Invoker;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Device-inventory query command
const SIMCTL_LIST: &str = "xcrun simctl list devices available -j";

/// A concrete simulator/device the generated config can target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub name: String,
    pub platform_version: String,
    pub udid: String,
}

/// Hardcoded descriptor used when inventory querying fails
pub fn fallback_device() -> DeviceDescriptor {
    DeviceDescriptor {
        name: "iPhone 15".to_string(),
        platform_version: "17.0".to_string(),
        udid: "auto".to_string(),
    }
}

// `simctl -j` shape: { "devices": { "<runtime id>": [ { name, udid, .. } ] } }.
// BTreeMap keeps runtime iteration order stable across runs.
#[derive(Debug, Deserialize)]
struct SimctlInventory {
    devices: BTreeMap<String, Vec<SimctlDevice>>,
}

#[derive(Debug, Deserialize)]
struct SimctlDevice {
    name: String,
    udid: String,
}

/// Query the first available iPhone simulator; `None` when the inventory
/// tool fails or lists no matching device.
pub async fn first_available_iphone(invoker: &Invoker) -> Option<DeviceDescriptor> {
    let output = invoker.capture_unchecked(SIMCTL_LIST).await.ok()?;
    if !output.success() {
        return None;
    }
    parse_inventory(&output.stdout)
}

fn parse_inventory(json: &str) -> Option<DeviceDescriptor> {
    let inventory: SimctlInventory = serde_json::from_str(json).ok()?;

    for (runtime, devices) in &inventory.devices {
        if !runtime.contains("iOS") {
            continue;
        }
        for device in devices {
            if device.name.contains("iPhone") {
                return Some(DeviceDescriptor {
                    name: device.name.clone(),
                    platform_version: runtime_version(runtime),
                    udid: device.udid.clone(),
                });
            }
        }
    }

    None
}

/// Extract `17.0` from `com.apple.CoreSimulator.SimRuntime.iOS-17-0`
fn runtime_version(runtime: &str) -> String {
    let last = runtime.rsplit('.').next().unwrap_or(runtime);
    last.trim_start_matches("iOS-").replace('-', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "devices": {
            "com.apple.CoreSimulator.SimRuntime.iOS-17-0": [
                { "name": "iPad Air", "udid": "AAAA", "state": "Shutdown", "isAvailable": true },
                { "name": "iPhone 15 Pro", "udid": "BBBB", "state": "Shutdown", "isAvailable": true }
            ],
            "com.apple.CoreSimulator.SimRuntime.watchOS-10-0": [
                { "name": "Apple Watch", "udid": "CCCC", "state": "Shutdown", "isAvailable": true }
            ]
        }
    }"#;

    #[test]
    fn test_parse_inventory_picks_first_iphone() {
        let device = parse_inventory(SAMPLE).unwrap();
        assert_eq!(device.name, "iPhone 15 Pro");
        assert_eq!(device.platform_version, "17.0");
        assert_eq!(device.udid, "BBBB");
    }

    #[test]
    fn test_parse_inventory_skips_non_ios_runtimes() {
        let json = r#"{ "devices": { "com.apple.CoreSimulator.SimRuntime.watchOS-10-0": [
            { "name": "Apple Watch", "udid": "CCCC" } ] } }"#;
        assert_eq!(parse_inventory(json), None);
    }

    #[test]
    fn test_parse_inventory_rejects_malformed_json() {
        assert_eq!(parse_inventory("not json"), None);
    }

    #[test]
    fn test_runtime_version_extraction() {
        assert_eq!(runtime_version("com.apple.CoreSimulator.SimRuntime.iOS-17-0"), "17.0");
        assert_eq!(runtime_version("com.apple.CoreSimulator.SimRuntime.iOS-16-4"), "16.4");
    }

    #[tokio::test]
    async fn test_query_none_when_tool_missing() {
        use crate::console::Reporter;
        // Only meaningful on machines without xcrun installed
        let invoker = Invoker::new(Reporter::new(false));
        if which_xcrun_missing() {
            assert_eq!(first_available_iphone(&invoker).await, None);
        }
    }

    fn which_xcrun_missing() -> bool {
        std::process::Command::new("sh")
            .args(["-c", "command -v xcrun"])
            .output()
            .map(|o| !o.status.success())
            .unwrap_or(true)
    }
}
