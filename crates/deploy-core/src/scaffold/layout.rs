//! Fixed automation-project layout
//!
//! The skeleton tree, the template list, and the generated README are fixed
//! by the pipeline and not user-configurable.

use crate::scaffold::tree::{dir, TreeNode};

/// A template file and where its rendered output lands in the project
#[derive(Debug, Clone, Copy)]
pub struct TemplateSpec {
    /// Template file name looked up by the resolver
    pub name: &'static str,
    /// Destination path relative to the project root
    pub dest: &'static str,
}

/// Every file the iOS skeleton must contain, in materialization order
pub const IOS_TEMPLATES: &[TemplateSpec] = &[
    TemplateSpec { name: "requirements.txt.template", dest: "requirements.txt" },
    TemplateSpec { name: "pytest.ini.template", dest: "pytest.ini" },
    TemplateSpec { name: "gitignore.template", dest: ".gitignore" },
    TemplateSpec { name: "common.json.template", dest: "config/common.json" },
    TemplateSpec { name: "capabilities.json.template", dest: "config/ios/capabilities.json" },
    TemplateSpec { name: "conftest.py.template", dest: "tests/ios/conftest.py" },
    TemplateSpec { name: "base_page.py.template", dest: "pages/base_page.py" },
    TemplateSpec { name: "home_page.py.template", dest: "pages/ios/home_page.py" },
    TemplateSpec { name: "test_smoke.py.template", dest: "tests/ios/test_smoke.py" },
];

const INIT_PY: &str = "";

/// The fixed directory skeleton of a generated automation project
pub fn project_layout() -> TreeNode {
    dir([
        (
            "config",
            dir([
                ("ios", TreeNode::EmptyDir),
                ("android", dir([("README.md", TreeNode::file("Android support coming soon.\n"))])),
                ("__init__.py", TreeNode::file(INIT_PY)),
            ]),
        ),
        (
            "tests",
            dir([
                ("ios", dir([("__init__.py", TreeNode::file(INIT_PY))])),
                (
                    "android",
                    dir([
                        ("__init__.py", TreeNode::file(INIT_PY)),
                        ("README.md", TreeNode::file("Android tests will go here.\n")),
                    ]),
                ),
                (
                    "cross_platform",
                    dir([
                        ("__init__.py", TreeNode::file(INIT_PY)),
                        ("README.md", TreeNode::file("Cross-platform tests will go here.\n")),
                    ]),
                ),
                ("__init__.py", TreeNode::file(INIT_PY)),
            ]),
        ),
        (
            "pages",
            dir([
                ("ios", dir([("__init__.py", TreeNode::file(INIT_PY))])),
                (
                    "android",
                    dir([
                        ("__init__.py", TreeNode::file(INIT_PY)),
                        ("README.md", TreeNode::file("Android page objects will go here.\n")),
                    ]),
                ),
                ("__init__.py", TreeNode::file(INIT_PY)),
            ]),
        ),
        ("utils", dir([("__init__.py", TreeNode::file(INIT_PY))])),
        ("data", TreeNode::EmptyDir),
        (
            "reports",
            dir([("ios", TreeNode::EmptyDir), ("android", TreeNode::EmptyDir)]),
        ),
        (
            "screenshots",
            dir([("ios", TreeNode::EmptyDir), ("android", TreeNode::EmptyDir)]),
        ),
        ("logs", TreeNode::EmptyDir),
    ])
}

/// Render the project README for the generated automation suite
pub fn readme(app_name: &str) -> String {
    format!(
        r#"# {app_name}-Automation

iOS (and Android) automation testing for {app_name}.

## Quick Start

```bash
# Activate virtual environment
source venv/bin/activate

# Start Appium (in separate terminal)
appium

# Run iOS smoke tests
pytest tests/ios/ -m smoke -v

# Run all iOS tests
pytest tests/ios/ -v
```

## Project Structure

- `config/` - Configuration files (iOS/Android/common)
- `tests/` - Test suites organized by platform
- `pages/` - Page Object Model classes
- `utils/` - Utility functions and helpers
- `data/` - Test data files
- `reports/` - Test execution reports
- `screenshots/` - Failure screenshots
- `logs/` - Execution logs

## Running Tests

### iOS Tests

```bash
# Smoke tests
pytest tests/ios/ -m smoke -v

# All tests
pytest tests/ios/ -v

# Generate HTML report
pytest tests/ios/ --html=reports/ios/report.html
```

### Android Tests (Coming Soon)

```bash
# Once Android is implemented
pytest tests/android/ -m smoke -v
```

## Configuration

Edit `config/common.json` for general settings.
Edit `config/ios/capabilities.json` for iOS-specific configuration.

## Adding Tests

1. Create page objects in `pages/ios/` (or `pages/android/`)
2. Create tests in `tests/ios/` (or `tests/android/`)
3. Use `@pytest.mark.ios` or `@pytest.mark.android` markers
4. Use `@pytest.mark.smoke` for critical path tests

## Troubleshooting

### Appium not starting
```bash
pkill -f appium
appium
```

### App not launching
- Check app path in `config/ios/capabilities.json`
- Verify bundle ID is correct
- Rebuild app if needed

### Element not found
- Use Appium Inspector to verify locators
- Check if element is visible on screen
- Increase wait timeout

---

Generated by appium-deploy
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::tree::materialize;
    use tempfile::TempDir;

    #[test]
    fn test_layout_materializes_expected_skeleton() {
        let root = TempDir::new().unwrap();
        materialize(root.path(), &project_layout()).unwrap();

        for path in [
            "config/ios",
            "config/android/README.md",
            "tests/ios/__init__.py",
            "tests/cross_platform/README.md",
            "pages/ios/__init__.py",
            "utils/__init__.py",
            "data",
            "reports/android",
            "screenshots/ios",
            "logs",
        ] {
            assert!(root.path().join(path).exists(), "missing {path}");
        }
    }

    #[test]
    fn test_template_destinations_are_relative() {
        for spec in IOS_TEMPLATES {
            assert!(!spec.dest.starts_with('/'), "{} must be relative", spec.dest);
            assert!(spec.name.ends_with(".template"));
        }
    }

    #[test]
    fn test_readme_mentions_app_name() {
        let text = readme("Jubilee");
        assert!(text.starts_with("# Jubilee-Automation"));
        assert!(text.contains("automation testing for Jubilee"));
    }
}
