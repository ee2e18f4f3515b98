//! Resolve, render, and write a single template file

use crate::console::Reporter;
use crate::error::Result;
use crate::templates::render::{render, ParameterSet};
use crate::templates::resolver::TemplateResolver;
use std::path::Path;
use tokio::fs;

/// Copy a named template to `destination`, substituting placeholders.
/// Parent directories are created as needed; an existing destination file
/// is overwritten silently.
pub async fn copy_template(
    resolver: &TemplateResolver,
    name: &str,
    destination: &Path,
    params: &ParameterSet,
    reporter: &Reporter,
) -> Result<()> {
    let source = resolver.resolve(name)?;
    let content = fs::read_to_string(&source).await?;
    let rendered = render(&content, params);

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(destination, rendered).await?;

    reporter.detail(&format!(
        "Created: {}",
        destination.file_name().unwrap_or_default().to_string_lossy()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployError;
    use crate::request::Platform;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, TemplateResolver) {
        let root = TempDir::new().unwrap();
        let common = root.path().join("common");
        std::fs::create_dir_all(&common).unwrap();
        std::fs::write(common.join("config.template"), "name={{app_name}}\n").unwrap();
        let resolver = TemplateResolver::new(root.path(), Platform::Ios);
        (root, resolver)
    }

    fn params() -> ParameterSet {
        [("app_name".to_string(), "Jubilee".to_string())].into()
    }

    #[tokio::test]
    async fn test_copy_renders_and_creates_parents() {
        let (_root, resolver) = fixture();
        let dest_root = TempDir::new().unwrap();
        let dest = dest_root.path().join("config/ios/config.txt");
        let reporter = Reporter::new(false);

        copy_template(&resolver, "config.template", &dest, &params(), &reporter)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "name=Jubilee\n");
    }

    #[tokio::test]
    async fn test_copy_overwrites_existing_destination() {
        let (_root, resolver) = fixture();
        let dest_root = TempDir::new().unwrap();
        let dest = dest_root.path().join("config.txt");
        std::fs::write(&dest, "stale").unwrap();
        let reporter = Reporter::new(false);

        copy_template(&resolver, "config.template", &dest, &params(), &reporter)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "name=Jubilee\n");
    }

    #[tokio::test]
    async fn test_copy_unknown_template_fails() {
        let (_root, resolver) = fixture();
        let dest_root = TempDir::new().unwrap();
        let reporter = Reporter::new(false);

        let err = copy_template(
            &resolver,
            "missing.template",
            &dest_root.path().join("out.txt"),
            &params(),
            &reporter,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DeployError::TemplateNotFound(_)));
    }
}
