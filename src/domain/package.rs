use std::path::PathBuf;

/// Descriptive metadata attached to the packaged client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageMetadata {
    pub description: String,
    pub authors: String,
    pub project_url: String,
    pub repository_url: String,
    pub license_url: String,
    pub icon_url: String,
    pub copyright: String,
    pub release_notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub metadata: PackageMetadata,
}

/// Fills `{version}` placeholders in a metadata template.
pub fn render_template(template: &str, version: &str) -> String {
    template.replace("{version}", version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_release_notes_with_version() {
        let notes = render_template(
            "See https://github.com/go-gitea/gitea/releases/tag/v{version} for changelog.",
            "1.22.0",
        );
        assert_eq!(
            notes,
            "See https://github.com/go-gitea/gitea/releases/tag/v1.22.0 for changelog."
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(render_template("MIT", "1.0"), "MIT");
    }
}
