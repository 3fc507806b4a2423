use crate::domain::{PackageRequest, PackagingTool};
use anyhow::{Context, Result};
use std::process::Command;

/// `dotnet pack` with the metadata passed as MSBuild properties.
#[derive(Debug, Clone)]
pub struct DotnetPackTool {
    program: String,
}

impl DotnetPackTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DotnetPackTool {
    fn default() -> Self {
        Self::new("dotnet")
    }
}

impl PackagingTool for DotnetPackTool {
    fn pack(&self, request: &PackageRequest) -> Result<i32> {
        let status = Command::new(&self.program)
            .args(pack_args(request))
            .status()
            .with_context(|| format!("running {} pack", self.program))?;

        Ok(status.code().unwrap_or(-1))
    }

    fn program(&self) -> &str {
        &self.program
    }
}

pub fn pack_args(request: &PackageRequest) -> Vec<String> {
    let meta = &request.metadata;
    let mut args: Vec<String> = vec![
        "pack".into(),
        request.source_dir.to_string_lossy().into_owned(),
        "--output".into(),
        request.output_dir.to_string_lossy().into_owned(),
    ];

    let properties = [
        ("Description", &meta.description),
        ("Authors", &meta.authors),
        ("PackageProjectUrl", &meta.project_url),
        ("PackageReleaseNotes", &meta.release_notes),
        ("PackageIconUrl", &meta.icon_url),
        ("RepositoryUrl", &meta.repository_url),
        ("PackageLicenseUrl", &meta.license_url),
        ("Copyright", &meta.copyright),
    ];

    for (key, value) in properties {
        if value.is_empty() {
            continue;
        }
        args.push(format!("-p:{key}={}", escape_property(value)));
    }

    args
}

/// MSBuild splits property values on `;` and `,` unless they are escaped.
fn escape_property(value: &str) -> String {
    value.replace('%', "%25").replace(';', "%3B").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PackageMetadata;
    use std::path::PathBuf;

    fn request(metadata: PackageMetadata) -> PackageRequest {
        PackageRequest {
            source_dir: PathBuf::from("/repo/client"),
            output_dir: PathBuf::from("/repo/output"),
            metadata,
        }
    }

    #[test]
    fn project_and_output_come_first() {
        let args = pack_args(&request(PackageMetadata::default()));
        assert_eq!(args, vec!["pack", "/repo/client", "--output", "/repo/output"]);
    }

    #[test]
    fn metadata_becomes_msbuild_properties() {
        let args = pack_args(&request(PackageMetadata {
            authors: "Lukas Klepper".into(),
            license_url: "https://example.com/LICENSE".into(),
            copyright: "MIT".into(),
            ..Default::default()
        }));

        assert!(args.contains(&"-p:Authors=Lukas Klepper".to_string()));
        assert!(args.contains(&"-p:PackageLicenseUrl=https://example.com/LICENSE".to_string()));
        assert!(args.contains(&"-p:Copyright=MIT".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("-p:Description=")));
    }

    #[test]
    fn escapes_separators_in_values() {
        let args = pack_args(&request(PackageMetadata {
            description: "A client; generated, typed".into(),
            ..Default::default()
        }));

        assert!(args.contains(&"-p:Description=A client%3B generated%2C typed".to_string()));
    }
}
