use crate::domain::{
    GenerationRequest, GeneratorContainer, PackageMetadata, PackageRequest, ServiceContainer,
    package::render_template,
};
use crate::infra::output_dirs::DirPattern;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "clientgen.toml";
pub const DEFAULT_OUTPUT_PATTERN: &str = "**/client";

const DEFAULT_SERVICE_NAME: &str = "gitea-swagger";
const DEFAULT_SERVICE_IMAGE: &str = "gitea/gitea";
const DEFAULT_SERVICE_VERSION: &str = "1.22.0";
const DEFAULT_SERVICE_PORT: u16 = 3000;
const DEFAULT_READINESS_PATH: &str = "/swagger.v1.json";

const DEFAULT_GENERATOR_NAME: &str = "gitea-openapi-generator";
const DEFAULT_GENERATOR_IMAGE: &str = "openapitools/openapi-generator-cli";
const DEFAULT_GENERATOR_VERSION: &str = "latest";

// Placeholder credentials for a throwaway instance. Override them in
// clientgen.toml before pointing this at anything that outlives the run.
const DEFAULT_SERVICE_ENV: [&str; 7] = [
    "GITEA__database__DB_TYPE=sqlite3",
    "GITEA__database__PATH=/data/gitea/gitea.db",
    "GITEA__security__INSTALL_LOCK=true",
    "GITEA__security__SECRET_KEY=your_secret_key",
    "GITEA__admin__DEFAULT_ADMIN_NAME=admin",
    "GITEA__admin__DEFAULT_ADMIN_PASSWORD=admin",
    "GITEA__admin__DEFAULT_ADMIN_EMAIL=admin@example.com",
];

#[derive(Deserialize, Debug, Default)]
pub struct EngineSection {
    pub binary: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct OutputSection {
    pub pattern: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ServiceSection {
    pub name: Option<String>,
    pub image: Option<String>,
    pub version: Option<String>,
    pub host_port: Option<u16>,
    pub container_port: Option<u16>,
    pub env: Option<Vec<String>>,
    pub url: Option<String>,
    pub readiness_path: Option<String>,
    pub readiness_attempts: Option<u32>,
    pub readiness_interval: Option<String>,
    pub probe_timeout: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct GeneratorSection {
    pub name: Option<String>,
    pub image: Option<String>,
    pub version: Option<String>,
    pub kind: Option<String>,
    pub network: Option<String>,
    pub mount_target: Option<String>,
    pub config_file: Option<String>,
    pub output_dir: Option<String>,
    pub package_revision: Option<u32>,
    pub additional_properties: Option<BTreeMap<String, String>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PackageSection {
    pub tool: Option<String>,
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub description: Option<String>,
    pub authors: Option<String>,
    pub project_url: Option<String>,
    pub repository_url: Option<String>,
    pub license_url: Option<String>,
    pub icon_url: Option<String>,
    pub copyright: Option<String>,
    pub release_notes: Option<String>,
}

/// Contents of `clientgen.toml`; every key is optional.
#[derive(Deserialize, Debug, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub package: PackageSection,
}

/// Values given on the command line, applied after the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub generator_version: Option<String>,
    pub service_version: Option<String>,
    pub engine: Option<String>,
    pub run_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub name: String,
    pub image: String,
    pub version: String,
    pub host_port: u16,
    pub container_port: u16,
    pub env: Vec<String>,
    pub url: Option<String>,
    pub readiness_path: String,
    pub readiness_attempts: u32,
    pub readiness_interval: Duration,
    pub probe_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub name: String,
    pub image: String,
    pub version: String,
    pub kind: String,
    pub network: Option<String>,
    pub mount_target: String,
    pub config_file: String,
    pub output_dir: String,
    pub package_revision: Option<u32>,
    pub additional_properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    pub tool: String,
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Values may contain `{version}`, filled with the service version
    pub metadata: PackageMetadata,
}

/// Fully resolved settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub root: PathBuf,
    pub engine: String,
    pub output_pattern: String,
    pub service: ServiceConfig,
    pub generator: GeneratorConfig,
    pub package: PackageConfig,
}

impl PipelineConfig {
    pub fn defaults(root: PathBuf) -> Self {
        Self {
            root,
            engine: "docker".into(),
            output_pattern: DEFAULT_OUTPUT_PATTERN.into(),
            service: ServiceConfig {
                name: DEFAULT_SERVICE_NAME.into(),
                image: DEFAULT_SERVICE_IMAGE.into(),
                version: DEFAULT_SERVICE_VERSION.into(),
                host_port: DEFAULT_SERVICE_PORT,
                container_port: DEFAULT_SERVICE_PORT,
                env: DEFAULT_SERVICE_ENV.iter().map(|s| s.to_string()).collect(),
                url: None,
                readiness_path: DEFAULT_READINESS_PATH.into(),
                readiness_attempts: 30,
                readiness_interval: Duration::from_secs(1),
                probe_timeout: Duration::from_secs(5),
            },
            generator: GeneratorConfig {
                name: DEFAULT_GENERATOR_NAME.into(),
                image: DEFAULT_GENERATOR_IMAGE.into(),
                version: DEFAULT_GENERATOR_VERSION.into(),
                kind: "csharp".into(),
                network: Some("host".into()),
                mount_target: "/local".into(),
                config_file: "config.yaml".into(),
                output_dir: "client".into(),
                package_revision: Some(3),
                additional_properties: BTreeMap::new(),
            },
            package: PackageConfig {
                tool: "dotnet".into(),
                source_dir: PathBuf::from("client"),
                output_dir: PathBuf::from("output"),
                metadata: PackageMetadata {
                    description: "A .NET client for interacting with the Gitea API generated from the Gitea OpenAPI definition.".into(),
                    authors: "Lukas Klepper".into(),
                    project_url: "https://github.com/xTamasu/Gitea.NET".into(),
                    repository_url: "https://github.com/xTamasu/Gitea.NET".into(),
                    license_url: "https://github.com/xTamasu/Gitea.NET/blob/main/LICENSE".into(),
                    icon_url: "https://raw.githubusercontent.com/xTamasu/Gitea.NET/main/Gitea_NET_Logo.svg".into(),
                    copyright: "MIT".into(),
                    release_notes: "See https://github.com/go-gitea/gitea/releases/tag/v{version} for changelog.".into(),
                },
            },
        }
    }

    /// Values from `file` overwrite the current ones where present.
    pub fn merge(&mut self, file: FileConfig) -> Result<()> {
        if let Some(binary) = file.engine.binary {
            self.engine = binary;
        }
        let explicit_pattern = file.output.pattern.is_some();
        if let Some(pattern) = file.output.pattern {
            self.output_pattern = pattern;
        }

        let svc = file.service;
        if let Some(v) = svc.name {
            self.service.name = v;
        }
        if let Some(v) = svc.image {
            self.service.image = v;
        }
        if let Some(v) = svc.version {
            self.service.version = v;
        }
        if let Some(v) = svc.host_port {
            self.service.host_port = v;
        }
        if let Some(v) = svc.container_port {
            self.service.container_port = v;
        }
        if let Some(v) = svc.env {
            self.service.env = v;
        }
        if let Some(v) = svc.url {
            self.service.url = Some(v);
        }
        if let Some(v) = svc.readiness_path {
            self.service.readiness_path = v;
        }
        if let Some(v) = svc.readiness_attempts {
            self.service.readiness_attempts = v;
        }
        if let Some(v) = svc.readiness_interval {
            self.service.readiness_interval =
                parse_duration(&v).context("service.readiness_interval")?;
        }
        if let Some(v) = svc.probe_timeout {
            self.service.probe_timeout = parse_duration(&v).context("service.probe_timeout")?;
        }

        let generator = file.generator;
        if let Some(v) = generator.name {
            self.generator.name = v;
        }
        if let Some(v) = generator.image {
            self.generator.image = v;
        }
        if let Some(v) = generator.version {
            self.generator.version = v;
        }
        if let Some(v) = generator.kind {
            self.generator.kind = v;
        }
        if let Some(v) = generator.network {
            // An empty string drops the flag and keeps the engine default
            self.generator.network = Some(v).filter(|n| !n.is_empty());
        }
        if let Some(v) = generator.mount_target {
            self.generator.mount_target = v;
        }
        if let Some(v) = generator.config_file {
            self.generator.config_file = v;
        }
        if let Some(v) = generator.output_dir {
            // Cleanup and packaging follow the generator unless set on their own
            let dir = relative_dir(&v).to_string();
            if !explicit_pattern {
                self.output_pattern = format!("**/{dir}");
            }
            self.package.source_dir = PathBuf::from(&dir);
            self.generator.output_dir = v;
        }
        if let Some(v) = generator.package_revision {
            self.generator.package_revision = Some(v);
        }
        if let Some(props) = generator.additional_properties {
            self.generator.additional_properties.extend(props);
        }

        let pkg = file.package;
        if let Some(v) = pkg.tool {
            self.package.tool = v;
        }
        if let Some(v) = pkg.source_dir {
            self.package.source_dir = v;
        }
        if let Some(v) = pkg.output_dir {
            self.package.output_dir = v;
        }
        let meta = &mut self.package.metadata;
        for (target, value) in [
            (&mut meta.description, pkg.description),
            (&mut meta.authors, pkg.authors),
            (&mut meta.project_url, pkg.project_url),
            (&mut meta.repository_url, pkg.repository_url),
            (&mut meta.license_url, pkg.license_url),
            (&mut meta.icon_url, pkg.icon_url),
            (&mut meta.copyright, pkg.copyright),
            (&mut meta.release_notes, pkg.release_notes),
        ] {
            if let Some(v) = value {
                *target = v;
            }
        }

        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = &overrides.url {
            self.service.url = Some(url.clone());
        }
        if let Some(version) = &overrides.generator_version {
            self.generator.version = version.clone();
        }
        if let Some(version) = &overrides.service_version {
            self.service.version = version.clone();
        }
        if let Some(engine) = &overrides.engine {
            self.engine = engine.clone();
        }
        if let Some(run_id) = &overrides.run_id {
            self.service.name = format!("{}-{run_id}", self.service.name);
            self.generator.name = format!("{}-{run_id}", self.generator.name);
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_container_name(&self.service.name)?;
        validate_container_name(&self.generator.name)?;

        if self.service.name == self.generator.name {
            bail!(
                "service and generator containers share the name '{}'",
                self.service.name
            );
        }
        if self.service.readiness_attempts == 0 {
            bail!("service.readiness_attempts must be at least 1");
        }
        if self.service.version.trim().is_empty() || self.generator.version.trim().is_empty() {
            bail!("image versions must not be empty");
        }
        if self.engine.trim().is_empty() {
            bail!("engine binary must not be empty");
        }

        let pattern = DirPattern::parse(&self.output_pattern)?;
        let output_dir = relative_dir(&self.generator.output_dir);
        if output_dir.is_empty() {
            bail!("generator.output_dir must name a directory under the root");
        }
        if !pattern.matches(Path::new(output_dir)) {
            bail!(
                "output.pattern '{}' does not match generator.output_dir '{output_dir}', \
                 so stale output would survive cleanup",
                self.output_pattern
            );
        }
        let source_dir = self.package.source_dir.to_string_lossy();
        if relative_dir(&source_dir) != output_dir {
            bail!(
                "package.source_dir {:?} is not generator.output_dir '{output_dir}'",
                self.package.source_dir
            );
        }

        Ok(())
    }

    /// Where the generator reads the schema and the prober waits for it
    pub fn schema_url(&self) -> String {
        match &self.service.url {
            Some(url) => url.clone(),
            None => format!(
                "http://localhost:{}{}",
                self.service.host_port, self.service.readiness_path
            ),
        }
    }

    pub fn service_container(&self) -> ServiceContainer {
        ServiceContainer {
            name: self.service.name.clone(),
            image: format!("{}:{}", self.service.image, self.service.version),
            ports: vec![format!(
                "{}:{}",
                self.service.host_port, self.service.container_port
            )],
            env: self.service.env.clone(),
        }
    }

    pub fn generator_container(&self) -> GeneratorContainer {
        GeneratorContainer {
            name: self.generator.name.clone(),
            image: format!("{}:{}", self.generator.image, self.generator.version),
            network: self.generator.network.clone(),
            volumes: vec![format!(
                "{}:{}",
                self.root.to_string_lossy(),
                self.generator.mount_target
            )],
        }
    }

    pub fn package_version(&self) -> String {
        match self.generator.package_revision {
            Some(rev) => format!("{}.{rev}", self.service.version),
            None => self.service.version.clone(),
        }
    }

    pub fn generation_request(&self) -> GenerationRequest {
        let mut additional_properties = BTreeMap::new();
        additional_properties.insert("packageVersion".to_string(), self.package_version());
        additional_properties.extend(self.generator.additional_properties.clone());

        GenerationRequest {
            input_url: self.schema_url(),
            generator: self.generator.kind.clone(),
            output_dir: container_path(&self.generator.mount_target, &self.generator.output_dir),
            config_file: container_path(&self.generator.mount_target, &self.generator.config_file),
            additional_properties,
        }
    }

    /// The generator config file as seen from the host
    pub fn host_generator_config(&self) -> PathBuf {
        self.root.join(&self.generator.config_file)
    }

    pub fn package_request(&self) -> PackageRequest {
        let version = &self.service.version;
        let m = &self.package.metadata;

        PackageRequest {
            source_dir: self.root.join(&self.package.source_dir),
            output_dir: self.root.join(&self.package.output_dir),
            metadata: PackageMetadata {
                description: render_template(&m.description, version),
                authors: render_template(&m.authors, version),
                project_url: render_template(&m.project_url, version),
                repository_url: render_template(&m.repository_url, version),
                license_url: render_template(&m.license_url, version),
                icon_url: render_template(&m.icon_url, version),
                copyright: render_template(&m.copyright, version),
                release_notes: render_template(&m.release_notes, version),
            },
        }
    }

    pub fn container_names(&self) -> Vec<String> {
        vec![self.service.name.clone(), self.generator.name.clone()]
    }
}

fn relative_dir(path: &str) -> &str {
    path.trim_start_matches("./").trim_end_matches('/')
}

fn container_path(mount_target: &str, relative: &str) -> String {
    format!(
        "{}/{}",
        mount_target.trim_end_matches('/'),
        relative.trim_start_matches("./")
    )
}

pub fn validate_container_name(name: &str) -> Result<()> {
    let Some(first_char) = name.chars().next() else {
        bail!("empty container name");
    };

    if !first_char.is_ascii_alphanumeric() {
        bail!("container name '{name}' must start with a letter or digit");
    }

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '.' && c != '-' {
            bail!("container name '{name}' contains invalid character '{c}'");
        }
    }

    Ok(())
}

pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if let Some(stripped) = s.strip_suffix("ms") {
        let millis: u64 = stripped.trim().parse()?;
        Ok(Duration::from_millis(millis))
    } else if let Some(stripped) = s.strip_suffix('s') {
        let secs: u64 = stripped.trim().parse()?;
        Ok(Duration::from_secs(secs))
    } else if let Some(stripped) = s.strip_suffix('m') {
        let mins: u64 = stripped.trim().parse()?;
        Ok(Duration::from_secs(mins * 60))
    } else {
        bail!("invalid duration '{s}' (expected e.g. 500ms, 1s, 2m)")
    }
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("parsing {:?}", path))
}

/// Defaults, then `clientgen.toml` (or `explicit`), then CLI overrides.
pub fn load_pipeline_config(
    root: &Path,
    explicit: Option<&Path>,
    overrides: &Overrides,
) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::defaults(root.to_path_buf());

    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file {:?} not found", path);
            }
            config.merge(load_file_config(path)?)?;
        }
        None => {
            let default_path = root.join(DEFAULT_CONFIG_FILE_NAME);
            if default_path.exists() {
                config.merge(load_file_config(&default_path)?)?;
            }
        }
    }

    config.apply_overrides(overrides);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> PipelineConfig {
        PipelineConfig::defaults(PathBuf::from("/repo"))
    }

    #[test]
    fn default_schema_url_points_at_local_service() {
        assert_eq!(
            defaults().schema_url(),
            "http://localhost:3000/swagger.v1.json"
        );
    }

    #[test]
    fn url_override_replaces_schema_url() {
        let mut config = defaults();
        config.apply_overrides(&Overrides {
            url: Some("http://127.0.0.1:8080/api.json".into()),
            ..Default::default()
        });
        assert_eq!(config.schema_url(), "http://127.0.0.1:8080/api.json");
    }

    #[test]
    fn default_containers_match_fixed_names_and_images() {
        let config = defaults();

        let service = config.service_container();
        assert_eq!(service.name, "gitea-swagger");
        assert_eq!(service.image, "gitea/gitea:1.22.0");
        assert_eq!(service.ports, vec!["3000:3000"]);
        assert_eq!(service.env.len(), 7);

        let generator = config.generator_container();
        assert_eq!(generator.name, "gitea-openapi-generator");
        assert_eq!(generator.image, "openapitools/openapi-generator-cli:latest");
        assert_eq!(generator.network.as_deref(), Some("host"));
        assert_eq!(generator.volumes, vec!["/repo:/local"]);
    }

    #[test]
    fn generation_request_uses_container_paths() {
        let request = defaults().generation_request();
        assert_eq!(request.output_dir, "/local/client");
        assert_eq!(request.config_file, "/local/config.yaml");
        assert_eq!(request.generator, "csharp");
        assert_eq!(
            request.additional_properties.get("packageVersion").unwrap(),
            "1.22.0.3"
        );
    }

    #[test]
    fn version_override_flows_into_image_and_package() {
        let mut config = defaults();
        config.apply_overrides(&Overrides {
            service_version: Some("1.23.1".into()),
            generator_version: Some("v7.8.0".into()),
            ..Default::default()
        });

        assert_eq!(config.service_container().image, "gitea/gitea:1.23.1");
        assert_eq!(
            config.generator_container().image,
            "openapitools/openapi-generator-cli:v7.8.0"
        );
        assert_eq!(config.package_version(), "1.23.1.3");
        assert_eq!(
            config.package_request().metadata.release_notes,
            "See https://github.com/go-gitea/gitea/releases/tag/v1.23.1 for changelog."
        );
    }

    #[test]
    fn run_id_suffixes_container_names() {
        let mut config = defaults();
        config.apply_overrides(&Overrides {
            run_id: Some("ci-42".into()),
            ..Default::default()
        });

        assert_eq!(
            config.container_names(),
            vec!["gitea-swagger-ci-42", "gitea-openapi-generator-ci-42"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_invalid_run_id() {
        let mut config = defaults();
        config.apply_overrides(&Overrides {
            run_id: Some("bad id".into()),
            ..Default::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn merges_file_values_over_defaults() {
        let toml = r#"
[engine]
binary = "podman"

[service]
version = "1.21.0"
host_port = 3300
readiness_attempts = 5
readiness_interval = "250ms"
env = ["GITEA__security__INSTALL_LOCK=true"]

[generator]
kind = "typescript-fetch"
network = ""
package_revision = 1
additional_properties = { npmName = "gitea-client" }

[package]
authors = "Someone Else"
"#;
        let file: FileConfig = toml::from_str(toml).unwrap();
        let mut config = defaults();
        config.merge(file).unwrap();

        assert_eq!(config.engine, "podman");
        assert_eq!(config.service.version, "1.21.0");
        assert_eq!(config.schema_url(), "http://localhost:3300/swagger.v1.json");
        assert_eq!(config.service_container().ports, vec!["3300:3000"]);
        assert_eq!(config.service.readiness_attempts, 5);
        assert_eq!(config.service.readiness_interval, Duration::from_millis(250));
        assert_eq!(config.service.env.len(), 1);
        assert_eq!(config.generator.network, None);

        let request = config.generation_request();
        assert_eq!(request.generator, "typescript-fetch");
        assert_eq!(request.additional_properties.len(), 2);
        assert_eq!(
            request.additional_properties.get("packageVersion").unwrap(),
            "1.21.0.1"
        );

        assert_eq!(config.package.metadata.authors, "Someone Else");
        assert_eq!(config.package.metadata.copyright, "MIT");
    }

    #[test]
    fn generator_output_dir_moves_cleanup_and_packaging() {
        let file: FileConfig = toml::from_str("[generator]\noutput_dir = \"gen\"").unwrap();
        let mut config = defaults();
        config.merge(file).unwrap();

        config.validate().unwrap();
        assert_eq!(config.output_pattern, "**/gen");
        assert_eq!(config.package.source_dir, PathBuf::from("gen"));
        assert_eq!(config.generation_request().output_dir, "/local/gen");
        assert_eq!(config.package_request().source_dir, PathBuf::from("/repo/gen"));
    }

    #[test]
    fn rejects_pattern_that_misses_generator_output() {
        let toml = r#"
[output]
pattern = "**/client"

[generator]
output_dir = "gen"
"#;
        let file: FileConfig = toml::from_str(toml).unwrap();
        let mut config = defaults();
        config.merge(file).unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("stale output"), "{err}");
    }

    #[test]
    fn rejects_packaging_a_different_directory() {
        let toml = r#"
[generator]
output_dir = "gen"

[package]
source_dir = "client"
"#;
        let file: FileConfig = toml::from_str(toml).unwrap();
        let mut config = defaults();
        config.merge(file).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_pass_validation() {
        defaults().validate().unwrap();
    }

    #[test]
    fn default_metadata_names_the_package_author() {
        let request = defaults().package_request();
        assert_eq!(request.metadata.authors, "Lukas Klepper");
        assert_eq!(request.metadata.copyright, "MIT");
        assert!(request.metadata.release_notes.ends_with("v1.22.0 for changelog."));
    }

    #[test]
    fn rejects_bad_duration_in_file() {
        let file: FileConfig = toml::from_str("[service]\nreadiness_interval = \"soon\"").unwrap();
        let mut config = defaults();
        assert!(config.merge(file).is_err());
    }

    #[test]
    fn rejects_zero_attempts() {
        let mut config = defaults();
        config.service.readiness_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_shared_container_names() {
        let mut config = defaults();
        config.generator.name = config.service.name.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_durations() {
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("fast").is_err());
    }

    #[test]
    fn validates_container_names() {
        assert!(validate_container_name("gitea-swagger").is_ok());
        assert!(validate_container_name("gen_1.x").is_ok());
        assert!(validate_container_name("").is_err());
        assert!(validate_container_name("-leading").is_err());
        assert!(validate_container_name("with space").is_err());
    }

    #[test]
    fn loads_config_file_from_root() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE_NAME),
            "[generator]\nversion = \"v7.0.0\"\n",
        )
        .unwrap();

        let config = load_pipeline_config(temp.path(), None, &Overrides::default()).unwrap();
        assert_eq!(config.generator.version, "v7.0.0");
        assert_eq!(config.root, temp.path());
    }

    #[test]
    fn cli_overrides_win_over_file() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE_NAME),
            "[generator]\nversion = \"v7.0.0\"\n",
        )
        .unwrap();

        let overrides = Overrides {
            generator_version: Some("v7.1.0".into()),
            ..Default::default()
        };
        let config = load_pipeline_config(temp.path(), None, &overrides).unwrap();
        assert_eq!(config.generator.version, "v7.1.0");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("other.toml");
        let result = load_pipeline_config(temp.path(), Some(&missing), &Overrides::default());
        assert!(result.is_err());
    }

    #[test]
    fn works_without_config_file() {
        let temp = tempfile::tempdir().unwrap();
        let config = load_pipeline_config(temp.path(), None, &Overrides::default()).unwrap();
        assert_eq!(config.engine, "docker");
        assert_eq!(config.output_pattern, "**/client");
    }
}
