pub mod doctor;

use crate::domain::{Step, plan};
use crate::infra::config::{Overrides, PipelineConfig, load_pipeline_config};
use crate::infra::{DotnetPackTool, EngineAdapter, ReqwestProbe};
use crate::services::Orchestrator;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Project root holding config.yaml and receiving client/ and output/
    #[arg(long, global = true, env = "CLIENTGEN_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/clientgen.toml when present)
    #[arg(long, global = true, env = "CLIENTGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// URL of the Swagger API (default: http://localhost:<port>/swagger.v1.json)
    #[arg(long, global = true, env = "CLIENTGEN_URL")]
    pub url: Option<String>,

    /// Image tag for the OpenAPI generator [default: latest]
    #[arg(long = "docker-version", global = true, env = "CLIENTGEN_DOCKER_VERSION")]
    pub docker_version: Option<String>,

    /// Image tag for the Gitea service [default: 1.22.0]
    #[arg(long = "gitea-version", global = true, env = "CLIENTGEN_GITEA_VERSION")]
    pub gitea_version: Option<String>,

    /// Container engine binary [default: docker]
    #[arg(long, global = true, env = "CLIENTGEN_ENGINE")]
    pub engine: Option<String>,

    /// Suffix for container names so runs do not collide
    #[arg(long, global = true, env = "CLIENTGEN_RUN_ID")]
    pub run_id: Option<String>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalOptions {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            generator_version: self.docker_version.clone(),
            service_version: self.gitea_version.clone(),
            engine: self.engine.clone(),
            run_id: self.run_id.clone(),
        }
    }
}

/// Expands `~` and makes the root absolute, as the engine needs it for the volume mount
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let expanded = shellexpand::tilde(root.to_string_lossy().as_ref()).into_owned();
    std::fs::canonicalize(&expanded).with_context(|| format!("resolving project root {expanded:?}"))
}

pub fn load_config(options: &GlobalOptions) -> Result<PipelineConfig> {
    let root = resolve_root(&options.root)?;
    let explicit = options
        .config
        .as_ref()
        .map(|p| PathBuf::from(shellexpand::tilde(p.to_string_lossy().as_ref()).into_owned()));

    load_pipeline_config(&root, explicit.as_deref(), &options.overrides())
}

pub fn build_orchestrator(config: PipelineConfig) -> Result<Orchestrator> {
    let runtime = Arc::new(EngineAdapter::new(config.engine.clone()));
    let probe = Arc::new(ReqwestProbe::new(config.service.probe_timeout)?);
    let packager = Arc::new(DotnetPackTool::new(config.package.tool.clone()));

    Ok(Orchestrator::new(config, runtime, probe, packager))
}

pub fn run(options: &GlobalOptions, step: Step) -> Result<()> {
    let config = load_config(options)?;
    let orchestrator = build_orchestrator(config)?;
    orchestrator.run(step)?;
    Ok(())
}

pub fn plan_lines(step: Step) -> Vec<String> {
    plan(step)
        .into_iter()
        .enumerate()
        .map(|(idx, s)| format!("{}. {:<20} {}", idx + 1, s.name(), s.description()))
        .collect()
}

pub fn print_plan(step: Step) {
    for line in plan_lines(step) {
        println!("{line}");
    }
}
