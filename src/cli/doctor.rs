use crate::infra::EngineAdapter;
use crate::infra::config::PipelineConfig;
use crate::services::ContainerService;
use crate::services::generation_service::check_generator_config;
use anyhow::{Result, bail};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

impl Check {
    fn new(name: impl Into<String>, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ok,
            detail: detail.into(),
        }
    }
}

/// Tools on PATH, the generator config, and leftover containers from a previous run.
pub fn run_checks(containers: &ContainerService, config: &PipelineConfig) -> Vec<Check> {
    let mut checks = Vec::new();

    for tool in [config.engine.as_str(), config.package.tool.as_str()] {
        let ok = containers.is_command_available(tool);
        let detail = if ok { "available" } else { "not found on PATH" };
        checks.push(Check::new(tool, ok, detail));
    }

    let generator_config = config.host_generator_config();
    checks.push(match check_generator_config(&generator_config) {
        Ok(()) => Check::new("generator config", true, generator_config.display().to_string()),
        Err(e) => Check::new("generator config", false, e.to_string()),
    });

    for name in config.container_names() {
        let check = match containers.get_status(&name) {
            Ok(c) if c.exists() => Check::new(
                name,
                false,
                "left over from a previous run (run cleanup-containers)",
            ),
            Ok(_) => Check::new(name, true, "free"),
            Err(e) => Check::new(name, false, format!("{e:#}")),
        };
        checks.push(check);
    }

    checks
}

pub fn doctor(config: &PipelineConfig) -> Result<()> {
    let containers = ContainerService::new(Arc::new(EngineAdapter::new(config.engine.clone())));

    println!("Checking {}", config.root.display());
    let checks = run_checks(&containers, config);
    for check in &checks {
        let mark = if check.ok { "ok  " } else { "FAIL" };
        println!("  [{mark}] {:<28} {}", check.name, check.detail);
    }

    let failed = checks.iter().filter(|c| !c.ok).count();
    if failed > 0 {
        bail!("{failed} check(s) failed");
    }
    Ok(())
}
