use crate::domain::{ContainerRuntime, HttpProbe, PackagingTool, Step, plan};
use crate::error::Result;
use crate::infra::config::PipelineConfig;
use crate::services::generation_service::check_generator_config;
use crate::services::readiness::{ReadinessProbe, ReadinessProber};
use crate::services::{CleanupService, ContainerService, GenerationService, PackagingService};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs pipeline steps in plan order, one at a time, halting at the first failure.
pub struct Orchestrator {
    config: PipelineConfig,
    container_service: Arc<ContainerService>,
    readiness: ReadinessProber,
    generation: GenerationService,
    cleanup: CleanupService,
    packaging: PackagingService,
}

impl Orchestrator {
    pub fn new(
        config: PipelineConfig,
        runtime: Arc<dyn ContainerRuntime>,
        probe: Arc<dyn HttpProbe>,
        packager: Arc<dyn PackagingTool>,
    ) -> Self {
        let container_service = Arc::new(ContainerService::new(runtime));
        Self {
            config,
            readiness: ReadinessProber::new(probe),
            generation: GenerationService::new(container_service.clone()),
            cleanup: CleanupService::new(container_service.clone()),
            packaging: PackagingService::new(packager),
            container_service,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs `target` and everything it depends on.
    ///
    /// Once a step with a finalizer has begun, the finalizer runs before this
    /// returns, even when a later step fails.
    pub fn run(&self, target: Step) -> Result<()> {
        let steps = plan(target);
        let names: Vec<&str> = steps.iter().map(|s| s.name()).collect();
        info!("Plan: {}", names.join(" -> "));

        self.preflight(&steps)?;

        let mut armed: Vec<Step> = Vec::new();

        for step in steps {
            if let Some(finalizer) = step.finalizer() {
                if !armed.contains(&finalizer) {
                    armed.push(finalizer);
                }
            }
            armed.retain(|s| *s != step);

            info!("Step {step}: {}", step.description());

            if let Err(e) = self.execute(step) {
                error!("{step} failed: {e}");
                for finalizer in armed {
                    warn!("Running {finalizer} after failure");
                    if let Err(fe) = self.execute(finalizer) {
                        error!("{finalizer} failed too: {fe}");
                    }
                }
                return Err(e);
            }
        }

        info!("{target} complete");
        Ok(())
    }

    /// Checks that need no containers, so a bad setup fails before anything starts
    fn preflight(&self, steps: &[Step]) -> Result<()> {
        if steps.contains(&Step::GenerateClient) {
            check_generator_config(&self.config.host_generator_config())?;
        }
        Ok(())
    }

    pub fn execute(&self, step: Step) -> Result<()> {
        match step {
            Step::CleanupFiles => self.cleanup_files(),
            Step::StartService => self.start_service(),
            Step::GenerateClient => self
                .generation
                .generate(&self.config.generator_container(), &self.config.generation_request()),
            Step::CleanupContainers => {
                self.cleanup
                    .cleanup_containers(&self.config.container_names());
                Ok(())
            }
            Step::PackageClient => self.packaging.package(&self.config.package_request()),
        }
    }

    fn cleanup_files(&self) -> Result<()> {
        let root = &self.config.root;
        let pattern = &self.config.output_pattern;

        if !self.cleanup.any_prior_outputs(root, pattern)? {
            info!("No previous output matching {pattern}, skipping");
            return Ok(());
        }

        let removed = self.cleanup.clean_prior_outputs(root, pattern)?;
        info!("Removed {removed} output director(ies)");
        Ok(())
    }

    fn start_service(&self) -> Result<()> {
        let service = self.config.service_container();
        self.container_service.start(&service.to_spec())?;

        info!("Waiting for {} to start...", service.name);
        self.readiness.wait_until_ready(&ReadinessProbe {
            url: self.config.schema_url(),
            max_attempts: self.config.service.readiness_attempts,
            interval: self.config.service.readiness_interval,
        })
    }
}
