use crate::domain::{GenerationRequest, GeneratorContainer};
use crate::error::{PipelineError, Result};
use crate::services::ContainerService;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Runs the generator container once per request. Never retries.
pub struct GenerationService {
    container_service: Arc<ContainerService>,
}

impl GenerationService {
    pub fn new(container_service: Arc<ContainerService>) -> Self {
        Self { container_service }
    }

    pub fn generate(
        &self,
        generator: &GeneratorContainer,
        request: &GenerationRequest,
    ) -> Result<()> {
        let generation_error = |reason: String| PipelineError::Generation { reason };

        let existing = self
            .container_service
            .get_status(&generator.name)
            .map_err(|e| generation_error(format!("{e:#}")))?;
        if existing.exists() {
            return Err(generation_error(format!(
                "container {} already exists (run cleanup-containers first)",
                generator.name
            )));
        }

        let args = request.to_args();
        let spec = generator.to_spec(&args);

        info!(
            "Generating {} client from {} into {}...",
            request.generator, request.input_url, request.output_dir
        );

        match self.container_service.run_to_completion(&spec) {
            Ok(0) => {
                info!("Client generated.");
                Ok(())
            }
            Ok(code) => Err(generation_error(format!(
                "generator exited with code {code}"
            ))),
            Err(e) => Err(generation_error(format!("{e:#}"))),
        }
    }
}

/// The generator config must exist and be valid YAML before a container is spent on it.
pub fn check_generator_config(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| {
        PipelineError::Config(format!("cannot read generator config {:?}: {e}", path))
    })?;

    serde_yml::from_str::<serde_yml::Value>(&content).map_err(|e| {
        PipelineError::Config(format!("generator config {:?} is not valid YAML: {e}", path))
    })?;

    Ok(())
}
