use crate::domain::{Container, ContainerRuntime, ContainerSpec, ContainerState};
use crate::error::{PipelineError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ContainerService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl ContainerService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    pub fn get_status(&self, name: &str) -> anyhow::Result<Container> {
        self.runtime.get_container(name)
    }

    /// Launches a detached container; an existing container with the same name is a collision
    pub fn start(&self, spec: &ContainerSpec) -> Result<()> {
        let start_error = |reason: String| PipelineError::ContainerStart {
            name: spec.name.to_string(),
            reason,
        };

        let container = self
            .runtime
            .get_container(spec.name)
            .map_err(|e| start_error(format!("{e:#}")))?;

        if container.exists() {
            return Err(start_error(
                "a container with this name already exists (run cleanup-containers first)".into(),
            ));
        }

        info!("Starting {} ({})...", spec.name, spec.image);
        self.runtime
            .run_detached(spec)
            .map_err(|e| start_error(format!("{e:#}")))
    }

    /// Runs a container in the foreground and returns its exit code
    pub fn run_to_completion(&self, spec: &ContainerSpec) -> anyhow::Result<i32> {
        info!("Running {} ({})...", spec.name, spec.image);
        self.runtime.run_attached(spec)
    }

    pub fn stop(&self, name: &str) -> anyhow::Result<()> {
        let container = self.runtime.get_container(name)?;

        match container.state {
            ContainerState::Running => {
                info!("Stopping {name}...");
                self.runtime.stop_container(name)
            }
            ContainerState::Stopped => {
                debug!("{name} is already stopped");
                Ok(())
            }
            ContainerState::NotCreated => {
                debug!("{name} does not exist, nothing to stop");
                Ok(())
            }
        }
    }

    pub fn remove(&self, name: &str) -> anyhow::Result<()> {
        let container = self.runtime.get_container(name)?;

        if !container.exists() {
            debug!("{name} does not exist, nothing to remove");
            return Ok(());
        }

        info!("Removing {name}...");
        self.runtime.remove_container(name)
    }

    pub fn is_command_available(&self, cmd: &str) -> bool {
        let available = self.runtime.is_command_available(cmd);
        if !available {
            warn!("{cmd} not found on PATH");
        }
        available
    }
}
