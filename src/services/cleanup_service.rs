use crate::error::{PipelineError, Result};
use crate::infra::output_dirs::find_matching_dirs;
use crate::services::ContainerService;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Removes stale generator output and the run's containers.
pub struct CleanupService {
    container_service: Arc<ContainerService>,
}

impl CleanupService {
    pub fn new(container_service: Arc<ContainerService>) -> Self {
        Self { container_service }
    }

    pub fn prior_outputs(&self, root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        find_matching_dirs(root, pattern).map_err(|e| PipelineError::Cleanup {
            path: root.to_path_buf(),
            reason: format!("{e:#}"),
        })
    }

    pub fn any_prior_outputs(&self, root: &Path, pattern: &str) -> Result<bool> {
        Ok(!self.prior_outputs(root, pattern)?.is_empty())
    }

    /// Deletes every directory under `root` matching `pattern`; returns how many were removed
    pub fn clean_prior_outputs(&self, root: &Path, pattern: &str) -> Result<usize> {
        let dirs = self.prior_outputs(root, pattern)?;

        for dir in &dirs {
            info!("Deleting {}", dir.display());
            fs::remove_dir_all(dir).map_err(|e| PipelineError::Cleanup {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(dirs.len())
    }

    /// Stops then removes each container, continuing past individual failures
    pub fn cleanup_containers(&self, names: &[String]) {
        if names.is_empty() {
            return;
        }

        info!("Cleaning up containers...");

        for name in names {
            match self.container_service.stop(name) {
                Ok(_) => debug!("{name} stopped"),
                Err(e) => warn!("Failed to stop {name}: {e:#}"),
            }
        }

        for name in names {
            match self.container_service.remove(name) {
                Ok(_) => debug!("{name} removed"),
                Err(e) => warn!("Failed to remove {name}: {e:#}"),
            }
        }

        info!("Containers cleaned up");
    }
}
