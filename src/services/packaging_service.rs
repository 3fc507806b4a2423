use crate::domain::{PackageRequest, PackagingTool};
use crate::error::{PipelineError, Result};
use std::sync::Arc;
use tracing::info;

pub struct PackagingService {
    tool: Arc<dyn PackagingTool>,
}

impl PackagingService {
    pub fn new(tool: Arc<dyn PackagingTool>) -> Self {
        Self { tool }
    }

    pub fn package(&self, request: &PackageRequest) -> Result<()> {
        let packaging_error = |reason: String| PipelineError::Packaging { reason };

        if !request.source_dir.is_dir() {
            return Err(packaging_error(format!(
                "generated sources not found at {}",
                request.source_dir.display()
            )));
        }

        info!(
            "Packaging {} into {}...",
            request.source_dir.display(),
            request.output_dir.display()
        );

        match self.tool.pack(request) {
            Ok(0) => {
                info!("Package written to {}", request.output_dir.display());
                Ok(())
            }
            Ok(code) => Err(packaging_error(format!(
                "{} exited with code {code}",
                self.tool.program()
            ))),
            Err(e) => Err(packaging_error(format!("{e:#}"))),
        }
    }
}
