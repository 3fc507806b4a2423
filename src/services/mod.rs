mod cleanup_service;
mod container_service;
pub mod generation_service;
mod orchestrator;
mod packaging_service;
pub mod readiness;

pub use cleanup_service::CleanupService;
pub use container_service::ContainerService;
pub use generation_service::GenerationService;
pub use orchestrator::Orchestrator;
pub use packaging_service::PackagingService;
pub use readiness::{ReadinessProbe, ReadinessProber, retry};
