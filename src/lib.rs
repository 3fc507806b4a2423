pub mod cli;
pub mod domain;
pub mod error;
pub mod infra;
pub mod services;

// Mocks shared by unit and integration tests
pub mod test_support;

pub use domain::{ContainerRuntime, HttpProbe, PackagingTool, Step};
pub use error::{PipelineError, Result};
pub use infra::{DotnetPackTool, EngineAdapter, ReqwestProbe};
pub use services::Orchestrator;
