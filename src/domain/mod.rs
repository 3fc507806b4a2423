mod container;
pub mod generation;
pub mod package;
pub mod step;
pub mod traits;

pub use container::{
    Container, ContainerSpec, ContainerState, GeneratorContainer, ServiceContainer,
};
pub use generation::GenerationRequest;
pub use package::{PackageMetadata, PackageRequest};
pub use step::{Step, plan};
pub use traits::{ContainerRuntime, HttpProbe, PackagingTool};
