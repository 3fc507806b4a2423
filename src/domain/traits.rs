use super::{Container, ContainerSpec, PackageRequest};
use anyhow::Result;
use std::fmt::Debug;

/// Trait for container engine operations
pub trait ContainerRuntime: Send + Sync + Debug {
    /// Get the current state of a container
    fn get_container(&self, name: &str) -> Result<Container>;

    /// Launch a detached container
    fn run_detached(&self, spec: &ContainerSpec) -> Result<()>;

    /// Run a container attached and return its exit code
    fn run_attached(&self, spec: &ContainerSpec) -> Result<i32>;

    /// Stop a container
    fn stop_container(&self, name: &str) -> Result<()>;

    /// Remove a container
    fn remove_container(&self, name: &str) -> Result<()>;

    /// Check if a command is available on the host
    fn is_command_available(&self, cmd: &str) -> bool;
}

/// A single HTTP GET used by the readiness prober.
pub trait HttpProbe: Send + Sync + Debug {
    /// Returns the response status code, or an error when no response arrived
    fn get_status(&self, url: &str) -> Result<u16>;
}

/// Tool that bundles the generated sources into a distributable artifact.
pub trait PackagingTool: Send + Sync + Debug {
    /// Runs the tool and returns its exit code
    fn pack(&self, request: &PackageRequest) -> Result<i32>;

    /// Binary the tool shells out to
    fn program(&self) -> &str;
}
