use crate::domain::{Container, ContainerRuntime, ContainerSpec, ContainerState};
use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::process::{Command, ExitStatus, Stdio};

/// Drives a Docker-compatible engine CLI (`docker`, `podman`).
#[derive(Debug, Clone)]
pub struct EngineAdapter {
    binary: String,
}

impl EngineAdapter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn engine<I, S>(&self, args: I, context: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let status = self.engine_status(args, context)?;
        self.ensure_success(status, context)
    }

    fn engine_status<I, S>(&self, args: I, context: &str) -> Result<ExitStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Command::new(&self.binary)
            .args(args.into_iter().map(|item| item.as_ref().to_os_string()))
            .status()
            .with_context(|| context.to_string())
    }

    /// Same as `engine_status` but with the engine's own output silenced
    fn engine_quiet<I, S>(&self, args: I, context: &str) -> Result<ExitStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Command::new(&self.binary)
            .args(args.into_iter().map(|item| item.as_ref().to_os_string()))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| context.to_string())
    }

    fn ensure_success(&self, status: ExitStatus, context: &str) -> Result<()> {
        if status.success() {
            return Ok(());
        }

        bail!("{} returned status {:?} ({context})", self.binary, status)
    }

    fn container_state(&self, name: &str) -> Result<ContainerState> {
        let output = Command::new(&self.binary)
            .args([
                "container",
                "inspect",
                name,
                "--format",
                "{{.State.Running}}",
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("checking state of container {name}"))?;

        if !output.status.success() {
            return Ok(ContainerState::NotCreated);
        }

        Ok(
            if String::from_utf8_lossy(&output.stdout).trim() == "true" {
                ContainerState::Running
            } else {
                ContainerState::Stopped
            },
        )
    }
}

impl Default for EngineAdapter {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl ContainerRuntime for EngineAdapter {
    fn get_container(&self, name: &str) -> Result<Container> {
        let state = self.container_state(name)?;
        Ok(Container::new(name.to_string(), state))
    }

    fn run_detached(&self, spec: &ContainerSpec) -> Result<()> {
        let args = run_args(spec, true);
        self.engine(args, &format!("starting container {}", spec.name))
    }

    fn run_attached(&self, spec: &ContainerSpec) -> Result<i32> {
        let args = run_args(spec, false);
        let status = self.engine_status(args, &format!("running container {}", spec.name))?;

        // Killed by a signal: no code to report
        Ok(status.code().unwrap_or(-1))
    }

    fn stop_container(&self, name: &str) -> Result<()> {
        self.engine(["stop", name], &format!("stopping container {name}"))
    }

    fn remove_container(&self, name: &str) -> Result<()> {
        let status = self.engine_quiet(["rm", "-f", name], &format!("removing container {name}"))?;
        self.ensure_success(status, &format!("removing container {name}"))
    }

    fn is_command_available(&self, cmd: &str) -> bool {
        Command::new(cmd)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

/// Builds the argument list for `<engine> run`.
pub fn run_args(spec: &ContainerSpec, detach: bool) -> Vec<String> {
    let mut args: Vec<String> = vec!["run".into()];

    if detach {
        args.push("-d".into());
    }

    args.push("--name".into());
    args.push(spec.name.into());

    if let Some(net) = spec.network {
        args.push("--network".into());
        args.push(net.into());
    }

    for port in spec.ports {
        args.push("-p".into());
        args.push(port.clone());
    }

    for env in spec.env {
        args.push("-e".into());
        args.push(env.clone());
    }

    for volume in spec.volumes {
        args.push("-v".into());
        args.push(volume.clone());
    }

    args.push(spec.image.into());
    args.extend(spec.command.iter().cloned());

    args
}
