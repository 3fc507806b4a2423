use crate::domain::{
    Container, ContainerRuntime, ContainerSpec, ContainerState, HttpProbe, PackageRequest,
    PackagingTool,
};
use anyhow::{Result, anyhow, bail};
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct MockContainer {
    pub name: String,
    pub state: ContainerState,
    pub image: Option<String>,
    pub command: Vec<String>,
}

/// In-memory container engine that records every call as `"op:name"`.
#[derive(Debug)]
pub struct MockRuntime {
    containers: RwLock<HashMap<String, MockContainer>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
    exit_code: RwLock<i32>,
    output_dir: RwLock<Option<PathBuf>>,
    args: RwLock<HashMap<String, Vec<String>>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(HashMap::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
            exit_code: RwLock::new(0),
            output_dir: RwLock::new(None),
            args: RwLock::new(HashMap::new()),
        }
    }

    pub fn add_container(&self, name: &str, state: ContainerState) {
        self.containers.write().unwrap().insert(
            name.to_string(),
            MockContainer {
                name: name.to_string(),
                state,
                image: None,
                command: Vec::new(),
            },
        );
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    /// Exit code reported by attached runs
    pub fn set_exit_code(&self, code: i32) {
        *self.exit_code.write().unwrap() = code;
    }

    /// Directory an attached run creates when it exits with 0, standing in for generator output
    pub fn set_output_dir(&self, dir: PathBuf) {
        *self.output_dir.write().unwrap() = Some(dir);
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn get_state(&self, name: &str) -> Option<ContainerState> {
        self.containers
            .read()
            .unwrap()
            .get(name)
            .map(|c| c.state.clone())
    }

    /// Arguments of the most recent run of `name`
    pub fn last_command_args(&self, name: &str) -> Option<Vec<String>> {
        self.args.read().unwrap().get(name).cloned()
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }

    fn register(&self, spec: &ContainerSpec, state: ContainerState) {
        self.args
            .write()
            .unwrap()
            .insert(spec.name.to_string(), spec.command.to_vec());
        self.containers.write().unwrap().insert(
            spec.name.to_string(),
            MockContainer {
                name: spec.name.to_string(),
                state,
                image: Some(spec.image.to_string()),
                command: spec.command.to_vec(),
            },
        );
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for MockRuntime {
    fn get_container(&self, name: &str) -> Result<Container> {
        self.record_command(&format!("get_container:{}", name));
        self.check_fail("get_container")?;

        let state = self
            .containers
            .read()
            .unwrap()
            .get(name)
            .map(|c| c.state.clone())
            .unwrap_or(ContainerState::NotCreated);

        Ok(Container::new(name.to_string(), state))
    }

    fn run_detached(&self, spec: &ContainerSpec) -> Result<()> {
        self.record_command(&format!("run_detached:{}", spec.name));
        self.check_fail("run_detached")?;

        self.register(spec, ContainerState::Running);
        Ok(())
    }

    fn run_attached(&self, spec: &ContainerSpec) -> Result<i32> {
        self.record_command(&format!("run_attached:{}", spec.name));
        self.check_fail("run_attached")?;

        // Like `docker run` without --rm, the exited container keeps its name
        self.register(spec, ContainerState::Stopped);

        let code = *self.exit_code.read().unwrap();
        if code == 0 {
            if let Some(dir) = self.output_dir.read().unwrap().as_ref() {
                fs::create_dir_all(dir)?;
            }
        }
        Ok(code)
    }

    fn stop_container(&self, name: &str) -> Result<()> {
        self.record_command(&format!("stop:{}", name));
        self.check_fail("stop")?;

        if let Some(container) = self.containers.write().unwrap().get_mut(name) {
            container.state = ContainerState::Stopped;
        }
        Ok(())
    }

    fn remove_container(&self, name: &str) -> Result<()> {
        self.record_command(&format!("remove:{}", name));
        self.check_fail("remove")?;

        self.containers.write().unwrap().remove(name);
        Ok(())
    }

    fn is_command_available(&self, cmd: &str) -> bool {
        self.record_command(&format!("is_available:{}", cmd));
        true
    }
}

/// HTTP probe that replays a script of outcomes, then repeats a fallback.
#[derive(Debug)]
pub struct MockProbe {
    script: RwLock<VecDeque<std::result::Result<u16, String>>>,
    fallback: std::result::Result<u16, String>,
    urls: RwLock<Vec<String>>,
}

impl MockProbe {
    /// Plays `script` in order; once it runs out, the last entry keeps repeating
    pub fn with_script(script: Vec<std::result::Result<u16, String>>) -> Self {
        let fallback = script
            .last()
            .cloned()
            .unwrap_or_else(|| Err("connection refused".into()));
        Self {
            script: RwLock::new(script.into()),
            fallback,
            urls: RwLock::new(Vec::new()),
        }
    }

    pub fn always(outcome: std::result::Result<u16, String>) -> Self {
        Self::with_script(vec![outcome])
    }

    pub fn calls(&self) -> usize {
        self.urls.read().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.read().unwrap().clone()
    }
}

impl HttpProbe for MockProbe {
    fn get_status(&self, url: &str) -> Result<u16> {
        self.urls.write().unwrap().push(url.to_string());

        let outcome = self
            .script
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        outcome.map_err(|e| anyhow!(e))
    }
}

/// Packaging tool that records requests instead of running anything.
#[derive(Debug)]
pub struct MockPackager {
    requests: RwLock<Vec<PackageRequest>>,
    exit_code: RwLock<i32>,
}

impl MockPackager {
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(Vec::new()),
            exit_code: RwLock::new(0),
        }
    }

    pub fn set_exit_code(&self, code: i32) {
        *self.exit_code.write().unwrap() = code;
    }

    pub fn requests(&self) -> Vec<PackageRequest> {
        self.requests.read().unwrap().clone()
    }
}

impl Default for MockPackager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackagingTool for MockPackager {
    fn pack(&self, request: &PackageRequest) -> Result<i32> {
        self.requests.write().unwrap().push(request.clone());
        Ok(*self.exit_code.read().unwrap())
    }

    fn program(&self) -> &str {
        "dotnet"
    }
}
