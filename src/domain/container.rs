#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    Stopped,
    NotCreated,
}

#[derive(Debug, Clone)]
pub struct Container {
    pub name: String,
    pub state: ContainerState,
}

impl Container {
    pub fn new(name: String, state: ContainerState) -> Self {
        Self { name, state }
    }

    pub fn exists(&self) -> bool {
        self.state != ContainerState::NotCreated
    }
}

/// Everything the engine needs to launch one container.
#[derive(Debug, Clone)]
pub struct ContainerSpec<'a> {
    pub name: &'a str,
    pub image: &'a str,
    pub ports: &'a [String],
    pub env: &'a [String],
    pub network: Option<&'a str>,
    pub volumes: &'a [String],
    /// Arguments passed after the image reference
    pub command: &'a [String],
}

/// The web application probed for its API schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceContainer {
    pub name: String,
    pub image: String,
    pub ports: Vec<String>,
    pub env: Vec<String>,
}

impl ServiceContainer {
    pub fn to_spec(&self) -> ContainerSpec<'_> {
        ContainerSpec {
            name: &self.name,
            image: &self.image,
            ports: &self.ports,
            env: &self.env,
            network: None,
            volumes: &[],
            command: &[],
        }
    }
}

/// The code generator container, minus its per-run arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorContainer {
    pub name: String,
    pub image: String,
    pub network: Option<String>,
    pub volumes: Vec<String>,
}

impl GeneratorContainer {
    pub fn to_spec<'a>(&'a self, command: &'a [String]) -> ContainerSpec<'a> {
        ContainerSpec {
            name: &self.name,
            image: &self.image,
            ports: &[],
            env: &[],
            network: self.network.as_deref(),
            volumes: &self.volumes,
            command,
        }
    }
}
