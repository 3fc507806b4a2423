use std::fmt;
use std::str::FromStr;

/// A named unit of work in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CleanupFiles,
    StartService,
    GenerateClient,
    CleanupContainers,
    PackageClient,
}

impl Step {
    /// Declaration order; ties in the plan are broken by it.
    pub const ALL: [Step; 5] = [
        Step::CleanupFiles,
        Step::StartService,
        Step::GenerateClient,
        Step::CleanupContainers,
        Step::PackageClient,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Step::CleanupFiles => "cleanup-files",
            Step::StartService => "start-service",
            Step::GenerateClient => "generate-client",
            Step::CleanupContainers => "cleanup-containers",
            Step::PackageClient => "package-client",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Step::CleanupFiles => "delete previously generated output directories",
            Step::StartService => "start the service container and wait for its schema",
            Step::GenerateClient => "run the generator container against the schema",
            Step::CleanupContainers => "stop and remove both containers",
            Step::PackageClient => "package the generated client",
        }
    }

    /// Steps that must complete before this one runs
    pub fn dependencies(self) -> &'static [Step] {
        match self {
            Step::GenerateClient => &[Step::CleanupFiles, Step::StartService],
            Step::PackageClient => &[Step::GenerateClient],
            Step::CleanupFiles | Step::StartService | Step::CleanupContainers => &[],
        }
    }

    /// Step after which this one runs whenever both are planned
    pub fn triggered_by(self) -> Option<Step> {
        match self {
            Step::CleanupContainers => Some(Step::GenerateClient),
            _ => None,
        }
    }

    /// Step that must run before exit once this one has begun, whatever the outcome
    pub fn finalizer(self) -> Option<Step> {
        match self {
            Step::StartService => Some(Step::CleanupContainers),
            _ => None,
        }
    }

    fn triggers(self) -> impl Iterator<Item = Step> {
        Step::ALL
            .into_iter()
            .filter(move |s| s.triggered_by() == Some(self))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .into_iter()
            .find(|step| step.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Step::ALL.iter().map(|s| s.name()).collect();
                format!("unknown step '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Execution order for `target`: its dependencies in topological order, then
/// the target, with each triggered step placed right after its trigger.
pub fn plan(target: Step) -> Vec<Step> {
    let mut order = Vec::new();
    visit(target, &mut order);

    let mut planned = Vec::with_capacity(Step::ALL.len());
    for step in order {
        visit(step, &mut planned);
        for triggered in step.triggers() {
            visit(triggered, &mut planned);
        }
    }
    planned
}

fn visit(step: Step, order: &mut Vec<Step>) {
    if order.contains(&step) {
        return;
    }
    for dep in step.dependencies() {
        visit(*dep, order);
    }
    order.push(step);
}
