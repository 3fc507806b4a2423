use anyhow::Result;
use clap::{Parser, Subcommand};
use clientgen::cli::{self, GlobalOptions};
use clientgen::domain::Step;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "clientgen",
    version,
    about = "Generates and packages an API client from a throwaway service container"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs a step and everything it depends on (default: the whole pipeline)
    Run {
        #[arg(default_value_t = Step::PackageClient)]
        step: Step,
    },
    /// Prints the steps a run would execute, in order
    Plan {
        #[arg(default_value_t = Step::PackageClient)]
        step: Step,
    },
    /// Checks tools, generator config and leftover containers
    Doctor,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match cli.command.unwrap_or(Commands::Run {
        step: Step::PackageClient,
    }) {
        Commands::Run { step } => cli::run(&cli.global, step),
        Commands::Plan { step } => {
            cli::print_plan(step);
            Ok(())
        }
        Commands::Doctor => cli::doctor::doctor(&cli::load_config(&cli.global)?),
    }
}
