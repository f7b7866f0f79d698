mod adapters;
mod cli;
mod core;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    let result = match &args.command {
        Commands::Inspect {
            snapshot,
            plan,
            all,
        } => cli::commands::inspect::execute(snapshot, plan.as_deref(), *all),
        Commands::Check { snapshot, plan } => {
            cli::commands::check::execute(snapshot, plan, args.verbose)
        }
        Commands::Commit {
            snapshot,
            plan,
            output,
        } => cli::commands::commit::execute(snapshot, plan, output.as_deref()),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
