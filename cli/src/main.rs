#![deny(missing_docs)]

//! # CDD Scala CLI
//!
//! Command Line Interface for the schema-to-Scala generator.
//!
//! Supported Commands:
//! - `annotate`: Runs the pipeline and dumps the annotated bundle as JSON.
//! - `routes`: Prints the route matching pattern of every operation.
//! - `plan`: Lists the files a renderer would produce.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod annotate;
mod args;
mod error;
mod logging;
mod plan;
mod routes;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Schema-to-Scala generator CLI")]
struct Cli {
    /// Enable debug logging.
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Annotate a description and print the bundle as JSON.
    Annotate(annotate::AnnotateArgs),
    /// Print derived route patterns.
    Routes(routes::RoutesArgs),
    /// List the files that would be generated.
    Plan(plan::PlanArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Commands::Annotate(args) => annotate::execute(args)?,
        Commands::Routes(args) => routes::execute(args)?,
        Commands::Plan(args) => plan::execute(args)?,
    }

    Ok(())
}
