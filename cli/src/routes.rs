#![deny(missing_docs)]

//! # Routes Command
//!
//! Prints the derived route pattern of every operation.

use cdd_scala_core::{AnnotatedBundle, Generator};

use crate::args::GeneratorArgs;
use crate::error::CliResult;

/// Arguments for the routes command.
#[derive(clap::Args, Debug, Clone)]
pub struct RoutesArgs {
    /// Input and generator settings.
    #[clap(flatten)]
    pub common: GeneratorArgs,
}

/// One `METHOD path => pattern` line per operation.
pub fn route_lines(bundle: &AnnotatedBundle) -> Vec<String> {
    bundle
        .apis
        .iter()
        .flat_map(|api| api.operations.iter())
        .map(|op| format!("{} {} => {}", op.http_method, op.path, op.route_pattern))
        .collect()
}

/// Executes the routes command.
pub fn execute(args: &RoutesArgs) -> CliResult<()> {
    let config = args.common.generator_config()?;
    let document = args.common.load_document()?;
    let bundle = Generator::new(config).run(&document)?;

    for line in route_lines(&bundle) {
        println!("{}", line);
    }
    Ok(())
}
