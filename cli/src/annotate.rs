#![deny(missing_docs)]

//! # Annotate Command
//!
//! Runs the pipeline and writes the annotated bundle as JSON.

use std::fs;
use std::path::PathBuf;

use cdd_scala_core::Generator;
use tracing::info;

use crate::args::GeneratorArgs;
use crate::error::CliResult;

/// Arguments for the annotate command.
#[derive(clap::Args, Debug, Clone)]
pub struct AnnotateArgs {
    /// Input and generator settings.
    #[clap(flatten)]
    pub common: GeneratorArgs,

    /// Write the JSON here instead of stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

/// Produces the annotated bundle as pretty JSON.
pub fn annotate_json(args: &GeneratorArgs) -> CliResult<String> {
    let config = args.generator_config()?;
    let document = args.load_document()?;
    let bundle = Generator::new(config).run(&document)?;
    Ok(serde_json::to_string_pretty(&bundle)?)
}

/// Executes the annotate command.
pub fn execute(args: &AnnotateArgs) -> CliResult<()> {
    let json = annotate_json(&args.common)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
            info!(path = %path.display(), "wrote annotated bundle");
        }
        None => println!("{}", json),
    }
    Ok(())
}
