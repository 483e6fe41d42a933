#![deny(missing_docs)]

//! # Plan Command
//!
//! Lists every file the renderer would produce, without rendering.

use cdd_scala_core::{plan_files, Generator, PlannedFile};

use crate::args::GeneratorArgs;
use crate::error::CliResult;

/// Arguments for the plan command.
#[derive(clap::Args, Debug, Clone)]
pub struct PlanArgs {
    /// Input and generator settings.
    #[clap(flatten)]
    pub common: GeneratorArgs,
}

/// Plans the output files for the given settings.
pub fn planned_files(args: &GeneratorArgs) -> CliResult<Vec<PlannedFile>> {
    let config = args.generator_config()?;
    let document = args.load_document()?;
    let generator = Generator::new(config);
    let bundle = generator.run(&document)?;
    Ok(plan_files(&bundle, generator.config())?)
}

/// Executes the plan command.
pub fn execute(args: &PlanArgs) -> CliResult<()> {
    for file in planned_files(&args.common)? {
        println!("{} <- {}", file.path.display(), file.template);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdd_scala_core::GeneratorVariant;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_planned_files_for_client() {
        let dir = tempdir().unwrap();
        let spec = dir.path().join("api.yaml");
        fs::write(
            &spec,
            "swagger: '2.0'\ndefinitions:\n  Tag: {type: object, properties: {name: {type: string}}}\n",
        )
        .unwrap();

        let args = GeneratorArgs {
            spec,
            variant: Some(GeneratorVariant::Client),
            package: Some("org.demo".into()),
            no_serialization: true,
            output_folder: Some("gen".into()),
            config: None,
        };
        let planned = planned_files(&args).unwrap();
        let paths: Vec<&Path> = planned.iter().map(|f| f.path.as_path()).collect();

        assert_eq!(
            paths,
            vec![
                Path::new("gen/src/main/scala/org/demo/model/Tag.scala"),
                Path::new("gen/build.sbt"),
            ]
        );
    }
}
