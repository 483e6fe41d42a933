#![deny(missing_docs)]

//! # Shared Arguments
//!
//! Flags common to every subcommand: the input description and the
//! generator settings layered over an optional config file.

use std::fs;
use std::path::PathBuf;

use cdd_scala_core::{load_document_file, GeneratorConfig, GeneratorVariant, SchemaDocument};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Input and generator settings.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GeneratorArgs {
    /// Path to the Swagger 2.0 / OpenAPI 3 description (YAML or JSON).
    #[clap(long, env = "CDD_SCALA_SPEC")]
    pub spec: PathBuf,

    /// Generator variant: `client` or `server`.
    #[clap(long, env = "CDD_SCALA_VARIANT")]
    pub variant: Option<GeneratorVariant>,

    /// Root package of the generated sources.
    #[clap(long, env = "CDD_SCALA_PACKAGE")]
    pub package: Option<String>,

    /// Do not request serialization support files.
    #[clap(long)]
    pub no_serialization: bool,

    /// Output root for generated files.
    #[clap(long, env = "CDD_SCALA_OUTPUT")]
    pub output_folder: Option<PathBuf>,

    /// YAML/JSON generator config; explicit flags take precedence.
    #[clap(long, env = "CDD_SCALA_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GeneratorArgs {
    /// Builds the effective generator configuration.
    pub fn generator_config(&self) -> CliResult<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::General(format!(
                        "Config file not found: {:?}",
                        path
                    )));
                }
                GeneratorConfig::from_yaml_str(&fs::read_to_string(path)?)?
            }
            None => GeneratorConfig::default(),
        };

        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if let Some(package) = &self.package {
            config.invoker_package = Some(package.clone());
        }
        if self.no_serialization {
            config.include_serialization = false;
        }
        if let Some(output) = &self.output_folder {
            config.output_folder = Some(output.clone());
        }

        debug!(?config, "effective generator config");
        Ok(config)
    }

    /// Loads the API description.
    pub fn load_document(&self) -> CliResult<SchemaDocument> {
        if !self.spec.exists() {
            return Err(CliError::General(format!(
                "API description not found: {:?}",
                self.spec
            )));
        }
        Ok(load_document_file(&self.spec)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("gen.yaml");
        fs::write(
            &config_path,
            "variant: client\ninvokerPackage: com.file\nincludeSerialization: true\n",
        )
        .unwrap();

        let args = GeneratorArgs {
            config: Some(config_path),
            package: Some("com.flag".into()),
            no_serialization: true,
            ..Default::default()
        };
        let config = args.generator_config().unwrap();

        assert_eq!(config.variant, GeneratorVariant::Client);
        assert_eq!(config.invoker_package(), "com.flag");
        assert!(!config.include_serialization);
    }

    #[test]
    fn test_missing_config_file() {
        let args = GeneratorArgs {
            config: Some(PathBuf::from("/nonexistent/gen.yaml")),
            ..Default::default()
        };
        assert!(matches!(
            args.generator_config(),
            Err(CliError::General(_))
        ));
    }

    #[test]
    fn test_missing_spec_file() {
        let args = GeneratorArgs {
            spec: PathBuf::from("/nonexistent/api.yaml"),
            ..Default::default()
        };
        assert!(matches!(args.load_document(), Err(CliError::General(_))));
    }
}
