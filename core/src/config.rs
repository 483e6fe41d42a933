//! # Generator Configuration
//!
//! Describes what differs between generator variants as data: package
//! defaults, template lists and the supporting artifacts requested from the
//! renderer. Everything derived (packages, folders, template globals) is
//! computed from the config on demand.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::str::FromStr;

/// The generator variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorVariant {
    /// An HTTP client library.
    Client,
    /// A routed HTTP server skeleton.
    #[default]
    Server,
}

impl FromStr for GeneratorVariant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" => Ok(GeneratorVariant::Client),
            "server" => Ok(GeneratorVariant::Server),
            other => Err(AppError::General(format!(
                "Unknown generator variant: {}",
                other
            ))),
        }
    }
}

/// A template rendered once per model or per API, with an output suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    /// Template path relative to the template directory.
    pub template: &'static str,
    /// Appended to the class name to form the file name.
    pub suffix: &'static str,
}

/// A template rendered once per generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportingFile {
    /// Template path relative to the template directory.
    pub template: String,
    /// Folder relative to the output root (empty for the root).
    pub folder: String,
    /// Output file name.
    pub destination: String,
}

impl SupportingFile {
    fn new(template: &str, folder: &str, destination: &str) -> Self {
        Self {
            template: template.to_string(),
            folder: folder.to_string(),
            destination: destination.to_string(),
        }
    }

    /// Output path relative to the output root.
    pub fn relative_path(&self) -> PathBuf {
        if self.folder.is_empty() {
            PathBuf::from(&self.destination)
        } else {
            PathBuf::from(&self.folder).join(&self.destination)
        }
    }
}

/// Static description of one generator variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantProfile {
    /// Generator name.
    pub name: &'static str,
    /// Template directory.
    pub template_dir: &'static str,
    /// Package used when none is configured.
    pub default_package: &'static str,
    /// Source folder between the output root and the package path.
    pub source_folder: Option<&'static str>,
    /// Per-model templates.
    pub model_templates: &'static [TemplateFile],
    /// Per-API templates.
    pub api_templates: &'static [TemplateFile],
    /// Supporting templates rendered at the output root.
    pub root_files: &'static [(&'static str, &'static str)],
    /// Supporting templates rendered into the invoker package folder.
    pub package_files: &'static [(&'static str, &'static str)],
    /// Template globals with fixed defaults.
    pub extra_properties: &'static [(&'static str, &'static str)],
}

const MODEL_TEMPLATES: &[TemplateFile] = &[TemplateFile {
    template: "model.mustache",
    suffix: ".scala",
}];

const CLIENT_PROFILE: VariantProfile = VariantProfile {
    name: "meetup-scala-client",
    template_dir: "meetup-scala-client",
    default_package: "com.meetup.client",
    source_folder: Some("src/main/scala"),
    model_templates: MODEL_TEMPLATES,
    api_templates: &[TemplateFile {
        template: "api.mustache",
        suffix: ".scala",
    }],
    root_files: &[("build.sbt.mustache", "build.sbt")],
    package_files: &[],
    extra_properties: &[
        ("client", "client"),
        ("clientOrganization", "com.meetup.client"),
        ("clientVersion", "1.0.0"),
    ],
};

const SERVER_PROFILE: VariantProfile = VariantProfile {
    name: "meetup-scala-server",
    template_dir: "meetup-scala",
    default_package: "com.meetup.server",
    source_folder: None,
    model_templates: MODEL_TEMPLATES,
    api_templates: &[TemplateFile {
        template: "server/apiRouter.mustache",
        suffix: "Router.scala",
    }],
    root_files: &[
        ("server/build.sbt.mustache", "build.sbt"),
        ("server/build.properties.mustache", "project/build.properties"),
        ("server/plugins.sbt.mustache", "project/plugins.sbt"),
        ("server/Makefile.mustache", "Makefile"),
    ],
    package_files: &[
        ("server/Service.mustache", "Service.scala"),
        ("server/Runner.mustache", "Runner.scala"),
        ("server/router.mustache", "Router.scala"),
        ("server/RainbowsHandler.mustache", "RainbowsHandler.scala"),
        ("server/RequestLoggingHandler.mustache", "RequestLoggingHandler.scala"),
        ("server/Server.mustache", "Server.scala"),
    ],
    extra_properties: &[],
};

const SERIALIZATION_FILES: &[(&str, &str)] = &[
    ("Codec.mustache", "Codec.scala"),
    ("Serializer.mustache", "Serializer.scala"),
    ("parserJson4s.mustache", "Parser.scala"),
    ("codecInstancesJson4s.mustache", "CodecInstances.scala"),
];

impl GeneratorVariant {
    /// The static profile for this variant.
    pub fn profile(self) -> &'static VariantProfile {
        match self {
            GeneratorVariant::Client => &CLIENT_PROFILE,
            GeneratorVariant::Server => &SERVER_PROFILE,
        }
    }
}

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Which generator profile to use.
    pub variant: GeneratorVariant,
    /// Root package; the profile default when unset.
    pub invoker_package: Option<String>,
    /// Whether serialization support artifacts are requested.
    pub include_serialization: bool,
    /// Output root; `generated-code/<profile name>` when unset.
    pub output_folder: Option<PathBuf>,
    /// Extra schema-token -> type entries.
    pub type_mappings: IndexMap<String, String>,
    /// Extra type -> qualified import entries.
    pub import_mappings: IndexMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            variant: GeneratorVariant::default(),
            invoker_package: None,
            include_serialization: true,
            output_folder: None,
            type_mappings: IndexMap::new(),
            import_mappings: IndexMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// A default config for `variant`.
    pub fn for_variant(variant: GeneratorVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Parses a YAML (or JSON) config document.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Parse(format!("Failed to parse generator config: {}", e)))
    }

    /// The variant profile.
    pub fn profile(&self) -> &'static VariantProfile {
        self.variant.profile()
    }

    /// The root package.
    pub fn invoker_package(&self) -> &str {
        self.invoker_package
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(self.profile().default_package)
    }

    /// Package for generated models.
    pub fn model_package(&self) -> String {
        format!("{}.model", self.invoker_package())
    }

    /// Package for generated APIs.
    pub fn api_package(&self) -> String {
        format!("{}.api", self.invoker_package())
    }

    /// The invoker package as a relative folder.
    pub fn invoker_folder(&self) -> String {
        self.invoker_package().replace('.', "/")
    }

    /// Output root.
    pub fn output_folder(&self) -> PathBuf {
        self.output_folder
            .clone()
            .unwrap_or_else(|| PathBuf::from("generated-code").join(self.profile().name))
    }

    fn source_root(&self) -> PathBuf {
        let root = self.output_folder();
        match self.profile().source_folder {
            Some(src) => root.join(src),
            None => root,
        }
    }

    /// Folder that receives model sources.
    pub fn model_file_folder(&self) -> PathBuf {
        package_path(self.source_root(), &self.model_package())
    }

    /// Folder that receives API sources.
    pub fn api_file_folder(&self) -> PathBuf {
        package_path(self.source_root(), &self.api_package())
    }

    /// Every supporting file requested from the renderer.
    pub fn supporting_files(&self) -> Vec<SupportingFile> {
        let profile = self.profile();
        let invoker_folder = self.invoker_folder();

        let mut files: Vec<SupportingFile> = profile
            .root_files
            .iter()
            .map(|(template, dest)| SupportingFile::new(template, "", dest))
            .collect();

        let package_files = profile.package_files.iter();
        let serialization_files = SERIALIZATION_FILES
            .iter()
            .filter(|_| self.include_serialization);
        files.extend(
            serialization_files
                .chain(package_files)
                .map(|(template, dest)| SupportingFile::new(template, &invoker_folder, dest)),
        );
        files
    }

    /// Template globals derived from the settings.
    pub fn additional_properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("invokerPackage".into(), self.invoker_package().into());
        props.insert("modelPackage".into(), self.model_package().into());
        props.insert("apiPackage".into(), self.api_package().into());
        props.insert("generatorName".into(), self.profile().name.into());
        props.insert(
            "includeSerialization".into(),
            Value::Bool(self.include_serialization),
        );
        if self.include_serialization {
            props.insert("json4s".into(), "true".into());
            props.insert("jsonTypePackage".into(), "org.json4s".into());
            props.insert("jsonType".into(), "JValue".into());
        }
        for (key, value) in self.profile().extra_properties {
            props.insert((*key).into(), (*value).into());
        }
        props
    }
}

fn package_path(root: PathBuf, package: &str) -> PathBuf {
    package.split('.').fold(root, |path, part| path.join(part))
}
