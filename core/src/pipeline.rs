//! # Generation Pipeline
//!
//! Runs the view builders, enum expansion, model passes and route pattern
//! derivation over a loaded document, then plans and emits output files
//! through an opaque `Renderer`.

use crate::annotate::{expand_enum_variants, run_passes, standard_passes};
use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::model::{ApiDefinition, ModelDefinition};
use crate::routes::annotate_operations;
use crate::schema::SchemaDocument;
use crate::type_mapping::{ScalaTypeMapper, TypeMappings};
use crate::views::{build_apis, build_model};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// The fully annotated output of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedBundle {
    /// Annotated models in document order.
    pub models: Vec<ModelDefinition>,
    /// Operations grouped by tag.
    pub apis: Vec<ApiDefinition>,
    /// Template globals derived from the config.
    pub additional_properties: Map<String, Value>,
}

/// Turns a template plus context into source text.
pub trait Renderer {
    /// Renders `template` against `context`.
    fn render(&self, template: &str, context: &Value) -> AppResult<String>;
}

/// One file the renderer will be asked to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedFile {
    /// Template path, including the profile template directory.
    pub template: String,
    /// Output path.
    pub path: PathBuf,
    /// Render context.
    pub context: Value,
}

/// A rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path.
    pub path: PathBuf,
    /// Rendered text.
    pub contents: String,
}

/// Runs the annotation pipeline for one configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    mapper: ScalaTypeMapper,
}

impl Generator {
    /// Creates a generator; the type tables are built once here.
    pub fn new(config: GeneratorConfig) -> Self {
        let mappings = TypeMappings::with_overrides(&config.type_mappings, &config.import_mappings);
        Self {
            mapper: ScalaTypeMapper::new(mappings),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds and annotates every model and operation of `document`.
    ///
    /// All type resolution happens before the first pass, so malformed
    /// input fails without leaving a partially annotated bundle.
    pub fn run(&self, document: &SchemaDocument) -> AppResult<AnnotatedBundle> {
        let model_package = self.config.model_package();

        let mut models = document
            .models
            .iter()
            .map(|model| build_model(model, &self.mapper, &model_package))
            .collect::<AppResult<Vec<_>>>()?;
        let mut apis = build_apis(&document.operations, &self.mapper, &model_package)?;

        expand_enum_variants(&mut models);
        run_passes(&mut models, &standard_passes(&model_package));
        for api in apis.iter_mut() {
            annotate_operations(&mut api.operations)?;
        }

        info!(
            generator = self.config.profile().name,
            models = models.len(),
            apis = apis.len(),
            "annotated document"
        );
        Ok(AnnotatedBundle {
            models,
            apis,
            additional_properties: self.config.additional_properties(),
        })
    }
}

fn context_with(bundle: &AnnotatedBundle, key: &str, value: Value) -> Value {
    let mut context = bundle.additional_properties.clone();
    context.insert(key.to_string(), value);
    Value::Object(context)
}

/// Lists every file the renderer will produce for `bundle`.
///
/// Model and API templates get the template globals plus a `model` or `api`
/// entry; supporting files get the globals plus the whole bundle.
pub fn plan_files(bundle: &AnnotatedBundle, config: &GeneratorConfig) -> AppResult<Vec<PlannedFile>> {
    let profile = config.profile();
    let template_path = |template: &str| format!("{}/{}", profile.template_dir, template);
    let mut planned = Vec::new();

    let model_folder = config.model_file_folder();
    for model in &bundle.models {
        let value = serde_json::to_value(model)?;
        for template in profile.model_templates {
            planned.push(PlannedFile {
                template: template_path(template.template),
                path: model_folder.join(format!("{}{}", model.class_name, template.suffix)),
                context: context_with(bundle, "model", value.clone()),
            });
        }
    }

    let api_folder = config.api_file_folder();
    for api in &bundle.apis {
        let value = serde_json::to_value(api)?;
        for template in profile.api_templates {
            planned.push(PlannedFile {
                template: template_path(template.template),
                path: api_folder.join(format!("{}{}", api.class_name, template.suffix)),
                context: context_with(bundle, "api", value.clone()),
            });
        }
    }

    let output = config.output_folder();
    let bundle_value = json!({ "models": &bundle.models, "apis": &bundle.apis });
    for file in config.supporting_files() {
        planned.push(PlannedFile {
            template: template_path(&file.template),
            path: output.join(file.relative_path()),
            context: context_with(bundle, "bundle", bundle_value.clone()),
        });
    }

    debug!(files = planned.len(), "planned output files");
    Ok(planned)
}

/// Renders every planned file.
pub fn emit(
    bundle: &AnnotatedBundle,
    config: &GeneratorConfig,
    renderer: &dyn Renderer,
) -> AppResult<Vec<GeneratedFile>> {
    plan_files(bundle, config)?
        .into_iter()
        .map(|file| {
            let contents = renderer.render(&file.template, &file.context)?;
            Ok(GeneratedFile {
                path: file.path,
                contents,
            })
        })
        .collect()
}

/// Writes rendered files, creating parent folders as needed.
pub fn write_files(files: &[GeneratedFile]) -> AppResult<()> {
    for file in files {
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file.path, &file.contents)?;
        debug!(path = %file.path.display(), "wrote file");
    }
    info!(count = files.len(), "wrote generated files");
    Ok(())
}
