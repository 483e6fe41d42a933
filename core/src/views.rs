//! # View Builders
//!
//! Turns loaded schemas into the annotated definitions consumed by the
//! renderer. All type resolution happens here, so malformed input surfaces
//! before any annotation pass runs.

use crate::error::AppResult;
use crate::model::{
    ApiDefinition, EnumMetadata, ModelDefinition, OperationDefinition, ParameterView,
    PropertyView,
};
use crate::naming::{
    decapitalize, enum_name, escape, escape_text, to_api_name, to_model_name,
    to_operation_nickname, to_param_name, to_var_name,
};
use crate::primitives::is_language_primitive;
use crate::routes::split_path;
use crate::schema::{
    ModelSchema, OperationSchema, ParamLocation, ParameterSchema, PrimitiveType, PropertySchema,
    SchemaKind,
};
use crate::type_mapping::TypeMapper;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// Follows container item schemas down to the first non-container node.
fn leaf_schema(schema: &PropertySchema) -> AppResult<&PropertySchema> {
    let mut current = schema;
    while current.is_container() {
        current = current.items()?;
    }
    Ok(current)
}

fn leaf_primitive(leaf: &PropertySchema) -> AppResult<Option<PrimitiveType>> {
    match leaf.kind {
        SchemaKind::Primitive | SchemaKind::Enum => leaf.primitive_type().map(Some),
        _ => Ok(None),
    }
}

/// Records the imports needed to use `schema`.
///
/// Mapped types use the import table; model references import from the
/// model package.
pub fn collect_imports(
    schema: &PropertySchema,
    mapper: &dyn TypeMapper,
    model_package: &str,
    imports: &mut IndexSet<String>,
) -> AppResult<()> {
    let leaf = leaf_schema(schema)?;
    let leaf_type = mapper.resolve(leaf)?;
    if let Some(import) = mapper.import_for(&leaf_type) {
        imports.insert(import.to_string());
    } else if leaf.kind == SchemaKind::Reference {
        imports.insert(format!("{}.{}", model_package, leaf_type));
    }
    Ok(())
}

/// Builds the view of one model property.
pub fn build_property(schema: &PropertySchema, mapper: &dyn TypeMapper) -> AppResult<PropertyView> {
    let data_type = mapper.resolve(schema)?;
    let leaf = leaf_schema(schema)?;
    let leaf_type = mapper.resolve(leaf)?;
    let primitive = leaf_primitive(leaf)?;
    let is_container = schema.is_container();
    let is_enum = schema.kind == SchemaKind::Enum;

    let base_type = if is_container {
        mapper.container_name(schema.kind)
    } else {
        data_type.clone()
    };

    let complex_type = (leaf.kind == SchemaKind::Reference).then(|| leaf_type.clone());
    let is_string = !is_container && primitive.is_some_and(PrimitiveType::is_string_family);

    Ok(PropertyView {
        name: to_var_name(&schema.name),
        base_name: schema.name.clone(),
        data_type,
        base_type,
        complex_type,
        format: schema.format.clone(),
        description: schema.description.as_deref().map(escape_text),
        required: schema.required,
        is_string,
        is_timestamp: false,
        is_reference: false,
        is_container,
        is_list_container: schema.kind == SchemaKind::Array,
        is_map_container: schema.kind == SchemaKind::Map,
        is_primitive_type: is_language_primitive(&leaf_type),
        is_date: !is_container && primitive == Some(PrimitiveType::Date),
        is_date_time: !is_container && primitive == Some(PrimitiveType::DateTime),
        is_enum,
        enum_name: is_enum.then(|| enum_name(&schema.name)),
        allowable_values: schema.enum_values.clone(),
        enum_metadata: is_enum.then(EnumMetadata::default),
        raw_schema: schema.raw_schema.clone(),
    })
}

/// Builds one model definition.
pub fn build_model(
    model: &ModelSchema,
    mapper: &dyn TypeMapper,
    model_package: &str,
) -> AppResult<ModelDefinition> {
    let class_name = to_model_name(&model.name);
    let mut imports = IndexSet::new();
    let mut vars = Vec::with_capacity(model.properties.len());

    for property in &model.properties {
        vars.push(build_property(property, mapper)?);
        collect_imports(property, mapper, model_package, &mut imports)?;
    }

    let mut definition = ModelDefinition {
        name: model.name.clone(),
        class_var_name: escape(&decapitalize(&class_name)),
        class_name,
        description: model.description.as_deref().map(escape_text),
        vars,
        imports,
        ..Default::default()
    };

    if let Some(enum_schema) = &model.enum_schema {
        definition.is_enum = true;
        definition.data_type = Some(mapper.resolve(enum_schema)?);
        definition.allowable_values = enum_schema.enum_values.clone();
        definition.enum_metadata = Some(EnumMetadata::default());
    }

    debug!(
        model = %definition.class_name,
        properties = definition.vars.len(),
        imports = definition.imports.len(),
        "built model view"
    );
    Ok(definition)
}

fn build_parameter(param: &ParameterSchema, mapper: &dyn TypeMapper) -> AppResult<ParameterView> {
    Ok(ParameterView {
        param_name: to_param_name(&param.name),
        base_name: param.name.clone(),
        data_type: mapper.resolve(&param.schema)?,
        location: param.location.as_str().to_string(),
        required: param.required || param.location == ParamLocation::Path,
        description: param.description.as_deref().map(escape_text),
    })
}

/// Builds one operation definition; `route_pattern` is left empty.
pub fn build_operation(
    op: &OperationSchema,
    mapper: &dyn TypeMapper,
) -> AppResult<OperationDefinition> {
    let mut all_params = Vec::with_capacity(op.parameters.len());
    let mut path_params = Vec::new();
    let mut query_params = Vec::new();
    let mut body_param = None;

    for param in &op.parameters {
        let view = build_parameter(param, mapper)?;
        match param.location {
            ParamLocation::Path => path_params.push(view.clone()),
            ParamLocation::Query => query_params.push(view.clone()),
            ParamLocation::Body => body_param = Some(view.clone()),
            _ => {}
        }
        all_params.push(view);
    }

    let return_type = op
        .return_schema
        .as_ref()
        .map(|schema| mapper.resolve(schema))
        .transpose()?;

    Ok(OperationDefinition {
        operation_id: op.operation_id.clone(),
        nickname: to_operation_nickname(op.operation_id.as_deref(), &op.method, &op.path),
        http_method: op.method.to_uppercase(),
        path: op.path.clone(),
        path_segments: split_path(&op.path),
        summary: op.summary.as_deref().map(escape_text),
        tag: op.tag.clone(),
        all_params,
        path_params,
        query_params,
        body_param,
        return_type,
        route_pattern: String::new(),
    })
}

/// Builds operations grouped by tag, in order of first appearance.
pub fn build_apis(
    operations: &[OperationSchema],
    mapper: &dyn TypeMapper,
    model_package: &str,
) -> AppResult<Vec<ApiDefinition>> {
    let mut apis: IndexMap<String, ApiDefinition> = IndexMap::new();

    for op in operations {
        let definition = build_operation(op, mapper)?;
        let api = apis.entry(op.tag.clone()).or_insert_with(|| ApiDefinition {
            tag: op.tag.clone(),
            class_name: to_api_name(&op.tag),
            operations: Vec::new(),
            imports: IndexSet::new(),
        });

        let schemas = op
            .parameters
            .iter()
            .map(|p| &p.schema)
            .chain(op.return_schema.iter());
        for schema in schemas {
            collect_imports(schema, mapper, model_package, &mut api.imports)?;
        }
        api.operations.push(definition);
    }

    Ok(apis.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::type_mapping::ScalaTypeMapper;

    const PKG: &str = "com.acme.model";

    #[test]
    fn test_property_flags_for_list_of_refs() {
        let mapper = ScalaTypeMapper::default();
        let schema = PropertySchema::array("widgets", PropertySchema::reference("", "Widget"));
        let view = build_property(&schema, &mapper).unwrap();

        assert_eq!(view.data_type, "List[Widget]");
        assert_eq!(view.base_type, "List");
        assert_eq!(view.complex_type.as_deref(), Some("Widget"));
        assert!(view.is_container);
        assert!(view.is_list_container);
        assert!(!view.is_string);
        assert!(!view.is_primitive_type);
    }

    #[test]
    fn test_string_property_view() {
        let mapper = ScalaTypeMapper::default();
        let schema = PropertySchema::primitive("display_name", "string").with_required(true);
        let view = build_property(&schema, &mapper).unwrap();

        assert_eq!(view.name, "displayName");
        assert_eq!(view.base_name, "display_name");
        assert_eq!(view.data_type, "String");
        assert!(view.is_string);
        assert!(view.is_primitive_type);
        assert!(view.required);
        assert!(view.enum_metadata.is_none());
    }

    #[test]
    fn test_enum_property_view() {
        let mapper = ScalaTypeMapper::default();
        let schema = PropertySchema::enumeration("order_status", "string", ["OPEN", "CLOSED"]);
        let view = build_property(&schema, &mapper).unwrap();

        assert!(view.is_enum);
        assert_eq!(view.enum_name.as_deref(), Some("OrderStatus"));
        assert_eq!(view.allowable_values, vec!["OPEN", "CLOSED"]);
        assert!(view.enum_metadata.is_some());
    }

    #[test]
    fn test_model_imports() {
        let mapper = ScalaTypeMapper::default();
        let model = ModelSchema {
            name: "order".into(),
            description: Some("An \"order\"".into()),
            properties: vec![
                PropertySchema::primitive("placed_at", "string").with_format("timestamp"),
                PropertySchema::reference("customer", "Customer"),
                PropertySchema::map("notes", PropertySchema::primitive("", "string")),
            ],
            enum_schema: None,
        };
        let def = build_model(&model, &mapper, PKG).unwrap();

        assert_eq!(def.class_name, "Order");
        assert_eq!(def.class_var_name, "order");
        assert_eq!(def.description.as_deref(), Some("An \\\"order\\\""));
        let imports: Vec<&str> = def.imports.iter().map(String::as_str).collect();
        assert_eq!(imports, vec!["java.time.Instant", "com.acme.model.Customer"]);
    }

    #[test]
    fn test_reserved_class_var_name() {
        let mapper = ScalaTypeMapper::default();
        let model = ModelSchema {
            name: "Type".into(),
            description: None,
            properties: Vec::new(),
            enum_schema: None,
        };
        let def = build_model(&model, &mapper, PKG).unwrap();
        assert_eq!(def.class_var_name, "`type`");
    }

    #[test]
    fn test_enum_model() {
        let mapper = ScalaTypeMapper::default();
        let model = ModelSchema {
            name: "Priority".into(),
            description: None,
            properties: Vec::new(),
            enum_schema: Some(PropertySchema::enumeration("Priority", "integer", ["1", "2"])),
        };
        let def = build_model(&model, &mapper, PKG).unwrap();
        assert!(def.is_enum);
        assert_eq!(def.data_type.as_deref(), Some("Int"));
        assert_eq!(def.allowable_values, vec!["1", "2"]);
    }

    #[test]
    fn test_malformed_property_fails_the_model() {
        let mapper = ScalaTypeMapper::default();
        let mut broken = PropertySchema::array("tags", PropertySchema::primitive("", "string"));
        broken.item_schema = None;
        let model = ModelSchema {
            name: "Pet".into(),
            description: None,
            properties: vec![broken],
            enum_schema: None,
        };
        assert!(matches!(
            build_model(&model, &mapper, PKG),
            Err(AppError::MissingItemSchema(_))
        ));
    }

    fn op(method: &str, path: &str, tag: &str) -> OperationSchema {
        OperationSchema {
            operation_id: None,
            method: method.into(),
            path: path.into(),
            summary: None,
            tag: tag.into(),
            parameters: Vec::new(),
            return_schema: None,
        }
    }

    #[test]
    fn test_operation_view() {
        let mapper = ScalaTypeMapper::default();
        let mut schema = op("get", "/users/{user_id}", "users");
        schema.parameters.push(ParameterSchema {
            name: "user_id".into(),
            location: ParamLocation::Path,
            required: false,
            description: None,
            schema: PropertySchema::primitive("user_id", "integer").with_format("int64"),
        });
        schema.return_schema = Some(PropertySchema::reference("", "User"));

        let def = build_operation(&schema, &mapper).unwrap();
        assert_eq!(def.http_method, "GET");
        assert_eq!(def.nickname, "getUsersUserId");
        assert_eq!(def.path_segments, vec!["users", "{user_id}"]);
        assert_eq!(def.path_params.len(), 1);
        assert_eq!(def.path_params[0].param_name, "userId");
        assert_eq!(def.path_params[0].data_type, "Long");
        assert!(def.path_params[0].required);
        assert_eq!(def.return_type.as_deref(), Some("User"));
        assert!(def.route_pattern.is_empty());
    }

    #[test]
    fn test_apis_grouped_by_tag_in_order() {
        let mapper = ScalaTypeMapper::default();
        let mut create = op("post", "/pets", "pets");
        create.return_schema = Some(PropertySchema::reference("", "Pet"));
        let ops = vec![
            op("get", "/pets", "pets"),
            op("get", "/store/inventory", "store"),
            create,
        ];
        let apis = build_apis(&ops, &mapper, PKG).unwrap();

        assert_eq!(apis.len(), 2);
        assert_eq!(apis[0].class_name, "PetsApi");
        assert_eq!(apis[0].operations.len(), 2);
        assert_eq!(apis[1].class_name, "StoreApi");
        assert!(apis[0].imports.contains("com.acme.model.Pet"));
    }
}
