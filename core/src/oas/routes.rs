#![deny(missing_docs)]

//! # Operation Extraction
//!
//! Walks the Paths Object and produces one `OperationSchema` per declared
//! method, merging path-level parameters and normalising Swagger 2.0 body
//! parameters and OAS 3 request bodies into a single `body` parameter.

use crate::error::AppResult;
use crate::oas::schemas::convert_schema;
use crate::oas::shims::{ShimDocument, ShimOperation, ShimParameter, ShimPathItem};
use crate::schema::{OperationSchema, ParamLocation, ParameterSchema, PropertySchema};
use tracing::{debug, warn};

/// Tag used for operations that declare none.
pub const DEFAULT_TAG: &str = "default";

/// Name given to an OAS 3 request body parameter.
pub const BODY_PARAM_NAME: &str = "body";

/// Merges path-level and operation-level parameters.
///
/// An operation parameter replaces a path-level one with the same name and
/// location; the rest keep their declared order.
fn merge_parameters<'a>(
    path_item: &'a ShimPathItem,
    operation: &'a ShimOperation,
) -> Vec<&'a ShimParameter> {
    let mut merged: Vec<&ShimParameter> = path_item.parameters.iter().collect();
    for param in &operation.parameters {
        match merged
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(slot) => *slot = param,
            None => merged.push(param),
        }
    }
    merged
}

fn convert_parameter(param: &ShimParameter) -> AppResult<Option<ParameterSchema>> {
    if let Some(reference) = &param.reference {
        warn!(reference = %reference, "skipping parameter reference");
        return Ok(None);
    }
    let location: ParamLocation = param.location.parse()?;
    let schema = convert_schema(&param.name, &param.value_schema(), param.required)?;
    Ok(Some(ParameterSchema {
        name: param.name.clone(),
        location,
        required: param.required,
        description: param.description.clone(),
        schema,
    }))
}

fn convert_request_body(operation: &ShimOperation) -> AppResult<Option<ParameterSchema>> {
    let Some(body) = &operation.request_body else {
        return Ok(None);
    };
    let Some(shim) = body.schema() else {
        return Ok(None);
    };
    Ok(Some(ParameterSchema {
        name: BODY_PARAM_NAME.to_string(),
        location: ParamLocation::Body,
        required: body.required,
        description: body.description.clone(),
        schema: convert_schema(BODY_PARAM_NAME, shim, body.required)?,
    }))
}

/// The payload schema of the first `2xx` response that declares one.
fn convert_return(operation: &ShimOperation) -> AppResult<Option<PropertySchema>> {
    let payload = operation
        .responses
        .iter()
        .filter(|(code, _)| code.starts_with('2'))
        .find_map(|(_, response)| response.payload());
    payload
        .map(|shim| convert_schema("", shim, false))
        .transpose()
}

fn convert_operation(
    path: &str,
    method: &str,
    path_item: &ShimPathItem,
    operation: &ShimOperation,
) -> AppResult<OperationSchema> {
    let mut parameters = Vec::new();
    for param in merge_parameters(path_item, operation) {
        if let Some(converted) = convert_parameter(param)? {
            parameters.push(converted);
        }
    }
    if let Some(body) = convert_request_body(operation)? {
        parameters.push(body);
    }

    Ok(OperationSchema {
        operation_id: operation.operation_id.clone(),
        method: method.to_string(),
        path: path.to_string(),
        summary: operation.summary.clone(),
        tag: operation
            .tags
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_TAG.to_string()),
        parameters,
        return_schema: convert_return(operation)?,
    })
}

/// Extracts every operation, in path then method order.
pub fn convert_operations(doc: &ShimDocument) -> AppResult<Vec<OperationSchema>> {
    let mut operations = Vec::new();
    for (path, item) in &doc.paths.items {
        for (method, operation) in item.operations() {
            let converted = convert_operation(path, method, item, operation)?;
            debug!(
                method = %method,
                path = %path,
                params = converted.parameters.len(),
                "converted operation"
            );
            operations.push(converted);
        }
    }
    Ok(operations)
}
