//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::issue::{ValidationIssue, ValidationResult};
use crate::process::ProcessingReport;
use crate::registry::{Category, NodeDefinition, NodeRegistry};

/// Structure-only validation of a workflow JSON string.
#[wasm_bindgen]
pub fn validate_structure(json: &str) -> JsValue {
    let result = match serde_json::from_str::<serde_json::Value>(json) {
        Ok(raw) => crate::validate::validate_structure(&raw),
        Err(err) => unparseable(err),
    };
    to_js(&ValidationDto::from(&result))
}

/// Full validation: structure, graph rules, and parameter rules.
#[wasm_bindgen]
pub fn validate_workflow(json: &str) -> JsValue {
    let result = match serde_json::from_str::<serde_json::Value>(json) {
        Ok(raw) => crate::validate::validate_raw(&raw),
        Err(err) => unparseable(err),
    };
    to_js(&ValidationDto::from(&result))
}

/// Graph analysis of a structurally well-formed workflow.
#[wasm_bindgen]
pub fn analyze_graph(json: &str) -> JsValue {
    match crate::parse::parse(json) {
        Ok(workflow) => to_js(&crate::analyze::analyze(&workflow)),
        Err(_) => JsValue::NULL,
    }
}

/// Validate and optionally auto-fix. Returns the (possibly mutated)
/// workflow document together with the processing report.
#[wasm_bindgen]
pub fn process_workflow(json: &str, auto_fix: bool) -> JsValue {
    let Ok(mut workflow) = crate::parse::parse(json) else {
        return JsValue::NULL;
    };
    let report = crate::process::process(&mut workflow, auto_fix);
    to_js(&ProcessResultDto {
        workflow: serde_json::to_value(&workflow).unwrap_or(serde_json::Value::Null),
        report: ReportDto::from(&report),
    })
}

#[wasm_bindgen]
pub fn get_node_by_type(type_name: &str) -> JsValue {
    match NodeRegistry::global().get(type_name) {
        Some(def) => to_js(&NodeDefinitionDto::from(def)),
        None => JsValue::NULL,
    }
}

#[wasm_bindgen]
pub fn get_nodes_by_category(category: &str) -> JsValue {
    let Some(category) = Category::parse(category) else {
        return JsValue::NULL;
    };
    let defs: Vec<NodeDefinitionDto> = NodeRegistry::global()
        .by_category(category)
        .into_iter()
        .map(NodeDefinitionDto::from)
        .collect();
    to_js(&defs)
}

#[wasm_bindgen]
pub fn search_nodes(query: &str) -> JsValue {
    let defs: Vec<NodeDefinitionDto> = NodeRegistry::global()
        .search(query)
        .into_iter()
        .map(NodeDefinitionDto::from)
        .collect();
    to_js(&defs)
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn unparseable(err: serde_json::Error) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.push(ValidationIssue::error(
        "INVALID_WORKFLOW",
        format!("Failed to parse workflow JSON: {err}"),
    ));
    result
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationDto {
    is_valid: bool,
    fixable: bool,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
    info: Vec<ValidationIssue>,
}

impl From<&ValidationResult> for ValidationDto {
    fn from(result: &ValidationResult) -> Self {
        ValidationDto {
            is_valid: result.is_valid(),
            fixable: result.fixable(),
            errors: result.errors.clone(),
            warnings: result.warnings.clone(),
            info: result.info.clone(),
        }
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportDto {
    initial_validation: ValidationDto,
    final_validation: ValidationDto,
    parameter_changes: crate::fix::ParameterFixReport,
    connection_changes: crate::fix::ConnectionFixReport,
    fix_applied: bool,
    summary: String,
}

impl From<&ProcessingReport> for ReportDto {
    fn from(report: &ProcessingReport) -> Self {
        ReportDto {
            initial_validation: ValidationDto::from(&report.initial_validation),
            final_validation: ValidationDto::from(&report.final_validation),
            parameter_changes: report.parameter_changes.clone(),
            connection_changes: report.connection_changes.clone(),
            fix_applied: report.fix_applied,
            summary: report.summary(),
        }
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessResultDto {
    workflow: serde_json::Value,
    report: ReportDto,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ParameterDto {
    name: &'static str,
    kind: crate::registry::ParamKind,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<serde_json::Value>,
    options: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<&'static str>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeDefinitionDto {
    #[serde(rename = "type")]
    type_name: &'static str,
    display_name: &'static str,
    description: &'static str,
    category: Category,
    keywords: &'static [&'static str],
    parameters: Vec<ParameterDto>,
    inputs: &'static [&'static str],
    outputs: &'static [&'static str],
}

impl From<&NodeDefinition> for NodeDefinitionDto {
    fn from(def: &NodeDefinition) -> Self {
        NodeDefinitionDto {
            type_name: def.type_name,
            display_name: def.display_name,
            description: def.description,
            category: def.category,
            keywords: def.keywords,
            parameters: def
                .parameters
                .iter()
                .map(|p| ParameterDto {
                    name: p.name,
                    kind: p.kind,
                    required: p.required,
                    default: p.default.map(|d| d.to_value()),
                    options: p.options,
                    placeholder: p.placeholder,
                })
                .collect(),
            inputs: def.inputs,
            outputs: def.outputs,
        }
    }
}
