use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::core::interface::ContractInterface;
use crate::core::signature::{Parameter, Signature};
use crate::utils::validation::{
    check_parameter_limit, check_signature_limit, validate_abi_content, ValidationError,
    MAX_TUPLE_DEPTH,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ABI format: {0}")]
    InvalidFormat(String),

    #[error("Rejected input: {0}")]
    Rejected(#[from] ValidationError),

    #[error("Limit exceeded: {0}")]
    TooLarge(String),
}

#[derive(Debug, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default = "default_entry_type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiParam>,
}

#[derive(Debug, Deserialize)]
struct AbiParam {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    indexed: bool,
    #[serde(default)]
    components: Vec<AbiParam>,
}

const UNEXPECTED_DOCUMENT: &str = "expected an ABI array or an object with an 'abi' field";

fn default_entry_type() -> String {
    "function".to_string()
}

/// Parse an ABI file into a contract interface named after the file stem
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_abi_text`].
pub fn parse_abi_file(path: &Path) -> Result<ContractInterface, ParseError> {
    let content = std::fs::read(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    parse_abi_bytes(name, &content)
}

/// Parse raw bytes, applying the size and encoding checks first
///
/// # Errors
///
/// Returns `ParseError::Rejected` for oversized, empty or non-UTF-8 input,
/// or any error from [`parse_abi_text`].
pub fn parse_abi_bytes(name: &str, content: &[u8]) -> Result<ContractInterface, ParseError> {
    let text = validate_abi_content(content)?;
    parse_abi_text(name, text)
}

/// Split an ABI document into its raw entries.
///
/// Accepts either the bare JSON array or a compiler artifact object with an
/// `abi` field.
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON, or
/// `ParseError::InvalidFormat` for any other document shape.
pub fn abi_entries(text: &str) -> Result<Vec<serde_json::Value>, ParseError> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    let entries = match document {
        serde_json::Value::Object(mut artifact) => artifact.remove("abi"),
        array => Some(array),
    };
    match entries {
        Some(serde_json::Value::Array(entries)) => Ok(entries),
        _ => Err(ParseError::InvalidFormat(UNEXPECTED_DOCUMENT.into())),
    }
}

/// Parse a Solidity ABI document into a contract interface.
///
/// Functions and events are kept in document order; constructors,
/// fallbacks, receive and error entries are skipped.
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON, `ParseError::InvalidFormat`
/// for an unexpected document shape or entry type, or `ParseError::TooLarge`
/// when a signature, parameter or nesting limit is exceeded.
pub fn parse_abi_text(name: &str, text: &str) -> Result<ContractInterface, ParseError> {
    interface_from_entries(name, abi_entries(text)?)
}

/// Build a contract interface from entries returned by [`abi_entries`]
///
/// # Errors
///
/// Same as [`parse_abi_text`] minus the document-level checks.
pub fn interface_from_entries(
    name: &str,
    entries: Vec<serde_json::Value>,
) -> Result<ContractInterface, ParseError> {
    let mut interface = ContractInterface::new(name);
    for value in entries {
        let entry: AbiEntry = serde_json::from_value(value)?;
        let is_event = match entry.kind.as_str() {
            "function" => false,
            "event" => true,
            "constructor" | "fallback" | "receive" | "error" => continue,
            other => {
                return Err(ParseError::InvalidFormat(format!(
                    "unknown ABI entry type '{other}'"
                )))
            }
        };

        if let Some(message) = check_signature_limit(interface.signature_count()) {
            return Err(ParseError::TooLarge(message));
        }
        if entry.name.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "{} entry without a name",
                entry.kind
            )));
        }
        if let Some(message) = check_parameter_limit(&entry.name, entry.inputs.len())
            .or_else(|| check_parameter_limit(&entry.name, entry.outputs.len()))
        {
            return Err(ParseError::TooLarge(message));
        }

        let signature = Signature::new(entry.name)
            .with_inputs(convert_params(&entry.inputs)?)
            .with_outputs(convert_params(&entry.outputs)?);
        if is_event {
            interface.events.push(signature);
        } else {
            interface.functions.push(signature);
        }
    }

    tracing::debug!(
        "Parsed ABI '{}': {} functions, {} events",
        interface.name,
        interface.functions.len(),
        interface.events.len()
    );
    Ok(interface)
}

fn convert_params(params: &[AbiParam]) -> Result<Vec<Parameter>, ParseError> {
    params
        .iter()
        .map(|p| {
            Ok(Parameter {
                ty: canonical_type(p, 0)?,
                indexed: p.indexed,
                matched: false,
            })
        })
        .collect()
}

/// Canonical type string: tuples become `(t1,t2,...)` plus any array suffix
fn canonical_type(param: &AbiParam, depth: usize) -> Result<String, ParseError> {
    let Some(suffix) = param.ty.strip_prefix("tuple") else {
        return Ok(param.ty.clone());
    };
    if depth >= MAX_TUPLE_DEPTH {
        return Err(ParseError::TooLarge(format!(
            "tuple nesting exceeds maximum depth of {MAX_TUPLE_DEPTH}"
        )));
    }
    let components = param
        .components
        .iter()
        .map(|c| canonical_type(c, depth + 1))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("({}){suffix}", components.join(",")))
}
