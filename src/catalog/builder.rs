//! Standard builder for creating catalog entries from ABI documents.
//!
//! The `StandardBuilder` collates the functions and events of one or more
//! ABI documents (for example an interface split across `IERC20` and
//! `IERC20Metadata`) and produces a `Standard` with the combined
//! declarations and the raw ABI it was built from.

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::core::signature::Signature;
use crate::core::standard::{Standard, StandardError};
use crate::core::types::StandardId;
use crate::parsing::abi::{abi_entries, interface_from_entries, ParseError};
use crate::utils::validation::{validate_abi_content, validate_standard_id, ValidationError};

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid standard: {0}")]
    Invalid(#[from] StandardError),
}

/// Record of one ABI document fed to the builder
#[derive(Debug, Clone)]
pub struct InputRecord {
    pub source: String,
    pub functions_found: usize,
    pub events_found: usize,
    pub duplicates_skipped: usize,
    pub overloads_skipped: usize,
}

/// Builder that collates signatures from multiple ABI documents
#[derive(Debug)]
pub struct StandardBuilder {
    id: StandardId,
    name: String,
    url: String,
    stagnant: bool,

    functions: Vec<Signature>,
    events: Vec<Signature>,

    /// Function and event names already declared, for de-duplication
    seen: HashSet<String>,

    /// Raw ABI entries in input order
    entries: Vec<serde_json::Value>,

    inputs_processed: Vec<InputRecord>,
    warnings: Vec<String>,
}

impl StandardBuilder {
    /// Create a new builder with required fields
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::Validation` if the ID is not a valid standard ID.
    pub fn new(id: &str, name: impl Into<String>) -> Result<Self, BuilderError> {
        Ok(Self {
            id: validate_standard_id(id)?,
            name: name.into(),
            url: String::new(),
            stagnant: false,
            functions: Vec::new(),
            events: Vec::new(),
            seen: HashSet::new(),
            entries: Vec::new(),
            inputs_processed: Vec::new(),
            warnings: Vec::new(),
        })
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn stagnant(mut self, stagnant: bool) -> Self {
        self.stagnant = stagnant;
        self
    }

    /// Add an ABI file
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::Io` if the file cannot be read, or any error
    /// from [`StandardBuilder::add_abi_text`].
    pub fn add_abi_file(&mut self, path: &Path) -> Result<(), BuilderError> {
        let content = std::fs::read(path)?;
        let text = validate_abi_content(&content)?;
        self.add_abi_text(&path.display().to_string(), text)
    }

    /// Add an ABI document, skipping signatures already added
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::Parse` if the document is not a valid ABI.
    pub fn add_abi_text(&mut self, source: &str, text: &str) -> Result<(), BuilderError> {
        let entries = abi_entries(text)?;
        let interface = interface_from_entries(&self.name, entries.clone())?;

        let mut record = InputRecord {
            source: source.to_string(),
            functions_found: interface.functions.len(),
            events_found: interface.events.len(),
            duplicates_skipped: 0,
            overloads_skipped: 0,
        };

        // Candidates are matched by name, once each, so only the first
        // declaration of a name can ever score.
        for (signature, is_event) in interface
            .functions
            .into_iter()
            .map(|f| (f, false))
            .chain(interface.events.into_iter().map(|e| (e, true)))
        {
            let declared = if is_event {
                &self.events
            } else {
                &self.functions
            };
            let kind = if is_event { "event" } else { "function" };
            if !self.seen.insert(format!("{kind}:{}", signature.name)) {
                let first = declared.iter().find(|s| s.name == signature.name);
                if first.is_some_and(|f| f.display_signature() == signature.display_signature()) {
                    record.duplicates_skipped += 1;
                } else {
                    record.overloads_skipped += 1;
                    self.warnings.push(format!(
                        "{source}: overloaded {kind} {} skipped, keeping the first declaration",
                        signature.display_signature()
                    ));
                }
                continue;
            }
            if is_event {
                self.events.push(signature);
            } else {
                self.functions.push(signature);
            }
        }

        if interface_is_empty(&record) {
            self.warnings
                .push(format!("{source}: no functions or events found"));
        }
        if record.duplicates_skipped > 0 {
            tracing::debug!(
                "{}: skipped {} duplicate signatures",
                source,
                record.duplicates_skipped
            );
        }

        self.entries.extend(entries);
        self.inputs_processed.push(record);
        Ok(())
    }

    /// Build the final standard
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingField` if no ABI was added, or
    /// `BuilderError::Invalid` if the result has nothing to score against.
    pub fn build(self) -> Result<Standard, BuilderError> {
        if self.inputs_processed.is_empty() {
            return Err(BuilderError::MissingField("No ABI added".to_string()));
        }

        let abi = serde_json::to_string(&self.entries).map_err(ParseError::from)?;
        let standard = Standard::new(self.id.0, self.name)
            .with_url(self.url)
            .with_stagnant(self.stagnant)
            .with_functions(self.functions)
            .with_events(self.events)
            .with_abi(abi);

        standard.validate()?;
        Ok(standard)
    }

    /// Get summary of build
    #[must_use]
    pub fn summary(&self) -> BuildSummary {
        BuildSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            inputs: self.inputs_processed.clone(),
            functions: self.functions.len(),
            events: self.events.len(),
            maximum_tokens: self
                .functions
                .iter()
                .chain(&self.events)
                .map(Signature::token_weight)
                .sum(),
            warnings: self.warnings.clone(),
        }
    }
}

fn interface_is_empty(record: &InputRecord) -> bool {
    record.functions_found == 0 && record.events_found == 0
}

/// Summary of the build process
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub id: StandardId,
    pub name: String,
    pub inputs: Vec<InputRecord>,
    pub functions: usize,
    pub events: usize,
    pub maximum_tokens: usize,
    pub warnings: Vec<String>,
}

impl std::fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Standard Builder Summary")?;
        writeln!(f, "========================")?;
        writeln!(f, "ID:       {}", self.id)?;
        writeln!(f, "Name:     {}", self.name)?;
        writeln!(f)?;

        writeln!(f, "Inputs:")?;
        for (i, input) in self.inputs.iter().enumerate() {
            writeln!(
                f,
                "  [{}] {} -> {} functions, {} events, {} duplicates skipped, {} overloads skipped",
                i + 1,
                input.source,
                input.functions_found,
                input.events_found,
                input.duplicates_skipped,
                input.overloads_skipped
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Signatures: {} functions, {} events", self.functions, self.events)?;
        writeln!(f, "Maximum tokens: {}", self.maximum_tokens)?;

        writeln!(f, "Warnings: {}", self.warnings.len())?;
        for warning in &self.warnings {
            writeln!(f, "  - {warning}")?;
        }

        Ok(())
    }
}
