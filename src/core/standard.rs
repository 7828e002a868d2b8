use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::interface::ContractInterface;
use crate::core::signature::Signature;
use crate::core::types::StandardId;

/// Reasons a standard cannot be scored against
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StandardError {
    #[error("standard id is empty")]
    EmptyId,

    #[error("standard '{0}' has no name")]
    MissingName(StandardId),

    #[error("standard '{0}' declares no functions or events")]
    NoSignatures(StandardId),

    #[error("standard '{id}' has an unnamed signature at position {position}")]
    UnnamedSignature { id: StandardId, position: usize },
}

/// A named reference interface (an EIP or a well-known module) in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standard {
    /// Unique identifier (e.g. `ERC20`)
    #[serde(alias = "type")]
    pub id: StandardId,

    /// Human-readable name (e.g. "ERC-20 Token Standard")
    pub name: String,

    /// Link to the standard's specification
    #[serde(default)]
    pub url: String,

    /// Whether the proposal has stalled
    #[serde(default)]
    pub stagnant: bool,

    /// Functions the standard declares, in declaration order
    #[serde(default)]
    pub functions: Vec<Signature>,

    /// Events the standard declares, in declaration order
    #[serde(default)]
    pub events: Vec<Signature>,

    /// Raw ABI document of a reference implementation; never interpreted by the matcher
    #[serde(default)]
    pub abi: String,
}

impl Standard {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: StandardId::new(id),
            name: name.into(),
            url: String::new(),
            stagnant: false,
            functions: Vec::new(),
            events: Vec::new(),
            abi: String::new(),
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn with_stagnant(mut self, stagnant: bool) -> Self {
        self.stagnant = stagnant;
        self
    }

    #[must_use]
    pub fn with_functions(mut self, functions: Vec<Signature>) -> Self {
        self.functions = functions;
        self
    }

    #[must_use]
    pub fn with_events(mut self, events: Vec<Signature>) -> Self {
        self.events = events;
        self
    }

    #[must_use]
    pub fn with_abi(mut self, abi: impl Into<String>) -> Self {
        self.abi = abi.into();
        self
    }

    #[must_use]
    pub fn is_stagnant(&self) -> bool {
        self.stagnant
    }

    #[must_use]
    pub fn abi(&self) -> &str {
        &self.abi
    }

    /// Maximum tokens a fully conforming interface scores against this standard
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.functions
            .iter()
            .chain(&self.events)
            .map(Signature::token_weight)
            .sum()
    }

    /// Maximum tokens for the function(s) declared under `name`; zero if none
    #[must_use]
    pub fn function_token_count(&self, name: &str) -> usize {
        self.functions
            .iter()
            .filter(|f| f.name == name)
            .map(Signature::token_weight)
            .sum()
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Signature> {
        self.functions.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn event(&self, name: &str) -> Option<&Signature> {
        self.events.iter().find(|e| e.name == name)
    }

    /// The standard's own declarations as a candidate interface
    #[must_use]
    pub fn as_interface(&self) -> ContractInterface {
        ContractInterface::new(self.name.clone())
            .with_functions(self.functions.iter().map(Signature::unmatched).collect())
            .with_events(self.events.iter().map(Signature::unmatched).collect())
    }

    /// Check that the standard can be scored against.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: `StandardError::EmptyId`,
    /// `StandardError::MissingName`, `StandardError::NoSignatures` or
    /// `StandardError::UnnamedSignature`.
    pub fn validate(&self) -> Result<(), StandardError> {
        if self.id.0.trim().is_empty() {
            return Err(StandardError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(StandardError::MissingName(self.id.clone()));
        }
        if self.functions.is_empty() && self.events.is_empty() {
            return Err(StandardError::NoSignatures(self.id.clone()));
        }
        if let Some(position) = self
            .functions
            .iter()
            .chain(&self.events)
            .position(|s| s.name.trim().is_empty())
        {
            return Err(StandardError::UnnamedSignature {
                id: self.id.clone(),
                position,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Standard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
