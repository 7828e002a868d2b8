use serde::{Deserialize, Serialize};

use crate::core::signature::Signature;

/// The declared functions and events of a contract under test.
///
/// Built by the caller (or parsed from an ABI) and only ever read by the
/// matcher. A [`crate::matching::discovery::Discovery`] carries a separate,
/// freshly reconstructed instance annotated with match flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInterface {
    pub name: String,

    #[serde(default)]
    pub functions: Vec<Signature>,

    #[serde(default)]
    pub events: Vec<Signature>,
}

impl ContractInterface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            events: Vec::new(),
        }
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

    /// First declared function with the given name
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Signature> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// First declared event with the given name
    #[must_use]
    pub fn event(&self, name: &str) -> Option<&Signature> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Total number of declared functions and events
    #[must_use]
    pub fn signature_count(&self) -> usize {
        self.functions.len() + self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.events.is_empty()
    }
}
