use serde::{Deserialize, Serialize};

/// Tokens awarded for a signature name match
pub const NAME_TOKENS: usize = 1;

/// Tokens awarded for a parameter type found in the reference declaration
pub const TYPE_TOKENS: usize = 2;

/// Tokens awarded when an input's `indexed` flag agrees with the reference
pub const INDEXED_TOKENS: usize = 1;

/// A single typed parameter of a function or event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Canonical ABI type name (e.g. `address`, `uint256`, `(address,uint256)[]`)
    #[serde(rename = "type")]
    pub ty: String,

    /// Whether the parameter is part of an event's indexed topics
    #[serde(default)]
    pub indexed: bool,

    /// Set by the matcher on returned reconstructions
    #[serde(default)]
    pub matched: bool,
}

impl Parameter {
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            indexed: false,
            matched: false,
        }
    }

    /// An indexed event parameter
    pub fn indexed(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            indexed: true,
            matched: false,
        }
    }

    /// Copy of the declared type and `indexed` flag with the match state reset
    #[must_use]
    pub fn unmatched(&self) -> Self {
        Self {
            ty: self.ty.clone(),
            indexed: self.indexed,
            matched: false,
        }
    }
}

/// A named function or event declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,

    #[serde(default)]
    pub inputs: Vec<Parameter>,

    /// Return values; events have none
    #[serde(default)]
    pub outputs: Vec<Parameter>,

    #[serde(default)]
    pub matched: bool,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            matched: false,
        }
    }

    #[must_use]
    pub fn with_inputs(mut self, inputs: Vec<Parameter>) -> Self {
        self.inputs = inputs;
        self
    }

    #[must_use]
    pub fn with_outputs(mut self, outputs: Vec<Parameter>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Maximum tokens a candidate can score against this declaration.
    ///
    /// One for the name, type plus indexed-parity for every input, and type
    /// for every output.
    #[must_use]
    pub fn token_weight(&self) -> usize {
        NAME_TOKENS
            + self.inputs.len() * (TYPE_TOKENS + INDEXED_TOKENS)
            + self.outputs.len() * TYPE_TOKENS
    }

    /// Reconstruction of this declaration with every match flag cleared
    #[must_use]
    pub fn unmatched(&self) -> Self {
        Self {
            name: self.name.clone(),
            inputs: self.inputs.iter().map(Parameter::unmatched).collect(),
            outputs: self.outputs.iter().map(Parameter::unmatched).collect(),
            matched: false,
        }
    }

    /// Solidity-style rendering, e.g. `Transfer(address indexed,address indexed,uint256)`
    #[must_use]
    pub fn display_signature(&self) -> String {
        let render = |params: &[Parameter]| {
            params
                .iter()
                .map(|p| {
                    if p.indexed {
                        format!("{} indexed", p.ty)
                    } else {
                        p.ty.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(",")
        };

        if self.outputs.is_empty() {
            format!("{}({})", self.name, render(&self.inputs))
        } else {
            format!(
                "{}({}) returns ({})",
                self.name,
                render(&self.inputs),
                render(&self.outputs)
            )
        }
    }
}
