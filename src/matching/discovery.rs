//! Result records of conformance checks and their wire encodings.
//!
//! Both records have two lossless encodings: JSON for humans and scripts,
//! and a compact `bincode` form for service-to-service exchange. Decoding
//! either encoding yields a value equal to the original.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::core::interface::ContractInterface;
use crate::core::signature::Signature;
use crate::core::types::{ConfidenceLevel, StandardId};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),
}

/// Outcome of checking a whole contract interface against one standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discovery {
    pub standard: StandardId,
    pub confidence: ConfidenceLevel,
    /// `discovered_tokens / maximum_tokens`
    pub confidence_points: f64,
    /// Cutoff of the assigned tier
    pub threshold: f64,
    pub maximum_tokens: usize,
    pub discovered_tokens: usize,
    /// What the standard expected, annotated with what was found
    pub contract: ContractInterface,
}

/// Outcome of checking a single function against a standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDiscovery {
    pub standard: StandardId,
    pub confidence: ConfidenceLevel,
    pub confidence_points: f64,
    pub threshold: f64,
    /// Weight of the standard's function(s) with this name
    pub maximum_tokens: usize,
    pub discovered_tokens: usize,
    pub function: Signature,
}

impl Discovery {
    /// Whether any token was discovered
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.discovered_tokens > 0
    }

    /// Number of the standard's functions and events that were found
    #[must_use]
    pub fn matched_signatures(&self) -> usize {
        self.contract
            .functions
            .iter()
            .chain(&self.contract.events)
            .filter(|s| s.matched)
            .count()
    }

    /// Names of the standard's functions and events that were not found
    #[must_use]
    pub fn missing_signatures(&self) -> Vec<&str> {
        self.contract
            .functions
            .iter()
            .chain(&self.contract.events)
            .filter(|s| !s.matched)
            .map(|s| s.name.as_str())
            .collect()
    }
}

impl FunctionDiscovery {
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.discovered_tokens > 0
    }
}

/// JSON and binary encodings shared by both result records
pub trait Codec: Serialize + DeserializeOwned + Sized {
    /// Compact JSON
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Json` if serialization fails.
    fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Json` if serialization fails.
    fn to_json_pretty(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns `CodecError::Json` if the text is not a valid encoding.
    fn from_json(json: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact binary form
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Binary` if serialization fails.
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(self)?)
    }

    /// # Errors
    ///
    /// Returns `CodecError::Binary` if the bytes are not a valid encoding.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Codec for Discovery {}
impl Codec for FunctionDiscovery {}
impl Codec for Vec<Discovery> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::signature::Parameter;

    fn sample() -> Discovery {
        let mut transfer = Signature::new("transfer")
            .with_inputs(vec![Parameter::new("address"), Parameter::new("uint256")])
            .with_outputs(vec![Parameter::new("bool")]);
        transfer.matched = true;
        transfer.inputs[0].matched = true;

        Discovery {
            standard: StandardId::new("ERC20"),
            confidence: ConfidenceLevel::Low,
            confidence_points: 13.0 / 68.0,
            threshold: 0.1,
            maximum_tokens: 68,
            discovered_tokens: 13,
            contract: ContractInterface::new("Sample")
                .with_functions(vec![transfer, Signature::new("approve")]),
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = sample().to_json().unwrap();
        for field in [
            "\"standard\":\"ERC20\"",
            "\"confidence\":\"low\"",
            "\"confidence_points\"",
            "\"threshold\":0.1",
            "\"maximum_tokens\":68",
            "\"discovered_tokens\":13",
            "\"type\":\"address\"",
            "\"matched\":true",
        ] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
    }

    #[test]
    fn test_json_and_binary_agree() {
        let original = sample();
        let from_json = Discovery::from_json(&original.to_json_pretty().unwrap()).unwrap();
        let from_bytes = Discovery::from_bytes(&original.to_bytes().unwrap()).unwrap();
        assert_eq!(from_json, original);
        assert_eq!(from_bytes, original);
        assert_eq!(from_json, from_bytes);
    }

    #[test]
    fn test_json_preserves_every_token_ratio() {
        let mut discovery = sample();
        for maximum in 1..=200_usize {
            for discovered in 0..=maximum {
                #[allow(clippy::cast_precision_loss)]
                let points = discovered as f64 / maximum as f64;
                discovery.confidence_points = points;
                discovery.maximum_tokens = maximum;
                discovery.discovered_tokens = discovered;

                let decoded = Discovery::from_json(&discovery.to_json().unwrap()).unwrap();
                assert_eq!(
                    decoded.confidence_points.to_bits(),
                    points.to_bits(),
                    "{discovered}/{maximum} changed in JSON"
                );
                assert_eq!(decoded, discovery);
            }
        }
    }

    #[test]
    fn test_binary_is_more_compact() {
        let original = sample();
        assert!(original.to_bytes().unwrap().len() < original.to_json().unwrap().len());
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        assert!(matches!(
            Discovery::from_bytes(&[0xff, 0x01]),
            Err(CodecError::Binary(_))
        ));
        assert!(matches!(
            FunctionDiscovery::from_json("{"),
            Err(CodecError::Json(_))
        ));
    }

    #[test]
    fn test_summary_helpers() {
        let discovery = sample();
        assert!(discovery.is_found());
        assert_eq!(discovery.matched_signatures(), 1);
        assert_eq!(discovery.missing_signatures(), vec!["approve"]);
    }
}
