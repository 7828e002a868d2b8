//! # eip-solver
//!
//! A library for identifying which interface standards a smart contract implements.
//!
//! A contract's ABI is usually all that is known about it. It might claim to be a
//! token, but the only way to tell is to compare its functions and events with
//! what ERC-20, ERC-721 or ERC-1155 declare, and real contracts rarely match a
//! standard exactly: outputs are left out, parameters are named differently,
//! events go missing.
//!
//! `eip-solver` handles this by scoring the ABI against a catalog of known
//! standards. Every name and parameter type the standard declares is worth a
//! number of tokens, and the share of tokens the contract reproduces gives a
//! confidence tier.
//!
//! ## Features
//!
//! - **Token scoring**: Names, input types, `indexed` flags and outputs all count
//! - **Confidence tiers**: `perfect`, `high`, `medium`, `low` and `no_confidence`
//! - **Annotated results**: The standard's declarations, marked with what was found
//! - **Single-function checks**: Score one function, across overloads
//! - **Custom catalogs**: Build new standards from ABI files
//!
//! ## Example
//!
//! ```rust,no_run
//! use eip_solver::{ConformanceEngine, StandardCatalog, StandardId};
//! use eip_solver::parsing::abi::parse_abi_text;
//!
//! // Load the embedded catalog of known standards
//! let catalog = StandardCatalog::load_embedded().unwrap();
//!
//! // Parse a contract ABI
//! let abi = r#"[{"type":"function","name":"totalSupply","inputs":[],
//!               "outputs":[{"name":"","type":"uint256"}]}]"#;
//! let contract = parse_abi_text("MyToken", abi).unwrap();
//!
//! // Score it against every standard
//! let engine = ConformanceEngine::new(&catalog);
//! for d in engine.check_all(&contract) {
//!     println!("{}: {} ({:.1}%)", d.standard, d.confidence, d.confidence_points * 100.0);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Standard catalog storage and building
//! - [`core`]: Core data types for signatures, interfaces and standards
//! - [`matching`]: Conformance engine and scoring
//! - [`parsing`]: ABI parsing
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::StandardCatalog;
pub use core::interface::ContractInterface;
pub use core::signature::{Parameter, Signature};
pub use core::standard::Standard;
pub use core::types::*;
pub use matching::discovery::{Codec, Discovery, FunctionDiscovery};
pub use matching::engine::{ConformanceEngine, MatchingConfig};
pub use matching::scoring::OutputMatching;
