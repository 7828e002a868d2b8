//! Conformance engine and scoring.
//!
//! This module provides the core matching functionality:
//!
//! - [`ConformanceEngine`]: checks interfaces against catalog standards
//! - [`Discovery`] / [`FunctionDiscovery`]: result records with JSON and binary codecs
//! - [`scoring`]: the per-signature matchers
//!
//! ## Matching Algorithm
//!
//! Each function and event the standard declares is looked up by name in the
//! candidate interface. The first candidate with that name is scored and its
//! name is consumed, so a repeated name counts once. Within a signature:
//!
//! 1. **Name**: 1 token for the match itself
//! 2. **Inputs**: the first candidate input whose type appears anywhere in the
//!    declared inputs scores 2 tokens per declared slot, plus 1 when its
//!    `indexed` flag agrees with the declaration
//! 3. **Outputs**: 2 tokens per declared slot when the candidate's outputs
//!    carry a declared type (see [`OutputMatching`])
//!
//! ## Confidence
//!
//! `discovered / maximum` is classified into a tier:
//!
//! | Points | Tier |
//! |--------|------|
//! | 1.0 | perfect |
//! | >= 0.9 | high |
//! | >= 0.5 | medium |
//! | >= 0.1 | low |
//! | otherwise | no_confidence |
//!
//! ## Example
//!
//! ```rust,no_run
//! use eip_solver::{ConformanceEngine, StandardCatalog, StandardId};
//! use eip_solver::parsing::abi::parse_abi_file;
//! use std::path::Path;
//!
//! let catalog = StandardCatalog::load_embedded().unwrap();
//! let interface = parse_abi_file(Path::new("MyToken.json")).unwrap();
//!
//! let engine = ConformanceEngine::new(&catalog);
//! let (discovery, found) = engine.check(&StandardId::new("ERC20"), &interface).unwrap();
//!
//! if found {
//!     println!("{}: {} ({}/{} tokens)",
//!         discovery.standard,
//!         discovery.confidence,
//!         discovery.discovered_tokens,
//!         discovery.maximum_tokens
//!     );
//! }
//! ```

pub mod discovery;
pub mod engine;
pub mod scoring;

pub use discovery::{Codec, Discovery, FunctionDiscovery};
pub use engine::{ConformanceEngine, MatchingConfig};
pub use scoring::OutputMatching;
