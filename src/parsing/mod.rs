//! Parsers for contract interface descriptions.
//!
//! - **Solidity ABI JSON**: the compiler's ABI array, or a build artifact
//!   carrying it under an `abi` field
//!
//! ## Example
//!
//! ```rust,no_run
//! use eip_solver::parsing::abi::{parse_abi_file, parse_abi_text};
//! use std::path::Path;
//!
//! // Parse from a file; the interface is named after the file stem
//! let interface = parse_abi_file(Path::new("MyToken.json")).unwrap();
//!
//! // Or from raw text
//! let abi = r#"[{"type":"function","name":"totalSupply","outputs":[{"type":"uint256"}]}]"#;
//! let interface = parse_abi_text("MyToken", abi).unwrap();
//! ```
//!
//! ## Type Canonicalisation
//!
//! | ABI type | Canonical form |
//! |----------|----------------|
//! | `uint256` | `uint256` |
//! | `tuple` with `address`, `uint256` | `(address,uint256)` |
//! | `tuple[]` with `bytes32` | `(bytes32)[]` |

pub mod abi;
