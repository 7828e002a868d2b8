//! Core data types for standard conformance checks.
//!
//! - [`Parameter`](signature::Parameter), [`Signature`](signature::Signature): typed function and event declarations
//! - [`ContractInterface`](interface::ContractInterface): the candidate contract being classified
//! - [`Standard`](standard::Standard): a reference interface from the catalog
//! - [`StandardId`](types::StandardId), [`ConfidenceLevel`](types::ConfidenceLevel): identifiers and result tiers
//!
//! ## Token Weights
//!
//! Every declaration has a fixed weight that bounds what a candidate can
//! score against it:
//!
//! | Element | Tokens |
//! |---------|--------|
//! | Name    | 1 |
//! | Input   | 2 for the type, 1 for matching `indexed` |
//! | Output  | 2 for the type |
//!
//! A standard's maximum is the sum over its functions and events, so
//! `transfer(address,uint256) returns (bool)` weighs 9 and
//! `Transfer(address indexed,address indexed,uint256)` weighs 10.

pub mod interface;
pub mod signature;
pub mod standard;
pub mod types;
