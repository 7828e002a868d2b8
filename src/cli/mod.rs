//! Command-line interface for eip-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **check**: Score a contract ABI against one, several or all standards
//! - **function**: Score a single function of an ABI against a standard
//! - **catalog**: List, show, export or build standards in the catalog
//! - **serve**: Start the HTTP API
//!
//! ## Usage
//!
//! ```text
//! # Check an ABI against every known standard
//! eip-solver check MyToken.json
//!
//! # Only ERC-20, from a compiler artifact piped on stdin
//! cat out/MyToken.sol/MyToken.json | eip-solver check - --standard ERC20
//!
//! # JSON output for scripting
//! eip-solver check MyToken.json --min-confidence medium --format json
//!
//! # One function
//! eip-solver function MyToken.json transfer --standard ERC20
//!
//! # Start the API
//! eip-solver serve --port 8080
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::store::StandardCatalog;
use crate::core::interface::ContractInterface;
use crate::core::types::ConfidenceLevel;
use crate::matching::scoring::OutputMatching;
use crate::parsing::abi::{parse_abi_bytes, parse_abi_file};

pub mod catalog;
pub mod check;
pub mod function;

#[derive(Parser)]
#[command(name = "eip-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Identify which interface standards a smart contract implements")]
#[command(
    long_about = "eip-solver scores a contract's ABI against a catalog of interface standards (ERC-20, ERC-721, ERC-1155, ...).\n\nEach function and event the standard declares is looked up in the contract by name and compared by parameter types, giving:\n- A token score and the maximum achievable for the standard\n- A confidence tier: perfect, high, medium, low or no_confidence\n- The standard's declarations annotated with what was found"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a contract ABI against interface standards
    Check(check::CheckArgs),

    /// Check a single function of a contract ABI against a standard
    Function(function::FunctionArgs),

    /// Manage the standards catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Confidence tier argument for CLI
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ConfidenceArg {
    No,
    Low,
    Medium,
    High,
    Perfect,
}

impl From<ConfidenceArg> for ConfidenceLevel {
    fn from(arg: ConfidenceArg) -> Self {
        match arg {
            ConfidenceArg::No => ConfidenceLevel::No,
            ConfidenceArg::Low => ConfidenceLevel::Low,
            ConfidenceArg::Medium => ConfidenceLevel::Medium,
            ConfidenceArg::High => ConfidenceLevel::High,
            ConfidenceArg::Perfect => ConfidenceLevel::Perfect,
        }
    }
}

/// Output matching argument for CLI
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputMatchingArg {
    /// Only the first declared output is compared
    Compatible,
    /// Every output slot must find its type
    Strict,
}

impl From<OutputMatchingArg> for OutputMatching {
    fn from(arg: OutputMatchingArg) -> Self {
        match arg {
            OutputMatchingArg::Compatible => OutputMatching::Compatible,
            OutputMatchingArg::Strict => OutputMatching::Strict,
        }
    }
}

/// Load a custom catalog file, or the embedded catalog when none is given
pub(crate) fn load_catalog(path: Option<&Path>) -> anyhow::Result<StandardCatalog> {
    let catalog = if let Some(path) = path {
        StandardCatalog::load_from_file(path)?
    } else {
        StandardCatalog::load_embedded()?
    };
    Ok(catalog)
}

/// Read an ABI from a file, or from stdin when the path is `-`
pub(crate) fn read_interface(path: &Path) -> anyhow::Result<ContractInterface> {
    if path.to_string_lossy() == "-" {
        let mut buffer = Vec::new();
        std::io::stdin().read_to_end(&mut buffer)?;
        return Ok(parse_abi_bytes("stdin", &buffer)?);
    }
    if !path.exists() {
        anyhow::bail!("ABI file not found: {}", path.display());
    }
    Ok(parse_abi_file(path)?)
}
