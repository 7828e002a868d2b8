//! Standard catalog storage and building.
//!
//! The catalog contains definitions of known smart-contract interface
//! standards with their functions, events and reference ABI. An embedded
//! catalog is compiled into the binary, but custom catalogs can also be
//! loaded from JSON files.
//!
//! ## Embedded Catalog
//!
//! The default catalog includes:
//!
//! - **Tokens**: ERC-20, ERC-721, ERC-1155
//! - **Registries and proxies**: ERC-1820, ERC-1822 (stagnant), ERC-1967
//! - **Access control**: the OpenZeppelin owner module
//!
//! ## Example
//!
//! ```rust,no_run
//! use eip_solver::StandardCatalog;
//! use eip_solver::core::types::StandardId;
//!
//! // Load embedded catalog
//! let catalog = StandardCatalog::load_embedded().unwrap();
//!
//! // List all standards
//! for standard in catalog.list() {
//!     println!("{} ({} tokens)", standard.id, standard.token_count());
//! }
//!
//! // Get a specific standard
//! let erc20 = catalog.get(&StandardId::new("ERC20"));
//! ```
//!
//! ## Custom Catalogs
//!
//! Custom catalogs can be created by exporting the embedded catalog and
//! adding standards built from ABI files:
//!
//! ```rust,no_run
//! use eip_solver::StandardCatalog;
//! use eip_solver::catalog::builder::StandardBuilder;
//! use std::path::Path;
//!
//! let mut catalog = StandardCatalog::load_embedded().unwrap();
//!
//! let mut builder = StandardBuilder::new("ERC165", "ERC-165 Standard Interface Detection").unwrap();
//! builder.add_abi_file(Path::new("IERC165.json")).unwrap();
//! catalog.register(builder.build().unwrap()).unwrap();
//!
//! std::fs::write("my_catalog.json", catalog.to_json().unwrap()).unwrap();
//! let custom = StandardCatalog::load_from_file(Path::new("my_catalog.json")).unwrap();
//! ```

pub mod builder;
pub mod store;
