//! HTTP API for conformance checks.
//!
//! This module exposes the catalog and the conformance engine over a small
//! JSON API built on Axum. Check endpoints also answer in bincode when the
//! client sends `Accept: application/octet-stream`.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! eip-solver serve
//!
//! # Custom port and catalog
//! eip-solver serve --port 3000 --catalog my_catalog.json
//!
//! # Bind to all interfaces
//! eip-solver serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/standards` - List all standards in the catalog
//! - `GET /api/standards/{id}` - One standard with its declarations and ABI
//! - `POST /api/check` - Check an ABI against some or all standards
//! - `POST /api/check/function` - Check one function of an ABI against a standard

pub mod server;
