//! # snowcascade
//!
//! A stemming tokenizer pipeline for full-text search engines.
//!
//! ## Features
//!
//! - Multi-language Snowball stemming with first-length-change selection
//! - Minimum token length filtering
//! - Stop-word suppression for single-term queries
//! - Named tokenizer registry with `unicode61` and `ascii` delegates
//! - Auxiliary helpers for first-match lookup and token-range snippets
//! - Compressed blob format for stored document text

pub mod analysis;
pub mod auxiliary;
pub mod cli;
pub mod compress;
pub mod config;
pub mod error;
pub mod util;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
