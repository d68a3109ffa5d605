//! Text analysis module for snowcascade.
//!
//! This module provides the tokenizer contract, the bundled delegate
//! tokenizers and the snowball pipeline that stems their output and drops
//! short tokens and query stop words.

pub mod pipeline;
pub mod registry;
pub mod rewrite;
pub mod stemmer;
pub mod stop_words;
pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use pipeline::SnowballTokenizer;
pub use registry::{SnowballFactory, TokenizerFactory, TokenizerRegistry, register_snowball};
pub use rewrite::RewriteStage;
pub use stemmer::{Language, StemmerCascade};
pub use stop_words::{FileStopWordStore, MemoryStopWordStore, StopWordOracle, StopWordStore};
pub use token::*;
pub use tokenizer::*;
