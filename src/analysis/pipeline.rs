//! The snowball tokenizer pipeline.
//!
//! [`SnowballTokenizer`] wraps a delegate [`Tokenizer`], drives it over the
//! input and relays each raw token through the [`RewriteStage`] to the
//! caller's sink. Because it implements [`Tokenizer`] itself, a pipeline can
//! be used anywhere a plain tokenizer is expected.
//!
//! # Architecture
//!
//! ```text
//! text ─▶ delegate ─▶ raw TokenEvent ─▶ RewriteStage ─▶ sink
//!                                         │      │
//!                              StopWordOracle  StemmerCascade
//! ```
//!
//! Early termination requested by the sink is handed straight back to the
//! delegate, which stops consuming input within the same call.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use snowcascade::analysis::pipeline::SnowballTokenizer;
//! use snowcascade::analysis::rewrite::RewriteStage;
//! use snowcascade::analysis::stemmer::{Language, StemmerCascade};
//! use snowcascade::analysis::stop_words::MemoryStopWordStore;
//! use snowcascade::analysis::token::TokenizeMode;
//! use snowcascade::analysis::tokenizer::collect_tokens;
//! use snowcascade::analysis::tokenizer::unicode61::Unicode61Tokenizer;
//!
//! let stage = RewriteStage::new(StemmerCascade::new(&[Language::English]).unwrap(), 3);
//! let mut pipeline = SnowballTokenizer::new(
//!     Box::new(Unicode61Tokenizer::new()),
//!     stage,
//!     Arc::new(MemoryStopWordStore::english()),
//! );
//!
//! let tokens = collect_tokens(&mut pipeline, "The running foxes jump", TokenizeMode::DOCUMENT).unwrap();
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_ref()).collect();
//! assert_eq!(texts, vec!["the", "run", "fox", "jump"]);
//! ```

use std::sync::Arc;

use log::{debug, trace};

use crate::analysis::rewrite::{RewriteStage, stop_words_active};
use crate::analysis::stop_words::{StopWordOracle, StopWordStore};
use crate::analysis::token::{Flow, TokenEvent, TokenizeMode};
use crate::analysis::tokenizer::{TokenSink, Tokenizer};
use crate::error::Result;

/// Name under which the pipeline registers itself.
pub const SNOWBALL_TOKENIZER_NAME: &str = "snowball";

/// A pipeline instance: delegate tokenizer, rewrite stage and stop-word
/// oracle for one tokenization session owner.
pub struct SnowballTokenizer {
    delegate: Box<dyn Tokenizer>,
    stage: RewriteStage,
    oracle: StopWordOracle,
}

impl std::fmt::Debug for SnowballTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballTokenizer")
            .field("delegate", &self.delegate.name())
            .field("stage", &self.stage)
            .field("oracle", &self.oracle)
            .finish()
    }
}

impl SnowballTokenizer {
    /// Assemble a pipeline. No stop-word handle is established yet.
    pub fn new(
        delegate: Box<dyn Tokenizer>,
        stage: RewriteStage,
        stop_words: Arc<dyn StopWordStore>,
    ) -> Self {
        debug!(
            "creating snowball pipeline over '{}' for {:?}",
            delegate.name(),
            stage.cascade().languages()
        );
        SnowballTokenizer {
            delegate,
            stage,
            oracle: StopWordOracle::new(stop_words),
        }
    }

    /// The rewrite stage.
    pub fn stage(&self) -> &RewriteStage {
        &self.stage
    }

    /// Name of the wrapped delegate.
    pub fn delegate_name(&self) -> &'static str {
        self.delegate.name()
    }

    /// Whether the stop-word lookup handle has been established.
    pub fn stop_words_connected(&self) -> bool {
        self.oracle.is_connected()
    }
}

impl Tokenizer for SnowballTokenizer {
    fn tokenize(
        &mut self,
        text: &str,
        mode: TokenizeMode,
        sink: &mut dyn TokenSink,
    ) -> Result<Flow> {
        let suppress_stop_words = stop_words_active(mode, text);
        trace!(
            "tokenizing {} bytes, mode {:#x}, stop words {}",
            text.len(),
            mode.bits(),
            if suppress_stop_words { "on" } else { "off" }
        );

        let SnowballTokenizer {
            delegate,
            stage,
            oracle,
        } = self;
        oracle.begin_session();

        delegate.tokenize(text, mode, &mut |event: TokenEvent<'_>| -> Result<Flow> {
            match stage.rewrite(event, suppress_stop_words, oracle)? {
                Some(rewritten) => sink.token(rewritten),
                None => Ok(Flow::Continue),
            }
        })
    }

    fn name(&self) -> &'static str {
        SNOWBALL_TOKENIZER_NAME
    }
}

impl Drop for SnowballTokenizer {
    fn drop(&mut self) {
        debug!(
            "releasing snowball pipeline (stop word handle {})",
            if self.oracle.is_connected() { "open" } else { "never opened" }
        );
    }
}
