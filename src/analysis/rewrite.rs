//! Per-token filter and rewrite stage.
//!
//! For every raw token the stage decides, in order:
//!
//! 1. tokens shorter than the minimum length are suppressed,
//! 2. stop words are suppressed when stop-word suppression is active for the
//!    call (a failed lookup aborts the call),
//! 3. everything else is passed through the stemmer cascade.
//!
//! Offsets and flags are never modified; only the text may change.

use std::borrow::Cow;

use crate::analysis::stemmer::StemmerCascade;
use crate::analysis::stop_words::{StopWordOracle, StopWordStatus};
use crate::analysis::token::{TokenEvent, TokenizeMode};
use crate::error::{CascadeError, Result};

/// Default minimum token length in bytes.
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 3;

/// Decide once per call whether stop words are suppressed.
///
/// Only plain (non-prefix) queries without a space are eligible: a query
/// containing a space is treated as a phrase, where dropping stop words
/// would break exact phrase matching.
pub fn stop_words_active(mode: TokenizeMode, text: &str) -> bool {
    mode.is_query() && !mode.is_prefix() && !text.contains(' ')
}

/// The filter/rewrite stage of a pipeline instance.
#[derive(Debug)]
pub struct RewriteStage {
    cascade: StemmerCascade,
    min_token_length: usize,
}

impl RewriteStage {
    /// Create a stage from a cascade and minimum token length.
    pub fn new(cascade: StemmerCascade, min_token_length: usize) -> Self {
        RewriteStage {
            cascade,
            min_token_length,
        }
    }

    /// The stemmer cascade used by this stage.
    pub fn cascade(&self) -> &StemmerCascade {
        &self.cascade
    }

    /// Minimum token length in bytes.
    pub fn min_token_length(&self) -> usize {
        self.min_token_length
    }

    /// Rewrite one token. `Ok(None)` means the token is suppressed.
    pub fn rewrite<'a>(
        &self,
        event: TokenEvent<'a>,
        suppress_stop_words: bool,
        oracle: &mut StopWordOracle,
    ) -> Result<Option<TokenEvent<'a>>> {
        if event.len() < self.min_token_length {
            return Ok(None);
        }

        if suppress_stop_words {
            match oracle.is_stop_word(&event.text) {
                StopWordStatus::Yes => return Ok(None),
                StopWordStatus::No => {}
                StopWordStatus::LookupFailed => {
                    return Err(CascadeError::stop_word_lookup(format!(
                        "could not check {:?} against the stop word store",
                        event.text
                    )));
                }
            }
        }

        let stemmed = match self.cascade.stem(&event.text) {
            Cow::Borrowed(_) => None,
            Cow::Owned(stemmed) => Some(stemmed),
        };
        Ok(Some(match stemmed {
            Some(text) => event.with_text(text),
            None => event,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::stemmer::Language;
    use crate::analysis::stop_words::MemoryStopWordStore;

    fn stage(min: usize) -> RewriteStage {
        RewriteStage::new(StemmerCascade::new(&[Language::English]).unwrap(), min)
    }

    #[test]
    fn test_stop_words_active() {
        assert!(stop_words_active(TokenizeMode::QUERY, "fox"));
        assert!(!stop_words_active(TokenizeMode::QUERY, "the fox"));
        assert!(!stop_words_active(
            TokenizeMode::QUERY | TokenizeMode::PREFIX,
            "the"
        ));
        assert!(!stop_words_active(TokenizeMode::DOCUMENT, "the"));
        // Only a plain space counts as a phrase separator.
        assert!(stop_words_active(TokenizeMode::QUERY, "the\tfox"));
    }

    #[test]
    fn test_short_tokens_suppressed() {
        let stage = stage(3);
        let mut oracle = StopWordOracle::new(Arc::new(MemoryStopWordStore::english()));
        let result = stage
            .rewrite(TokenEvent::new("is", 0, 2), false, &mut oracle)
            .unwrap();
        assert!(result.is_none());

        let kept = stage
            .rewrite(TokenEvent::new("the", 0, 3), false, &mut oracle)
            .unwrap();
        assert_eq!(kept.unwrap().text, "the");
    }

    #[test]
    fn test_stemming_keeps_offsets() {
        let stage = stage(3);
        let mut oracle = StopWordOracle::new(Arc::new(MemoryStopWordStore::english()));
        let event = stage
            .rewrite(TokenEvent::new("running", 4, 11), false, &mut oracle)
            .unwrap()
            .unwrap();
        assert_eq!(event.text, "run");
        assert_eq!((event.start_offset, event.end_offset), (4, 11));
    }

    #[test]
    fn test_stop_words_suppressed_when_active() {
        let stage = stage(2);
        let mut oracle = StopWordOracle::new(Arc::new(MemoryStopWordStore::english()));
        assert!(
            stage
                .rewrite(TokenEvent::new("the", 0, 3), true, &mut oracle)
                .unwrap()
                .is_none()
        );
        assert!(
            stage
                .rewrite(TokenEvent::new("the", 0, 3), false, &mut oracle)
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_lookup_failure_is_an_error() {
        let stage = stage(3);
        let mut oracle = StopWordOracle::new(Arc::new(MemoryStopWordStore::new()));
        let err = stage
            .rewrite(TokenEvent::new("fox", 0, 3), true, &mut oracle)
            .unwrap_err();
        assert!(matches!(err, CascadeError::StopWordLookupFailed(_)));

        // The store is never consulted when suppression is inactive.
        assert!(
            stage
                .rewrite(TokenEvent::new("fox", 0, 3), false, &mut oracle)
                .unwrap()
                .is_some()
        );
    }
}
