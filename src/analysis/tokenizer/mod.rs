//! Base tokenizer contract.
//!
//! A tokenizer splits input text into [`TokenEvent`]s and pushes each one
//! into a [`TokenSink`]. The sink answers with a [`Flow`]; on
//! [`Flow::Stop`] the tokenizer must stop consuming input right away and
//! return `Ok(Flow::Stop)`. A sink error aborts tokenization and is returned
//! unchanged.
//!
//! Tokens are delivered in strictly increasing `start_offset` order.
//!
//! # Examples
//!
//! ```
//! use snowcascade::analysis::token::{Flow, TokenEvent, TokenizeMode};
//! use snowcascade::analysis::tokenizer::Tokenizer;
//! use snowcascade::analysis::tokenizer::unicode61::Unicode61Tokenizer;
//! use snowcascade::error::Result;
//!
//! let mut tokenizer = Unicode61Tokenizer::new();
//! let mut words = Vec::new();
//! tokenizer
//!     .tokenize("Hello world", TokenizeMode::DOCUMENT, &mut |event: TokenEvent<'_>| -> Result<Flow> {
//!         words.push(event.text.into_owned());
//!         Ok(Flow::Continue)
//!     })
//!     .unwrap();
//! assert_eq!(words, vec!["hello", "world"]);
//! ```

use crate::analysis::token::{Flow, TokenEvent, TokenizeMode};
use crate::error::Result;

pub mod ascii;
pub mod unicode61;

pub use ascii::AsciiTokenizer;
pub use unicode61::Unicode61Tokenizer;

/// Consumer side of tokenization.
pub trait TokenSink {
    /// Receive one token.
    fn token(&mut self, event: TokenEvent<'_>) -> Result<Flow>;
}

impl<F> TokenSink for F
where
    F: FnMut(TokenEvent<'_>) -> Result<Flow>,
{
    fn token(&mut self, event: TokenEvent<'_>) -> Result<Flow> {
        self(event)
    }
}

/// Trait for tokenizers that push tokens into a sink.
///
/// Instances are not shared between threads while tokenizing; each thread
/// uses its own instance.
pub trait Tokenizer: Send {
    /// Tokenize `text`, pushing every token into `sink`.
    ///
    /// Returns `Flow::Stop` if the sink requested early termination.
    fn tokenize(&mut self, text: &str, mode: TokenizeMode, sink: &mut dyn TokenSink)
    -> Result<Flow>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Run `tokenizer` over `text` and collect owned copies of every token.
pub fn collect_tokens(
    tokenizer: &mut dyn Tokenizer,
    text: &str,
    mode: TokenizeMode,
) -> Result<Vec<TokenEvent<'static>>> {
    let mut tokens = Vec::new();
    tokenizer.tokenize(text, mode, &mut |event: TokenEvent<'_>| -> Result<Flow> {
        tokens.push(event.into_owned());
        Ok(Flow::Continue)
    })?;
    Ok(tokens)
}

/// Character-class overrides shared by the bundled tokenizers.
///
/// Separators win over token characters when a character appears in both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CharOverrides {
    token_chars: Vec<char>,
    separators: Vec<char>,
}

impl CharOverrides {
    pub(crate) fn add_token_chars(&mut self, chars: &str) {
        self.token_chars.extend(chars.chars());
    }

    pub(crate) fn add_separators(&mut self, chars: &str) {
        self.separators.extend(chars.chars());
    }

    /// `Some(is_token_char)` when `c` is overridden.
    pub(crate) fn classify(&self, c: char) -> Option<bool> {
        if self.separators.contains(&c) {
            Some(false)
        } else if self.token_chars.contains(&c) {
            Some(true)
        } else {
            None
        }
    }
}

/// Strip one level of single or double quotes from an argument value.
pub(crate) fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'-_'"), "-_");
        assert_eq!(unquote("\"x\""), "x");
        assert_eq!(unquote("'"), "'");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("'mixed\""), "'mixed\"");
    }

    #[test]
    fn test_char_overrides() {
        let mut overrides = CharOverrides::default();
        overrides.add_token_chars("-.");
        overrides.add_separators(".");
        assert_eq!(overrides.classify('-'), Some(true));
        assert_eq!(overrides.classify('.'), Some(false));
        assert_eq!(overrides.classify('a'), None);
    }

    #[test]
    fn test_collect_tokens() {
        let mut tokenizer = Unicode61Tokenizer::new();
        let tokens = collect_tokens(&mut tokenizer, "a b", TokenizeMode::DOCUMENT).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].start_offset, 2);
    }
}
