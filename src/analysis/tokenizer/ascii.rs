//! ASCII delegate tokenizer.
//!
//! Every ASCII alphanumeric character and every non-ASCII character is a
//! token character; everything else separates tokens. Only ASCII letters are
//! folded to lowercase.

use std::borrow::Cow;

use super::{CharOverrides, TokenSink, Tokenizer, unquote};
use crate::analysis::token::{Flow, TokenEvent, TokenizeMode};
use crate::error::{CascadeError, Result};

/// A tokenizer that only understands ASCII character classes.
#[derive(Clone, Debug, Default)]
pub struct AsciiTokenizer {
    overrides: CharOverrides,
}

impl AsciiTokenizer {
    /// Create a new ASCII tokenizer.
    pub fn new() -> Self {
        AsciiTokenizer::default()
    }

    /// Build a tokenizer from `tokenchars` / `separators` arguments.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut tokenizer = AsciiTokenizer::new();
        for pair in args.chunks(2) {
            let [key, value] = pair else {
                return Err(CascadeError::configuration(format!(
                    "missing value for ascii argument '{}'",
                    pair[0]
                )));
            };
            match key.as_str() {
                "tokenchars" => tokenizer.overrides.add_token_chars(unquote(value)),
                "separators" => tokenizer.overrides.add_separators(unquote(value)),
                other => {
                    return Err(CascadeError::configuration(format!(
                        "unknown ascii argument '{other}'"
                    )));
                }
            }
        }
        Ok(tokenizer)
    }

    fn is_token_char(&self, c: char) -> bool {
        self.overrides
            .classify(c)
            .unwrap_or_else(|| !c.is_ascii() || c.is_ascii_alphanumeric())
    }
}

impl Tokenizer for AsciiTokenizer {
    fn tokenize(
        &mut self,
        text: &str,
        _mode: TokenizeMode,
        sink: &mut dyn TokenSink,
    ) -> Result<Flow> {
        let mut start = None;
        let boundaries = text
            .char_indices()
            .map(|(i, c)| (i, Some(c)))
            .chain(std::iter::once((text.len(), None)));

        for (index, c) in boundaries {
            let in_token = c.is_some_and(|c| self.is_token_char(c));
            match (start, in_token) {
                (None, true) => start = Some(index),
                (Some(begin), false) => {
                    start = None;
                    let source = &text[begin..index];
                    let token = if source.bytes().any(|b| b.is_ascii_uppercase()) {
                        Cow::Owned(source.to_ascii_lowercase())
                    } else {
                        Cow::Borrowed(source)
                    };
                    if sink.token(TokenEvent::new(token, begin, index))?.is_stop() {
                        return Ok(Flow::Stop);
                    }
                }
                _ => {}
            }
        }

        Ok(Flow::Continue)
    }

    fn name(&self) -> &'static str {
        "ascii"
    }
}
