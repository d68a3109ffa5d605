//! Unicode-aware delegate tokenizer.
//!
//! Splits text into runs of token characters (Unicode letters, numbers and
//! private-use code points), folds each run to lowercase and optionally strips
//! diacritics. This is the default delegate wrapped by the snowball pipeline.
//!
//! # Examples
//!
//! ```
//! use snowcascade::analysis::token::TokenizeMode;
//! use snowcascade::analysis::tokenizer::collect_tokens;
//! use snowcascade::analysis::tokenizer::unicode61::Unicode61Tokenizer;
//!
//! let mut tokenizer = Unicode61Tokenizer::new();
//! let tokens = collect_tokens(&mut tokenizer, "Café, RÉSUMÉ!", TokenizeMode::DOCUMENT).unwrap();
//! assert_eq!(tokens[0].text, "cafe");
//! assert_eq!(tokens[1].text, "resume");
//! assert_eq!(tokens[1].start_offset, 7);
//! ```

use std::borrow::Cow;
use std::str::FromStr;

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

use super::{CharOverrides, TokenSink, Tokenizer, unquote};
use crate::analysis::token::{Flow, TokenEvent, TokenizeMode};
use crate::error::{CascadeError, Result};

/// How diacritics are treated when folding tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RemoveDiacritics {
    /// Keep diacritics.
    Keep,
    /// Strip the mark from characters carrying a single diacritic.
    #[default]
    Single,
    /// Strip every combining mark.
    All,
}

impl FromStr for RemoveDiacritics {
    type Err = CascadeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "0" => Ok(RemoveDiacritics::Keep),
            "1" => Ok(RemoveDiacritics::Single),
            "2" => Ok(RemoveDiacritics::All),
            other => Err(CascadeError::configuration(format!(
                "remove_diacritics must be 0, 1 or 2, got '{other}'"
            ))),
        }
    }
}

impl RemoveDiacritics {
    /// Numeric argument form.
    pub fn as_arg(self) -> &'static str {
        match self {
            RemoveDiacritics::Keep => "0",
            RemoveDiacritics::Single => "1",
            RemoveDiacritics::All => "2",
        }
    }
}

/// A tokenizer that splits on Unicode character classes.
#[derive(Clone, Debug, Default)]
pub struct Unicode61Tokenizer {
    remove_diacritics: RemoveDiacritics,
    overrides: CharOverrides,
}

impl Unicode61Tokenizer {
    /// Create a tokenizer with default settings (single diacritics removed).
    pub fn new() -> Self {
        Unicode61Tokenizer::default()
    }

    /// Build a tokenizer from `key value` construction arguments.
    ///
    /// Recognized keys are `remove_diacritics`, `tokenchars` and `separators`.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut tokenizer = Unicode61Tokenizer::new();
        let mut iter = args.iter();
        while let Some(key) = iter.next() {
            let value = iter.next().ok_or_else(|| {
                CascadeError::configuration(format!("missing value for unicode61 argument '{key}'"))
            })?;
            let value = unquote(value);
            match key.as_str() {
                "remove_diacritics" => tokenizer.remove_diacritics = value.parse()?,
                "tokenchars" => tokenizer.overrides.add_token_chars(value),
                "separators" => tokenizer.overrides.add_separators(value),
                other => {
                    return Err(CascadeError::configuration(format!(
                        "unknown unicode61 argument '{other}'"
                    )));
                }
            }
        }
        Ok(tokenizer)
    }

    /// Set the diacritic handling.
    pub fn with_remove_diacritics(mut self, mode: RemoveDiacritics) -> Self {
        self.remove_diacritics = mode;
        self
    }

    /// Treat the given characters as token characters.
    pub fn with_token_chars(mut self, chars: &str) -> Self {
        self.overrides.add_token_chars(chars);
        self
    }

    /// Treat the given characters as separators.
    pub fn with_separators(mut self, chars: &str) -> Self {
        self.overrides.add_separators(chars);
        self
    }

    fn is_token_char(&self, c: char) -> bool {
        self.overrides
            .classify(c)
            .unwrap_or_else(|| c.is_alphanumeric() || is_private_use(c))
    }

    /// Combining marks extend a token that has already started.
    fn continues_token(&self, c: char) -> bool {
        self.is_token_char(c) || (is_combining_mark(c) && self.overrides.classify(c).is_none())
    }

    fn fold_into(&self, c: char, out: &mut String) {
        if self.remove_diacritics != RemoveDiacritics::Keep && is_combining_mark(c) {
            return;
        }
        for lower in c.to_lowercase() {
            out.push(strip_diacritic(lower, self.remove_diacritics));
        }
    }
}

fn is_private_use(c: char) -> bool {
    matches!(c,
        '\u{E000}'..='\u{F8FF}' |
        '\u{F0000}'..='\u{FFFFD}' |
        '\u{100000}'..='\u{10FFFD}'
    )
}

fn strip_diacritic(c: char, mode: RemoveDiacritics) -> char {
    if mode == RemoveDiacritics::Keep || c.is_ascii() {
        return c;
    }
    let mut base = None;
    let mut marks = 0;
    let mut extra = false;
    decompose_canonical(c, |d| {
        if is_combining_mark(d) {
            marks += 1;
        } else if base.is_none() {
            base = Some(d);
        } else {
            extra = true;
        }
    });
    match base {
        Some(b) if !extra && (mode == RemoveDiacritics::All || marks <= 1) => b,
        _ => c,
    }
}

impl Tokenizer for Unicode61Tokenizer {
    fn tokenize(
        &mut self,
        text: &str,
        _mode: TokenizeMode,
        sink: &mut dyn TokenSink,
    ) -> Result<Flow> {
        let mut chars = text.char_indices().peekable();
        let mut folded = String::new();

        while let Some(&(start, c)) = chars.peek() {
            if !self.is_token_char(c) {
                chars.next();
                continue;
            }

            folded.clear();
            let mut end = start;
            while let Some(&(index, c)) = chars.peek() {
                if !self.continues_token(c) {
                    break;
                }
                self.fold_into(c, &mut folded);
                end = index + c.len_utf8();
                chars.next();
            }

            // A run of stripped combining marks leaves nothing to index.
            if folded.is_empty() {
                continue;
            }
            let source = &text[start..end];
            let token = if folded == source {
                Cow::Borrowed(source)
            } else {
                Cow::Owned(folded.clone())
            };
            if sink.token(TokenEvent::new(token, start, end))?.is_stop() {
                return Ok(Flow::Stop);
            }
        }

        Ok(Flow::Continue)
    }

    fn name(&self) -> &'static str {
        "unicode61"
    }
}
