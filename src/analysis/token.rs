//! Token events and the signals that flow alongside them.
//!
//! A [`TokenEvent`] is the unit a tokenizer pushes into a
//! [`TokenSink`](crate::analysis::tokenizer::TokenSink). It is ephemeral: it
//! lives only for the duration of a single sink call and borrows from the
//! input buffer whenever its text did not need to be rewritten.
//!
//! # Offsets
//!
//! `start_offset` and `end_offset` are byte offsets into the *original* input.
//! They are provenance metadata: filters may replace the token text (for
//! example with a stemmed form) but never touch the offsets, so highlight and
//! snippet code can always recover the source text with [`TokenEvent::source`].
//!
//! ```
//! use snowcascade::analysis::token::TokenEvent;
//!
//! let input = "Running foxes";
//! let event = TokenEvent::new("run", 0, 7);
//! assert_eq!(event.source(input), Some("Running"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::ops::BitOr;

/// Per-token flags reported by a tokenizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenFlags(u32);

impl TokenFlags {
    /// The token occupies the same position as the previous token.
    pub const COLOCATED: TokenFlags = TokenFlags(0x0001);

    /// No flags set.
    pub const fn empty() -> Self {
        TokenFlags(0)
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check whether all bits of `other` are set.
    pub const fn contains(self, other: TokenFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TokenFlags {
    type Output = TokenFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        TokenFlags(self.0 | rhs.0)
    }
}

/// The reason a piece of text is being tokenized.
///
/// Bits may be combined: a prefix query is `QUERY | PREFIX`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenizeMode(u32);

impl TokenizeMode {
    /// Tokenizing a search query.
    pub const QUERY: TokenizeMode = TokenizeMode(0x0001);
    /// Tokenizing a query term that requests prefix matching.
    pub const PREFIX: TokenizeMode = TokenizeMode(0x0002);
    /// Tokenizing a document for indexing.
    pub const DOCUMENT: TokenizeMode = TokenizeMode(0x0004);
    /// Tokenizing on behalf of an auxiliary function (snippets, highlights).
    pub const AUX: TokenizeMode = TokenizeMode(0x0008);

    /// Raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check whether all bits of `other` are set.
    pub const fn contains(self, other: TokenizeMode) -> bool {
        self.0 & other.0 == other.0
    }

    /// Query mode, prefix or not.
    pub const fn is_query(self) -> bool {
        self.contains(Self::QUERY)
    }

    /// Prefix query mode.
    pub const fn is_prefix(self) -> bool {
        self.contains(Self::PREFIX)
    }
}

impl BitOr for TokenizeMode {
    type Output = TokenizeMode;

    fn bitor(self, rhs: Self) -> Self::Output {
        TokenizeMode(self.0 | rhs.0)
    }
}

/// Iteration control returned by sinks and tokenizers.
///
/// Errors are not a variant: they travel as `Err(CascadeError)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep producing tokens.
    Continue,
    /// Stop producing tokens; the call ends successfully.
    Stop,
}

impl Flow {
    /// Whether the producer should stop.
    pub fn is_stop(self) -> bool {
        self == Flow::Stop
    }
}

/// A single token produced during tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenEvent<'a> {
    /// Token text. Borrows from the input when no folding was necessary.
    pub text: Cow<'a, str>,

    /// Byte offset where the token starts in the original input.
    pub start_offset: usize,

    /// Byte offset where the token ends in the original input.
    pub end_offset: usize,

    /// Token flags.
    pub flags: TokenFlags,
}

impl<'a> TokenEvent<'a> {
    /// Create a new token event without flags.
    pub fn new<T: Into<Cow<'a, str>>>(text: T, start_offset: usize, end_offset: usize) -> Self {
        TokenEvent {
            text: text.into(),
            start_offset,
            end_offset,
            flags: TokenFlags::empty(),
        }
    }

    /// Set the flags for this event.
    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Replace the text, keeping offsets and flags.
    pub fn with_text<T: Into<Cow<'a, str>>>(mut self, text: T) -> Self {
        self.text = text.into();
        self
    }

    /// Length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Re-slice the original input at this event's offsets.
    ///
    /// Returns `None` when the offsets do not describe a valid range of
    /// `input`.
    pub fn source<'s>(&self, input: &'s str) -> Option<&'s str> {
        if self.start_offset > self.end_offset {
            return None;
        }
        input.get(self.start_offset..self.end_offset)
    }

    /// Detach the event from the input buffer.
    pub fn into_owned(self) -> TokenEvent<'static> {
        TokenEvent {
            text: Cow::Owned(self.text.into_owned()),
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            flags: self.flags,
        }
    }
}

impl fmt::Display for TokenEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
