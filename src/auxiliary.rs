//! Auxiliary functions evaluated per matched row.
//!
//! These helpers are what a host search engine exposes next to the ranking
//! functions: the column/offset of the first phrase match in a row (cached
//! per row, since ranking queries ask for both), and snippet extraction by
//! token position using the same tokenizer that built the index.

use log::trace;

use crate::analysis::token::{Flow, TokenEvent, TokenizeMode};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{CascadeError, Result};

/// One phrase match within a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchInstance {
    pub phrase: i32,
    pub column: i32,
    pub offset: i32,
}

/// Host-side view of the row currently being evaluated.
pub trait MatchSource {
    /// Identifier of the current row.
    fn row_id(&self) -> i64;

    /// First phrase match of the current row, if any.
    fn first_instance(&self) -> Result<Option<MatchInstance>>;
}

/// Which half of the first match to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstMatchField {
    Column,
    Offset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MatchEntry {
    row_id: i64,
    instance: MatchInstance,
}

/// Per-query cache of the last row's first match.
#[derive(Debug, Default)]
pub struct MatchCache {
    entry: Option<MatchEntry>,
}

impl MatchCache {
    pub fn new() -> Self {
        MatchCache::default()
    }

    /// Column or offset of the first match in the source's current row.
    ///
    /// The source is consulted only when the row differs from the cached one.
    pub fn first_match(
        &mut self,
        source: &dyn MatchSource,
        field: FirstMatchField,
    ) -> Result<i64> {
        let row_id = source.row_id();
        let instance = match self.entry {
            Some(entry) if entry.row_id == row_id => entry.instance,
            _ => {
                let instance = source.first_instance()?.ok_or_else(|| {
                    CascadeError::other(format!("row {row_id} has no phrase match"))
                })?;
                trace!("caching first match of row {row_id}: {instance:?}");
                self.entry = Some(MatchEntry { row_id, instance });
                instance
            }
        };
        Ok(match field {
            FirstMatchField::Column => i64::from(instance.column),
            FirstMatchField::Offset => i64::from(instance.offset),
        })
    }

    /// Row currently held in the cache.
    pub fn cached_row(&self) -> Option<i64> {
        self.entry.map(|entry| entry.row_id)
    }
}

/// Number of tokens `tokenizer` produces for `text`.
pub fn token_count(tokenizer: &mut dyn Tokenizer, text: &str) -> Result<usize> {
    let mut count = 0;
    tokenizer.tokenize(text, TokenizeMode::AUX, &mut |_event: TokenEvent<'_>| -> Result<Flow> {
        count += 1;
        Ok(Flow::Continue)
    })?;
    Ok(count)
}

/// Substring of `text` covering `count` tokens starting at token `first`.
///
/// Returns an empty string when `count` is zero or `text` has no token at
/// position `first`; a range running past the last token ends there.
pub fn token_range<'t>(
    tokenizer: &mut dyn Tokenizer,
    text: &'t str,
    first: usize,
    count: usize,
) -> Result<&'t str> {
    if count == 0 {
        return Ok("");
    }
    let last = first.saturating_add(count - 1);

    let mut position = 0usize;
    let mut span: Option<(usize, usize)> = None;
    tokenizer.tokenize(text, TokenizeMode::AUX, &mut |event: TokenEvent<'_>| -> Result<Flow> {
        if position == first {
            span = Some((event.start_offset, event.end_offset));
        } else if let Some((_, end)) = span.as_mut() {
            *end = event.end_offset;
        }
        let done = position == last;
        position += 1;
        Ok(if done { Flow::Stop } else { Flow::Continue })
    })?;

    Ok(span
        .and_then(|(start, end)| text.get(start..end))
        .unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::analysis::tokenizer::Unicode61Tokenizer;

    struct FakeRow {
        row_id: i64,
        instance: Option<MatchInstance>,
        lookups: Cell<usize>,
    }

    impl MatchSource for FakeRow {
        fn row_id(&self) -> i64 {
            self.row_id
        }

        fn first_instance(&self) -> Result<Option<MatchInstance>> {
            self.lookups.set(self.lookups.get() + 1);
            Ok(self.instance)
        }
    }

    fn row(row_id: i64, column: i32, offset: i32) -> FakeRow {
        FakeRow {
            row_id,
            instance: Some(MatchInstance {
                phrase: 0,
                column,
                offset,
            }),
            lookups: Cell::new(0),
        }
    }

    #[test]
    fn test_first_match_is_cached_per_row() {
        let mut cache = MatchCache::new();
        let first = row(7, 1, 12);
        assert_eq!(cache.first_match(&first, FirstMatchField::Column).unwrap(), 1);
        assert_eq!(cache.first_match(&first, FirstMatchField::Offset).unwrap(), 12);
        assert_eq!(first.lookups.get(), 1);
        assert_eq!(cache.cached_row(), Some(7));

        let second = row(8, 0, 3);
        assert_eq!(cache.first_match(&second, FirstMatchField::Offset).unwrap(), 3);
        assert_eq!(second.lookups.get(), 1);
        assert_eq!(cache.cached_row(), Some(8));
    }

    #[test]
    fn test_row_without_match_is_an_error() {
        let mut cache = MatchCache::new();
        let empty = FakeRow {
            row_id: 1,
            instance: None,
            lookups: Cell::new(0),
        };
        assert!(cache.first_match(&empty, FirstMatchField::Column).is_err());
        assert_eq!(cache.cached_row(), None);
    }

    #[test]
    fn test_token_count() {
        let mut tokenizer = Unicode61Tokenizer::new();
        assert_eq!(token_count(&mut tokenizer, "one, two; three").unwrap(), 3);
        assert_eq!(token_count(&mut tokenizer, "  ...  ").unwrap(), 0);
    }

    #[test]
    fn test_token_range() {
        let mut tokenizer = Unicode61Tokenizer::new();
        let text = "The quick, brown fox jumps.";
        assert_eq!(token_range(&mut tokenizer, text, 1, 2).unwrap(), "quick, brown");
        assert_eq!(token_range(&mut tokenizer, text, 0, 1).unwrap(), "The");
        assert_eq!(token_range(&mut tokenizer, text, 3, 10).unwrap(), "fox jumps");
        assert_eq!(token_range(&mut tokenizer, text, 2, 0).unwrap(), "");
        assert_eq!(token_range(&mut tokenizer, text, 5, 1).unwrap(), "");
    }

    /// Counts the tokens its inner tokenizer hands out.
    struct Counting {
        inner: Unicode61Tokenizer,
        emitted: usize,
    }

    impl Tokenizer for Counting {
        fn tokenize(
            &mut self,
            text: &str,
            mode: TokenizeMode,
            sink: &mut dyn crate::analysis::tokenizer::TokenSink,
        ) -> Result<Flow> {
            let emitted = &mut self.emitted;
            self.inner
                .tokenize(text, mode, &mut |event: TokenEvent<'_>| -> Result<Flow> {
                    *emitted += 1;
                    sink.token(event)
                })
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[test]
    fn test_token_range_stops_early() {
        let mut tokenizer = Counting {
            inner: Unicode61Tokenizer::new(),
            emitted: 0,
        };
        let text = "alpha beta gamma delta";
        assert_eq!(token_range(&mut tokenizer, text, 0, 2).unwrap(), "alpha beta");
        assert_eq!(tokenizer.emitted, 2);
    }
}
