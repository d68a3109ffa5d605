//! Stop-word stores and the lazily connected stop-word oracle.
//!
//! A [`StopWordStore`] is the persisted set of stop words, keyed by exact
//! word text. The store may not exist yet when a pipeline is built (for
//! example before the schema that holds it has been created), so the
//! [`StopWordOracle`] only opens its lookup handle on the first query.
//!
//! Lookups are case-sensitive; callers that need case-insensitive matching
//! normalize the word before asking.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use snowcascade::analysis::stop_words::{MemoryStopWordStore, StopWordOracle, StopWordStatus};
//!
//! let store = Arc::new(MemoryStopWordStore::new());
//! let mut oracle = StopWordOracle::new(store.clone());
//!
//! // No table yet: the lookup handle cannot be established.
//! assert_eq!(oracle.is_stop_word("the"), StopWordStatus::LookupFailed);
//!
//! store.create(["the", "a"]);
//! oracle.begin_session();
//! assert_eq!(oracle.is_stop_word("the"), StopWordStatus::Yes);
//! assert_eq!(oracle.is_stop_word("fox"), StopWordStatus::No);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use log::{debug, warn};
use parking_lot::RwLock;

use crate::error::{CascadeError, Result};

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A persisted set of stop words.
pub trait StopWordStore: Send + Sync + fmt::Debug {
    /// Establish a lookup handle.
    ///
    /// Fails when the backing set does not exist (yet).
    fn open(&self) -> Result<Box<dyn StopWordLookup>>;
}

/// An established handle into a [`StopWordStore`].
pub trait StopWordLookup: Send + fmt::Debug {
    /// Exact-match membership test.
    fn contains(&mut self, word: &str) -> Result<bool>;
}

/// In-memory stop-word table shared between the writer and its readers.
///
/// The table starts out missing; [`MemoryStopWordStore::create`] brings it
/// into existence. Handles opened from the store observe later inserts.
#[derive(Debug, Default)]
pub struct MemoryStopWordStore {
    table: Arc<RwLock<Option<HashSet<String>>>>,
}

impl MemoryStopWordStore {
    /// Create a store whose table does not exist yet.
    pub fn new() -> Self {
        MemoryStopWordStore::default()
    }

    /// Create a store already holding the given words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = MemoryStopWordStore::new();
        store.create(words);
        store
    }

    /// Create a store holding the default English stop words.
    pub fn english() -> Self {
        MemoryStopWordStore {
            table: Arc::new(RwLock::new(Some(DEFAULT_ENGLISH_STOP_WORDS_SET.clone()))),
        }
    }

    /// Create (or replace) the table with the given words.
    pub fn create<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words.into_iter().map(Into::into).collect();
        *self.table.write() = Some(words);
    }

    /// Add a word, creating the table if needed.
    pub fn insert<S: Into<String>>(&self, word: S) {
        self.table
            .write()
            .get_or_insert_with(HashSet::new)
            .insert(word.into());
    }

    /// Remove the table; open handles start failing.
    pub fn drop_table(&self) {
        *self.table.write() = None;
    }

    /// Whether the table exists.
    pub fn exists(&self) -> bool {
        self.table.read().is_some()
    }

    /// Number of words in the table.
    pub fn len(&self) -> usize {
        self.table.read().as_ref().map_or(0, HashSet::len)
    }

    /// Check if the table is missing or empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StopWordStore for MemoryStopWordStore {
    fn open(&self) -> Result<Box<dyn StopWordLookup>> {
        if !self.exists() {
            return Err(CascadeError::stop_word_lookup("stop word table does not exist"));
        }
        Ok(Box::new(MemoryLookup {
            table: Arc::clone(&self.table),
        }))
    }
}

#[derive(Debug)]
struct MemoryLookup {
    table: Arc<RwLock<Option<HashSet<String>>>>,
}

impl StopWordLookup for MemoryLookup {
    fn contains(&mut self, word: &str) -> Result<bool> {
        match self.table.read().as_ref() {
            Some(words) => Ok(words.contains(word)),
            None => Err(CascadeError::stop_word_lookup("stop word table was dropped")),
        }
    }
}

/// Stop words persisted in a UTF-8 text file, one word per line.
///
/// Blank lines are ignored; words are not trimmed beyond the line ending.
#[derive(Clone, Debug)]
pub struct FileStopWordStore {
    path: PathBuf,
}

impl FileStopWordStore {
    /// Refer to a stop-word file, which need not exist yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileStopWordStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `words` to `path`, one per line.
    pub fn write<P, I, S>(path: P, words: I) -> Result<()>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut writer = BufWriter::new(fs::File::create(path)?);
        for word in words {
            let word = word.as_ref();
            if word.contains('\n') {
                return Err(CascadeError::invalid_argument(format!(
                    "stop word {word:?} contains a line break"
                )));
            }
            writeln!(writer, "{word}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl StopWordStore for FileStopWordStore {
    fn open(&self) -> Result<Box<dyn StopWordLookup>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            CascadeError::stop_word_lookup(format!("{}: {e}", self.path.display()))
        })?;
        let words = contents
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Box::new(SnapshotLookup { words }))
    }
}

#[derive(Debug)]
struct SnapshotLookup {
    words: HashSet<String>,
}

impl StopWordLookup for SnapshotLookup {
    fn contains(&mut self, word: &str) -> Result<bool> {
        Ok(self.words.contains(word))
    }
}

/// Answer of a stop-word query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopWordStatus {
    Yes,
    No,
    /// The store could not be consulted. Never to be read as `No`.
    LookupFailed,
}

#[derive(Debug)]
enum Handle {
    Pending,
    Open(Box<dyn StopWordLookup>),
    Failed,
}

/// Lazily connected stop-word membership oracle.
///
/// Owned by a single pipeline instance and not shared across threads. A
/// failed handle establishment is remembered until the next
/// [`begin_session`](StopWordOracle::begin_session), so each tokenization
/// call attempts the (possibly costly) setup at most once.
#[derive(Debug)]
pub struct StopWordOracle {
    store: Arc<dyn StopWordStore>,
    handle: Handle,
}

impl StopWordOracle {
    /// Create an oracle; no handle is established yet.
    pub fn new(store: Arc<dyn StopWordStore>) -> Self {
        StopWordOracle {
            store,
            handle: Handle::Pending,
        }
    }

    /// Start a new tokenization session, re-arming a failed handle.
    pub fn begin_session(&mut self) {
        if matches!(self.handle, Handle::Failed) {
            self.handle = Handle::Pending;
        }
    }

    /// Whether a lookup handle is currently established.
    pub fn is_connected(&self) -> bool {
        matches!(self.handle, Handle::Open(_))
    }

    /// Ask whether `word` is a stop word.
    pub fn is_stop_word(&mut self, word: &str) -> StopWordStatus {
        if matches!(self.handle, Handle::Pending) {
            self.handle = match self.store.open() {
                Ok(lookup) => {
                    debug!("stop word lookup handle established");
                    Handle::Open(lookup)
                }
                Err(e) => {
                    warn!("failed to establish stop word lookup: {e}");
                    Handle::Failed
                }
            };
        }

        let Handle::Open(lookup) = &mut self.handle else {
            return StopWordStatus::LookupFailed;
        };
        match lookup.contains(word) {
            Ok(true) => StopWordStatus::Yes,
            Ok(false) => StopWordStatus::No,
            Err(e) => {
                warn!("stop word lookup for {word:?} failed: {e}");
                self.handle = Handle::Failed;
                StopWordStatus::LookupFailed
            }
        }
    }
}
