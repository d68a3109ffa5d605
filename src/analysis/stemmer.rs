//! Multi-language stemmer cascade.
//!
//! A [`StemmerCascade`] holds an ordered list of Snowball stemmers. A token is
//! offered to each stemmer in declaration order and the first result whose
//! byte length differs from the input is taken; when no stemmer changes the
//! length the token is returned untouched. The length change is a proxy for
//! "this language's rules applied" and must stay exactly as is, since index
//! contents depend on it.
//!
//! # Examples
//!
//! ```
//! use snowcascade::analysis::stemmer::{Language, StemmerCascade};
//!
//! let cascade = StemmerCascade::new(&[Language::English]).unwrap();
//! assert_eq!(cascade.stem("running"), "run");
//! assert_eq!(cascade.stem("jump"), "jump");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};

use crate::error::{CascadeError, Result};

/// Tokens shorter than this many bytes are not stemmed.
pub const MIN_STEM_LENGTH: usize = 3;

/// Tokens longer than this many bytes are not stemmed.
pub const MAX_STEM_LENGTH: usize = 64;

/// Supported stemmer languages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Language {
    Arabic,
    Danish,
    Dutch,
    English,
    Finnish,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Romanian,
    Russian,
    Spanish,
    Swedish,
    Tamil,
    Turkish,
}

impl Language {
    /// All supported languages, in alphabetical order.
    pub fn all() -> &'static [Language] {
        &[
            Language::Arabic,
            Language::Danish,
            Language::Dutch,
            Language::English,
            Language::Finnish,
            Language::French,
            Language::German,
            Language::Greek,
            Language::Hungarian,
            Language::Italian,
            Language::Norwegian,
            Language::Portuguese,
            Language::Romanian,
            Language::Russian,
            Language::Spanish,
            Language::Swedish,
            Language::Tamil,
            Language::Turkish,
        ]
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted identifiers: the full name followed by ISO 639 codes.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Language::Arabic => &["arabic", "ar", "ara"],
            Language::Danish => &["danish", "da", "dan"],
            Language::Dutch => &["dutch", "nl", "dut", "nld"],
            Language::English => &["english", "en", "eng"],
            Language::Finnish => &["finnish", "fi", "fin"],
            Language::French => &["french", "fr", "fre", "fra"],
            Language::German => &["german", "de", "ger", "deu"],
            Language::Greek => &["greek", "el", "gre", "ell"],
            Language::Hungarian => &["hungarian", "hu", "hun"],
            Language::Italian => &["italian", "it", "ita"],
            Language::Norwegian => &["norwegian", "no", "nor"],
            Language::Portuguese => &["portuguese", "pt", "por"],
            Language::Romanian => &["romanian", "ro", "rum", "ron"],
            Language::Russian => &["russian", "ru", "rus"],
            Language::Spanish => &["spanish", "es", "esl", "spa"],
            Language::Swedish => &["swedish", "sv", "swe"],
            Language::Tamil => &["tamil", "ta", "tam"],
            Language::Turkish => &["turkish", "tr", "tur"],
        }
    }

    fn to_algorithm(self) -> Algorithm {
        match self {
            Language::Arabic => Algorithm::Arabic,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::Finnish => Algorithm::Finnish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Greek => Algorithm::Greek,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Romanian => Algorithm::Romanian,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
            Language::Tamil => Algorithm::Tamil,
            Language::Turkish => Algorithm::Turkish,
        }
    }
}

impl FromStr for Language {
    type Err = CascadeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Language::all()
            .iter()
            .copied()
            .find(|language| language.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| {
                CascadeError::configuration(format!("unsupported stemmer language '{s}'"))
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of stemmers applied with first-length-change selection.
pub struct StemmerCascade {
    languages: Vec<Language>,
    stemmers: Vec<rust_stemmers::Stemmer>,
}

impl fmt::Debug for StemmerCascade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemmerCascade")
            .field("languages", &self.languages)
            .finish()
    }
}

impl StemmerCascade {
    /// Build a cascade for the given languages, in order.
    ///
    /// An empty list is a configuration error.
    pub fn new(languages: &[Language]) -> Result<Self> {
        if languages.is_empty() {
            return Err(CascadeError::configuration(
                "stemmer language list cannot be empty",
            ));
        }
        Ok(StemmerCascade {
            languages: languages.to_vec(),
            stemmers: languages
                .iter()
                .map(|language| rust_stemmers::Stemmer::create(language.to_algorithm()))
                .collect(),
        })
    }

    /// Build a cascade from language identifiers such as `"english"` or `"sv"`.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let languages = names
            .into_iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<Language>>>()?;
        Self::new(&languages)
    }

    /// The configured languages, in cascade order.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Stem a token.
    ///
    /// Tokens outside `MIN_STEM_LENGTH..=MAX_STEM_LENGTH` bytes are returned
    /// unchanged without being handed to any stemmer.
    pub fn stem<'a>(&self, token: &'a str) -> Cow<'a, str> {
        if !(MIN_STEM_LENGTH..=MAX_STEM_LENGTH).contains(&token.len()) {
            return Cow::Borrowed(token);
        }
        for stemmer in &self.stemmers {
            let stemmed = stemmer.stem(token);
            if stemmed.len() != token.len() {
                return Cow::Owned(stemmed.into_owned());
            }
        }
        Cow::Borrowed(token)
    }
}
