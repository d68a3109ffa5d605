//! Stemmer settings.
//!
//! [`StemmerSettings`] is the construction-time configuration of a snowball
//! pipeline. It can be loaded from JSON, overlaid from the environment and
//! from tokenizer construction arguments, and checked against the settings an
//! existing index was built with.
//!
//! # Construction arguments
//!
//! ```text
//! snowball english swedish remove_diacritics 1 tokenchars '-' min_token_length 2
//! ```
//!
//! Bare words are language identifiers; if any are given they replace the
//! configured list, in order. The remaining keys take exactly one value.

use std::env;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::rewrite::DEFAULT_MIN_TOKEN_LENGTH;
use crate::analysis::stemmer::{Language, StemmerCascade};
use crate::analysis::tokenizer::unicode61::RemoveDiacritics;
use crate::analysis::tokenizer::unquote;
use crate::error::{CascadeError, Result};

/// Prefix of the environment variables read by [`StemmerSettings::apply_env`].
pub const ENV_PREFIX: &str = "SNOWCASCADE_STEMMER_";

/// Configuration of a snowball pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StemmerSettings {
    /// Stemmer languages, in cascade order.
    pub languages: Vec<String>,
    /// Strip diacritics in the delegate tokenizer.
    pub remove_diacritics: bool,
    /// Extra token characters forwarded to the delegate.
    pub token_characters: String,
    /// Extra separator characters forwarded to the delegate.
    pub separators: String,
    /// Tokens shorter than this many bytes are dropped.
    pub min_token_length: usize,
}

impl Default for StemmerSettings {
    fn default() -> Self {
        StemmerSettings {
            languages: vec!["english".to_string()],
            remove_diacritics: true,
            token_characters: String::new(),
            separators: String::new(),
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
        }
    }
}

impl StemmerSettings {
    /// Settings for the given languages, other fields at their defaults.
    pub fn with_languages<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StemmerSettings {
            languages: languages.into_iter().map(Into::into).collect(),
            ..StemmerSettings::default()
        }
    }

    /// Parse settings from a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Overlay values from `SNOWCASCADE_STEMMER_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| env::var(format!("{ENV_PREFIX}{name}")).ok())
    }

    fn apply_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(languages) = lookup("LANGUAGES") {
            self.languages = languages
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(flag) = lookup("REMOVE_DIACRITICS") {
            self.remove_diacritics = parse_bool(&flag)?;
        }
        if let Some(chars) = lookup("TOKEN_CHARACTERS") {
            self.token_characters = chars;
        }
        if let Some(chars) = lookup("SEPARATORS") {
            self.separators = chars;
        }
        if let Some(length) = lookup("MIN_TOKEN_LENGTH") {
            self.min_token_length = parse_length(&length)?;
        }
        Ok(())
    }

    /// Overlay tokenizer construction arguments.
    pub fn apply_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<()> {
        let mut languages = Vec::new();
        let mut iter = args.iter().map(AsRef::as_ref);
        while let Some(arg) = iter.next() {
            let mut value = |key: &str| {
                iter.next().map(unquote).ok_or_else(|| {
                    CascadeError::configuration(format!("missing value for argument '{key}'"))
                })
            };
            match arg {
                "remove_diacritics" => {
                    self.remove_diacritics = match value(arg)? {
                        "0" => false,
                        "1" => true,
                        other => {
                            return Err(CascadeError::configuration(format!(
                                "remove_diacritics must be 0 or 1, got '{other}'"
                            )));
                        }
                    };
                }
                "tokenchars" => self.token_characters = value(arg)?.to_string(),
                "separators" => self.separators = value(arg)?.to_string(),
                "min_token_length" => self.min_token_length = parse_length(value(arg)?)?,
                word => {
                    let language: Language = unquote(word).parse()?;
                    languages.push(language.name().to_string());
                }
            }
        }
        if !languages.is_empty() {
            self.languages = languages;
        }
        Ok(())
    }

    /// Check the settings, resolving every language.
    pub fn validate(&self) -> Result<Vec<Language>> {
        if self.languages.is_empty() {
            return Err(CascadeError::configuration(
                "stemmer language list cannot be empty",
            ));
        }
        self.languages.iter().map(|l| l.parse()).collect()
    }

    /// Build the stemmer cascade described by these settings.
    pub fn cascade(&self) -> Result<StemmerCascade> {
        StemmerCascade::new(&self.validate()?)
    }

    /// Arguments forwarded to the delegate tokenizer.
    pub fn delegate_args(&self) -> Vec<String> {
        let diacritics = if self.remove_diacritics {
            RemoveDiacritics::Single
        } else {
            RemoveDiacritics::Keep
        };
        let mut args = vec![
            "remove_diacritics".to_string(),
            diacritics.as_arg().to_string(),
        ];
        if !self.token_characters.is_empty() {
            args.push("tokenchars".to_string());
            args.push(format!("'{}'", self.token_characters));
        }
        if !self.separators.is_empty() {
            args.push("separators".to_string());
            args.push(format!("'{}'", self.separators));
        }
        args
    }

    /// Whether an index built with `stored` can be served with `self`.
    ///
    /// Languages (in order), diacritic removal, token characters and
    /// separators must match; the minimum token length may differ.
    pub fn matches_index_state(&self, stored: &StemmerSettings) -> bool {
        self.languages == stored.languages
            && self.remove_diacritics == stored.remove_diacritics
            && self.token_characters == stored.token_characters
            && self.separators == stored.separators
    }

    /// Verify these settings against the state persisted at `path`.
    ///
    /// When no state exists yet, the current settings are written and become
    /// the index state.
    pub fn check_persisted<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            info!("recording stemmer settings in {}", path.display());
            fs::write(path, serde_json::to_string_pretty(self)?)?;
            return Ok(());
        }

        let stored = Self::from_json_file(path)?;
        if !self.matches_index_state(&stored) {
            warn!(
                "stemmer settings {:?} differ from index state {:?}",
                self, stored
            );
            return Err(CascadeError::settings_mismatch(
                "config does not match index state",
            ));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CascadeError::invalid_argument(format!(
            "expected a boolean, got '{other}'"
        ))),
    }
}

fn parse_length(value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        CascadeError::invalid_argument(format!(
            "min_token_length must be a non-negative integer, got '{value}'"
        ))
    })
}
