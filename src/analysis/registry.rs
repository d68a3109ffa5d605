//! Named tokenizer registry.
//!
//! The host engine looks tokenizers up by name and creates instances from
//! construction arguments. The registry ships with the `unicode61` and
//! `ascii` delegates; [`register_snowball`] adds the stemming pipeline.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, info};
use parking_lot::RwLock;

use crate::analysis::pipeline::{SNOWBALL_TOKENIZER_NAME, SnowballTokenizer};
use crate::analysis::rewrite::RewriteStage;
use crate::analysis::stop_words::StopWordStore;
use crate::analysis::tokenizer::{AsciiTokenizer, Tokenizer, Unicode61Tokenizer};
use crate::config::StemmerSettings;
use crate::error::{CascadeError, Result};

/// Creates tokenizer instances from construction arguments.
pub trait TokenizerFactory: Send + Sync {
    /// Create a new instance.
    fn create(&self, args: &[String]) -> Result<Box<dyn Tokenizer>>;
}

struct Unicode61Factory;

impl TokenizerFactory for Unicode61Factory {
    fn create(&self, args: &[String]) -> Result<Box<dyn Tokenizer>> {
        Ok(Box::new(Unicode61Tokenizer::from_args(args)?))
    }
}

struct AsciiFactory;

impl TokenizerFactory for AsciiFactory {
    fn create(&self, args: &[String]) -> Result<Box<dyn Tokenizer>> {
        Ok(Box::new(AsciiTokenizer::from_args(args)?))
    }
}

/// Delegate wrapped by the snowball pipeline unless configured otherwise.
pub const DEFAULT_DELEGATE: &str = "unicode61";

/// Store of tokenizer factories keyed by name.
#[derive(Clone)]
pub struct TokenizerRegistry {
    factories: Arc<RwLock<HashMap<String, Arc<dyn TokenizerFactory>>>>,
}

impl fmt::Debug for TokenizerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl Default for TokenizerRegistry {
    fn default() -> Self {
        let registry = TokenizerRegistry {
            factories: Arc::new(RwLock::new(HashMap::new())),
        };
        registry.register("unicode61", Unicode61Factory);
        registry.register("ascii", AsciiFactory);
        registry
    }
}

impl TokenizerRegistry {
    /// A registry holding the bundled delegates.
    pub fn new() -> Self {
        TokenizerRegistry::default()
    }

    /// Register a factory, replacing any previous one with the same name.
    pub fn register<F>(&self, name: &str, factory: F)
    where
        F: TokenizerFactory + 'static,
    {
        self.factories
            .write()
            .insert(name.to_string(), Arc::new(factory));
    }

    /// Look up a factory.
    pub fn find(&self, name: &str) -> Option<Arc<dyn TokenizerFactory>> {
        self.factories.read().get(name).cloned()
    }

    /// Create an instance of the named tokenizer.
    pub fn create(&self, name: &str, args: &[String]) -> Result<Box<dyn Tokenizer>> {
        let factory = self.find(name).ok_or_else(|| {
            CascadeError::configuration(format!("no such tokenizer: {name}"))
        })?;
        factory.create(args)
    }

    /// Release an instance created by this registry.
    pub fn destroy(&self, tokenizer: Box<dyn Tokenizer>) {
        debug!("destroying {} tokenizer", tokenizer.name());
        drop(tokenizer);
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }
}

/// Factory for the snowball pipeline.
///
/// Construction arguments overlay the factory's base settings; the delegate
/// is created with the diacritic, token character and separator settings
/// forwarded.
pub struct SnowballFactory {
    settings: StemmerSettings,
    stop_words: Arc<dyn StopWordStore>,
    delegate_name: String,
    delegate: Arc<dyn TokenizerFactory>,
}

impl SnowballFactory {
    /// Create a factory wrapping the registry's `unicode61` delegate.
    pub fn new(
        registry: &TokenizerRegistry,
        settings: StemmerSettings,
        stop_words: Arc<dyn StopWordStore>,
    ) -> Result<Self> {
        let delegate = resolve_delegate(registry, DEFAULT_DELEGATE)?;
        Ok(SnowballFactory {
            settings,
            stop_words,
            delegate_name: DEFAULT_DELEGATE.to_string(),
            delegate,
        })
    }

    /// Wrap a different registered delegate.
    pub fn with_delegate(mut self, registry: &TokenizerRegistry, name: &str) -> Result<Self> {
        self.delegate = resolve_delegate(registry, name)?;
        self.delegate_name = name.to_string();
        Ok(self)
    }

    /// Build a pipeline directly from resolved settings.
    pub fn build(&self, settings: &StemmerSettings) -> Result<SnowballTokenizer> {
        let cascade = settings.cascade()?;
        let mut delegate_args = settings.delegate_args();
        if self.delegate_name != DEFAULT_DELEGATE {
            // Only unicode61 understands remove_diacritics.
            delegate_args.drain(..2);
        }
        let delegate = self.delegate.create(&delegate_args)?;
        Ok(SnowballTokenizer::new(
            delegate,
            RewriteStage::new(cascade, settings.min_token_length),
            self.stop_words.clone(),
        ))
    }
}

impl TokenizerFactory for SnowballFactory {
    fn create(&self, args: &[String]) -> Result<Box<dyn Tokenizer>> {
        let mut settings = self.settings.clone();
        settings.apply_args(args)?;
        Ok(Box::new(self.build(&settings)?))
    }
}

fn resolve_delegate(registry: &TokenizerRegistry, name: &str) -> Result<Arc<dyn TokenizerFactory>> {
    registry.find(name).ok_or_else(|| {
        CascadeError::configuration(format!("delegate tokenizer '{name}' is not registered"))
    })
}

/// Register the snowball pipeline under the name `snowball`.
///
/// The settings are validated up front so that a bad configuration fails at
/// registration rather than on first use.
pub fn register_snowball(
    registry: &TokenizerRegistry,
    settings: StemmerSettings,
    stop_words: Arc<dyn StopWordStore>,
) -> Result<()> {
    let languages = settings.validate()?;
    let factory = SnowballFactory::new(registry, settings, stop_words)?;
    info!(
        "registering {} tokenizer for {:?}",
        SNOWBALL_TOKENIZER_NAME, languages
    );
    registry.register(SNOWBALL_TOKENIZER_NAME, factory);
    Ok(())
}
