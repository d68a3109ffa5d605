//! Command implementations for the snowcascade CLI.

use std::fs;
use std::sync::Arc;

use log::{debug, warn};

use crate::analysis::registry::{SnowballFactory, TokenizerRegistry};
use crate::analysis::rewrite::stop_words_active;
use crate::analysis::stemmer::Language;
use crate::analysis::stop_words::{FileStopWordStore, MemoryStopWordStore, StopWordStore};
use crate::analysis::token::TokenizeMode;
use crate::analysis::tokenizer::collect_tokens;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::compress::{compress, is_compressed, uncompress};
use crate::config::StemmerSettings;
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: SnowcascadeArgs) -> Result<()> {
    match &args.command {
        Command::Tokenize(tokenize_args) => tokenize(tokenize_args, &args),
        Command::Stemmers => list_stemmers(&args),
        Command::Compress(transform) => compress_file(transform, &args),
        Command::Uncompress(transform) => uncompress_file(transform, &args),
        Command::IsCompressed(check) => check_file(check, &args),
    }
}

/// Resolve stemmer settings: file, then environment, then flags.
fn load_settings(args: &TokenizeArgs) -> Result<StemmerSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            debug!("loading stemmer settings from {}", path.display());
            StemmerSettings::from_json_file(path)?
        }
        None => StemmerSettings::default(),
    };
    settings.apply_env()?;
    if !args.languages.is_empty() {
        settings.languages = args.languages.clone();
    }
    if let Some(min) = args.min_token_length {
        settings.min_token_length = min;
    }
    settings.validate()?;
    Ok(settings)
}

/// Run text through the snowball pipeline.
fn tokenize(args: &TokenizeArgs, cli_args: &SnowcascadeArgs) -> Result<()> {
    let settings = load_settings(args)?;
    let store: Arc<dyn StopWordStore> = match &args.stop_words {
        Some(path) => Arc::new(FileStopWordStore::new(path)),
        None => Arc::new(MemoryStopWordStore::english()),
    };

    let registry = TokenizerRegistry::new();
    let factory = SnowballFactory::new(&registry, settings.clone(), store)?
        .with_delegate(&registry, &args.delegate)?;
    let mut pipeline = factory.build(&settings)?;

    let mut mode = if args.query {
        TokenizeMode::QUERY
    } else {
        TokenizeMode::DOCUMENT
    };
    if args.prefix {
        mode = mode | TokenizeMode::QUERY | TokenizeMode::PREFIX;
    }

    let tokens = collect_tokens(&mut pipeline, &args.text, mode)?;
    let result = TokenizeResult {
        languages: settings.languages.clone(),
        stop_words_active: stop_words_active(mode, &args.text),
        tokens: tokens
            .iter()
            .map(|token| TokenRecord {
                text: token.text.to_string(),
                source: token.source(&args.text).unwrap_or_default().to_string(),
                start: token.start_offset,
                end: token.end_offset,
            })
            .collect(),
    };

    output_result(
        &format!("Tokens for {:?}", args.text),
        &result,
        cli_args,
    )
}

/// List the supported stemmer languages.
fn list_stemmers(cli_args: &SnowcascadeArgs) -> Result<()> {
    let result = StemmerList {
        languages: Language::all()
            .iter()
            .map(|language| language.name().to_string())
            .collect(),
    };
    output_result("Supported stemmers", &result, cli_args)
}

/// Compress a file into the blob format.
fn compress_file(args: &TransformArgs, cli_args: &SnowcascadeArgs) -> Result<()> {
    let input = fs::read(&args.input)?;
    if is_compressed(&input) {
        warn!("{} is already compressed", args.input.display());
    }
    let output = compress(&input)?;
    fs::write(&args.output, &output)?;

    output_result(
        "Compressed",
        &transform_result(args, input.len(), output.len()),
        cli_args,
    )
}

/// Restore a compressed blob.
fn uncompress_file(args: &TransformArgs, cli_args: &SnowcascadeArgs) -> Result<()> {
    let input = fs::read(&args.input)?;
    if !is_compressed(&input) {
        warn!(
            "{} is not a compressed blob, copying unchanged",
            args.input.display()
        );
    }
    let output = uncompress(&input)?;
    fs::write(&args.output, &output)?;

    output_result(
        "Uncompressed",
        &transform_result(args, input.len(), output.len()),
        cli_args,
    )
}

/// Check whether a file is a compressed blob.
fn check_file(args: &IsCompressedArgs, cli_args: &SnowcascadeArgs) -> Result<()> {
    let input = fs::read(&args.input)?;
    let result = CompressionCheck {
        path: args.input.to_string_lossy().to_string(),
        compressed: is_compressed(&input),
    };
    output_result("Compression check", &result, cli_args)
}

fn transform_result(args: &TransformArgs, input_bytes: usize, output_bytes: usize) -> TransformResult {
    TransformResult {
        input: args.input.to_string_lossy().to_string(),
        output: args.output.to_string_lossy().to_string(),
        input_bytes: input_bytes as u64,
        output_bytes: output_bytes as u64,
    }
}
