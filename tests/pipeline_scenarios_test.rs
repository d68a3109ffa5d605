use snowcascade::analysis::registry::{TokenizerRegistry, register_snowball};
use snowcascade::analysis::stop_words::{FileStopWordStore, MemoryStopWordStore, StopWordStore};
use snowcascade::analysis::token::{Flow, TokenEvent, TokenizeMode};
use snowcascade::analysis::tokenizer::{Tokenizer, collect_tokens};
use snowcascade::config::StemmerSettings;
use snowcascade::error::{CascadeError, Result};
use std::sync::Arc;
use std::thread;

fn snowball(settings: StemmerSettings, store: Arc<dyn StopWordStore>) -> Result<Box<dyn Tokenizer>> {
    let registry = TokenizerRegistry::new();
    register_snowball(&registry, settings, store)?;
    registry.create("snowball", &[])
}

fn english() -> Result<Box<dyn Tokenizer>> {
    snowball(
        StemmerSettings::default(),
        Arc::new(MemoryStopWordStore::english()),
    )
}

fn texts(tokenizer: &mut dyn Tokenizer, input: &str, mode: TokenizeMode) -> Result<Vec<String>> {
    Ok(collect_tokens(tokenizer, input, mode)?
        .into_iter()
        .map(|t| t.text.into_owned())
        .collect())
}

#[test]
fn test_index_mode_scenario() -> Result<()> {
    let mut tokenizer = english()?;
    let input = "The running foxes jump";
    let tokens = collect_tokens(tokenizer.as_mut(), input, TokenizeMode::DOCUMENT)?;

    let emitted: Vec<(&str, usize, usize)> = tokens
        .iter()
        .map(|t| (t.text.as_ref(), t.start_offset, t.end_offset))
        .collect();
    assert_eq!(
        emitted,
        vec![("the", 0, 3), ("run", 4, 11), ("fox", 12, 17), ("jump", 18, 22)]
    );
    Ok(())
}

#[test]
fn test_query_with_space_keeps_stop_words() -> Result<()> {
    let mut tokenizer = english()?;
    assert_eq!(
        texts(tokenizer.as_mut(), "the fox", TokenizeMode::QUERY)?,
        vec!["the", "fox"]
    );
    assert!(texts(tokenizer.as_mut(), "the", TokenizeMode::QUERY)?.is_empty());
    assert_eq!(
        texts(tokenizer.as_mut(), "the", TokenizeMode::QUERY | TokenizeMode::PREFIX)?,
        vec!["the"]
    );
    Ok(())
}

#[test]
fn test_short_tokens_dropped_in_every_mode() -> Result<()> {
    let mut tokenizer = english()?;
    for mode in [
        TokenizeMode::DOCUMENT,
        TokenizeMode::QUERY,
        TokenizeMode::QUERY | TokenizeMode::PREFIX,
        TokenizeMode::AUX,
    ] {
        let tokens = texts(tokenizer.as_mut(), "go to a big zoo", mode)?;
        assert_eq!(tokens, vec!["big", "zoo"], "mode {:#x}", mode.bits());
    }
    Ok(())
}

#[test]
fn test_offsets_point_into_the_input() -> Result<()> {
    let mut tokenizer = snowball(
        StemmerSettings::with_languages(["swedish", "german", "english"]),
        Arc::new(MemoryStopWordStore::english()),
    )?;
    let input = "Hästarna sprang över ängarna; die Häuser standen, the houses stood.";
    let tokens = collect_tokens(tokenizer.as_mut(), input, TokenizeMode::DOCUMENT)?;
    assert!(!tokens.is_empty());

    let mut previous_start = None;
    for token in &tokens {
        assert!(token.start_offset <= token.end_offset);
        assert!(token.end_offset <= input.len());
        let source = token.source(input).expect("offsets on char boundaries");
        assert!(!source.is_empty());
        if let Some(previous) = previous_start {
            assert!(token.start_offset > previous);
        }
        previous_start = Some(token.start_offset);
    }
    Ok(())
}

#[test]
fn test_tokenization_is_idempotent() -> Result<()> {
    let mut tokenizer = english()?;
    let input = "Stemming normalizes searching, indexing and ranked queries";
    let first = collect_tokens(tokenizer.as_mut(), input, TokenizeMode::DOCUMENT)?;
    let second = collect_tokens(tokenizer.as_mut(), input, TokenizeMode::DOCUMENT)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_cascade_order_changes_output() -> Result<()> {
    let store: Arc<dyn StopWordStore> = Arc::new(MemoryStopWordStore::english());
    let mut swedish_first = snowball(
        StemmerSettings::with_languages(["swedish", "english"]),
        store.clone(),
    )?;
    let mut english_first = snowball(StemmerSettings::with_languages(["english", "swedish"]), store)?;

    assert_eq!(texts(swedish_first.as_mut(), "cares", TokenizeMode::DOCUMENT)?, vec!["car"]);
    assert_eq!(texts(english_first.as_mut(), "cares", TokenizeMode::DOCUMENT)?, vec!["care"]);
    Ok(())
}

#[test]
fn test_file_store_created_after_pipeline() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("stopwords.txt");
    let mut tokenizer = snowball(
        StemmerSettings::default(),
        Arc::new(FileStopWordStore::new(&path)),
    )?;

    // Documents never touch the store.
    assert_eq!(texts(tokenizer.as_mut(), "the foxes", TokenizeMode::DOCUMENT)?, vec!["the", "fox"]);

    let err = collect_tokens(tokenizer.as_mut(), "the", TokenizeMode::QUERY).unwrap_err();
    assert!(matches!(err, CascadeError::StopWordLookupFailed(_)));

    FileStopWordStore::write(&path, ["the", "und"])?;
    assert!(texts(tokenizer.as_mut(), "the", TokenizeMode::QUERY)?.is_empty());
    assert_eq!(texts(tokenizer.as_mut(), "foxes", TokenizeMode::QUERY)?, vec!["fox"]);
    Ok(())
}

#[test]
fn test_stop_words_are_case_sensitive() -> Result<()> {
    let store = Arc::new(MemoryStopWordStore::from_words(["The"]));
    let mut tokenizer = snowball(StemmerSettings::default(), store)?;
    // The delegate folds case before the lookup.
    assert_eq!(texts(tokenizer.as_mut(), "The", TokenizeMode::QUERY)?, vec!["the"]);
    Ok(())
}

#[test]
fn test_sink_can_stop_early() -> Result<()> {
    let mut tokenizer = english()?;
    let mut seen = Vec::new();
    let flow = tokenizer.tokenize(
        "one two three four five",
        TokenizeMode::DOCUMENT,
        &mut |event: TokenEvent<'_>| -> Result<Flow> {
            seen.push(event.text.into_owned());
            Ok(if seen.len() == 3 { Flow::Stop } else { Flow::Continue })
        },
    )?;
    assert_eq!(flow, Flow::Stop);
    assert_eq!(seen, vec!["one", "two", "three"]);
    Ok(())
}

#[test]
fn test_sink_error_is_returned_verbatim() -> Result<()> {
    let mut tokenizer = english()?;
    let err = tokenizer
        .tokenize(
            "alpha beta",
            TokenizeMode::DOCUMENT,
            &mut |_event: TokenEvent<'_>| -> Result<Flow> { Err(CascadeError::delegate("sink full")) },
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Delegate error: sink full");
    Ok(())
}

#[test]
fn test_instances_per_thread_share_a_store() -> Result<()> {
    let store: Arc<dyn StopWordStore> = Arc::new(MemoryStopWordStore::english());
    let registry = TokenizerRegistry::new();
    register_snowball(&registry, StemmerSettings::default(), store)?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || -> Result<Vec<String>> {
                let mut tokenizer = registry.create("snowball", &[])?;
                let mut all = texts(tokenizer.as_mut(), "the", TokenizeMode::QUERY)?;
                all.extend(texts(tokenizer.as_mut(), "running foxes", TokenizeMode::DOCUMENT)?);
                Ok(all)
            })
        })
        .collect();

    for handle in handles {
        let tokens = handle.join().expect("tokenizer thread panicked")?;
        assert_eq!(tokens, vec!["run", "fox"]);
    }
    Ok(())
}
