//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SnowcascadeArgs};
use crate::error::Result;

/// One token as printed by `tokenize`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenRecord {
    pub text: String,
    pub source: String,
    pub start: usize,
    pub end: usize,
}

/// Result structure for `tokenize`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizeResult {
    pub languages: Vec<String>,
    pub stop_words_active: bool,
    pub tokens: Vec<TokenRecord>,
}

/// Result structure for `stemmers`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StemmerList {
    pub languages: Vec<String>,
}

/// Result structure for `compress` and `uncompress`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransformResult {
    pub input: String,
    pub output: String,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

/// Result structure for `is-compressed`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompressionCheck {
    pub path: String,
    pub compressed: bool,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(
    message: &str,
    result: &T,
    args: &SnowcascadeArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SnowcascadeArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    let tokens = value.get("tokens").and_then(|t| t.as_array());
    match tokens {
        Some(tokens) => output_tokens_human(tokens),
        None => output_generic_human(&value),
    }
    Ok(())
}

/// Output tokens in human format, one per line.
fn output_tokens_human(tokens: &[serde_json::Value]) {
    if tokens.is_empty() {
        println!("(no tokens)");
        return;
    }
    for token in tokens {
        let text = token.get("text").and_then(|t| t.as_str()).unwrap_or("");
        let source = token.get("source").and_then(|s| s.as_str()).unwrap_or("");
        let start = token.get("start").and_then(|s| s.as_u64()).unwrap_or(0);
        let end = token.get("end").and_then(|e| e.as_u64()).unwrap_or(0);
        println!("{}", format_token_line(text, source, start, end));
    }
}

fn format_token_line(text: &str, source: &str, start: u64, end: u64) -> String {
    let span = format!("{start}..{end}");
    if text == source {
        format!("{span:>10}  {text}")
    } else {
        format!("{span:>10}  {text}  ({source})")
    }
}

/// Generic human output.
fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SnowcascadeArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human output.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}
