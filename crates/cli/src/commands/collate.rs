//! `murmur collate` — Split streamed text into speakable sentences.

use std::io::Read;
use std::path::PathBuf;

use futures::{StreamExt, stream};
use murmur_collator::try_collate;
use murmur_config::AppConfig;
use murmur_core::{Segment, Token};
use tracing::debug;

pub struct CollateOptions {
    pub file: Option<PathBuf>,
    pub jsonl: bool,
    pub emit_function: bool,
    pub endings: Vec<String>,
    pub json: bool,
}

pub async fn run(options: CollateOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let mut collator = config.collator;
    if options.emit_function {
        collator.emit_function = true;
    }
    if !options.endings.is_empty() {
        collator.sentence_endings = options.endings.iter().map(|e| unescape(e)).collect();
    }
    collator.validate()?;

    let input = match &options.file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let tokens: Vec<Result<Token, String>> = if options.jsonl {
        parse_jsonl(&input)
    } else {
        split_words(&input).into_iter().map(Ok).collect()
    };
    debug!(tokens = tokens.len(), "Collating input");

    let mut segments = try_collate(stream::iter(tokens), &collator);
    while let Some(segment) = segments.next().await {
        let segment = segment?;
        if options.json {
            println!("{}", serde_json::to_string(&segment)?);
        } else {
            println!("{}", render(&segment));
        }
    }

    Ok(())
}

/// Split text into word-sized tokens the way a model streams them: each
/// word carries its leading spaces, and every newline is a token of its own.
pub fn split_words(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch == '\n' {
            if !current.is_empty() {
                tokens.push(Token::Text(std::mem::take(&mut current)));
            }
            tokens.push(Token::text("\n"));
            continue;
        }

        let ends_word = current.chars().last().is_some_and(|c| !c.is_whitespace());
        if ch.is_whitespace() && ends_word {
            tokens.push(Token::Text(std::mem::take(&mut current)));
        }
        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(Token::Text(current));
    }
    tokens
}

/// One token per non-blank line, e.g. `{"type":"text","value":" Hi."}`.
fn parse_jsonl(input: &str) -> Vec<Result<Token, String>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<Token>(line)
                .map_err(|e| format!("Invalid token on line {}: {e}", idx + 1))
        })
        .collect()
}

fn render(segment: &Segment) -> String {
    match segment {
        Segment::Text { text } => text.clone(),
        Segment::FunctionCall(call) => format!("[function_call] {}({})", call.name, call.arguments),
    }
}

fn unescape(ending: &str) -> String {
    ending.replace("\\n", "\n")
}
