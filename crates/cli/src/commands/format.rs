//! `murmur format` — Turn a transcript into chat-completion messages.

use std::path::Path;

use murmur_config::AppConfig;
use murmur_core::Transcript;
use murmur_formatter::TranscriptFormatter;
use tracing::info;

pub async fn run(path: &Path, preamble: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read transcript {}: {e}", path.display()))?;
    let transcript = Transcript::from_json(&content)
        .map_err(|e| format!("Invalid transcript {}: {e}", path.display()))?;

    let mut formatter = TranscriptFormatter::from_config(&config.formatter);
    if let Some(preamble) = preamble {
        formatter = formatter.with_preamble(preamble);
    }

    let messages = formatter.format(&transcript).map_err(murmur_core::Error::from)?;
    info!(events = transcript.len(), messages = messages.len(), "Transcript formatted");

    println!("{}", serde_json::to_string_pretty(&messages)?);
    Ok(())
}
