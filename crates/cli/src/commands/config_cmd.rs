//! `murmur config` — Configuration management commands.

use murmur_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   Config parsed successfully");

            let mut warnings = Vec::new();

            if config.collator.sentence_endings.is_empty() {
                warnings.push("No sentence endings configured; text is only flushed at end of stream");
            }

            if config
                .collator
                .sentence_endings
                .iter()
                .any(|e| e.chars().any(|c| c.is_ascii_digit()))
            {
                warnings.push("A sentence ending contains digits; list and price detection may misfire");
            }

            if warnings.is_empty() {
                println!("   All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   warning: {w}");
                }
            }

            println!();
            println!(
                "   Endings:        {:?}",
                config.collator.sentence_endings
            );
            println!("   Emit function:  {}", config.collator.emit_function);
            println!(
                "   Preamble:       {}",
                config.formatter.preamble.as_deref().unwrap_or("(none)")
            );
        }
        Err(e) => {
            println!("   Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    println!("{}", config.to_toml()?);
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
