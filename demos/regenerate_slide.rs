use std::{env, fs};

use anyhow::Context;
use deckgen_tools::{DeckBuilder, DeckError};
use serde_json::Value;

const SAMPLE_DECK: &str = include_str!("sample_deck.json");

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Usage: cargo run --example regenerate_slide -- <slide key> [deck.json]
    let args: Vec<String> = env::args().collect();
    let key = args.get(1).map(String::as_str).unwrap_or("2");
    let config_json = match args.get(2) {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
        None => SAMPLE_DECK.to_string(),
    };
    let config: Value = serde_json::from_str(&config_json).context("parsing deck JSON")?;

    match DeckBuilder::default().build_slide_value(config, key) {
        Ok(report) => {
            let slide = &report.presentation.slides[0];
            log::info!(
                "Slide {} ({}) has {} elements",
                slide.key,
                slide.master.name(),
                slide.elements.len()
            );
            for diagnostic in &report.diagnostics {
                println!("{}", diagnostic);
            }
            println!("{}", serde_json::to_string_pretty(&report.presentation)?);
            Ok(())
        }
        Err(DeckError::SlideNotFound { key }) => {
            log::error!("The deck has no slide {}", key);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
