use std::{env, fs};

use anyhow::Context;
use deckgen_tools::{
    markdown::extract_text_from_presentation, DeckBuilder, DeckConfig, FontMapping,
};

const SAMPLE_DECK: &str = include_str!("sample_deck.json");

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Usage: cargo run --example build_deck -- [deck.json] [report.json]
    // DECK_LANGUAGE (e.g. "Japanese") picks the deck font from the language mapping.
    let args: Vec<String> = env::args().collect();
    let (config, load_diagnostics) = match args.get(1) {
        Some(path) => {
            DeckConfig::load_lenient(path).with_context(|| format!("loading {}", path))?
        }
        None => DeckConfig::from_value_lenient(serde_json::from_str(SAMPLE_DECK)?)?,
    };
    let config = match env::var("DECK_LANGUAGE") {
        Ok(language) => config.with_language_font(&FontMapping::default(), &language),
        Err(_) => config,
    };

    let report = DeckBuilder::default().build(&config)?;
    log::info!(
        "Built {} slides with {} diagnostics",
        report.presentation.slides.len(),
        load_diagnostics.len() + report.diagnostics.len()
    );
    for diagnostic in load_diagnostics.iter().chain(&report.diagnostics) {
        println!("{}", diagnostic);
    }

    println!("{}", extract_text_from_presentation(&report.presentation));

    let output_path = args.get(2).map(String::as_str).unwrap_or("deck_report.json");
    fs::write(output_path, report.to_json()?)
        .with_context(|| format!("writing {}", output_path))?;
    log::info!("Assembly report saved to {}", output_path);
    Ok(())
}
