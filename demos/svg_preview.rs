use std::{env, fs, path::PathBuf};

use anyhow::Context;
use deckgen_tools::{render_presentation_to_svg, AssemblyOptions, DeckBuilder};
use serde_json::Value;

const SAMPLE_DECK: &str = include_str!("sample_deck.json");

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Usage: cargo run --example svg_preview -- [deck.json] [output dir]
    let args: Vec<String> = env::args().collect();
    let config_json = match args.get(1) {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
        None => SAMPLE_DECK.to_string(),
    };
    let output_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("preview"));
    let config: Value = serde_json::from_str(&config_json).context("parsing deck JSON")?;

    // Backgrounds are not shipped with the demo.
    let options = AssemblyOptions::new()
        .entry_background(None)
        .content_background(None);
    let report = DeckBuilder::new(options).build_value(config)?;

    log::info!("Starting SVG conversion...");
    let svgs = render_presentation_to_svg(&report.presentation)?;
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    for (slide, svg) in report.presentation.slides.iter().zip(&svgs) {
        let path = output_dir.join(format!("slide_{}.svg", slide.key));
        fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
        log::info!("SVG for slide {} saved to {}", slide.key, path.display());
    }
    Ok(())
}
