use std::{env, fs};

use anyhow::Context;
use deckgen_tools::{
    diff::{compare_svg_content, generate_markdown_diff},
    markdown::extract_text_from_presentation,
    render_slide_to_svg, DeckBuilder, DeckComparerBuilder, DeckConfig,
};
use serde_json::{json, Value};

const SAMPLE_DECK: &str = include_str!("sample_deck.json");

fn load(path: Option<&String>) -> anyhow::Result<Value> {
    let json = match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
        None => SAMPLE_DECK.to_string(),
    };
    serde_json::from_str(&json).context("parsing deck JSON")
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Usage: cargo run --example diff_decks -- [base.json] [changed.json]
    // Without a changed deck, the sample deck is compared against an edited copy of itself.
    let args: Vec<String> = env::args().collect();
    let base_value = load(args.get(1))?;
    let changed_value = match args.get(2) {
        Some(_) => load(args.get(2))?,
        None => {
            let mut edited = base_value.clone();
            edited["slides"]["2"]["elements"][0]["content"] = json!("Research");
            edited["slides"]["2"]["elements"][1]["props"]["fill"] = json!({"color": "FFE8CC"});
            edited
        }
    };

    let builder = DeckBuilder::default();
    let (base, _) = DeckConfig::from_value_lenient(base_value.clone())?;
    let (changed, _) = DeckConfig::from_value_lenient(changed_value.clone())?;

    let comparison = DeckComparerBuilder::new()
        .set_base(base)
        .build()?
        .compare(&changed)?;
    println!("{}\n", comparison.get_readable_diff()?);

    let base_report = builder.build_value(base_value)?;
    let changed_report = builder.build_value(changed_value)?;
    let outline_diff = generate_markdown_diff(
        &extract_text_from_presentation(&base_report.presentation),
        &extract_text_from_presentation(&changed_report.presentation),
        "a/deck.md",
        "b/deck.md",
    )?;
    println!("{}", outline_diff);

    for key in comparison.changed_slide_keys() {
        let base_svg = render_slide_to_svg(&base_report.presentation, &key).ok();
        let changed_svg = render_slide_to_svg(&changed_report.presentation, &key)?;
        let report = compare_svg_content(
            base_svg.as_deref().unwrap_or_default(),
            &changed_svg,
            &format!("a/slide_{}.svg", key),
            &format!("b/slide_{}.svg", key),
        )?;
        println!("{}", report.markdown_report);
    }
    Ok(())
}
