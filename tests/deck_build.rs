use deckgen_tools::models::chart::{ChartKind, ChartSeries};
use deckgen_tools::models::common::ElementProps;
use deckgen_tools::models::presentation::{MasterKind, PlacedElement, Slide};
use deckgen_tools::{
    build_deck, build_single_slide, AssemblyOptions, DeckBuilder, DeckConfig, DeckError,
    DiagnosticKind, LayoutConfig, SlideData,
};
use serde_json::{json, Value};
use std::io::Write;

fn deck() -> DeckConfig {
    DeckConfig::new(LayoutConfig::default(), "Helvetica Neue")
        .with_slide("0", SlideData::new("Annual Report"))
}

fn content_slide(elements: Vec<Value>) -> SlideData {
    elements
        .into_iter()
        .fold(SlideData::new("Body"), SlideData::with_element)
}

fn build_one(elements: Vec<Value>) -> (Slide, Vec<DiagnosticKind>) {
    let config = deck().with_slide("1", content_slide(elements));
    let report = build_single_slide(&config, "1", &AssemblyOptions::default()).unwrap();
    let kinds = report.diagnostics.iter().map(|d| d.kind).collect();
    let slide = report.presentation.slides.into_iter().next().unwrap();
    (slide, kinds)
}

/// Body elements of a content slide; the title box comes first.
fn body(slide: &Slide) -> &[PlacedElement] {
    &slide.elements[1..]
}

fn text(content: &str, x: f64, y: f64, w: f64, h: f64) -> Value {
    json!({"type": "text", "content": content, "props": {"x": x, "y": y, "w": w, "h": h}})
}

fn chart(chart_type: &str, data: Value, props: Value) -> Value {
    json!({"type": "chart", "chartType": chart_type, "data": data, "props": props})
}

fn chart_parts(element: &PlacedElement) -> (ChartKind, &[ChartSeries], &ElementProps) {
    match element {
        PlacedElement::Chart {
            kind,
            series,
            props,
        } => (*kind, series, props),
        other => panic!("expected a chart, got {:?}", other),
    }
}

#[test]
fn fitted_font_size_is_bounded_and_shrinks_with_length() {
    let (w, h) = (4.0, 1.0);
    let cap = (h * 72.0 * 0.7_f64).round();
    let mut previous = f64::MAX;

    for words in [1, 5, 10, 20, 40, 80, 160] {
        let content = vec!["word"; words].join(" ");
        let (slide, _) = build_one(vec![text(&content, 0.5, 1.5, w, h)]);
        let size = body(&slide)[0].props().font_size.unwrap();

        assert_eq!(size, size.round(), "font size {size} is not an integer");
        assert!((5.0..=cap).contains(&size), "font size {size} out of range");
        assert!(size <= previous, "font size grew from {previous} to {size}");
        previous = size;
    }
}

#[test]
fn fitted_font_size_never_exceeds_box_cap() {
    let element = json!({
        "type": "text",
        "content": "Hi",
        "props": {"x": 1, "y": 2, "w": 3, "h": 0.5, "fontSize": 60}
    });
    let (slide, _) = build_one(vec![element]);
    // 0.5in * 72 * 0.7 = 25.2
    assert_eq!(body(&slide)[0].props().font_size, Some(25.0));
}

#[test]
fn run_sizes_keep_their_relative_order() {
    let element = json!({
        "type": "text",
        "content": [
            {"text": "Headline ", "options": {"fontSize": 28}},
            {"text": "detail that runs on for quite a while in a small box", "options": {"fontSize": 14}}
        ],
        "props": {"x": 1, "y": 2, "w": 3, "h": 0.6}
    });
    let (slide, _) = build_one(vec![element]);
    let PlacedElement::Text { runs, props } = &body(&slide)[0] else {
        panic!("expected text");
    };
    let big = runs[0].options.font_size.unwrap();
    let small = runs[1].options.font_size.unwrap();
    assert!(big > small);
    assert_eq!(runs[1].options.font_face.as_deref(), Some("Helvetica Neue"));
    assert_eq!(props.valign.as_deref(), Some("middle"));
    assert_eq!(props.get("wrap"), Some(&json!(true)));
}

#[test]
fn chart_series_get_sizes_and_labels() {
    let (slide, kinds) = build_one(vec![chart(
        "bar",
        json!([
            {"name": "Revenue", "values": [3, 5, 8]},
            {"values": [1, 2]}
        ]),
        json!({"x": 1, "y": 1, "w": 6, "h": 4}),
    )]);
    assert!(kinds.is_empty());

    let (_, series, _) = chart_parts(&body(&slide)[0]);
    assert_eq!(series[0].sizes, series[0].values);
    assert_eq!(series[0].labels, Some(vec![json!("Revenue")]));
    assert_eq!(series[1].sizes, Some(vec![json!(1), json!(2)]));
    assert_eq!(series[1].labels, Some(vec![json!("Data 1"), json!("Data 2")]));
}

#[test]
fn doughnut_hole_is_clamped_above_fifty() {
    let data = json!([{"values": [1, 2]}]);
    let (slide, kinds) = build_one(vec![
        chart("doughnut", data.clone(), json!({"x": 0, "y": 1, "w": 4, "h": 4, "holeSize": 75})),
        chart("doughnut", data, json!({"x": 5, "y": 1, "w": 4, "h": 4, "holeSize": 20})),
    ]);

    assert_eq!(chart_parts(&body(&slide)[0]).2.hole_size, Some(33.0));
    assert_eq!(chart_parts(&body(&slide)[1]).2.hole_size, Some(20.0));
    assert_eq!(kinds, vec![DiagnosticKind::HoleSizeClamped]);
}

#[test]
fn unknown_chart_type_falls_back_to_bar() {
    let (slide, kinds) = build_one(vec![chart(
        "sankey",
        json!([{"values": [1]}]),
        json!({"x": 0, "y": 1, "w": 4, "h": 4}),
    )]);
    assert_eq!(chart_parts(&body(&slide)[0]).0, ChartKind::Bar);
    assert_eq!(kinds, vec![DiagnosticKind::UnknownChartType]);
}

#[test]
fn line_over_bars_hides_its_axes() {
    let props = json!({"x": 1, "y": 1, "w": 6, "h": 4});
    let (slide, _) = build_one(vec![
        chart("column", json!([{"values": [1, 2]}]), props.clone()),
        chart("line", json!([{"values": [2, 1]}]), props),
    ]);
    let (kind, _, line_props) = chart_parts(&body(&slide)[1]);
    assert_eq!(kind, ChartKind::Line);
    assert_eq!(line_props.get("valAxisPos"), Some(&json!("r")));
    assert_eq!(line_props.get("showLegend"), Some(&json!(false)));
    assert_eq!(chart_parts(&body(&slide)[0]).2.get("valAxisPos"), None);
}

#[test]
fn single_slide_build_of_entry_slide() {
    let config = deck()
        .with_slide("1", content_slide(vec![text("a", 1.0, 1.0, 2.0, 1.0)]))
        .with_slide("2", content_slide(vec![]));
    let report = build_single_slide(&config, "0", &AssemblyOptions::default()).unwrap();

    assert_eq!(report.presentation.slides.len(), 1);
    assert_eq!(report.presentation.slides[0].master, MasterKind::Entry);
    assert_eq!(report.presentation.slides[0].title, "Annual Report");
}

#[test]
fn single_slide_build_of_unknown_key_is_an_error() {
    let err = build_single_slide(&deck(), "9", &AssemblyOptions::default()).unwrap_err();
    assert!(matches!(err, DeckError::SlideNotFound { .. }));
}

#[test]
fn slides_assemble_in_numeric_key_order() {
    let config = DeckConfig::new(LayoutConfig::default(), "Arial")
        .with_slide("10", SlideData::new("Ten"))
        .with_slide("2", SlideData::new("Two"))
        .with_slide("0", SlideData::new("Cover"));
    let report = build_deck(&config, &AssemblyOptions::default()).unwrap();

    let titles: Vec<&str> = report
        .presentation
        .slides
        .iter()
        .map(|s| s.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Cover", "Two", "Ten"]);
    assert_eq!(report.presentation.slides[0].master, MasterKind::Entry);
    assert!(report.presentation.slides[1..]
        .iter()
        .all(|s| s.master == MasterKind::Content));
}

#[test]
fn empty_table_is_dropped_and_the_rest_still_renders() {
    let (slide, kinds) = build_one(vec![
        json!({"type": "table", "rows": [], "props": {"x": 1, "y": 1, "w": 6, "h": 2}}),
        text("Still here", 1.0, 4.0, 6.0, 1.0),
        json!({"type": "shape", "shapeType": "oval", "props": {"x": 8, "y": 4, "w": 1, "h": 1}}),
    ]);

    assert_eq!(kinds, vec![DiagnosticKind::MissingTableRows]);
    let kinds: Vec<&str> = body(&slide).iter().map(PlacedElement::kind_name).collect();
    assert_eq!(kinds, vec!["text", "shape"]);
}

#[test]
fn invalid_elements_never_abort_the_slide() {
    let (slide, kinds) = build_one(vec![
        json!({"type": "shape", "shapeType": "hexagram", "props": {"x": 0, "y": 1, "w": 1, "h": 1}}),
        json!({"type": "chart", "data": [], "props": {"x": 0, "y": 1, "w": 1, "h": 1}}),
        json!({"type": "image", "props": {"x": 0, "y": 1, "w": 1, "h": 1, "path": "/no/such/file.png"}}),
        json!({"type": "video", "props": {"x": 0, "y": 1, "w": 1, "h": 1}}),
        json!({"type": "text", "content": "ok"}),
        text("Survivor", 1.0, 2.0, 4.0, 1.0),
    ]);

    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::InvalidShapeType,
            DiagnosticKind::MissingChartData,
            DiagnosticKind::MissingImageFile,
            DiagnosticKind::UnknownElementType,
            DiagnosticKind::MalformedElement,
        ]
    );
    assert_eq!(body(&slide).len(), 1);
}

#[test]
fn existing_image_is_placed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"\x89PNG").unwrap();
    let path = file.path().to_string_lossy().into_owned();

    let (slide, kinds) = build_one(vec![json!({
        "type": "image",
        "props": {"x": 1, "y": 1, "w": 2, "h": 2, "path": path}
    })]);
    assert!(kinds.is_empty());
    match &body(&slide)[0] {
        PlacedElement::Image { path: placed, .. } => assert_eq!(placed, &path),
        other => panic!("expected an image, got {:?}", other),
    }
}

#[test]
fn title_duplicate_is_removed_and_elements_shift_up() {
    let config = deck().with_slide(
        "1",
        SlideData::new("Q3 Results")
            .with_element(text("Q3 Results", 0.5, 0.2, 8.0, 0.5))
            .with_element(text("Revenue up", 0.5, 1.5, 6.0, 1.0))
            .with_element(chart(
                "pie",
                json!([{"values": [1, 2]}]),
                json!({"x": 7, "y": 2.5, "w": 4, "h": 3}),
            )),
    );
    let report = build_single_slide(&config, "1", &AssemblyOptions::default()).unwrap();
    let slide = &report.presentation.slides[0];

    assert_eq!(slide.elements.len(), 3);
    let ys: Vec<f64> = body(slide).iter().map(|e| e.props().y).collect();
    assert_eq!(ys, vec![1.0, 2.0]);
}

#[test]
fn title_lookalike_below_title_region_is_kept() {
    let config = deck().with_slide(
        "1",
        SlideData::new("Q3 Results").with_element(text("Q3 Results", 0.5, 1.5, 8.0, 0.5)),
    );
    let report = build_single_slide(&config, "1", &AssemblyOptions::default()).unwrap();
    assert_eq!(body(&report.presentation.slides[0]).len(), 1);
}

#[test]
fn element_shifted_past_the_top_edge_is_kept_at_zero() {
    let config = deck().with_slide(
        "1",
        SlideData::new("Q3 Results")
            .with_element(text("Q3 Results", 0.5, 0.2, 8.0, 0.8))
            .with_element(text("Subtitle", 0.5, 0.6, 8.0, 0.4))
            .with_element(text("Body", 0.5, 1.5, 8.0, 1.0)),
    );
    let report = build_deck(&config, &AssemblyOptions::default()).unwrap();
    assert!(report.diagnostics.is_empty());

    let slide = &report.presentation.slides[1];
    let placed: Vec<(String, f64)> = body(slide)
        .iter()
        .map(|e| match e {
            PlacedElement::Text { runs, props } => (runs[0].text.clone(), props.y),
            other => panic!("expected text, got {:?}", other),
        })
        .collect();
    assert_eq!(placed.len(), 2);
    assert_eq!(placed[0], ("Subtitle".to_string(), 0.0));
    assert_eq!(placed[1].0, "Body");
    assert!((placed[1].1 - 0.7).abs() < 1e-9);
}

#[test]
fn title_duplicate_authored_as_runs_is_removed() {
    let config = deck().with_slide(
        "1",
        SlideData::new("売上（前年比）")
            .with_element(json!({
                "type": "text",
                "content": ["売上 ", {"text": "(前年比)", "options": {"bold": true}}],
                "props": {"x": 0.5, "y": 0.1, "w": 8, "h": 0.6}
            }))
            .with_element(text("Detail", 0.5, 2.0, 6.0, 1.0)),
    );
    let report = build_deck(&config, &AssemblyOptions::default()).unwrap();
    let slide = &report.presentation.slides[1];

    assert_eq!(body(slide).len(), 1);
    assert!((body(slide)[0].props().y - 1.4).abs() < 1e-9);
}

#[test]
fn title_duplicate_without_height_shifts_nothing() {
    let config = deck().with_slide(
        "1",
        SlideData::new("Agenda")
            .with_element(json!({
                "type": "text", "content": "Agenda", "props": {"x": 0.5, "y": 0.2, "w": 8}
            }))
            .with_element(text("Item", 0.5, 1.5, 6.0, 1.0)),
    );
    let report = build_single_slide(&config, "1", &AssemblyOptions::default()).unwrap();
    let slide = &report.presentation.slides[0];

    assert!(report.diagnostics.is_empty());
    assert_eq!(body(slide).len(), 1);
    assert_eq!(body(slide)[0].props().y, 1.5);
}

#[test]
fn loosely_typed_hints_do_not_drop_elements() {
    let (slide, kinds) = build_one(vec![
        json!({
            "type": "text",
            "content": [{"text": "Hello", "options": null}],
            "props": {"x": 1, "y": 1, "w": 4, "h": 1}
        }),
        json!({
            "type": "text",
            "content": "Sized",
            "props": {"x": 1, "y": 2, "w": 4, "h": 1, "fontSize": "18"}
        }),
        json!({
            "type": "chart",
            "chartType": "doughnut",
            "data": [{"values": [1, 2]}],
            "props": {"x": 1, "y": 3, "w": 4, "h": 3, "holeSize": "wide"}
        }),
    ]);

    assert_eq!(body(&slide).len(), 3);
    assert_eq!(kinds, vec![DiagnosticKind::IgnoredHint]);
    assert_eq!(body(&slide)[1].props().font_size, Some(18.0));
    let (kind, _, props) = chart_parts(&body(&slide)[2]);
    assert_eq!(kind, ChartKind::Doughnut);
    assert_eq!(props.hole_size, None);
}

#[test]
fn lenient_load_from_pipeline_json() {
    let value = json!({
        "slideConfig": {"layout": {"name": "CUSTOM_LAYOUT", "width": 13.33, "height": 7.5}},
        "font": "Times New Roman",
        "slides": {
            "0": {"slide_title": "Tổng quan", "elements": null},
            "1": {"slide_title": "Chi tiết", "elements": [
                {"type": "table", "rows": [["A", "B"], ["1"]], "props": {"x": 1, "y": 1, "w": 6, "h": 2}}
            ]}
        }
    });
    let report = DeckBuilder::default().build_value(value).unwrap();

    assert_eq!(report.presentation.font, "Times New Roman");
    assert_eq!(report.presentation.slides.len(), 2);
    assert!(!report.has_rejections());
    let PlacedElement::Table { rows, .. } = &body(&report.presentation.slides[1])[0] else {
        panic!("expected a table");
    };
    assert_eq!(rows[1], vec![json!("1"), json!("")]);
    assert_eq!(report.diagnostics_of(DiagnosticKind::TableRowsPadded).count(), 1);
}

#[test]
fn missing_layout_is_a_terminal_error() {
    let err = DeckBuilder::default()
        .build_value(json!({"slides": {}}))
        .unwrap_err();
    assert!(matches!(err, DeckError::InvalidConfig(_)));
}
