//! Integration tests for the posterfit fitting pipeline.
//!
//! These tests exercise the public API end to end:
//! - Poster JSON in, PosterFit JSON out
//! - Solver results agree with an exhaustive scan
//! - Section containers keep the newest fit
//! - Headless fallback and image sizing inside real grid cells

use posterfit::fit::FitRequest;
use posterfit::layout::grid;
use posterfit::*;

// ─── Helpers ────────────────────────────────────────────────────

const FORTY_WORDS: &str = "Our results indicate that seedlings grown under blue light \
    developed thicker stems and darker leaves than those grown under red light, \
    while total biomass after six weeks did not differ significantly between the \
    two treatments across all replicate greenhouse trays.";

fn text_section(id: &str, kind: SectionKind, text: &str) -> SectionDef {
    SectionDef::new(id, kind, Placement::default()).with_content(Content::text(text))
}

fn container(def: SectionDef, target: BoxSize) -> SectionContainer {
    let mut c = SectionContainer::new(def);
    c.set_box(target);
    c
}

/// Largest size that fits by trying every size from the top.
fn scan(m: &MetricsMeasurer, content: &Content, target: BoxSize, bounds: SizeBounds, lh: f64) -> u32 {
    (bounds.min..=bounds.max)
        .rev()
        .find(|&f| m.fits(content, f, lh, target).unwrap())
        .unwrap_or(bounds.min)
}

fn poster_json() -> String {
    r#"{
        "width": 1200,
        "height": 900,
        "margin": 30,
        "gap": 20,
        "columns": [{ "fr": 1 }, { "fr": 2 }],
        "rows": [{ "px": 150 }, { "fr": 1 }],
        "sections": [
            {
                "id": "title",
                "kind": "header",
                "placement": { "column": 0, "row": 0, "columnSpan": 2 },
                "content": { "type": "text", "text": "Light Quality and Seedling Growth" }
            },
            {
                "id": "methods",
                "kind": "methods",
                "placement": { "column": 0, "row": 1 },
                "content": { "type": "html", "html": "<ol><li>Sow</li><li>Grow</li><li>Weigh</li></ol>" }
            },
            {
                "id": "chart",
                "kind": "figure",
                "placement": { "column": 1, "row": 1 },
                "content": { "type": "image", "width": 800, "height": 600 }
            },
            {
                "id": "notes",
                "kind": "sidebar",
                "placement": { "column": 1, "row": 0 },
                "content": { "type": "text", "text": "" }
            }
        ]
    }"#
    .to_string()
}

// ─── End-to-end fit ─────────────────────────────────────────────

#[test]
fn forty_word_paragraph_fills_600_by_200_box() {
    let m = MetricsMeasurer::default();
    let target = BoxSize::new(600.0, 200.0);
    assert_eq!(FORTY_WORDS.split_whitespace().count(), 40);

    let mut c = container(text_section("results", SectionKind::Text, FORTY_WORDS), target);
    let result = c.refit(&m).unwrap();
    let f = result.font_size().unwrap();

    let content = Content::text(FORTY_WORDS);
    assert!((12..=72).contains(&f));
    assert!(m.fits(&content, f, 1.5, target).unwrap(), "{f}px should fit");
    if f < 72 {
        assert!(!m.fits(&content, f + 1, 1.5, target).unwrap(), "{}px should not fit", f + 1);
    }
    assert!(matches!(
        result,
        FitResult::Text {
            source: FitSource::Solved,
            overflow: false,
            ..
        }
    ));
}

#[test]
fn poster_json_round_trip() {
    let out = fit_poster_json(&poster_json()).unwrap();
    let fit: PosterFit = serde_json::from_str(&out).unwrap();
    assert_eq!(fit.sections.len(), 4);

    let title = fit.section("title").unwrap();
    assert_eq!(title.kind, SectionKind::Header);
    assert!(title.result().unwrap().font_size().unwrap() >= 12);

    let notes = fit.section("notes").unwrap();
    assert_eq!(notes.kind, SectionKind::Default);
    assert_eq!(notes.state, SectionState::Empty);

    // Columns: (1140 - 20) / 3 = 373.33 and 746.67; row 1 is 840 - 150 - 20 = 670.
    match fit.section("chart").unwrap().result() {
        Some(FitResult::Image { width, height }) => {
            let cell = fit.section("chart").unwrap().cell;
            assert!((width - cell.width).abs() < 1e-6);
            assert!((height - cell.width * 0.75).abs() < 1e-6);
            assert!(height <= cell.height);
        }
        other => panic!("expected image fit, got {other:?}"),
    }
}

#[test]
fn malformed_poster_json_reports_parse_hint() {
    let err = fit_poster_json(r#"{ "width": 100, }"#).unwrap_err();
    assert!(matches!(err, FitError::Parse { .. }));
    assert!(err.to_string().contains("Hint"));
}

#[test]
fn fit_output_uses_camel_case_fields() {
    let out = fit_poster_json(&poster_json()).unwrap();
    assert!(out.contains("\"fontSize\""), "{out}");
    assert!(out.contains("\"lineHeight\""));
    assert!(out.contains("\"status\":\"fitted\""));
    assert!(out.contains("\"status\":\"empty\""));
}

// ─── Solver properties ──────────────────────────────────────────

#[test]
fn solver_matches_exhaustive_scan() {
    let m = MetricsMeasurer::default();
    let texts = [
        "Abstract",
        FORTY_WORDS,
        "Short line\nAnother line\nThird",
        "Pneumonoultramicroscopicsilicovolcanoconiosis",
    ];
    let boxes = [(90.0, 40.0), (250.0, 250.0), (600.0, 200.0), (1000.0, 90.0)];
    for text in texts {
        let content = Content::text(text);
        for (w, h) in boxes {
            let target = BoxSize::new(w, h);
            for bounds in [SizeBounds::new(12, 72), SizeBounds::new(1, 200), SizeBounds::new(30, 30)] {
                let solved = solve(&m, &content, target, bounds, 1.4).unwrap();
                assert_eq!(
                    solved,
                    scan(&m, &content, target, bounds, 1.4),
                    "{text:?} in {w}x{h} with {bounds:?}"
                );
            }
        }
    }
}

#[test]
fn solver_respects_bounds() {
    let m = MetricsMeasurer::default();
    let huge = BoxSize::new(10_000.0, 10_000.0);
    let tiny = BoxSize::new(10.0, 10.0);
    let content = Content::text("Fit me");
    assert_eq!(solve(&m, &content, huge, SizeBounds::new(12, 72), 1.5).unwrap(), 72);
    assert_eq!(solve(&m, &content, tiny, SizeBounds::new(12, 72), 1.5).unwrap(), 12);
    // Inverted bounds collapse to min.
    assert_eq!(solve(&m, &content, huge, SizeBounds::new(50, 20), 1.5).unwrap(), 50);
    assert_eq!(solve(&m, &content, tiny, SizeBounds::new(50, 20), 1.5).unwrap(), 50);
}

#[test]
fn empty_content_takes_the_maximum() {
    let m = MetricsMeasurer::default();
    for content in [Content::text(""), Content::html("<p><br></p>")] {
        assert_eq!(
            solve(&m, &content, BoxSize::new(1.0, 1.0), SizeBounds::default(), 1.5).unwrap(),
            72
        );
    }
}

#[test]
fn table_markup_is_scanned_linearly() {
    let m = MetricsMeasurer::default();
    let table = Content::html(
        "<table><tr><th>Group</th><th>Yield</th></tr><tr><td>A</td><td>4.2</td></tr></table>",
    );
    let strategy = SearchStrategy::for_content(&table, true);
    assert_eq!(strategy, SearchStrategy::Linear);
    let target = BoxSize::new(300.0, 120.0);
    let linear = FitRequest::new(&table, target, SizeBounds::default(), 1.4)
        .with_strategy(strategy)
        .solve(&m)
        .unwrap();
    let binary = FitRequest::new(&table, target, SizeBounds::default(), 1.4)
        .solve(&m)
        .unwrap();
    assert_eq!(linear.font_size, binary.font_size);
    assert!(linear.probes >= binary.probes);
}

#[test]
fn cached_solves_equal_uncached() {
    let m = MetricsMeasurer::default();
    let mut cache = FitCache::default();
    let content = Content::text(FORTY_WORDS);
    for (w, h) in [(600.0, 200.0), (300.0, 400.0), (600.0, 200.0)] {
        let request = FitRequest::new(&content, BoxSize::new(w, h), SizeBounds::default(), 1.5);
        assert_eq!(cache.solve(&m, &request).unwrap(), request.solve(&m).unwrap());
    }
    assert_eq!((cache.hits(), cache.misses()), (1, 2));
}

// ─── Containers ─────────────────────────────────────────────────

#[test]
fn newest_edit_wins_regardless_of_completion_order() {
    let m = MetricsMeasurer::default();
    let mut c = container(
        text_section("abstract", SectionKind::Text, "Draft"),
        BoxSize::new(600.0, 200.0),
    );
    let first = c.begin_fit().unwrap();
    c.set_content(Content::text(FORTY_WORDS));
    let second = c.begin_fit().unwrap();

    let second_result = second.run(&m, None);
    assert!(c.apply(&second, second_result));
    assert!(!c.apply(&first, first.run(&m, None)));
    assert_eq!(c.result(), Some(second_result));
}

#[test]
fn headless_measurement_uses_policy_hint() {
    let mut c = container(
        text_section("refs", SectionKind::References, "[1] A. Author. A paper. 2020."),
        BoxSize::new(1000.0, 300.0),
    );
    let result = c.refit(&UnavailableMeasurer).unwrap();
    assert_eq!(
        result,
        FitResult::Text {
            font_size: 25,
            line_height: 1.4,
            source: FitSource::Hint,
            overflow: false,
        }
    );
}

#[test]
fn hosted_measurer_without_render_tree_degrades_to_hint() {
    struct Headless;
    impl LayoutHost for Headless {
        type Probe = ();
        fn attach(&self, _: f64, _: f64, _: f64) -> Result<(), FitError> {
            Err(FitError::MeasurementUnavailable("no document".into()))
        }
        fn render_height(&self, _: &mut (), _: &Content) -> Result<f64, FitError> {
            Ok(0.0)
        }
        fn detach(&self, _: ()) {}
    }

    let mut c = container(
        text_section("intro", SectionKind::Text, "Hello poster"),
        BoxSize::new(600.0, 200.0),
    );
    let result = c.refit(&HostedMeasurer::new(Headless)).unwrap();
    assert_eq!(result.font_size(), Some(20));
}

// ─── Images and grid ────────────────────────────────────────────

#[test]
fn zero_height_image_resolves_to_zero() {
    let fit = resolve_image(BoxSize::new(100.0, 0.0), BoxSize::new(200.0, 100.0), true);
    assert_eq!(fit, ImageFit::ZERO);
}

#[test]
fn image_keeps_aspect_ratio_inside_box() {
    for (nw, nh) in [(4000.0, 3000.0), (500.0, 2000.0), (1.0, 1.0)] {
        let target = BoxSize::new(640.0, 360.0);
        let fit = resolve_image(BoxSize::new(nw, nh), target, true);
        assert!(fit.width <= 640.0 + 1e-9 && fit.height <= 360.0 + 1e-9);
        assert!((fit.width / fit.height - nw / nh).abs() < 1e-9);
    }
    assert_eq!(
        resolve_image(BoxSize::new(4000.0, 3000.0), BoxSize::new(640.0, 360.0), false),
        ImageFit {
            width: 640.0,
            height: 360.0
        }
    );
}

#[test]
fn grid_cells_tile_the_poster() {
    let columns = grid::resolve_tracks(&[Track::Px(200.0), Track::Fr(1.0), Track::Fr(3.0)], 1040.0, 20.0);
    assert_eq!(columns, vec![200.0, 200.0, 600.0]);
    let rows = grid::resolve_tracks(&[Track::Fr(1.0)], 500.0, 20.0);

    let spanning = Placement {
        column: 1,
        row: 0,
        column_span: 2,
        row_span: 1,
    };
    let cell = grid::cell_rect(&spanning, &columns, &rows, 20.0, 5.0).unwrap();
    assert_eq!(cell.x, 225.0);
    assert_eq!(cell.size(), BoxSize::new(810.0, 490.0));
}
