use std::time::Duration;

use approx::assert_abs_diff_eq;
use ecoviz::core::{ChartType, DataPoint, Story, StoryCatalog, StoryRecord};
use ecoviz::render::{ChartRenderer, NullRenderer};
use ecoviz::stories::ChartAnimationEngine;

const FRAME: Duration = Duration::from_millis(16);

fn story(id: u32, chart_type: ChartType, values: &[f64]) -> Story {
    Story::new(StoryRecord {
        id,
        title: format!("story {id}"),
        subtitle: String::new(),
        description: String::new(),
        data_points: values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                DataPoint::new(2000 + index as i32, value, format!("y{index}"))
            })
            .collect(),
        color: "#4ecdc4".to_owned(),
        unit: "u".to_owned(),
        chart_type,
    })
    .expect("valid story")
}

fn run_to_completion(engine: &mut ChartAnimationEngine) {
    let mut guard = 0;
    while engine.is_animating() {
        engine.advance(FRAME);
        guard += 1;
        assert!(guard < 10_000, "animation never settled");
    }
}

#[test]
fn bars_settle_at_their_share_of_the_maximum() {
    let mut engine = ChartAnimationEngine::new();
    let bars = story(1, ChartType::Bar, &[10.0, 20.0, 5.0]);
    let issued = engine.animate(&bars).expect("animate");
    // Three bar heights and three counters.
    assert_eq!(issued, 6);

    let elements = engine.elements().expect("elements");
    assert!(elements.bars().iter().all(|bar| bar.height_percent == 0.0));

    run_to_completion(&mut engine);
    let elements = engine.elements().expect("elements");
    let heights: Vec<f64> = elements.bars().iter().map(|bar| bar.height_percent).collect();
    assert_eq!(heights, vec![50.0, 100.0, 25.0]);
}

#[test]
fn staggered_bars_start_in_order() {
    let mut engine = ChartAnimationEngine::new();
    engine
        .animate(&story(1, ChartType::Bar, &[10.0, 20.0, 5.0]))
        .expect("animate");

    engine.advance(Duration::from_millis(100));
    let elements = engine.elements().expect("elements");
    assert_ne!(elements.bars()[0].height_percent, 0.0);
    assert_eq!(elements.bars()[1].height_percent, 0.0);
    assert_eq!(elements.bars()[2].height_percent, 0.0);

    engine.advance(Duration::from_millis(200));
    let elements = engine.elements().expect("elements");
    assert_ne!(elements.bars()[1].height_percent, 0.0);
    assert_eq!(elements.bars()[2].height_percent, 0.0);
}

#[test]
fn two_point_line_spans_baseline_to_top() {
    let mut engine = ChartAnimationEngine::new();
    let line = story(0, ChartType::Line, &[0.0, 10.0]);
    engine.load(&line);

    let elements = engine.elements().expect("elements");
    let points = elements.points();
    assert_eq!(points.len(), 2);
    assert_abs_diff_eq!(points[0].center.x, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(points[0].center.y, 190.0, epsilon = 1e-9);
    assert_abs_diff_eq!(points[1].center.x, 390.0, epsilon = 1e-9);
    assert_abs_diff_eq!(points[1].center.y, 10.0, epsilon = 1e-9);
    assert!(points.iter().all(|p| p.scale == 0.0 && p.opacity == 0.0));

    let path = elements.line().expect("line path");
    assert!(!path.dash_armed);
    assert_abs_diff_eq!(path.length, 380.0f64.hypot(180.0), epsilon = 1e-9);
}

#[test]
fn line_path_draws_in_from_hidden_to_solid() {
    let mut engine = ChartAnimationEngine::new();
    let line = story(0, ChartType::Line, &[0.0, 10.0]);
    // Two points with scale and opacity, one dash offset, two counters.
    assert_eq!(engine.animate(&line).expect("animate"), 7);

    let path = engine.elements().and_then(|e| e.line()).expect("line path");
    assert!(path.dash_armed);
    assert_abs_diff_eq!(path.dash_offset, path.length, epsilon = 1e-9);

    let frame = engine.build_frame();
    assert_eq!(frame.polylines.len(), 1);
    assert_eq!(frame.polylines[0].dash_length, Some(path.length));
    assert!(frame.circles.is_empty(), "collapsed markers are not drawn");
    assert_eq!(frame.lines.len(), 5, "line charts carry grid lines");

    run_to_completion(&mut engine);
    let elements = engine.elements().expect("elements");
    let path = elements.line().expect("line path");
    assert_eq!(path.dash_offset, 0.0);
    assert!(elements.points().iter().all(|p| p.scale == 1.0 && p.opacity == 1.0));
    assert_eq!(engine.build_frame().circles.len(), 2);
}

#[test]
fn area_fill_grows_from_the_baseline() {
    let mut engine = ChartAnimationEngine::new();
    let area = story(2, ChartType::Area, &[100.0, 95.0, 88.0, 82.0]);
    engine.animate(&area).expect("animate");

    let fill = engine.elements().and_then(|e| e.area()).expect("area fill");
    assert_eq!(fill.opacity, 0.0);
    assert!(engine.build_frame().polygons.is_empty());

    engine.advance(Duration::from_millis(300));
    let fill = engine.elements().and_then(|e| e.area()).expect("area fill");
    assert!(fill.scale_y > 0.0 && fill.scale_y < 1.0);
    for point in fill.scaled_outline() {
        assert!(point.y <= 190.0 + 1e-9);
    }

    run_to_completion(&mut engine);
    let fill = engine.elements().and_then(|e| e.area()).expect("area fill");
    assert_abs_diff_eq!(fill.opacity, 0.6, epsilon = 1e-12);
    assert_eq!(fill.scale_y, 1.0);
    for (scaled, original) in fill.scaled_outline().iter().zip(&fill.outline) {
        assert_abs_diff_eq!(scaled.y, original.y, epsilon = 1e-9);
    }
    assert!(engine.build_frame().lines.is_empty(), "no grid on area charts");
}

#[test]
fn reanimating_cancels_previous_tweens() {
    let mut engine = ChartAnimationEngine::new();
    engine
        .animate(&story(1, ChartType::Bar, &[1.0, 2.0, 3.0, 4.0]))
        .expect("animate bars");
    engine.advance(Duration::from_millis(100));
    assert_eq!(engine.live_tweens(), 8);

    let issued = engine
        .animate(&story(0, ChartType::Line, &[0.0, 10.0]))
        .expect("animate line");
    assert_eq!(engine.live_tweens(), issued);
    assert_eq!(engine.story_id(), Some(0));
    assert!(engine.elements().is_some_and(|e| e.bars().is_empty()));
}

#[test]
fn stop_leaves_elements_in_place() {
    let mut engine = ChartAnimationEngine::new();
    engine
        .animate(&story(1, ChartType::Bar, &[10.0, 20.0]))
        .expect("animate");
    engine.advance(Duration::from_millis(500));
    let before = engine.elements().cloned().expect("elements");

    assert_eq!(engine.stop(), 4);
    engine.advance(Duration::from_millis(500));
    assert!(!engine.is_animating());
    assert_eq!(engine.elements(), Some(&before));
}

#[test]
fn counters_finish_on_rounded_targets() {
    let mut engine = ChartAnimationEngine::new();
    let temperatures = story(0, ChartType::Line, &[-0.2, 0.1, -0.1, 0.3, 0.6, 1.1]);
    engine.animate(&temperatures).expect("animate");

    let texts: Vec<&str> = engine
        .elements()
        .expect("elements")
        .counters()
        .iter()
        .map(|counter| counter.text.as_str())
        .collect();
    assert!(texts.iter().all(|text| *text == "0"));

    run_to_completion(&mut engine);
    let texts: Vec<String> = engine
        .elements()
        .expect("elements")
        .counters()
        .iter()
        .map(|counter| counter.text.clone())
        .collect();
    assert_eq!(texts, vec!["-0.2", "0.1", "-0.1", "0.3", "0.6", "1.1"]);
}

#[test]
fn remaining_time_matches_the_longest_tween() {
    let mut engine = ChartAnimationEngine::new();
    engine
        .animate(&story(1, ChartType::Bar, &[1.0, 2.0, 3.0]))
        .expect("animate");
    // Third counter starts after 200 ms and runs for 1500 ms.
    assert_eq!(engine.remaining(), Duration::from_millis(1700));
}

#[test]
fn builtin_story_frames_validate_throughout_playback() {
    let catalog = StoryCatalog::builtin().expect("builtin");
    let mut renderer = NullRenderer::default();
    let mut engine = ChartAnimationEngine::new();

    for story in catalog.stories() {
        engine.animate(story).expect("animate");
        loop {
            renderer.render(&engine.build_frame()).expect("valid frame");
            if !engine.is_animating() {
                break;
            }
            engine.advance(FRAME);
        }
        assert!(renderer.last_text_count >= story.data_points().len());
    }
    assert!(renderer.frames_rendered > catalog.len());
}
