#![cfg(feature = "cairo-backend")]

use std::time::Duration;

use cairo::{Context, Format, ImageSurface};
use ecoviz::VizError;
use ecoviz::core::StoryCatalog;
use ecoviz::render::{CairoContextRenderer, CairoRenderer, ChartRenderer};
use ecoviz::stories::ChartAnimationEngine;

fn settled_engine(index: usize) -> ChartAnimationEngine {
    let catalog = StoryCatalog::builtin().expect("builtin");
    let mut engine = ChartAnimationEngine::new();
    engine
        .animate(catalog.get(index).expect("story"))
        .expect("animate");
    while engine.is_animating() {
        engine.advance(Duration::from_millis(16));
    }
    engine
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 200).expect_err("invalid width must fail");
    assert!(matches!(err, VizError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_settled_line_story() {
    let engine = settled_engine(0);
    let mut renderer = CairoRenderer::new(400, 200).expect("renderer");
    renderer.render(&engine.build_frame()).expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.lines_drawn, 5);
    assert_eq!(stats.polylines_drawn, 1);
    assert_eq!(stats.circles_drawn, 6);
    assert_eq!(stats.texts_drawn, 6);
}

#[test]
fn cairo_renderer_draws_bars_with_labels() {
    let engine = settled_engine(1);
    let mut renderer = CairoRenderer::new(800, 400).expect("renderer");
    renderer.render(&engine.build_frame()).expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.rects_drawn, 6);
    assert_eq!(stats.texts_drawn, 12);

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let engine = settled_engine(2);
    let mut renderer = CairoRenderer::new(400, 200).expect("renderer");

    let surface = ImageSurface::create(Format::ARgb32, 400, 200).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &engine.build_frame())
        .expect("render on context");

    assert_eq!(renderer.last_stats().polygons_drawn, 1);
}
