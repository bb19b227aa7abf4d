use ecoviz::core::{DataLayer, RandomSource, StoryCatalog, project_series};
use ecoviz::scene::SphereGeometry;
use ecoviz::stories::ChartAnimationEngine;
use ecoviz::texture::{synthesize_overlay, synthesize_planet_texture};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

fn bench_planet_texture_synthesis(c: &mut Criterion) {
    c.bench_function("planet_texture_512x256", |b| {
        b.iter(|| {
            let _ = synthesize_planet_texture(black_box(RandomSource::Seeded(7)))
                .expect("planet texture");
        })
    });
}

fn bench_overlay_synthesis(c: &mut Criterion) {
    c.bench_function("overlay_texture_256x128", |b| {
        b.iter(|| {
            let _ = synthesize_overlay(black_box(DataLayer::Temperature)).expect("overlay");
        })
    });
}

fn bench_sphere_geometry_64(c: &mut Criterion) {
    c.bench_function("sphere_geometry_64x64", |b| {
        b.iter(|| {
            let _ = SphereGeometry::new(black_box(1.0), 64, 64).expect("sphere");
        })
    });
}

fn bench_series_projection_10k(c: &mut Criterion) {
    let values: Vec<f64> = (0..10_000).map(|i| (f64::from(i) * 0.01).sin() * 50.0).collect();

    c.bench_function("series_projection_10k", |b| {
        b.iter(|| {
            let _ = project_series(black_box(&values));
        })
    });
}

fn bench_story_playback_60fps(c: &mut Criterion) {
    let catalog = StoryCatalog::builtin().expect("builtin stories");
    let frame = Duration::from_millis(16);

    c.bench_function("story_playback_all_stories_60fps", |b| {
        b.iter(|| {
            let mut engine = ChartAnimationEngine::new();
            for story in catalog.stories() {
                engine.animate(story).expect("animate");
                while engine.is_animating() {
                    engine.advance(black_box(frame));
                }
                let _ = black_box(engine.build_frame());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_planet_texture_synthesis,
    bench_overlay_synthesis,
    bench_sphere_geometry_64,
    bench_series_projection_10k,
    bench_story_playback_60fps
);
criterion_main!(benches);
