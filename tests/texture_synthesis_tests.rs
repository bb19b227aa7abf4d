use approx::assert_abs_diff_eq;
use ecoviz::core::{DataLayer, HOTSPOTS, RandomSource};
use ecoviz::texture::{HOTSPOT_RADIUS, synthesize_overlay, synthesize_planet_texture};

#[test]
fn overlay_has_one_stamp_per_hotspot_for_every_layer() {
    for layer in DataLayer::ALL {
        let overlay = synthesize_overlay(layer).expect("overlay");
        assert_eq!(overlay.layer(), layer);
        assert_eq!(overlay.stamps().len(), 5);
        assert_eq!(overlay.raster().width(), 256);
        assert_eq!(overlay.raster().height(), 128);

        for (stamp, hotspot) in overlay.stamps().iter().zip(HOTSPOTS) {
            let (cx, cy) = stamp.center();
            assert_abs_diff_eq!(cx, hotspot.normalized_x * 256.0, epsilon = 1e-9);
            assert_abs_diff_eq!(cy, hotspot.normalized_y * 128.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn stamp_alpha_decreases_monotonically_to_radius() {
    let overlay = synthesize_overlay(DataLayer::Co2).expect("overlay");
    for stamp in overlay.stamps() {
        let intensity = stamp.hotspot.intensity as f32;
        assert_abs_diff_eq!(stamp.alpha_at(0.0), intensity, epsilon = 1e-6);

        let mut previous = stamp.alpha_at(0.0);
        for step in 1..=100 {
            let distance = HOTSPOT_RADIUS * f64::from(step) / 100.0;
            let alpha = stamp.alpha_at(distance);
            assert!(
                alpha < previous,
                "alpha must strictly decrease: {alpha} at {distance} after {previous}"
            );
            previous = alpha;
        }
        assert_abs_diff_eq!(stamp.alpha_at(HOTSPOT_RADIUS), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(stamp.alpha_at(HOTSPOT_RADIUS * 2.0), 0.0, epsilon = 1e-6);
    }
}

#[test]
fn hotspot_centres_carry_at_least_their_own_intensity() {
    let overlay = synthesize_overlay(DataLayer::Pollution).expect("overlay");
    for stamp in overlay.stamps() {
        let (cx, cy) = stamp.center();
        let alpha = overlay
            .raster()
            .alpha(cx.floor() as u32, cy.floor() as u32)
            .expect("centre pixel in bounds");
        assert!(
            f64::from(alpha) >= stamp.hotspot.intensity - 0.02,
            "centre alpha {alpha} below intensity {}",
            stamp.hotspot.intensity
        );
    }
}

#[test]
fn pixels_outside_every_hotspot_stay_transparent() {
    let overlay = synthesize_overlay(DataLayer::Deforestation).expect("overlay");
    let raster = overlay.raster();
    for (x, y) in [(255, 0), (128, 0), (255, 127), (0, 127)] {
        let pixel_center = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        let outside = overlay.stamps().iter().all(|stamp| {
            let (cx, cy) = stamp.center();
            (pixel_center.0 - cx).hypot(pixel_center.1 - cy) >= HOTSPOT_RADIUS
        });
        assert!(outside, "probe ({x}, {y}) must be outside every hotspot");
        assert_eq!(raster.alpha(x, y), Some(0.0));
    }
}

#[test]
fn overlay_tint_follows_layer_color() {
    let overlay = synthesize_overlay(DataLayer::Temperature).expect("overlay");
    let (cx, cy) = overlay.stamps()[0].center();
    let color = overlay
        .raster()
        .color(cx as u32, cy as u32)
        .expect("centre pixel");
    let expected = DataLayer::Temperature.color();
    assert_abs_diff_eq!(color.red, expected.red, epsilon = 1e-3);
    assert_abs_diff_eq!(color.green, expected.green, epsilon = 1e-3);
    assert_abs_diff_eq!(color.blue, expected.blue, epsilon = 1e-3);
}

#[test]
fn seeded_planet_texture_is_reproducible() {
    let first = synthesize_planet_texture(RandomSource::Seeded(42)).expect("first");
    let second = synthesize_planet_texture(RandomSource::Seeded(42)).expect("second");
    let other = synthesize_planet_texture(RandomSource::Seeded(43)).expect("other");

    assert_eq!(first.width(), 512);
    assert_eq!(first.height(), 256);
    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn planet_texture_is_fully_opaque_and_banded_left_to_right() {
    let texture = synthesize_planet_texture(RandomSource::Seeded(1)).expect("texture");
    assert!(
        texture
            .pixels()
            .iter()
            .all(|pixel| (pixel[3] - 1.0).abs() <= 1e-5)
    );

    // Ocean blue dominates the left edge, ice white the right edge.
    let left = texture.color(0, 128).expect("left");
    let right = texture.color(511, 128).expect("right");
    assert!(left.blue > left.red);
    assert!(right.red > 0.6 && right.green > 0.6 && right.blue > 0.6);
}
