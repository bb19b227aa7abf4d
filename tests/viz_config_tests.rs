use std::time::Duration;

use ecoviz::core::{DataLayer, RandomSource};
use ecoviz::{SceneConfig, StoriesConfig, VizConfig, VizError};

#[test]
fn empty_document_yields_defaults() {
    let config = VizConfig::from_json_str("{}").expect("parse");
    assert_eq!(config, VizConfig::default());
    assert_eq!(config.scene.fov_degrees, 75.0);
    assert_eq!(config.scene.camera_distance, 3.0);
    assert_eq!(config.scene.max_pixel_ratio, 2.0);
    assert_eq!(config.stories.play_window(), Duration::from_millis(3000));
    assert!(!config.stories.autoplay_on_select);
}

#[test]
fn partial_document_overrides_named_fields_only() {
    let json = r#"{
        "scene": {
            "min_distance": 2.0,
            "initial_layer": "co2",
            "random_source": { "seeded": 99 }
        },
        "stories": { "autoplay_on_select": true }
    }"#;
    let config = VizConfig::from_json_str(json).expect("parse");
    assert_eq!(config.scene.min_distance, 2.0);
    assert_eq!(config.scene.max_distance, 10.0);
    assert_eq!(config.scene.initial_layer, DataLayer::Co2);
    assert_eq!(config.scene.random_source, RandomSource::Seeded(99));
    assert!(config.stories.autoplay_on_select);
    assert_eq!(config.stories.play_window_ms, 3000);
}

#[test]
fn config_round_trips_through_pretty_json() {
    let config = VizConfig {
        scene: SceneConfig::default()
            .with_seed(5)
            .with_initial_layer(DataLayer::Temperature),
        stories: StoriesConfig::default().with_autoplay_on_select(true),
    };
    let json = config.to_json_pretty().expect("encode");
    assert_eq!(VizConfig::from_json_str(&json).expect("decode"), config);
}

#[test]
fn invalid_values_are_rejected_after_parsing() {
    for json in [
        r#"{ "scene": { "fov_degrees": 180.0 } }"#,
        r#"{ "scene": { "near": 5.0, "far": 1.0 } }"#,
        r#"{ "scene": { "min_distance": 20.0 } }"#,
        r#"{ "scene": { "camera_distance": 12.0 } }"#,
        r#"{ "scene": { "camera_distance": 1.0 } }"#,
        r#"{ "scene": { "damping_factor": 0.0 } }"#,
        r#"{ "stories": { "play_window_ms": 0 } }"#,
    ] {
        let err = VizConfig::from_json_str(json).expect_err(json);
        assert!(matches!(err, VizError::InvalidData(_)), "{json}: {err}");
    }
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = VizConfig::from_json_str("{ scene: }").expect_err("malformed");
    assert!(matches!(err, VizError::Config(_)));
}

#[test]
fn non_finite_camera_distance_is_rejected() {
    let config = SceneConfig {
        camera_distance: f32::NAN,
        ..SceneConfig::default()
    };
    let err = config.validate().expect_err("nan distance");
    assert!(matches!(err, VizError::InvalidData(_)));
    assert!(err.to_string().contains("camera distance"));

    let infinite = SceneConfig {
        camera_distance: f32::INFINITY,
        ..SceneConfig::default()
    };
    assert!(infinite.validate().is_err());
}
