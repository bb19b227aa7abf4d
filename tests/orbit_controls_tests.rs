use approx::assert_abs_diff_eq;
use ecoviz::SceneConfig;
use ecoviz::scene::{OrbitController, PerspectiveCamera};
use glam::Vec3;

fn rig() -> (OrbitController, PerspectiveCamera) {
    let config = SceneConfig::default();
    (
        OrbitController::from_config(&config),
        PerspectiveCamera::from_config(&config, 4.0 / 3.0),
    )
}

#[test]
fn rotation_is_damped_over_several_frames() {
    let (mut controls, mut camera) = rig();
    controls.rotate(0.5, 0.0);

    assert!(controls.update(&mut camera));
    let first_step = camera.position;
    assert_abs_diff_eq!(camera.distance(), 3.0, epsilon = 1e-4);
    assert!(!controls.is_settled());

    let mut frames = 1;
    while controls.update(&mut camera) {
        frames += 1;
        assert!(frames < 5000, "damping never settles");
    }
    assert!(frames > 10);
    assert!(camera.position.distance(first_step) > 0.1);
    assert_abs_diff_eq!(camera.distance(), 3.0, epsilon = 1e-3);
}

#[test]
fn polar_angle_never_flips_over_the_pole() {
    let (mut controls, mut camera) = rig();
    for _ in 0..200 {
        controls.rotate(0.0, 10.0);
        controls.update(&mut camera);
    }
    assert!(camera.position.is_finite());
    assert!(camera.position.y <= 3.0 + 1e-5);
    assert!(camera.position.y > 2.9);
    assert!(camera.position.x.abs() < 1e-3 && camera.position.z.abs() < 1e-3);
}

#[test]
fn zoom_is_clamped_to_configured_limits() {
    let (mut controls, mut camera) = rig();
    controls.zoom(0.01);
    controls.update(&mut camera);
    assert_abs_diff_eq!(camera.distance(), 10.0, epsilon = 1e-4);

    controls.zoom(1_000.0);
    controls.update(&mut camera);
    assert_abs_diff_eq!(camera.distance(), 1.5, epsilon = 1e-4);
}

#[test]
fn disabled_zoom_and_pan_are_ignored() {
    let config = SceneConfig {
        enable_zoom: false,
        enable_pan: false,
        ..SceneConfig::default()
    };
    let mut controls = OrbitController::from_config(&config);
    let mut camera = PerspectiveCamera::from_config(&config, 1.0);

    controls.zoom(4.0);
    controls.pan(&camera, 1.0, 1.0);
    assert!(controls.is_settled());
    assert!(!controls.update(&mut camera));
    assert_eq!(camera.target, Vec3::ZERO);
    assert_abs_diff_eq!(camera.distance(), 3.0, epsilon = 1e-5);
}

#[test]
fn pan_moves_target_and_camera_together() {
    let (mut controls, mut camera) = rig();
    controls.pan(&camera, 0.1, 0.0);
    for _ in 0..300 {
        controls.update(&mut camera);
    }
    assert!(camera.target.x > 0.0);
    assert_abs_diff_eq!(camera.target.y, 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(camera.distance(), 3.0, epsilon = 1e-3);
}

#[test]
fn aspect_updates_projection() {
    let (_, mut camera) = rig();
    let before = camera.projection_matrix();
    camera.set_aspect(2.0);
    assert_ne!(before, camera.projection_matrix());
    assert_abs_diff_eq!(camera.aspect, 2.0, epsilon = 1e-6);
}
