use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use approx::assert_abs_diff_eq;
use ecoviz::animation::{
    AnimatedProperty, AnimationTargets, Easing, ElementId, Stagger, Tween, TweenScheduler,
};
use indexmap::IndexMap;
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Recorder {
    values: IndexMap<AnimatedProperty, Vec<f64>>,
}

impl Recorder {
    fn last(&self, property: AnimatedProperty) -> Option<f64> {
        self.values.get(&property).and_then(|values| values.last().copied())
    }
}

impl AnimationTargets for Recorder {
    fn apply(&mut self, property: AnimatedProperty, value: f64) -> bool {
        self.values.entry(property).or_default().push(value);
        true
    }
}

fn tween(property: AnimatedProperty, from: f64, to: f64, ms: u64) -> Tween {
    Tween::new(property, from, to, Duration::from_millis(ms), Easing::Linear).expect("tween")
}

#[test]
fn linear_tween_interpolates_and_lands_on_target() {
    let mut scheduler = TweenScheduler::new();
    let mut targets = Recorder::default();
    scheduler.issue(tween(AnimatedProperty::BarHeight(0), 0.0, 100.0, 1000));

    let summary = scheduler.advance(Duration::from_millis(250), &mut targets);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.completed, 0);
    assert_abs_diff_eq!(
        targets.last(AnimatedProperty::BarHeight(0)).expect("value"),
        25.0,
        epsilon = 1e-9
    );

    let summary = scheduler.advance(Duration::from_millis(2000), &mut targets);
    assert_eq!(summary.completed, 1);
    assert_eq!(targets.last(AnimatedProperty::BarHeight(0)), Some(100.0));
    assert!(scheduler.is_idle());
    assert_eq!(scheduler.clock(), Duration::from_millis(2250));
}

#[test]
fn delayed_tween_writes_nothing_before_its_delay() {
    let mut scheduler = TweenScheduler::new();
    let mut targets = Recorder::default();
    scheduler.issue(
        tween(AnimatedProperty::AreaOpacity, 0.0, 1.0, 100).with_delay(Duration::from_millis(50)),
    );

    let summary = scheduler.advance(Duration::from_millis(49), &mut targets);
    assert_eq!(summary.updated, 0);
    assert!(targets.values.is_empty());

    scheduler.advance(Duration::from_millis(1), &mut targets);
    assert_eq!(targets.last(AnimatedProperty::AreaOpacity), Some(0.0));
}

#[test]
fn issuing_on_a_live_property_replaces_the_old_tween() {
    let mut scheduler = TweenScheduler::new();
    let mut targets = Recorder::default();
    let property = AnimatedProperty::PointScale(2);

    assert!(scheduler.issue(tween(property, 0.0, 1.0, 1000)).is_none());
    scheduler.advance(Duration::from_millis(500), &mut targets);

    let displaced = scheduler
        .issue(tween(property, 5.0, 6.0, 1000))
        .expect("old tween displaced");
    assert_eq!(displaced.endpoints(), (0.0, 1.0));
    assert_eq!(scheduler.live_count(), 1);

    scheduler.advance(Duration::from_millis(500), &mut targets);
    assert_abs_diff_eq!(targets.last(property).expect("value"), 5.5, epsilon = 1e-9);
}

#[test]
fn cancel_drops_only_the_named_property() {
    let mut scheduler = TweenScheduler::new();
    scheduler.issue(tween(AnimatedProperty::CounterValue(0), 0.0, 1.0, 100));
    scheduler.issue(tween(AnimatedProperty::CounterValue(1), 0.0, 1.0, 100));

    assert!(scheduler.cancel(AnimatedProperty::CounterValue(0)));
    assert!(!scheduler.cancel(AnimatedProperty::CounterValue(0)));
    assert!(scheduler.is_animating(AnimatedProperty::CounterValue(1)));
    assert_eq!(scheduler.cancel_all(), 1);
    assert!(scheduler.is_idle());
}

#[test]
fn on_update_callback_sees_every_write() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut scheduler = TweenScheduler::new();
    let mut targets = Recorder::default();
    scheduler.issue(
        tween(AnimatedProperty::LineDashOffset, 10.0, 0.0, 100).with_on_update(Box::new(
            move |property: AnimatedProperty, value: f64| {
                sink.borrow_mut().push((property, value));
            },
        )),
    );

    scheduler.advance(Duration::from_millis(50), &mut targets);
    scheduler.advance(Duration::from_millis(50), &mut targets);
    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1], (AnimatedProperty::LineDashOffset, 0.0));
}

#[test]
fn invalid_tweens_are_rejected() {
    let property = AnimatedProperty::AreaScaleY;
    assert!(Tween::new(property, 0.0, 1.0, Duration::ZERO, Easing::Linear).is_err());
    assert!(
        Tween::new(property, f64::NAN, 1.0, Duration::from_millis(1), Easing::Linear).is_err()
    );
}

#[test]
fn properties_map_to_their_elements() {
    assert_eq!(AnimatedProperty::PointScale(3).element(), ElementId::Point(3));
    assert_eq!(AnimatedProperty::PointOpacity(3).element(), ElementId::Point(3));
    assert_eq!(AnimatedProperty::AreaScaleY.element(), ElementId::AreaFill);
}

#[test]
fn stagger_offsets_grow_linearly() {
    let stagger = Stagger::every(Duration::from_millis(150)).after(Duration::from_millis(300));
    assert_eq!(stagger.delay(0), Duration::from_millis(300));
    assert_eq!(stagger.delay(4), Duration::from_millis(900));
    assert_eq!(Stagger::none().delay(10), Duration::ZERO);
}

fn easings() -> [Easing; 6] {
    [
        Easing::Linear,
        Easing::OutQuad,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::OutBack,
        Easing::BAR_ELASTIC,
    ]
}

proptest! {
    #[test]
    fn every_easing_pins_both_endpoints(index in 0usize..6) {
        let easing = easings()[index];
        prop_assert!(easing.apply(0.0).abs() <= 1e-12);
        prop_assert!((easing.apply(1.0) - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn out_of_range_progress_is_clamped(index in 0usize..6, t in -10.0f64..10.0) {
        let easing = easings()[index];
        let value = easing.apply(t);
        prop_assert!(value.is_finite());
        if t <= 0.0 {
            prop_assert!(value.abs() <= 1e-12);
        }
        if t >= 1.0 {
            prop_assert!((value - 1.0).abs() <= 1e-12);
        }
    }

    #[test]
    fn monotone_easings_never_decrease(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        for easing in [Easing::Linear, Easing::OutQuad, Easing::OutQuart, Easing::InOutQuart] {
            prop_assert!(easing.apply(lo) <= easing.apply(hi) + 1e-12);
        }
    }
}
