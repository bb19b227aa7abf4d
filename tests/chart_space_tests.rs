use ecoviz::core::chart_space::{BASELINE_Y, CHART_MARGIN, CHART_WIDTH};
use ecoviz::core::{area_outline, bar_height_percent, polyline_length, project_series};
use proptest::prelude::*;

#[test]
fn flat_series_projects_onto_the_centre_line() {
    let points = project_series(&[7.0, 7.0, 7.0]);
    assert!(points.iter().all(|point| point.y == 100.0));
    assert_eq!(points[1].x, 200.0);
}

#[test]
fn area_outline_closes_on_the_baseline() {
    let outline = area_outline(&project_series(&[1.0, 3.0, 2.0]));
    assert_eq!(outline.len(), 5);
    assert_eq!((outline[0].x, outline[0].y), (CHART_MARGIN, BASELINE_Y));
    let last = outline[outline.len() - 1];
    assert_eq!((last.x, last.y), (CHART_WIDTH - CHART_MARGIN, BASELINE_Y));
}

#[test]
fn non_positive_maximum_yields_flat_bars() {
    assert_eq!(bar_height_percent(5.0, 0.0), 0.0);
    assert_eq!(bar_height_percent(-5.0, -1.0), 0.0);
    assert_eq!(bar_height_percent(5.0, 20.0), 25.0);
}

proptest! {
    #[test]
    fn projected_points_stay_inside_the_plot(
        values in proptest::collection::vec(-1.0e6f64..1.0e6, 1..64)
    ) {
        let points = project_series(&values);
        prop_assert_eq!(points.len(), values.len());
        for point in &points {
            prop_assert!(point.x >= 10.0 - 1e-9 && point.x <= 390.0 + 1e-9);
            prop_assert!(point.y >= 10.0 - 1e-9 && point.y <= 190.0 + 1e-9);
        }
        for pair in points.windows(2) {
            prop_assert!(pair[0].x < pair[1].x);
        }
    }

    #[test]
    fn larger_values_are_drawn_higher(
        values in proptest::collection::vec(-1.0e3f64..1.0e3, 2..32)
    ) {
        let points = project_series(&values);
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                if a > b {
                    prop_assert!(points[i].y <= points[j].y);
                }
            }
        }
    }

    #[test]
    fn polyline_length_is_at_least_the_horizontal_span(
        values in proptest::collection::vec(-1.0e3f64..1.0e3, 2..32)
    ) {
        let length = polyline_length(&project_series(&values));
        prop_assert!(length >= 380.0 - 1e-6);
    }
}
