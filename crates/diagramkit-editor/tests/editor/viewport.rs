use proptest::prelude::*;

use diagramkit_core::constants::{MAX_ZOOM, MIN_ZOOM};
use diagramkit_core::{Point, Rect, Vector};
use diagramkit_editor::ViewState;

proptest! {
    #[test]
    fn prop_zoom_stays_in_bounds(levels in prop::collection::vec(-100.0f64..100.0, 1..12)) {
        let mut view = ViewState::default();
        for level in levels {
            view.set_zoom(level, Some(Point::new(10.0, 20.0)));
            prop_assert!(view.zoom() >= MIN_ZOOM && view.zoom() <= MAX_ZOOM);
        }
    }

    #[test]
    fn prop_screen_design_round_trip(
        zoom in MIN_ZOOM..MAX_ZOOM,
        ox in -500.0f64..500.0,
        oy in -500.0f64..500.0,
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
    ) {
        let view = ViewState::new(zoom, Vector::new(ox, oy));
        let p = Point::new(x, y);
        prop_assert!(view.from_design(view.to_design(p)).approx_eq(&p, 1e-6));
        prop_assert!(view.to_design(view.from_design(p)).approx_eq(&p, 1e-6));
    }

    #[test]
    fn prop_zoom_keeps_anchor_fixed(
        zoom in MIN_ZOOM..MAX_ZOOM,
        ax in 0.0f64..1200.0,
        ay in 0.0f64..800.0,
    ) {
        let mut view = ViewState::new(1.0, Vector::new(30.0, -40.0));
        let anchor = Point::new(ax, ay);
        let before = view.to_design(anchor);
        view.set_zoom(zoom, Some(anchor));
        prop_assert!(view.to_design(anchor).approx_eq(&before, 1e-6));
    }
}

#[test]
fn test_non_finite_zoom_is_clamped() {
    let mut view = ViewState::default();
    view.set_zoom(f64::NAN, None);
    assert_eq!(view.zoom(), MIN_ZOOM);
    view.set_zoom(f64::INFINITY, None);
    assert_eq!(view.zoom(), MAX_ZOOM);
}

#[test]
fn test_fit_to_bounds_centers_content() {
    let mut view = ViewState::default();
    let bounds = Rect::new(100.0, 100.0, 200.0, 100.0);
    let viewport = Vector::new(400.0, 400.0);
    view.fit_to_bounds(bounds, viewport, 0.0);
    assert!((view.zoom() - 2.0).abs() < 1e-9);
    let center = view.from_design(bounds.center());
    assert!(center.approx_eq(&Point::new(200.0, 200.0), 1e-6));
}
