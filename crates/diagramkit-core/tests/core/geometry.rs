use diagramkit_core::{Point, Rect, Vector};
use proptest::prelude::*;

#[test]
fn test_boundary_toward_leaves_rect_edge() {
    let rect = Rect::centered(Point::new(0.0, 0.0), 40.0, 20.0);
    let exit = rect.boundary_toward(Point::new(100.0, 0.0));
    assert!(exit.approx_eq(&Point::new(20.0, 0.0), 1e-9));

    let exit = rect.boundary_toward(Point::new(0.0, -50.0));
    assert!(exit.approx_eq(&Point::new(0.0, -10.0), 1e-9));
}

#[test]
fn test_bounding_of_points() {
    let rect = Rect::bounding([
        Point::new(3.0, 4.0),
        Point::new(-1.0, 10.0),
        Point::new(2.0, -2.0),
    ])
    .unwrap();
    assert_eq!(rect, Rect::new(-1.0, -2.0, 4.0, 12.0));
    assert!(Rect::bounding(std::iter::empty()).is_none());
}

proptest! {
    #[test]
    fn prop_point_vector_roundtrip(x in -1e6f64..1e6, y in -1e6f64..1e6, dx in -1e3f64..1e3, dy in -1e3f64..1e3) {
        let p = Point::new(x, y);
        let v = Vector::new(dx, dy);
        let moved = p + v;
        prop_assert!((moved - p - v).length() < 1e-6);
    }

    #[test]
    fn prop_union_contains_both(ax in -100f64..100.0, ay in -100f64..100.0, aw in 0f64..50.0, ah in 0f64..50.0,
                                bx in -100f64..100.0, by in -100f64..100.0, bw in 0f64..50.0, bh in 0f64..50.0) {
        let a = Rect::new(ax, ay, aw, ah);
        let b = Rect::new(bx, by, bw, bh);
        let u = a.union(&b);
        prop_assert!(u.contains(a.center()));
        prop_assert!(u.contains(b.center()));
    }
}
