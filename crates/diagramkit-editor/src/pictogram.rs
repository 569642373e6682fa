//! Pictograms: the drawable geometry of blocks and the collision shapes used
//! for precise hit testing.
//!
//! Pictogram geometry is expressed in the block's local space, with the
//! block position at the origin.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use lyon::math::point;
use lyon::path::Path;

use diagramkit_core::{Point, Rect};

/// Shape used to decide whether a local point is inside a pictogram.
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    Circle { center: Point, radius: f64 },
    /// A single simple polygon.
    Polygon(Vec<Point>),
    /// Several rings combined with the even-odd rule.
    Concave(Vec<Vec<Point>>),
}

impl CollisionShape {
    pub fn contains(&self, p: Point) -> bool {
        match self {
            CollisionShape::Circle { center, radius } => center.distance_to(&p) <= *radius,
            CollisionShape::Polygon(ring) => ring_contains(ring, p),
            CollisionShape::Concave(rings) => {
                rings.iter().filter(|ring| ring_contains(ring, p)).count() % 2 == 1
            }
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        match self {
            CollisionShape::Circle { center, radius } => {
                Some(Rect::centered(*center, radius * 2.0, radius * 2.0))
            }
            CollisionShape::Polygon(ring) => Rect::bounding(ring.iter().copied()),
            CollisionShape::Concave(rings) => Rect::bounding(rings.iter().flatten().copied()),
        }
    }
}

/// Even-odd crossing test.
fn ring_contains(ring: &[Point], p: Point) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Named drawable geometry of a block.
#[derive(Debug, Clone)]
pub struct Pictogram {
    pub name: String,
    pub path: Path,
    pub collision: CollisionShape,
    pub bounds: Rect,
}

impl Pictogram {
    /// Builds a pictogram whose path and collision shape are the same
    /// closed polygon.
    pub fn polygon(name: &str, ring: Vec<Point>) -> Self {
        let path = polygon_path(std::slice::from_ref(&ring));
        let collision = CollisionShape::Polygon(ring);
        Self::from_parts(name, path, collision)
    }

    pub fn circle(name: &str, radius: f64) -> Self {
        let mut builder = Path::builder();
        builder.add_circle(point(0.0, 0.0), radius as f32, lyon::path::Winding::Positive);
        let collision = CollisionShape::Circle {
            center: Point::ZERO,
            radius,
        };
        Self::from_parts(name, builder.build(), collision)
    }

    /// Builds a pictogram from several rings filled with the even-odd rule.
    pub fn concave(name: &str, rings: Vec<Vec<Point>>) -> Self {
        let path = polygon_path(&rings);
        Self::from_parts(name, path, CollisionShape::Concave(rings))
    }

    /// Bounding box comes from the path itself; collision shapes may be
    /// tighter than the drawing.
    pub fn from_parts(name: &str, path: Path, collision: CollisionShape) -> Self {
        let bb = lyon::algorithms::aabb::bounding_box(path.iter());
        let bounds = Rect::new(
            bb.min.x as f64,
            bb.min.y as f64,
            (bb.max.x - bb.min.x) as f64,
            (bb.max.y - bb.min.y) as f64,
        );
        Self {
            name: name.to_string(),
            path,
            collision,
            bounds,
        }
    }

    pub fn contains(&self, local: Point) -> bool {
        self.collision.contains(local)
    }
}

fn polygon_path(rings: &[Vec<Point>]) -> Path {
    let mut builder = Path::builder();
    for ring in rings.iter().filter(|r| !r.is_empty()) {
        builder.begin(point(ring[0].x as f32, ring[0].y as f32));
        for p in &ring[1..] {
            builder.line_to(point(p.x as f32, p.y as f32));
        }
        builder.close();
    }
    builder.build()
}

/// Pictograms by name, with an optional fallback for unknown names.
#[derive(Debug, Clone, Default)]
pub struct PictogramCollection {
    pictograms: BTreeMap<String, Pictogram>,
    fallback: Option<Pictogram>,
}

impl PictogramCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pictogram: Pictogram) {
        self.pictograms.insert(pictogram.name.clone(), pictogram);
    }

    pub fn set_fallback(&mut self, pictogram: Option<Pictogram>) {
        self.fallback = pictogram;
    }

    pub fn get(&self, name: &str) -> Option<&Pictogram> {
        self.pictograms.get(name)
    }

    /// The named pictogram, or the fallback.
    pub fn resolve(&self, name: &str) -> Option<&Pictogram> {
        self.pictograms.get(name).or(self.fallback.as_ref())
    }

    pub fn len(&self) -> usize {
        self.pictograms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictograms.is_empty()
    }

    /// Stock-and-flow pictograms.
    pub fn stock_flow() -> Self {
        let mut collection = Self::new();
        collection.insert(Pictogram::polygon("stock", rectangle(60.0, 40.0)));
        collection.insert(Pictogram::polygon(
            "flow",
            vec![
                Point::new(0.0, -20.0),
                Point::new(20.0, 0.0),
                Point::new(0.0, 20.0),
                Point::new(-20.0, 0.0),
            ],
        ));
        collection.insert(Pictogram::circle("auxiliary", 16.0));
        collection.insert(Pictogram::concave("cloud", vec![cloud_outline(24.0, 6)]));
        collection.set_fallback(Some(Pictogram::polygon("unknown", rectangle(24.0, 24.0))));
        collection
    }
}

fn rectangle(width: f64, height: f64) -> Vec<Point> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    vec![
        Point::new(-hw, -hh),
        Point::new(hw, -hh),
        Point::new(hw, hh),
        Point::new(-hw, hh),
    ]
}

/// Bumpy closed outline alternating between two radii.
fn cloud_outline(radius: f64, bumps: usize) -> Vec<Point> {
    let steps = bumps * 2;
    (0..steps)
        .map(|i| {
            let angle = i as f64 * PI / bumps as f64;
            let r = if i % 2 == 0 { radius } else { radius * 0.6 };
            Point::new(r * angle.cos(), r * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_contains() {
        let diamond = CollisionShape::Polygon(vec![
            Point::new(0.0, -10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(-10.0, 0.0),
        ]);
        assert!(diamond.contains(Point::new(0.0, 0.0)));
        // Inside the bounding box, outside the diamond.
        assert!(!diamond.contains(Point::new(8.0, 8.0)));
    }

    #[test]
    fn test_concave_even_odd() {
        let outer = rectangle(20.0, 20.0);
        let hole = rectangle(10.0, 10.0);
        let ring = CollisionShape::Concave(vec![outer, hole]);
        assert!(ring.contains(Point::new(8.0, 0.0)));
        assert!(!ring.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_cloud_is_concave() {
        let cloud = Pictogram::concave("cloud", vec![cloud_outline(24.0, 6)]);
        assert!(cloud.contains(Point::ZERO));
        // Between two bumps, past the inner radius.
        let angle = PI / 6.0;
        let between = Point::new(20.0 * angle.cos(), 20.0 * angle.sin());
        assert!(!cloud.contains(between));
        assert!(cloud.bounds.contains(between));
    }

    #[test]
    fn test_bounds_from_path() {
        let stock = Pictogram::polygon("stock", rectangle(60.0, 40.0));
        assert_eq!(stock.bounds, Rect::new(-30.0, -20.0, 60.0, 40.0));
        let aux = Pictogram::circle("aux", 16.0);
        assert!((aux.bounds.width - 32.0).abs() < 1e-3);
    }

    #[test]
    fn test_resolve_fallback() {
        let collection = PictogramCollection::stock_flow();
        assert_eq!(collection.resolve("stock").map(|p| p.name.as_str()), Some("stock"));
        assert_eq!(collection.resolve("note").map(|p| p.name.as_str()), Some("unknown"));
        assert!(collection.get("note").is_none());
    }
}
