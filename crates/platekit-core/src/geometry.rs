//! Axis-aligned box primitives.
//!
//! `Rectangle` and `Cuboid` are immutable value types: every geometric
//! operation returns a new box, so they can be copied and shared freely.
//! Comparisons are exact (`f64` field equality, strict inequalities in the
//! overlap tests). Boxes that touch at a boundary do not collide at zero
//! padding, and zero-extent boxes are valid values that propagate through
//! the intersection and collision math.

use serde::{Deserialize, Serialize};

/// Horizontal axes of the machine coordinate system.
///
/// Vertical (Z) behavior lives on [`Cuboid`] directly; everything that
/// operates on footprints only needs these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The other horizontal axis.
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// A planar offset of `amount` along this axis and zero along the other.
    pub fn offset(self, amount: f64) -> (f64, f64) {
        match self {
            Axis::X => (amount, 0.0),
            Axis::Y => (0.0, amount),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// Closed interval on a single axis, normalized so `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub fn new(min: f64, max: f64) -> Self {
        if max < min {
            Span { min: max, max: min }
        } else {
            Span { min, max }
        }
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }
}

/// Common view on the horizontal extent of a box.
///
/// Implemented by both [`Rectangle`] and [`Cuboid`] so that operations
/// which only care about the footprint (head sweeps, centering, candidate
/// side offsets) can accept either.
pub trait Bounds2d {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn max_x(&self) -> f64;
    fn max_y(&self) -> f64;

    fn width(&self) -> f64 {
        self.max_x() - self.x()
    }

    fn height(&self) -> f64 {
        self.max_y() - self.y()
    }

    /// Extent of the box along one horizontal axis.
    fn range(&self, axis: Axis) -> Span {
        match axis {
            Axis::X => Span {
                min: self.x(),
                max: self.max_x(),
            },
            Axis::Y => Span {
                min: self.y(),
                max: self.max_y(),
            },
        }
    }
}

/// 2D axis-aligned box, stored as min corner and max corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rectangle {
    /// Create a rectangle, swapping coordinates per axis if they are
    /// reversed so that the min-corner invariant always holds.
    pub fn new(x: f64, y: f64, max_x: f64, max_y: f64) -> Self {
        let (x, max_x) = if max_x < x { (max_x, x) } else { (x, max_x) };
        let (y, max_y) = if max_y < y { (max_y, y) } else { (y, max_y) };
        Rectangle { x, y, max_x, max_y }
    }

    pub fn from_spans(x: Span, y: Span) -> Self {
        Rectangle {
            x: x.min,
            y: y.min,
            max_x: x.max,
            max_y: y.max,
        }
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// A rectangle with zero area is still a valid value, it just cannot
    /// overlap anything.
    pub fn is_empty(&self) -> bool {
        self.area() == 0.0
    }

    /// The overlap of two rectangles. Always a valid rectangle; zero
    /// extent on any axis where the inputs do not overlap.
    pub fn intersection(&self, other: &Rectangle) -> Rectangle {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        Rectangle::new(x, y, max_x.max(x), max_y.max(y))
    }

    /// Whether the rectangles overlap on both axes once the gap test is
    /// shrunk by `padding`. Touching boundaries do not collide at zero
    /// padding; a gap smaller than `padding` does.
    pub fn collides_with(&self, other: &Rectangle, padding: f64) -> bool {
        self.max_x + padding > other.x
            && other.max_x + padding > self.x
            && self.max_y + padding > other.y
            && other.max_y + padding > self.y
    }

    /// Move every face outward by `amount` (inward if negative).
    pub fn grow(&self, amount: f64) -> Rectangle {
        Rectangle::new(
            self.x - amount,
            self.y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    /// Rigid, size-preserving shift.
    pub fn translate(&self, dx: f64, dy: f64) -> Rectangle {
        Rectangle {
            x: self.x + dx,
            y: self.y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}

impl Bounds2d for Rectangle {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn max_x(&self) -> f64 {
        self.max_x
    }

    fn max_y(&self) -> f64 {
        self.max_y
    }
}

/// 3D axis-aligned box (cuboid), stored as min corner and max corner.
///
/// The planar extent names mirror [`Rectangle`]: `width` spans X and
/// `height` spans Y, while the vertical extent is `z_height`. An infinite
/// `max_z` is a valid value (used for volumes that reach the top of the
/// machine).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Cuboid {
    /// Create a cuboid, swapping coordinates per axis if they are
    /// reversed so that the min-corner invariant always holds.
    pub fn new(x: f64, y: f64, z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        let (x, max_x) = if max_x < x { (max_x, x) } else { (x, max_x) };
        let (y, max_y) = if max_y < y { (max_y, y) } else { (y, max_y) };
        let (z, max_z) = if max_z < z { (max_z, z) } else { (z, max_z) };
        Cuboid {
            x,
            y,
            z,
            max_x,
            max_y,
            max_z,
        }
    }

    pub fn z_height(&self) -> f64 {
        self.max_z - self.z
    }

    pub fn z_span(&self) -> Span {
        Span {
            min: self.z,
            max: self.max_z,
        }
    }

    pub fn volume(&self) -> f64 {
        self.width() * self.height() * self.z_height()
    }

    pub fn is_empty(&self) -> bool {
        self.volume() == 0.0
    }

    /// The overlap of two cuboids. Always a valid cuboid; zero extent on
    /// any axis where the inputs do not overlap.
    pub fn intersection(&self, other: &Cuboid) -> Cuboid {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let z = self.z.max(other.z);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        let max_z = self.max_z.min(other.max_z);
        Cuboid::new(x, y, z, max_x.max(x), max_y.max(y), max_z.max(z))
    }

    /// Whether the cuboids overlap on all three axes once the gap test is
    /// shrunk by `padding`.
    pub fn collides_with(&self, other: &Cuboid, padding: f64) -> bool {
        self.max_x + padding > other.x
            && other.max_x + padding > self.x
            && self.max_y + padding > other.y
            && other.max_y + padding > self.y
            && self.max_z + padding > other.z
            && other.max_z + padding > self.z
    }

    /// Move every face outward by `amount` (inward if negative).
    pub fn grow(&self, amount: f64) -> Cuboid {
        Cuboid::new(
            self.x - amount,
            self.y - amount,
            self.z - amount,
            self.max_x + amount,
            self.max_y + amount,
            self.max_z + amount,
        )
    }

    /// Rigid, size-preserving shift.
    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Cuboid {
        Cuboid {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
            max_z: self.max_z + dz,
        }
    }

    /// The horizontal footprint (vertical projection onto the bed plane).
    pub fn projection(&self) -> Rectangle {
        Rectangle {
            x: self.x,
            y: self.y,
            max_x: self.max_x,
            max_y: self.max_y,
        }
    }

    /// Project onto a vertical plane by dropping one horizontal axis.
    /// The result keeps the remaining horizontal axis first and Z second.
    pub fn side_projection(&self, dropped: Axis) -> Rectangle {
        match dropped {
            Axis::X => Rectangle {
                x: self.y,
                y: self.z,
                max_x: self.max_y,
                max_y: self.max_z,
            },
            Axis::Y => Rectangle {
                x: self.x,
                y: self.z,
                max_x: self.max_x,
                max_y: self.max_z,
            },
        }
    }
}

impl Bounds2d for Cuboid {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn max_x(&self) -> f64 {
        self.max_x
    }

    fn max_y(&self) -> f64 {
        self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle() {
        let rectangle = Rectangle::new(10.0, 15.0, 14.0, 20.0);
        assert_eq!(rectangle.x, 10.0);
        assert_eq!(rectangle.y, 15.0);
        assert_eq!(rectangle.width(), 4.0);
        assert_eq!(rectangle.height(), 5.0);
        assert_eq!(rectangle.max_x, 14.0);
        assert_eq!(rectangle.max_y, 20.0);
        assert_eq!(rectangle.area(), 20.0);
    }

    #[test]
    fn test_rectangle_normalizes_reversed_corners() {
        let rectangle = Rectangle::new(5.0, 10.0, -15.0, -20.0);
        assert_eq!(rectangle.x, -15.0);
        assert_eq!(rectangle.y, -20.0);
        assert_eq!(rectangle.width(), 20.0);
        assert_eq!(rectangle.height(), 30.0);
        assert_eq!(rectangle.max_x, 5.0);
        assert_eq!(rectangle.max_y, 10.0);
        assert_eq!(rectangle.area(), 600.0);
    }

    #[test]
    fn test_rectangle_empty() {
        let r1 = Rectangle::new(2.0, 3.0, 3.0, 4.0);
        let r2 = Rectangle::new(2.0, 3.0, 2.0, 3.0);
        assert!(!r1.is_empty());
        assert!(r2.is_empty());
    }

    #[test]
    fn test_rectangle_eq() {
        let r1 = Rectangle::new(4.0, 6.0, 8.0, 8.0);
        let r2 = Rectangle::new(8.0, 8.0, 4.0, 6.0);
        assert_eq!(r1, r2);

        let r3 = Rectangle::new(4.0, 6.0, 8.0, 7.0);
        assert_ne!(r1, r3);
    }

    #[test]
    fn test_rectangle_intersection() {
        let r1 = Rectangle::new(0.0, 0.0, 8.0, 4.0);
        let r2 = Rectangle::new(2.0, 2.0, 6.0, 10.0);
        // Bordering, but disjoint to r1
        let r3 = Rectangle::new(0.0, 8.0, 5.0, 10.0);
        // Fully disjoint to r1
        let r4 = Rectangle::new(50.0, 50.0, 60.0, 60.0);
        // Fully surrounded by r1
        let r5 = Rectangle::new(1.0, 1.0, 7.0, 3.0);

        let expected = Rectangle::new(2.0, 2.0, 6.0, 4.0);
        assert_eq!(r1.intersection(&r2), expected);
        assert_eq!(r2.intersection(&r1), expected);
        assert_eq!(r1.intersection(&r3).area(), 0.0);
        assert_eq!(r1.intersection(&r4).area(), 0.0);
        assert_eq!(r1.intersection(&r5), r5);
        assert_eq!(r5.intersection(&r1), r5);
        assert_eq!(r1.intersection(&r1), r1);
    }

    #[test]
    fn test_rectangle_collision() {
        let r1 = Rectangle::new(0.0, 0.0, 8.0, 4.0);
        let r2 = Rectangle::new(2.0, 2.0, 6.0, 10.0);
        let r3 = Rectangle::new(0.0, 8.0, 5.0, 10.0);
        let r4 = Rectangle::new(50.0, 50.0, 60.0, 60.0);
        let r5 = Rectangle::new(1.0, 1.0, 7.0, 3.0);
        // Less than 1 padding away from r1
        let r6 = Rectangle::new(8.9, 0.0, 12.0, 4.0);
        // More than 1 padding away from r1
        let r7 = Rectangle::new(0.0, 5.1, 8.0, 8.0);

        assert!(r1.collides_with(&r2, 0.0));
        assert!(r2.collides_with(&r1, 0.0));
        assert!(!r1.collides_with(&r3, 0.0));
        assert!(!r1.collides_with(&r4, 0.0));
        assert!(r1.collides_with(&r5, 0.0));
        assert!(r5.collides_with(&r1, 0.0));
        assert!(r1.collides_with(&r1, 0.0));

        assert!(!r1.collides_with(&r6, 0.0));
        assert!(r1.collides_with(&r6, 1.0));
        assert!(r6.collides_with(&r1, 1.0));
        assert!(!r1.collides_with(&r7, 1.0));
    }

    #[test]
    fn test_exact_touch_is_not_a_collision() {
        let left = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let right = Rectangle::new(10.0, 0.0, 20.0, 10.0);
        assert!(!left.collides_with(&right, 0.0));
        // Any positive padding closes the zero-width gap.
        assert!(left.collides_with(&right, 0.1));
    }

    #[test]
    fn test_disjoint_intersection_does_not_collide() {
        let a = Rectangle::new(0.0, 0.0, 4.0, 4.0);
        let b = Rectangle::new(10.0, 10.0, 14.0, 14.0);
        let overlap = a.intersection(&b);
        assert!(overlap.is_empty());
        assert!(!overlap.collides_with(&a, 0.0));
    }

    #[test]
    fn test_rectangle_grow_and_translate() {
        let r = Rectangle::new(10.0, 20.0, 30.0, 50.0);
        assert_eq!(r.grow(5.0), Rectangle::new(5.0, 15.0, 35.0, 55.0));
        assert_eq!(r.grow(-5.0), Rectangle::new(15.0, 25.0, 25.0, 45.0));
        assert_eq!(r.translate(-10.0, 5.0), Rectangle::new(0.0, 25.0, 20.0, 55.0));
        // Over-shrinking inverts the corners; normalization keeps the
        // result a valid (degenerate) value.
        let collapsed = Rectangle::new(0.0, 0.0, 4.0, 4.0).grow(-3.0);
        assert!(collapsed.width() >= 0.0);
        assert!(collapsed.height() >= 0.0);
    }

    #[test]
    fn test_cuboid() {
        let cuboid = Cuboid::new(10.0, 15.0, 20.0, 30.0, 40.0, 30.0);
        assert_eq!(cuboid.x, 10.0);
        assert_eq!(cuboid.y, 15.0);
        assert_eq!(cuboid.z, 20.0);
        assert_eq!(cuboid.width(), 20.0);
        assert_eq!(cuboid.height(), 25.0);
        assert_eq!(cuboid.z_height(), 10.0);

        assert_eq!(cuboid.max_x, 30.0);
        assert_eq!(cuboid.max_y, 40.0);
        assert_eq!(cuboid.max_z, 30.0);
        assert_eq!(cuboid.volume(), 5000.0);
    }

    #[test]
    fn test_cuboid_normalizes_reversed_corners() {
        let cuboid = Cuboid::new(5.0, 20.0, 5.0, -5.0, 15.0, -15.0);
        assert_eq!(cuboid.x, -5.0);
        assert_eq!(cuboid.y, 15.0);
        assert_eq!(cuboid.z, -15.0);
        assert_eq!(cuboid.width(), 10.0);
        assert_eq!(cuboid.height(), 5.0);
        assert_eq!(cuboid.z_height(), 20.0);

        assert_eq!(cuboid.max_x, 5.0);
        assert_eq!(cuboid.max_y, 20.0);
        assert_eq!(cuboid.max_z, 5.0);
        assert_eq!(cuboid.volume(), 1000.0);
    }

    #[test]
    fn test_cuboid_empty() {
        let c1 = Cuboid::new(2.0, 2.0, 2.0, 7.0, 5.0, 3.0);
        assert!(!c1.is_empty());
        let c2 = Cuboid::new(2.0, 2.0, 2.0, 7.0, 2.0, 3.0);
        assert!(c2.is_empty());
    }

    #[test]
    fn test_cuboid_eq() {
        let c1 = Cuboid::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let c2 = Cuboid::new(1.0, 5.0, 3.0, 4.0, 2.0, 6.0);
        let c3 = Cuboid::new(1.0, 1.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(c1, c2);
        assert_ne!(c1, c3);
    }

    #[test]
    fn test_cuboid_intersection() {
        let c1 = Cuboid::new(0.0, 0.0, 0.0, 20.0, 15.0, 10.0);
        let c2 = Cuboid::new(5.0, 5.0, 5.0, 15.0, 25.0, 35.0);
        // Bordering, but disjoint to c1
        let c3 = Cuboid::new(0.0, 15.0, 5.0, 20.0, 45.0, 45.0);
        // Fully disjoint to c1
        let c4 = Cuboid::new(50.0, 50.0, 50.0, 60.0, 60.0, 60.0);
        // Fully surrounded by c1
        let c5 = Cuboid::new(2.0, 2.0, 2.0, 14.0, 10.0, 8.0);

        let expected = Cuboid::new(5.0, 5.0, 5.0, 15.0, 15.0, 10.0);
        assert_eq!(c1.intersection(&c2), expected);
        assert_eq!(c2.intersection(&c1), expected);
        assert_eq!(c1.intersection(&c3).volume(), 0.0);
        assert_eq!(c1.intersection(&c4).volume(), 0.0);
        assert_eq!(c1.intersection(&c5), c5);
        assert_eq!(c5.intersection(&c1), c5);
        assert_eq!(c1.intersection(&c1), c1);
    }

    #[test]
    fn test_cuboid_collision() {
        let c1 = Cuboid::new(0.0, 0.0, 0.0, 20.0, 15.0, 10.0);
        let c2 = Cuboid::new(5.0, 5.0, 5.0, 15.0, 25.0, 35.0);
        let c3 = Cuboid::new(0.0, 15.0, 5.0, 20.0, 45.0, 45.0);
        let c4 = Cuboid::new(50.0, 50.0, 50.0, 60.0, 60.0, 60.0);
        let c5 = Cuboid::new(2.0, 2.0, 2.0, 14.0, 10.0, 8.0);
        // Less than 5 padding away from c1
        let c6 = Cuboid::new(24.9, 19.9, 14.9, 40.0, 35.0, 30.0);
        // More than 5 padding away from c1
        let c7 = Cuboid::new(25.1, 0.0, 0.0, 40.0, 15.0, 10.0);

        assert!(c1.collides_with(&c2, 0.0));
        assert!(c2.collides_with(&c1, 0.0));
        assert!(!c1.collides_with(&c3, 0.0));
        assert!(!c1.collides_with(&c4, 0.0));
        assert!(c1.collides_with(&c5, 0.0));
        assert!(c5.collides_with(&c1, 0.0));
        assert!(c1.collides_with(&c1, 0.0));

        assert!(!c1.collides_with(&c6, 0.0));
        assert!(c1.collides_with(&c6, 5.0));
        assert!(c6.collides_with(&c1, 5.0));
        assert!(!c1.collides_with(&c7, 5.0));
    }

    #[test]
    fn test_padding_is_monotonic() {
        let a = Cuboid::new(0.0, 0.0, 0.0, 10.0, 10.0, 10.0);
        let b = Cuboid::new(13.0, 0.0, 0.0, 20.0, 10.0, 10.0);
        let mut collided = false;
        for padding in [0.0, 1.0, 2.9, 3.0, 3.1, 50.0] {
            let now = a.collides_with(&b, padding);
            // Once colliding at some padding, larger paddings keep colliding.
            assert!(now || !collided);
            collided = now;
        }
        assert!(collided);
    }

    #[test]
    fn test_infinite_top_collides() {
        let sweep = Cuboid::new(0.0, 0.0, 80.0, 100.0, 100.0, f64::INFINITY);
        let tall = Cuboid::new(20.0, 20.0, 0.0, 40.0, 40.0, 200.0);
        let low = Cuboid::new(20.0, 20.0, 0.0, 40.0, 40.0, 50.0);
        assert!(sweep.collides_with(&tall, 0.0));
        assert!(!sweep.collides_with(&low, 0.0));
        // Padding closes the vertical gap as well.
        assert!(sweep.collides_with(&low, 31.0));
    }

    #[test]
    fn test_projections() {
        let cuboid = Cuboid::new(10.0, 15.0, 20.0, 30.0, 40.0, 35.0);
        assert_eq!(cuboid.projection(), Rectangle::new(10.0, 15.0, 30.0, 40.0));
        assert_eq!(
            cuboid.side_projection(Axis::X),
            Rectangle::new(15.0, 20.0, 40.0, 35.0)
        );
        assert_eq!(
            cuboid.side_projection(Axis::Y),
            Rectangle::new(10.0, 20.0, 30.0, 35.0)
        );
    }

    #[test]
    fn test_ranges() {
        let cuboid = Cuboid::new(10.0, 15.0, 20.0, 30.0, 40.0, 35.0);
        assert_eq!(cuboid.range(Axis::X), Span { min: 10.0, max: 30.0 });
        assert_eq!(cuboid.range(Axis::Y), Span { min: 15.0, max: 40.0 });
        assert_eq!(cuboid.z_span(), Span { min: 20.0, max: 35.0 });

        let rectangle = Rectangle::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rectangle.range(Axis::X), Span { min: 1.0, max: 3.0 });
        assert_eq!(rectangle.range(Axis::Y), Span { min: 2.0, max: 4.0 });
    }

    #[test]
    fn test_axis_helpers() {
        assert_eq!(Axis::X.perpendicular(), Axis::Y);
        assert_eq!(Axis::Y.perpendicular(), Axis::X);
        assert_eq!(Axis::X.offset(2.5), (2.5, 0.0));
        assert_eq!(Axis::Y.offset(-4.0), (0.0, -4.0));
    }

    #[test]
    fn test_span_normalizes() {
        assert_eq!(Span::new(5.0, 3.0), Span { min: 3.0, max: 5.0 });
        assert_eq!(Span::new(3.0, 5.0).length(), 2.0);
    }
}
