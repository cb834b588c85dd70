//! Lines in normal form `ax + by + c = 0` with `(a, b)` a unit vector and a
//! canonical orientation, so that two `Line` values compare equal (within
//! tolerance) iff they represent the same infinite line.

use serde::{Deserialize, Serialize};

use crate::circle::Circle;
use crate::point::Point;
use crate::tolerance::{approx_eq, approx_zero, EPSILON};
use crate::{Error, Result, ToleranceEq};

/// A line `a*x + b*y + c = 0`, always stored with `(a, b)` unit length and
/// a canonical sign (see [`Line::canonical`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    /// Build a line from raw coefficients, normalizing `(a, b)` to unit
    /// length and fixing the sign so that two coefficient triples
    /// representing the same line always canonicalize identically.
    fn canonical(a: f64, b: f64, c: f64) -> Result<Line> {
        let norm = (a * a + b * b).sqrt();
        if norm < EPSILON {
            return Err(Error::Inconstructible(
                "degenerate line direction".to_string(),
            ));
        }
        let (mut a, mut b, mut c) = (a / norm, b / norm, c / norm);
        // Canonical orientation: a > 0, or a == 0 and b > 0.
        if a < -EPSILON || (approx_zero(a) && b < 0.0) {
            a = -a;
            b = -b;
            c = -c;
        }
        Ok(Line { a, b, c })
    }

    /// The line through two distinct points.
    pub fn through(p: Point, q: Point) -> Result<Line> {
        let d = q - p;
        if d.norm() < EPSILON {
            return Err(Error::Inconstructible(
                "through() requires two distinct points".to_string(),
            ));
        }
        // Normal is the direction rotated 90 degrees.
        let n = d.rotate90();
        let c = -(n.x * p.x + n.y * p.y);
        Line::canonical(n.x, n.y, c)
    }

    /// Unit direction vector of the line (perpendicular to the normal).
    pub fn direction(&self) -> Point {
        Point::new(self.b, -self.a)
    }

    /// Unit normal vector `(a, b)`.
    pub fn normal(&self) -> Point {
        Point::new(self.a, self.b)
    }

    /// Signed distance from `p` to the line (positive on the side the
    /// normal points to).
    pub fn signed_distance(&self, p: Point) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }

    pub fn distance(&self, p: Point) -> f64 {
        self.signed_distance(p).abs()
    }

    pub fn contains(&self, p: Point) -> bool {
        approx_zero(self.signed_distance(p))
    }

    /// Orthogonal projection of `p` onto the line.
    pub fn project(&self, p: Point) -> Point {
        let d = self.signed_distance(p);
        Point::new(p.x - d * self.a, p.y - d * self.b)
    }

    /// The line through `p` perpendicular to `self`.
    pub fn perpendicular_from(&self, p: Point) -> Line {
        let dir = self.normal();
        Line::through(p, p + dir).expect("unit normal gives a non-degenerate direction")
    }

    /// The line through `p` parallel to `self`.
    pub fn parallel_from(&self, p: Point) -> Line {
        let c = -(self.a * p.x + self.b * p.y);
        Line::canonical(self.a, self.b, c).expect("(a, b) already unit")
    }

    pub fn is_parallel(&self, other: &Line) -> bool {
        approx_zero(self.a * other.b - self.b * other.a)
    }

    pub fn is_perpendicular(&self, other: &Line) -> bool {
        approx_zero(self.a * other.a + self.b * other.b)
    }

    pub fn is_tangent_to_circle(&self, circle: &Circle) -> bool {
        approx_eq(self.distance(circle.center), circle.radius)
    }

    /// Internal bisector of `∠p q r` (vertex `q`).
    pub fn angle_bisector(p: Point, q: Point, r: Point) -> Result<Line> {
        let u = (p - q)
            .normalized()
            .ok_or_else(|| Error::Inconstructible("bisector vertex coincides with p".into()))?;
        let v = (r - q)
            .normalized()
            .ok_or_else(|| Error::Inconstructible("bisector vertex coincides with r".into()))?;
        let sum = u + v;
        let direction = if sum.norm() < EPSILON {
            // p, q, r collinear with q between p and r: the two arms are
            // opposite, any perpendicular to either arm bisects the angle.
            u.rotate90()
        } else {
            sum
        };
        Line::through(q, q + direction)
    }

    /// Perpendicular bisector of segment `p q`.
    pub fn perpendicular_bisector(p: Point, q: Point) -> Result<Line> {
        let mid = p.midpoint(&q);
        let dir = (q - p)
            .normalized()
            .ok_or_else(|| Error::Inconstructible("perpendicular_bisector requires p != q".into()))?;
        let perp = dir.rotate90();
        Line::through(mid, mid + perp)
    }
}

impl ToleranceEq for Line {
    fn tol_eq(&self, other: &Self) -> bool {
        approx_eq(self.a, other.a) && approx_eq(self.b, other.b) && approx_eq(self.c, other.c)
    }
}
