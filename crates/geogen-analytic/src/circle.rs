//! Circles in center-radius form, with the radius always canonicalized to
//! be non-negative.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::tolerance::{approx_eq, EPSILON};
use crate::{Error, Result, ToleranceEq};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// The circle through three non-collinear points.
    pub fn through(p: Point, q: Point, r: Point) -> Result<Circle> {
        let d = 2.0 * (p.x * (q.y - r.y) + q.x * (r.y - p.y) + r.x * (p.y - q.y));
        if d.abs() < EPSILON {
            return Err(Error::Inconstructible(
                "three points are collinear".to_string(),
            ));
        }
        let p2 = p.x * p.x + p.y * p.y;
        let q2 = q.x * q.x + q.y * q.y;
        let r2 = r.x * r.x + r.y * r.y;

        let ux = (p2 * (q.y - r.y) + q2 * (r.y - p.y) + r2 * (p.y - q.y)) / d;
        let uy = (p2 * (r.x - q.x) + q2 * (p.x - r.x) + r2 * (q.x - p.x)) / d;
        let center = Point::new(ux, uy);
        let radius = center.distance(&p);
        Ok(Circle::new(center, radius))
    }

    pub fn contains(&self, p: Point) -> bool {
        approx_eq(self.center.distance(&p), self.radius)
    }

    pub fn is_tangent_to(&self, other: &Circle) -> bool {
        let d = self.center.distance(&other.center);
        approx_eq(d, self.radius + other.radius) || approx_eq(d, (self.radius - other.radius).abs())
    }

    pub fn is_tangent_to_line(&self, line: &crate::line::Line) -> bool {
        line.is_tangent_to_circle(self)
    }
}

impl ToleranceEq for Circle {
    fn tol_eq(&self, other: &Self) -> bool {
        self.center.tol_eq(&other.center) && approx_eq(self.radius, other.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn through_rejects_collinear_points() {
        let p = Point::new(0.0, 0.0);
        let q = Point::new(1.0, 1.0);
        let r = Point::new(2.0, 2.0);
        assert!(Circle::through(p, q, r).is_err());
    }

    #[test]
    fn through_contains_all_three_points() {
        let p = Point::new(1.0, 0.0);
        let q = Point::new(0.0, 1.0);
        let r = Point::new(-1.0, 0.0);
        let c = Circle::through(p, q, r).unwrap();
        assert!(c.contains(p));
        assert!(c.contains(q));
        assert!(c.contains(r));
    }

    #[test]
    fn unit_circle_through_axis_points() {
        let c = Circle::through(Point::new(1.0, 0.0), Point::new(0.0, 1.0), Point::new(-1.0, 0.0))
            .unwrap();
        assert!(c.center.tol_eq(&Point::new(0.0, 0.0)));
        assert!(approx_eq(c.radius, 1.0));
    }

    #[test]
    fn externally_tangent_circles() {
        let c1 = Circle::new(Point::new(0.0, 0.0), 1.0);
        let c2 = Circle::new(Point::new(2.0, 0.0), 1.0);
        assert!(c1.is_tangent_to(&c2));
    }

    #[test]
    fn internally_tangent_circles() {
        let c1 = Circle::new(Point::new(0.0, 0.0), 3.0);
        let c2 = Circle::new(Point::new(1.0, 0.0), 2.0);
        assert!(c1.is_tangent_to(&c2));
    }

    #[test]
    fn non_tangent_circles() {
        let c1 = Circle::new(Point::new(0.0, 0.0), 1.0);
        let c2 = Circle::new(Point::new(5.0, 0.0), 1.0);
        assert!(!c1.is_tangent_to(&c2));
    }
}
