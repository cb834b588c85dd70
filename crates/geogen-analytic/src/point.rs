//! Points: the base analytic value all constructions eventually bottom out in.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::tolerance::approx_eq;
use crate::ToleranceEq;

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (*self - *other).norm()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Reflect `self` across `mirror`.
    pub fn reflect_over(&self, mirror: &Point) -> Point {
        Point::new(2.0 * mirror.x - self.x, 2.0 * mirror.y - self.y)
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or `None` if `self` is (near) the
    /// zero vector.
    pub fn normalized(&self) -> Option<Point> {
        let n = self.norm();
        if n < crate::tolerance::EPSILON {
            None
        } else {
            Some(Point::new(self.x / n, self.y / n))
        }
    }

    /// 90-degree counter-clockwise rotation, treating `self` as a vector.
    pub fn rotate90(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D "cross product" (z-component of the 3D cross product).
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl ToleranceEq for Point {
    fn tol_eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}
