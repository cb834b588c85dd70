//! Intersection of the two compound primitives: line-line and line-circle.
//! Both return 0, 1, or 2 points rather than failing, since "no
//! intersection" is geometrically meaningful, not degenerate.

use crate::circle::Circle;
use crate::line::Line;
use crate::point::Point;
use crate::tolerance::{approx_zero, EPSILON};
use crate::{Error, Result, ToleranceEq};

/// Intersection of two lines. Returns an empty vector for parallel,
/// distinct lines. Two *identical* lines have no well-defined single
/// intersection point, so that case is reported as [`Error::Inconstructible`]
/// rather than silently picking an arbitrary point on the line.
pub fn intersect_lines(l1: &Line, l2: &Line) -> Result<Vec<Point>> {
    let det = l1.a * l2.b - l2.a * l1.b;
    if approx_zero(det) {
        return if l1.tol_eq(l2) {
            Err(Error::Inconstructible(
                "lines are identical; intersection point is not unique".to_string(),
            ))
        } else {
            Ok(Vec::new())
        };
    }
    let x = (-l1.c * l2.b + l2.c * l1.b) / det;
    let y = (-l1.a * l2.c + l2.a * l1.c) / det;
    Ok(vec![Point::new(x, y)])
}

/// Intersection of a line and a circle: 0, 1 (tangent), or 2 points.
pub fn intersect_line_circle(line: &Line, circle: &Circle) -> Vec<Point> {
    let signed = line.signed_distance(circle.center);
    let foot = Point::new(
        circle.center.x - signed * line.a,
        circle.center.y - signed * line.b,
    );
    let half_chord_sq = circle.radius * circle.radius - signed * signed;
    if half_chord_sq < -EPSILON {
        Vec::new()
    } else if half_chord_sq.abs() < EPSILON {
        vec![foot]
    } else {
        let h = half_chord_sq.sqrt();
        let dir = line.direction();
        vec![foot + dir * h, foot + dir * (-h)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_lines_cross_once() {
        let l1 = Line::through(Point::new(0.0, 0.0), Point::new(1.0, 0.0)).unwrap();
        let l2 = Line::through(Point::new(0.0, 0.0), Point::new(0.0, 1.0)).unwrap();
        let pts = intersect_lines(&l1, &l2).unwrap();
        assert_eq!(pts.len(), 1);
        assert!(pts[0].tol_eq(&Point::new(0.0, 0.0)));
    }

    #[test]
    fn parallel_distinct_lines_do_not_cross() {
        let l1 = Line::through(Point::new(0.0, 0.0), Point::new(1.0, 0.0)).unwrap();
        let l2 = Line::through(Point::new(0.0, 1.0), Point::new(1.0, 1.0)).unwrap();
        let pts = intersect_lines(&l1, &l2).unwrap();
        assert!(pts.is_empty());
    }

    #[test]
    fn identical_lines_are_inconstructible() {
        let l1 = Line::through(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
        let l2 = Line::through(Point::new(2.0, 2.0), Point::new(3.0, 3.0)).unwrap();
        assert!(intersect_lines(&l1, &l2).is_err());
    }

    #[test]
    fn secant_line_hits_circle_twice() {
        let circle = Circle::new(Point::new(0.0, 0.0), 1.0);
        let line = Line::through(Point::new(-2.0, 0.0), Point::new(2.0, 0.0)).unwrap();
        let pts = intersect_line_circle(&line, &circle);
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn tangent_line_hits_circle_once() {
        let circle = Circle::new(Point::new(0.0, 0.0), 1.0);
        let line = Line::through(Point::new(1.0, -5.0), Point::new(1.0, 5.0)).unwrap();
        let pts = intersect_line_circle(&line, &circle);
        assert_eq!(pts.len(), 1);
        assert!(pts[0].tol_eq(&Point::new(1.0, 0.0)));
    }

    #[test]
    fn distant_line_misses_circle() {
        let circle = Circle::new(Point::new(0.0, 0.0), 1.0);
        let line = Line::through(Point::new(5.0, -5.0), Point::new(5.0, 5.0)).unwrap();
        let pts = intersect_line_circle(&line, &circle);
        assert!(pts.is_empty());
    }
}
