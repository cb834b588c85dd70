//! `AnalyticObject`: the closed union of the three numeric value kinds a
//! picture ever holds, plus the canonical hash key used by the picture's
//! analytic-to-symbolic index (see [`crate::picture`]).

use serde::{Deserialize, Serialize};

use crate::circle::Circle;
use crate::construction::ObjectKind;
use crate::line::Line;
use crate::point::Point;
use crate::tolerance::quantize;
use crate::ToleranceEq;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum AnalyticObject {
    Point(Point),
    Line(Line),
    Circle(Circle),
}

impl AnalyticObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            AnalyticObject::Point(_) => ObjectKind::Point,
            AnalyticObject::Line(_) => ObjectKind::Line,
            AnalyticObject::Circle(_) => ObjectKind::Circle,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            AnalyticObject::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<Line> {
        match self {
            AnalyticObject::Line(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<Circle> {
        match self {
            AnalyticObject::Circle(c) => Some(*c),
            _ => None,
        }
    }

    /// Quantized bucket key for the primary hash lookup in the picture's
    /// analytic index. Equal analytic values always land in the same
    /// bucket; values within tolerance of each other but straddling a
    /// bucket boundary land in adjacent buckets (see [`Self::key_neighbors`]).
    pub(crate) fn canonical_key(&self) -> CanonicalKey {
        match self {
            AnalyticObject::Point(p) => CanonicalKey::Point(quantize(p.x), quantize(p.y)),
            AnalyticObject::Line(l) => {
                CanonicalKey::Line(quantize(l.a), quantize(l.b), quantize(l.c))
            }
            AnalyticObject::Circle(c) => CanonicalKey::Circle(
                quantize(c.center.x),
                quantize(c.center.y),
                quantize(c.radius),
            ),
        }
    }

    /// The bucket key together with every adjacent bucket (one quantization
    /// step in each dimension), so a near-duplicate scan doesn't miss a
    /// value that rounded into a neighboring cell.
    pub(crate) fn key_neighbors(&self) -> Vec<CanonicalKey> {
        const OFFSETS: [i64; 3] = [-1, 0, 1];
        match self.canonical_key() {
            CanonicalKey::Point(x, y) => OFFSETS
                .iter()
                .flat_map(|dx| OFFSETS.iter().map(move |dy| (dx, dy)))
                .map(|(dx, dy)| CanonicalKey::Point(x + dx, y + dy))
                .collect(),
            CanonicalKey::Line(a, b, c) => OFFSETS
                .iter()
                .flat_map(|da| OFFSETS.iter().flat_map(move |db| OFFSETS.iter().map(move |dc| (da, db, dc))))
                .map(|(da, db, dc)| CanonicalKey::Line(a + da, b + db, c + dc))
                .collect(),
            CanonicalKey::Circle(x, y, r) => OFFSETS
                .iter()
                .flat_map(|dx| OFFSETS.iter().flat_map(move |dy| OFFSETS.iter().map(move |dr| (dx, dy, dr))))
                .map(|(dx, dy, dr)| CanonicalKey::Circle(x + dx, y + dy, r + dr))
                .collect(),
        }
    }
}

impl ToleranceEq for AnalyticObject {
    fn tol_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AnalyticObject::Point(a), AnalyticObject::Point(b)) => a.tol_eq(b),
            (AnalyticObject::Line(a), AnalyticObject::Line(b)) => a.tol_eq(b),
            (AnalyticObject::Circle(a), AnalyticObject::Circle(b)) => a.tol_eq(b),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CanonicalKey {
    Point(i64, i64),
    Line(i64, i64, i64),
    Circle(i64, i64, i64),
}
