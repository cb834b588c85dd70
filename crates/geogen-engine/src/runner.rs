//! The verifier runner: decides whether a [`PotentialTheorem`] actually
//! holds, by checking its predicate in every picture and accepting only
//! candidates that hold in all of them. A relationship that's true in one
//! picture but not another is coincidence, not a theorem.

use geogen_analytic::{intersect::intersect_lines, tolerance::approx_eq, ObjectKind, ToleranceEq};

use crate::analyzer::Analyzer;
use crate::contextual::{ContextualPicture, HandleId};
use crate::theorem::{PotentialTheorem, Theorem, TheoremKind, TheoremMap};

pub struct Runner;

impl Runner {
    /// Verify `candidate` against every picture owned by `ctx`;
    /// `Some(theorem)` only if it held in all of them.
    pub fn verify(ctx: &ContextualPicture, candidate: &PotentialTheorem) -> Option<Theorem> {
        let n = ctx.pictures().len();
        if n == 0 {
            return None;
        }
        let holds = (0..n).all(|i| Self::holds_in_picture(ctx, i, candidate));
        if holds {
            Some(candidate.clone().into())
        } else {
            None
        }
    }

    /// Run every producer against `ctx` and verify every candidate it
    /// proposes, regardless of newness — the whole-configuration "from
    /// scratch" contract (spec §6.3's `find_all`). The result is
    /// canonically ordered and duplicate-free by construction, since
    /// [`TheoremMap`] is a `BTreeSet` ordered by [`Theorem`]'s
    /// symmetry-aware `Ord`.
    pub fn find_all(ctx: &ContextualPicture) -> TheoremMap {
        Analyzer::all_candidates(ctx)
            .iter()
            .filter_map(|candidate| Self::verify(ctx, candidate))
            .collect()
    }

    /// Like [`Self::find_all`], but with every theorem already present in
    /// `old_theorems` removed from the result — spec §6.3's `find_new`,
    /// used to report only what a configuration extension actually added
    /// on top of an already-known theorem set.
    pub fn find_new(ctx: &ContextualPicture, old_theorems: &TheoremMap) -> TheoremMap {
        Self::find_all(ctx)
            .into_iter()
            .filter(|theorem| !old_theorems.contains(theorem))
            .collect()
    }

    fn holds_in_picture(ctx: &ContextualPicture, i: usize, c: &PotentialTheorem) -> bool {
        match c.kind {
            TheoremKind::Incidence => Self::incidence(ctx, i, &c.objects),
            TheoremKind::Parallel => Self::parallel(ctx, i, &c.objects),
            TheoremKind::Perpendicular => Self::perpendicular(ctx, i, &c.objects),
            TheoremKind::EqualSegments => Self::equal_segments(ctx, i, &c.objects),
            TheoremKind::Tangent => Self::tangent(ctx, i, &c.objects),
            TheoremKind::Concurrent => Self::concurrent(ctx, i, &c.objects),
            TheoremKind::Collinear => Self::collinear(ctx, i, &c.objects),
            TheoremKind::Concyclic => Self::concyclic(ctx, i, &c.objects),
            TheoremKind::SameObjects => Self::same_objects(ctx, i, &c.objects),
        }
    }

    fn incidence(ctx: &ContextualPicture, i: usize, objects: &[HandleId]) -> bool {
        let [point_id, target_id] = objects else { return false };
        let Some(point) = ctx.analytic_of(i, *point_id).and_then(|v| v.as_point()) else {
            return false;
        };
        match ctx.kind_of(*target_id) {
            Some(ObjectKind::Line) => ctx
                .analytic_of(i, *target_id)
                .and_then(|v| v.as_line())
                .map(|l| l.contains(point))
                .unwrap_or(false),
            Some(ObjectKind::Circle) => ctx
                .analytic_of(i, *target_id)
                .and_then(|v| v.as_circle())
                .map(|c| c.contains(point))
                .unwrap_or(false),
            _ => false,
        }
    }

    fn parallel(ctx: &ContextualPicture, i: usize, objects: &[HandleId]) -> bool {
        let [a, b] = objects else { return false };
        match (
            ctx.analytic_of(i, *a).and_then(|v| v.as_line()),
            ctx.analytic_of(i, *b).and_then(|v| v.as_line()),
        ) {
            (Some(l1), Some(l2)) => l1.is_parallel(&l2),
            _ => false,
        }
    }

    fn perpendicular(ctx: &ContextualPicture, i: usize, objects: &[HandleId]) -> bool {
        let [a, b] = objects else { return false };
        match (
            ctx.analytic_of(i, *a).and_then(|v| v.as_line()),
            ctx.analytic_of(i, *b).and_then(|v| v.as_line()),
        ) {
            (Some(l1), Some(l2)) => l1.is_perpendicular(&l2),
            _ => false,
        }
    }

    fn equal_segments(ctx: &ContextualPicture, i: usize, objects: &[HandleId]) -> bool {
        let [p1, p2, p3, p4] = objects else { return false };
        let (Some(a), Some(b), Some(c), Some(d)) = (
            ctx.analytic_of(i, *p1).and_then(|v| v.as_point()),
            ctx.analytic_of(i, *p2).and_then(|v| v.as_point()),
            ctx.analytic_of(i, *p3).and_then(|v| v.as_point()),
            ctx.analytic_of(i, *p4).and_then(|v| v.as_point()),
        ) else {
            return false;
        };
        approx_eq(a.distance(&b), c.distance(&d))
    }

    fn tangent(ctx: &ContextualPicture, i: usize, objects: &[HandleId]) -> bool {
        let [a, b] = objects else { return false };
        let (Some(va), Some(vb)) = (ctx.analytic_of(i, *a), ctx.analytic_of(i, *b)) else {
            return false;
        };
        match (va.as_circle(), vb.as_circle(), va.as_line(), vb.as_line()) {
            (Some(c1), Some(c2), _, _) => c1.is_tangent_to(&c2),
            (Some(c), _, _, Some(l)) => l.is_tangent_to_circle(&c),
            (_, Some(c), Some(l), _) => l.is_tangent_to_circle(&c),
            _ => false,
        }
    }

    fn concurrent(ctx: &ContextualPicture, i: usize, objects: &[HandleId]) -> bool {
        if objects.len() < 3 {
            return false;
        }
        let lines: Vec<_> = objects
            .iter()
            .filter_map(|id| ctx.analytic_of(i, *id).and_then(|v| v.as_line()))
            .collect();
        if lines.len() != objects.len() {
            return false;
        }
        let Ok(meet) = intersect_lines(&lines[0], &lines[1]) else {
            return false;
        };
        let Some(point) = meet.into_iter().next() else {
            return false;
        };
        lines[2..].iter().all(|l| l.contains(point))
    }

    fn collinear(ctx: &ContextualPicture, i: usize, objects: &[HandleId]) -> bool {
        if objects.len() < 3 {
            return false;
        }
        let points: Vec<_> = objects
            .iter()
            .filter_map(|id| ctx.analytic_of(i, *id).and_then(|v| v.as_point()))
            .collect();
        if points.len() != objects.len() {
            return false;
        }
        let Ok(line) = geogen_analytic::Line::through(points[0], points[1]) else {
            return false;
        };
        points[2..].iter().all(|p| line.contains(*p))
    }

    fn concyclic(ctx: &ContextualPicture, i: usize, objects: &[HandleId]) -> bool {
        if objects.len() < 4 {
            return false;
        }
        let points: Vec<_> = objects
            .iter()
            .filter_map(|id| ctx.analytic_of(i, *id).and_then(|v| v.as_point()))
            .collect();
        if points.len() != objects.len() {
            return false;
        }
        let Ok(circle) = geogen_analytic::Circle::through(points[0], points[1], points[2]) else {
            return false;
        };
        points[3..].iter().all(|p| circle.contains(*p))
    }

    fn same_objects(ctx: &ContextualPicture, i: usize, objects: &[HandleId]) -> bool {
        let [a, b] = objects else { return false };
        match (ctx.analytic_of(i, *a), ctx.analytic_of(i, *b)) {
            (Some(va), Some(vb)) => va.tol_eq(&vb),
            _ => false,
        }
    }
}
