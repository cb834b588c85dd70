//! Candidate `Concurrent`: three lines meeting at a single point.
//!
//! Bounded to triples rather than "three or more" — a fourth line through
//! an already-concurrent point shows up as its own triple candidate, so
//! nothing is lost, only split across more (cheaper) candidates.
//!
//! Three lines already sharing an explicitly registered common point are
//! skipped: that concurrency is already known (it's how the point got its
//! incidences), so reporting it again would just restate the obvious for
//! every triple drawn from a pencil of lines through one named point. Left
//! unfiltered, a single busy point turns into `C(k, 3)` redundant triples
//! for its `k` incident lines.

use std::collections::HashSet;

use crate::contextual::{ContextualPicture, HandleId, NewnessFilter};
use crate::producers::{combinations, touches_new};
use crate::theorem::{PotentialTheorem, TheoremKind};

fn shares_explicit_point(ctx: &ContextualPicture, triple: &[HandleId]) -> bool {
    let mut common: HashSet<HandleId> = ctx.points_on_line(triple[0]).into_iter().collect();
    for &line in &triple[1..] {
        let on_line: HashSet<HandleId> = ctx.points_on_line(line).into_iter().collect();
        common.retain(|p| on_line.contains(p));
        if common.is_empty() {
            return false;
        }
    }
    !common.is_empty()
}

pub fn produce(ctx: &ContextualPicture) -> Vec<PotentialTheorem> {
    combinations(&ctx.lines(NewnessFilter::All), 3)
        .into_iter()
        .filter(|triple| touches_new(ctx, triple))
        .filter(|triple| !shares_explicit_point(ctx, triple))
        .map(|triple| PotentialTheorem::new(TheoremKind::Concurrent, triple))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogen_analytic::{AnalyticObject, ConfigurationObject, Line, ObjectKind, Point, ToleranceEq};

    fn add_point(ctx: &mut ContextualPicture, id: u64, x: f64, y: f64) {
        let object = ConfigurationObject::Loose { id, kind: ObjectKind::Point };
        ctx.add(&object, &[AnalyticObject::Point(Point::new(x, y))]).unwrap();
    }

    #[test]
    fn three_lines_through_a_named_point_are_not_reported_concurrent() {
        // Three lines fanning out from the origin, all passing through a
        // point that was registered explicitly (not just implicitly).
        let mut ctx = ContextualPicture::new();
        add_point(&mut ctx, 0, 0.0, 0.0);
        add_point(&mut ctx, 1, 1.0, 0.0);
        add_point(&mut ctx, 2, 0.0, 1.0);
        add_point(&mut ctx, 3, 1.0, 2.0);

        let lines_through_origin: Vec<HandleId> =
            ctx.lines_through(ctx.handle_of(0).unwrap());
        assert_eq!(lines_through_origin.len(), 3, "three spokes out of the origin point");
        assert!(shares_explicit_point(&ctx, &lines_through_origin));

        let candidates = produce(&ctx);
        assert!(!candidates
            .iter()
            .any(|c| c.objects.iter().all(|o| lines_through_origin.contains(o))));
    }

    #[test]
    fn three_medians_meeting_only_implicitly_are_reported_concurrent() {
        // A triangle plus its three midpoints: the medians meet at the
        // centroid, which is never explicitly registered as a point, only
        // implied by the three median lines crossing there.
        let mut ctx = ContextualPicture::new();
        add_point(&mut ctx, 0, 0.0, 0.0);
        add_point(&mut ctx, 1, 4.0, 0.0);
        add_point(&mut ctx, 2, 0.0, 6.0);
        add_point(&mut ctx, 3, 2.0, 3.0); // midpoint of (1) and (2)
        add_point(&mut ctx, 4, 0.0, 3.0); // midpoint of (0) and (2)
        add_point(&mut ctx, 5, 2.0, 0.0); // midpoint of (0) and (1)
        ctx.commit_step();

        let median_a = Line::through(Point::new(0.0, 0.0), Point::new(2.0, 3.0)).unwrap();
        let median_b = Line::through(Point::new(4.0, 0.0), Point::new(0.0, 3.0)).unwrap();
        let median_c = Line::through(Point::new(0.0, 6.0), Point::new(2.0, 0.0)).unwrap();

        let handle_for = |line: &Line| -> HandleId {
            ctx.lines(NewnessFilter::All)
                .into_iter()
                .find(|&h| ctx.analytic_of(0, h).and_then(|v| v.as_line()).map(|l| l.tol_eq(line)).unwrap_or(false))
                .expect("median line should already be implicitly indexed")
        };
        let triple = vec![handle_for(&median_a), handle_for(&median_b), handle_for(&median_c)];

        assert!(!shares_explicit_point(&ctx, &triple));
    }
}
