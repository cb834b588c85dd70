//! Candidate `Incidence`: a point lying on a line or circle.
//!
//! Unlike every other producer, this one is a report rather than a guess:
//! the contextual picture's membership sets already *are* the cross-picture
//! incidence test (`ContextualPicture::add` only ever adds a point to a
//! line/circle's set once every picture agrees the point lies on it), so
//! there is nothing left to verify numerically here. Building this from the
//! full point x line/circle cross product and leaning on the runner's
//! numeric check to filter it down would both restate work `add` already
//! did and flood the runner with candidates guaranteed to fail on anything
//! but the smallest configurations.

use crate::contextual::{ContextualPicture, NewnessFilter};
use crate::producers::touches_new;
use crate::theorem::{PotentialTheorem, TheoremKind};

pub fn produce(ctx: &ContextualPicture) -> Vec<PotentialTheorem> {
    let mut out = Vec::new();

    for &line in &ctx.lines(NewnessFilter::All) {
        for point in ctx.points_on_line(line) {
            if touches_new(ctx, &[point, line]) {
                out.push(PotentialTheorem::new(TheoremKind::Incidence, vec![point, line]));
            }
        }
    }

    for &circle in &ctx.circles(NewnessFilter::All) {
        for point in ctx.points_on_circle(circle) {
            if touches_new(ctx, &[point, circle]) {
                out.push(PotentialTheorem::new(
                    TheoremKind::Incidence,
                    vec![point, circle],
                ));
            }
        }
    }

    out
}
