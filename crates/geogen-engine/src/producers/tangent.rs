//! Candidate `Tangent`: a line touching a circle, or two circles touching,
//! at exactly one point.

use crate::contextual::{ContextualPicture, NewnessFilter};
use crate::producers::{combinations, touches_new};
use crate::theorem::{PotentialTheorem, TheoremKind};

pub fn produce(ctx: &ContextualPicture) -> Vec<PotentialTheorem> {
    let lines = ctx.lines(NewnessFilter::All);
    let circles = ctx.circles(NewnessFilter::All);
    let mut out = Vec::new();

    for &line in &lines {
        for &circle in &circles {
            if touches_new(ctx, &[line, circle]) {
                out.push(PotentialTheorem::new(TheoremKind::Tangent, vec![line, circle]));
            }
        }
    }

    for pair in combinations(&circles, 2) {
        if touches_new(ctx, &pair) {
            out.push(PotentialTheorem::new(TheoremKind::Tangent, pair));
        }
    }

    out
}
