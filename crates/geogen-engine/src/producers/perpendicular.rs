//! Candidate `Perpendicular`: two lines meeting at a right angle.

use crate::contextual::{ContextualPicture, NewnessFilter};
use crate::producers::{combinations, touches_new};
use crate::theorem::{PotentialTheorem, TheoremKind};

pub fn produce(ctx: &ContextualPicture) -> Vec<PotentialTheorem> {
    combinations(&ctx.lines(NewnessFilter::All), 2)
        .into_iter()
        .filter(|pair| touches_new(ctx, pair))
        .map(|pair| PotentialTheorem::new(TheoremKind::Perpendicular, pair))
        .collect()
}
