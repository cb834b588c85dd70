//! Object constructors: one function per predefined construction, plus the
//! fixed translation that replays a [`ComposedConstruction`]'s primitive
//! sequence. Each constructor pulls already-realized parents (as
//! [`AnalyticObject`]s, not `ConfigurationObject`s — the picture lookup
//! happens one layer up, in the registrar) and either produces a value or
//! reports [`Error::Inconstructible`]; constructors never mutate state
//! outside their returned value.
//!
//! Argument kinds are ordinarily guaranteed by `Configuration::validate`
//! before a construction ever reaches here, but a kind mismatch still
//! returns `Error::InvalidInput` rather than panicking — a caller that
//! drives `construct`/`construct_primitive` directly (as `manager.rs`'s
//! reseed path and every unit test in this module do) never went through
//! that whole-configuration check.

use crate::analytic::AnalyticObject;
use crate::circle::Circle;
use crate::construction::{ComposedConstruction, ConstructionKind, PrimitiveConstruction, StepRef};
use crate::intersect::intersect_lines;
use crate::line::Line;
use crate::{Error, Result};

fn expect_point(obj: AnalyticObject) -> Result<crate::point::Point> {
    obj.as_point()
        .ok_or_else(|| Error::InvalidInput("expected a Point argument, found a Line or Circle".to_string()))
}

fn expect_line(obj: AnalyticObject) -> Result<Line> {
    obj.as_line()
        .ok_or_else(|| Error::InvalidInput("expected a Line argument, found a Point or Circle".to_string()))
}

/// Realize a single predefined (non-composed) construction from its
/// already-realized parent values.
pub fn construct_primitive(
    primitive: PrimitiveConstruction,
    inputs: &[AnalyticObject],
) -> Result<AnalyticObject> {
    use PrimitiveConstruction::*;
    match primitive {
        Midpoint => {
            let p = expect_point(inputs[0])?;
            let q = expect_point(inputs[1])?;
            Ok(AnalyticObject::Point(p.midpoint(&q)))
        }
        LineFromPoints => {
            let p = expect_point(inputs[0])?;
            let q = expect_point(inputs[1])?;
            Ok(AnalyticObject::Line(Line::through(p, q)?))
        }
        PerpendicularLineFromPoints => {
            let p = expect_point(inputs[0])?;
            let q = expect_point(inputs[1])?;
            let r = expect_point(inputs[2])?;
            let base = Line::through(q, r)?;
            Ok(AnalyticObject::Line(base.perpendicular_from(p)))
        }
        PerpendicularBisector => {
            let p = expect_point(inputs[0])?;
            let q = expect_point(inputs[1])?;
            Ok(AnalyticObject::Line(Line::perpendicular_bisector(p, q)?))
        }
        IntersectionOfLinesFromPoints => {
            let l1 = expect_line(inputs[0])?;
            let l2 = expect_line(inputs[1])?;
            let points = intersect_lines(&l1, &l2)?;
            points
                .into_iter()
                .next()
                .map(AnalyticObject::Point)
                .ok_or_else(|| Error::Inconstructible("lines are parallel".to_string()))
        }
        Circumcircle => {
            let p = expect_point(inputs[0])?;
            let q = expect_point(inputs[1])?;
            let r = expect_point(inputs[2])?;
            Ok(AnalyticObject::Circle(Circle::through(p, q, r)?))
        }
        Circumcenter => {
            let p = expect_point(inputs[0])?;
            let q = expect_point(inputs[1])?;
            let r = expect_point(inputs[2])?;
            Ok(AnalyticObject::Point(Circle::through(p, q, r)?.center))
        }
        PointReflection => {
            let p = expect_point(inputs[0])?;
            let mirror = expect_point(inputs[1])?;
            Ok(AnalyticObject::Point(p.reflect_over(&mirror)))
        }
        InternalAngleBisector => {
            let p = expect_point(inputs[0])?;
            let q = expect_point(inputs[1])?;
            let r = expect_point(inputs[2])?;
            Ok(AnalyticObject::Line(Line::angle_bisector(p, q, r)?))
        }
    }
}

/// Replay a composed construction's fixed primitive sequence in a scratch
/// space seeded only with `params`. Intermediate step outputs are never
/// returned — only the final step's value escapes this function.
fn evaluate_composed(
    composed: &ComposedConstruction,
    params: &[AnalyticObject],
) -> Result<AnalyticObject> {
    let mut outputs: Vec<AnalyticObject> = Vec::with_capacity(composed.steps.len());
    for step in &composed.steps {
        let args: Vec<AnalyticObject> = step
            .args
            .iter()
            .map(|r| match r {
                StepRef::Param(i) => params[*i],
                StepRef::Step(i) => outputs[*i],
            })
            .collect();
        outputs.push(construct_primitive(step.primitive, &args)?);
    }
    outputs
        .pop()
        .ok_or_else(|| Error::Inconstructible("composed construction has no steps".to_string()))
}

/// Realize any construction — primitive or composed — from its
/// already-realized parent values.
pub fn construct(kind: &ConstructionKind, inputs: &[AnalyticObject]) -> Result<AnalyticObject> {
    match kind {
        ConstructionKind::Midpoint => construct_primitive(PrimitiveConstruction::Midpoint, inputs),
        ConstructionKind::LineFromPoints => {
            construct_primitive(PrimitiveConstruction::LineFromPoints, inputs)
        }
        ConstructionKind::PerpendicularLineFromPoints => {
            construct_primitive(PrimitiveConstruction::PerpendicularLineFromPoints, inputs)
        }
        ConstructionKind::PerpendicularBisector => {
            construct_primitive(PrimitiveConstruction::PerpendicularBisector, inputs)
        }
        ConstructionKind::IntersectionOfLinesFromPoints => {
            construct_primitive(PrimitiveConstruction::IntersectionOfLinesFromPoints, inputs)
        }
        ConstructionKind::Circumcircle => {
            construct_primitive(PrimitiveConstruction::Circumcircle, inputs)
        }
        ConstructionKind::Circumcenter => {
            construct_primitive(PrimitiveConstruction::Circumcenter, inputs)
        }
        ConstructionKind::PointReflection => {
            construct_primitive(PrimitiveConstruction::PointReflection, inputs)
        }
        ConstructionKind::InternalAngleBisector => {
            construct_primitive(PrimitiveConstruction::InternalAngleBisector, inputs)
        }
        ConstructionKind::Orthocenter => {
            evaluate_composed(&crate::construction::orthocenter_composed(), inputs)
        }
        ConstructionKind::Composed(composed) => evaluate_composed(composed, inputs),
    }
}
