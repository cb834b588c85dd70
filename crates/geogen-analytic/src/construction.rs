//! Symbolic layer: `ObjectKind`, `ConfigurationObject`, the closed catalog
//! of `ConstructionKind`s, and the `Configuration` (an ordered, validated
//! list of configuration objects).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Stable integer id of a `ConfigurationObject`, unique within one run.
pub type ObjectId = u64;

/// The closed set of analytic kinds a symbolic object can realize to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Point,
    Line,
    Circle,
}

/// A symbolic object: either loose (randomized per picture) or constructed
/// from earlier objects by a named construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConfigurationObject {
    Loose { id: ObjectId, kind: ObjectKind },
    Constructed {
        id: ObjectId,
        construction: ConstructionKind,
        args: Vec<ObjectId>,
    },
}

impl ConfigurationObject {
    pub fn id(&self) -> ObjectId {
        match self {
            ConfigurationObject::Loose { id, .. } => *id,
            ConfigurationObject::Constructed { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            ConfigurationObject::Loose { kind, .. } => *kind,
            ConfigurationObject::Constructed { construction, .. } => construction.output_kind(),
        }
    }

    pub fn parents(&self) -> &[ObjectId] {
        match self {
            ConfigurationObject::Loose { .. } => &[],
            ConfigurationObject::Constructed { args, .. } => args,
        }
    }
}

/// One step of a [`ComposedConstruction`]'s fixed primitive sequence. A
/// reference is either to one of the composed construction's own
/// parameters (`Param`) or to the output of an earlier step (`Step`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum StepRef {
    Param(usize),
    Step(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedStep {
    pub primitive: PrimitiveConstruction,
    pub args: Vec<StepRef>,
}

/// A named, fixed sequence of primitive constructions. Its intermediate
/// results never register with the contextual picture — only the final
/// step's output becomes a `ConfigurationObject`'s analytic value (see the
/// open-question resolution recorded in DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedConstruction {
    pub name: String,
    pub param_kinds: Vec<ObjectKind>,
    pub steps: Vec<ComposedStep>,
}

/// The predefined, closed construction catalog, plus one escape hatch
/// (`Composed`) for sequences rewritten to primitives at configuration-load
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConstructionKind {
    /// `(Point, Point) -> Point`: midpoint of a segment.
    Midpoint,
    /// `(Point, Point) -> Line`: the line through two points.
    LineFromPoints,
    /// `(Point, Point, Point) -> Line`: perpendicular to the line through
    /// the 2nd and 3rd points, passing through the 1st.
    PerpendicularLineFromPoints,
    /// `(Point, Point) -> Line`: perpendicular bisector of the segment.
    PerpendicularBisector,
    /// `(Line, Line) -> Point`: intersection of two (already-realized)
    /// lines.
    IntersectionOfLinesFromPoints,
    /// `(Point, Point, Point) -> Circle`: circumcircle.
    Circumcircle,
    /// `(Point, Point, Point) -> Point`: circumcenter.
    Circumcenter,
    /// `(Point, Point) -> Point`: reflection of the 1st point over the 2nd.
    PointReflection,
    /// `(Point, Point, Point) -> Line`: internal bisector of the angle at
    /// the 2nd (vertex) point.
    InternalAngleBisector,
    /// `(Point, Point, Point) -> Point`: orthocenter, realized as a
    /// composed construction (two altitudes, intersected).
    Orthocenter,
    /// A fixed, named sequence of primitives.
    Composed(ComposedConstruction),
}

impl ConstructionKind {
    pub fn name(&self) -> &str {
        match self {
            ConstructionKind::Midpoint => "Midpoint",
            ConstructionKind::LineFromPoints => "LineFromPoints",
            ConstructionKind::PerpendicularLineFromPoints => "PerpendicularLineFromPoints",
            ConstructionKind::PerpendicularBisector => "PerpendicularBisector",
            ConstructionKind::IntersectionOfLinesFromPoints => "IntersectionOfLinesFromPoints",
            ConstructionKind::Circumcircle => "Circumcircle",
            ConstructionKind::Circumcenter => "Circumcenter",
            ConstructionKind::PointReflection => "PointReflection",
            ConstructionKind::InternalAngleBisector => "InternalAngleBisector",
            ConstructionKind::Orthocenter => "Orthocenter",
            ConstructionKind::Composed(c) => &c.name,
        }
    }

    pub fn param_kinds(&self) -> Vec<ObjectKind> {
        use ObjectKind::*;
        match self {
            ConstructionKind::Midpoint => vec![Point, Point],
            ConstructionKind::LineFromPoints => vec![Point, Point],
            ConstructionKind::PerpendicularLineFromPoints => vec![Point, Point, Point],
            ConstructionKind::PerpendicularBisector => vec![Point, Point],
            ConstructionKind::IntersectionOfLinesFromPoints => vec![Line, Line],
            ConstructionKind::Circumcircle => vec![Point, Point, Point],
            ConstructionKind::Circumcenter => vec![Point, Point, Point],
            ConstructionKind::PointReflection => vec![Point, Point],
            ConstructionKind::InternalAngleBisector => vec![Point, Point, Point],
            ConstructionKind::Orthocenter => vec![Point, Point, Point],
            ConstructionKind::Composed(c) => c.param_kinds.clone(),
        }
    }

    pub fn output_kind(&self) -> ObjectKind {
        match self {
            ConstructionKind::Midpoint => ObjectKind::Point,
            ConstructionKind::LineFromPoints => ObjectKind::Line,
            ConstructionKind::PerpendicularLineFromPoints => ObjectKind::Line,
            ConstructionKind::PerpendicularBisector => ObjectKind::Line,
            ConstructionKind::IntersectionOfLinesFromPoints => ObjectKind::Point,
            ConstructionKind::Circumcircle => ObjectKind::Circle,
            ConstructionKind::Circumcenter => ObjectKind::Point,
            ConstructionKind::PointReflection => ObjectKind::Point,
            ConstructionKind::InternalAngleBisector => ObjectKind::Line,
            ConstructionKind::Orthocenter => ObjectKind::Point,
            ConstructionKind::Composed(c) => c
                .steps
                .last()
                .map(|s| s.primitive.output_kind())
                .expect("a composed construction always has at least one step"),
        }
    }
}

/// The primitive constructions a [`ComposedConstruction`] may sequence.
/// Deliberately a subset of [`ConstructionKind`] (no `Composed` variant
/// here: composition nests one level deep only).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PrimitiveConstruction {
    Midpoint,
    LineFromPoints,
    PerpendicularLineFromPoints,
    PerpendicularBisector,
    IntersectionOfLinesFromPoints,
    Circumcircle,
    Circumcenter,
    PointReflection,
    InternalAngleBisector,
}

impl PrimitiveConstruction {
    pub fn output_kind(&self) -> ObjectKind {
        match self {
            PrimitiveConstruction::Midpoint => ObjectKind::Point,
            PrimitiveConstruction::LineFromPoints => ObjectKind::Line,
            PrimitiveConstruction::PerpendicularLineFromPoints => ObjectKind::Line,
            PrimitiveConstruction::PerpendicularBisector => ObjectKind::Line,
            PrimitiveConstruction::IntersectionOfLinesFromPoints => ObjectKind::Point,
            PrimitiveConstruction::Circumcircle => ObjectKind::Circle,
            PrimitiveConstruction::Circumcenter => ObjectKind::Point,
            PrimitiveConstruction::PointReflection => ObjectKind::Point,
            PrimitiveConstruction::InternalAngleBisector => ObjectKind::Line,
        }
    }
}

/// The classic orthocenter-as-composed-construction: intersect the
/// altitude from the 2nd point with the altitude from the 3rd point.
/// Altitude from a vertex is the perpendicular to the opposite side through
/// that vertex.
pub fn orthocenter_composed() -> ComposedConstruction {
    use PrimitiveConstruction::*;
    use StepRef::*;
    ComposedConstruction {
        name: "Orthocenter".to_string(),
        param_kinds: vec![ObjectKind::Point, ObjectKind::Point, ObjectKind::Point],
        steps: vec![
            // side BC, to build the altitude from A
            ComposedStep {
                primitive: LineFromPoints,
                args: vec![Param(1), Param(2)],
            },
            // altitude from A: perpendicular to BC through A
            ComposedStep {
                primitive: PerpendicularLineFromPoints,
                args: vec![Param(0), Param(1), Param(2)],
            },
            // side AC, to build the altitude from B
            ComposedStep {
                primitive: LineFromPoints,
                args: vec![Param(0), Param(2)],
            },
            // altitude from B: perpendicular to AC through B
            ComposedStep {
                primitive: PerpendicularLineFromPoints,
                args: vec![Param(1), Param(0), Param(2)],
            },
            // orthocenter: intersection of the two altitudes
            ComposedStep {
                primitive: IntersectionOfLinesFromPoints,
                args: vec![Step(1), Step(3)],
            },
        ],
    }
}

/// An ordered, validated list of configuration objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Configuration {
    pub objects: Vec<ConfigurationObject>,
}

impl Configuration {
    pub fn new(objects: Vec<ConfigurationObject>) -> Result<Self> {
        let config = Configuration { objects };
        config.validate()?;
        Ok(config)
    }

    /// Ids unique, parents precede children, and argument kinds match the
    /// construction's declared signature.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for object in &self.objects {
            if !seen.insert(object.id()) {
                return Err(Error::InvalidInput(format!(
                    "duplicate object id {}",
                    object.id()
                )));
            }
            if let ConfigurationObject::Constructed {
                construction, args, ..
            } = object
            {
                let expected = construction.param_kinds();
                if expected.len() != args.len() {
                    return Err(Error::InvalidInput(format!(
                        "{} expects {} argument(s), got {}",
                        construction.name(),
                        expected.len(),
                        args.len()
                    )));
                }
                for (arg_id, expected_kind) in args.iter().zip(expected.iter()) {
                    if !seen.contains(arg_id) {
                        return Err(Error::InvalidInput(format!(
                            "object {} references parent {} that has not been defined yet",
                            object.id(),
                            arg_id
                        )));
                    }
                    let parent = self
                        .objects
                        .iter()
                        .find(|o| o.id() == *arg_id)
                        .expect("just checked membership via `seen`");
                    if parent.kind() != *expected_kind {
                        return Err(Error::InvalidInput(format!(
                            "{} argument {} has kind {:?}, expected {:?}",
                            construction.name(),
                            arg_id,
                            parent.kind(),
                            expected_kind
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: ObjectId) -> Option<&ConfigurationObject> {
        self.objects.iter().find(|o| o.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthocenter_composed_ends_in_a_point() {
        assert_eq!(
            ConstructionKind::Composed(orthocenter_composed()).output_kind(),
            ObjectKind::Point
        );
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let objects = vec![
            ConfigurationObject::Loose {
                id: 0,
                kind: ObjectKind::Point,
            },
            ConfigurationObject::Loose {
                id: 0,
                kind: ObjectKind::Point,
            },
        ];
        assert!(Configuration::new(objects).is_err());
    }

    #[test]
    fn validate_rejects_forward_references() {
        let objects = vec![ConfigurationObject::Constructed {
            id: 0,
            construction: ConstructionKind::Midpoint,
            args: vec![1, 2],
        }];
        assert!(Configuration::new(objects).is_err());
    }

    #[test]
    fn validate_rejects_kind_mismatch() {
        let objects = vec![
            ConfigurationObject::Loose {
                id: 0,
                kind: ObjectKind::Line,
            },
            ConfigurationObject::Loose {
                id: 1,
                kind: ObjectKind::Point,
            },
            ConfigurationObject::Constructed {
                id: 2,
                construction: ConstructionKind::Midpoint,
                args: vec![0, 1],
            },
        ];
        assert!(Configuration::new(objects).is_err());
    }

    #[test]
    fn validate_accepts_a_well_formed_chain() {
        let objects = vec![
            ConfigurationObject::Loose {
                id: 0,
                kind: ObjectKind::Point,
            },
            ConfigurationObject::Loose {
                id: 1,
                kind: ObjectKind::Point,
            },
            ConfigurationObject::Constructed {
                id: 2,
                construction: ConstructionKind::Midpoint,
                args: vec![0, 1],
            },
        ];
        assert!(Configuration::new(objects).is_ok());
    }
}
