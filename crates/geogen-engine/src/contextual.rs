//! The contextual picture: the incremental symbolic index over all of a
//! configuration's numeric pictures — "the heart of the system" (§4.6).
//!
//! Every point, line, and circle the configuration ever realizes gets a
//! [`HandleId`]: an id-based arena slot, not an owning reference, so the
//! natural cyclic structure between a point's incident lines/circles and a
//! line/circle's incident points never needs `Rc`/`RefCell` — membership
//! sets just store ids (see the design notes on cyclic structure).
//!
//! Not every line or circle handle has a backing [`ConfigurationObject`]:
//! whenever a second point is added, the line through it and every earlier
//! point is resolved too, named or not. Likewise for circles through every
//! earlier unordered pair. This is what lets producers propose theorems
//! about segments and lines nobody ever explicitly constructed (the
//! midsegment of a triangle, say) — see §8 scenario 3.
//!
//! A single internal [`Picture`] per numeric instance holds both kinds of
//! value, keyed by [`ObjectId`] for backed objects and by [`HandleId`] for
//! everything else (the two id spaces are disjoint by construction, so one
//! picture and its near-duplicate index serve both).

use std::collections::{HashMap, HashSet};

use geogen_analytic::{
    AnalyticObject, Circle, ConfigurationObject, Line, ObjectId, ObjectKind, Picture, Point, ToleranceEq,
};

use crate::{Error, Result};

/// Id of a handle in the contextual picture's arena. Minted from a range
/// disjoint from [`ObjectId`] (see [`HANDLE_ID_BASE`]) so a single
/// [`Picture`] can hold both backed and implicit values without collision.
pub type HandleId = u64;

/// Every real configuration in this domain fits comfortably below this;
/// handle ids are minted starting here so they never collide with an
/// `ObjectId`.
const HANDLE_ID_BASE: HandleId = 1 << 40;

/// Which subset of registered handles a query should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewnessFilter {
    /// Only handles created, or newly given a backing object, in the most
    /// recent extension step.
    New,
    /// Every other handle.
    Old,
    /// Every handle.
    All,
}

#[derive(Debug, Clone, Default)]
struct PointHandle {
    backing: Option<ObjectId>,
    lines: HashSet<HandleId>,
    circles: HashSet<HandleId>,
}

#[derive(Debug, Clone, Default)]
struct LineHandle {
    backing: Option<ObjectId>,
    points: HashSet<HandleId>,
}

#[derive(Debug, Clone, Default)]
struct CircleHandle {
    backing: Option<ObjectId>,
    points: HashSet<HandleId>,
}

/// A line or circle, still undecided between reusing an existing handle or
/// minting a fresh one — computed in the read-only planning pass of
/// [`ContextualPicture::add`] before anything is mutated.
enum PlannedCurve {
    Reuse(HandleId),
    Fresh(Vec<AnalyticObject>),
}

/// The incremental index: every registered point/line/circle handle, the
/// new/old partition, and the per-picture analytic values for both backed
/// and implicit handles.
#[derive(Debug, Clone, Default)]
pub struct ContextualPicture {
    points: HashMap<HandleId, PointHandle>,
    lines: HashMap<HandleId, LineHandle>,
    circles: HashMap<HandleId, CircleHandle>,
    kinds: HashMap<HandleId, ObjectKind>,
    backing_to_handle: HashMap<ObjectId, HandleId>,
    next_handle: HandleId,
    pictures: Vec<Picture>,
    new_handles: HashSet<HandleId>,
}

impl ContextualPicture {
    pub fn new() -> Self {
        Self {
            next_handle: HANDLE_ID_BASE,
            ..Self::default()
        }
    }

    fn fresh_handle(&mut self) -> HandleId {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }

    fn ensure_pictures(&mut self, n: usize) {
        if self.pictures.is_empty() {
            self.pictures = vec![Picture::new(); n];
        }
    }

    /// Record a duplicate construction's realized value under its own
    /// `ObjectId`, without minting a handle — the duplicate stays a
    /// second name for the existing handle's geometry (§4.2), surfaced
    /// only as a `SameObjects` theorem, never as its own index entry.
    pub fn mirror_duplicate(&mut self, id: ObjectId, realized: &[AnalyticObject]) {
        self.ensure_pictures(realized.len());
        for (i, v) in realized.iter().enumerate() {
            self.pictures[i].insert(id, *v);
        }
    }

    /// Every numeric picture, keyed uniformly by `ObjectId` (backed
    /// objects) and [`HandleId`] (implicit objects alike).
    pub fn pictures(&self) -> &[Picture] {
        &self.pictures
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.backing_to_handle.contains_key(&id)
    }

    pub fn handle_of(&self, id: ObjectId) -> Option<HandleId> {
        self.backing_to_handle.get(&id).copied()
    }

    pub fn is_new(&self, handle: HandleId) -> bool {
        self.new_handles.contains(&handle)
    }

    pub fn kind_of(&self, handle: HandleId) -> Option<ObjectKind> {
        self.kinds.get(&handle).copied()
    }

    /// Close the current extension step: every handle created, or newly
    /// given a backing object, since the last call becomes "old".
    pub fn commit_step(&mut self) {
        self.new_handles.clear();
    }

    fn matches(&self, handle: HandleId, filter: NewnessFilter) -> bool {
        match filter {
            NewnessFilter::New => self.new_handles.contains(&handle),
            NewnessFilter::Old => !self.new_handles.contains(&handle),
            NewnessFilter::All => true,
        }
    }

    pub fn points(&self, filter: NewnessFilter) -> Vec<HandleId> {
        self.points.keys().copied().filter(|h| self.matches(*h, filter)).collect()
    }

    pub fn lines(&self, filter: NewnessFilter) -> Vec<HandleId> {
        self.lines.keys().copied().filter(|h| self.matches(*h, filter)).collect()
    }

    pub fn circles(&self, filter: NewnessFilter) -> Vec<HandleId> {
        self.circles.keys().copied().filter(|h| self.matches(*h, filter)).collect()
    }

    /// The point handles incident to a line handle (empty if `handle`
    /// isn't a known line).
    pub fn points_on_line(&self, handle: HandleId) -> Vec<HandleId> {
        self.lines.get(&handle).map(|l| l.points.iter().copied().collect()).unwrap_or_default()
    }

    /// The point handles incident to a circle handle.
    pub fn points_on_circle(&self, handle: HandleId) -> Vec<HandleId> {
        self.circles.get(&handle).map(|c| c.points.iter().copied().collect()).unwrap_or_default()
    }

    pub fn lines_through(&self, point: HandleId) -> Vec<HandleId> {
        self.points.get(&point).map(|p| p.lines.iter().copied().collect()).unwrap_or_default()
    }

    pub fn circles_through(&self, point: HandleId) -> Vec<HandleId> {
        self.points.get(&point).map(|p| p.circles.iter().copied().collect()).unwrap_or_default()
    }

    pub fn point_on_line(&self, point: HandleId, line: HandleId) -> bool {
        self.lines.get(&line).map(|l| l.points.contains(&point)).unwrap_or(false)
    }

    pub fn point_on_circle(&self, point: HandleId, circle: HandleId) -> bool {
        self.circles.get(&circle).map(|c| c.points.contains(&point)).unwrap_or(false)
    }

    pub fn analytic_of(&self, picture_index: usize, handle: HandleId) -> Option<AnalyticObject> {
        self.pictures.get(picture_index)?.get(handle)
    }

    fn value_in(&self, picture_index: usize, handle: HandleId) -> Option<AnalyticObject> {
        self.pictures[picture_index].get(handle)
    }

    fn handles_of_kind(&self, kind: ObjectKind) -> Vec<HandleId> {
        match kind {
            ObjectKind::Point => self.points.keys().copied().collect(),
            ObjectKind::Line => self.lines.keys().copied().collect(),
            ObjectKind::Circle => self.circles.keys().copied().collect(),
        }
    }

    /// For each picture, find an existing handle of `kind` whose value
    /// there is tolerance-equal to `values[i]`. If every picture agrees on
    /// the *same* answer (including "none"), return it; any disagreement
    /// is an [`Error::InconsistentPictures`] — exactly the situation the
    /// N-picture discipline exists to catch (§9, tolerance transitivity).
    fn resolve_handle(&self, kind: ObjectKind, values: &[AnalyticObject]) -> Result<Option<HandleId>> {
        let candidates = self.handles_of_kind(kind);
        let mut per_picture = Vec::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            let found = candidates
                .iter()
                .copied()
                .find(|&h| self.value_in(i, h).map(|v| v.tol_eq(value)).unwrap_or(false));
            per_picture.push(found);
        }
        let first = per_picture[0];
        if per_picture.iter().any(|found| *found != first) {
            tracing::warn!("pictures disagree on whether a new object coincides with an existing one");
            return Err(Error::InconsistentPictures(
                "pictures disagree on whether a new object coincides with an existing one".into(),
            ));
        }
        Ok(first)
    }

    fn create_handle(&mut self, kind: ObjectKind, handle: HandleId, backing: Option<ObjectId>) {
        self.kinds.insert(handle, kind);
        match kind {
            ObjectKind::Point => {
                self.points.insert(handle, PointHandle { backing, ..Default::default() });
            }
            ObjectKind::Line => {
                self.lines.insert(handle, LineHandle { backing, ..Default::default() });
            }
            ObjectKind::Circle => {
                self.circles.insert(handle, CircleHandle { backing, ..Default::default() });
            }
        }
    }

    fn set_backing(&mut self, handle: HandleId, kind: ObjectKind, oid: ObjectId) -> Result<()> {
        let slot = match kind {
            ObjectKind::Point => &mut self.points.get_mut(&handle).expect("handle just resolved").backing,
            ObjectKind::Line => &mut self.lines.get_mut(&handle).expect("handle just resolved").backing,
            ObjectKind::Circle => &mut self.circles.get_mut(&handle).expect("handle just resolved").backing,
        };
        if slot.is_some() {
            // A registrar-level duplicate check (§4.5) should have caught
            // this as a `SameObjects` candidate before the analyzer ever
            // called `add` for it.
            return Err(Error::InternalInvariantViolation(
                "resolved handle already has a backing object".into(),
            ));
        }
        *slot = Some(oid);
        Ok(())
    }

    fn add_point_line_edge(&mut self, point: HandleId, line: HandleId) {
        self.points.get_mut(&point).expect("point handle exists").lines.insert(line);
        self.lines.get_mut(&line).expect("line handle exists").points.insert(point);
    }

    fn add_point_circle_edge(&mut self, point: HandleId, circle: HandleId) {
        self.points.get_mut(&point).expect("point handle exists").circles.insert(circle);
        self.circles.get_mut(&circle).expect("circle handle exists").points.insert(point);
    }

    /// Install one newly-constructed (non-duplicate) [`ConfigurationObject`]
    /// into the index. `realized` is its value in every picture, already
    /// realized by the [`geogen_analytic::PictureManager`].
    ///
    /// Mutation only happens after every fallible cross-picture check has
    /// passed, so a `Err` return leaves `self` untouched (§4.6: "never
    /// partial mutation").
    pub fn add(&mut self, object: &ConfigurationObject, realized: &[AnalyticObject]) -> Result<()> {
        let oid = object.id();
        let kind = object.kind();
        let n = realized.len();
        self.ensure_pictures(n);

        // --- planning: every fallible check, no mutation yet ---
        let existing = self.resolve_handle(kind, realized)?;
        let point_plan = if kind == ObjectKind::Point {
            Some(self.plan_new_point(realized)?)
        } else {
            None
        };
        let explicit_plan = if kind != ObjectKind::Point {
            Some(self.plan_explicit_curve(kind, realized)?)
        } else {
            None
        };

        // --- commit ---
        let handle = match existing {
            Some(h) => {
                self.set_backing(h, kind, oid)?;
                h
            }
            None => {
                let h = self.fresh_handle();
                for (i, v) in realized.iter().enumerate() {
                    self.pictures[i].insert(h, *v);
                }
                self.create_handle(kind, h, Some(oid));
                h
            }
        };
        for (i, v) in realized.iter().enumerate() {
            self.pictures[i].insert(oid, *v);
        }
        self.backing_to_handle.insert(oid, handle);
        self.new_handles.insert(handle);

        if let Some(plan) = point_plan {
            self.apply_new_point_plan(handle, plan);
        }
        if let Some(plan) = explicit_plan {
            self.apply_explicit_curve_plan(handle, kind, plan);
        }

        Ok(())
    }

    // ---- point wiring (§4.6 step 4) ----

    fn plan_new_point(&self, point_values: &[AnalyticObject]) -> Result<NewPointPlan> {
        let n = point_values.len();
        let points: Vec<Point> = point_values
            .iter()
            .map(|v| v.as_point().expect("caller passed a Point object"))
            .collect();

        let mut line_edges = Vec::new();
        for &line in self.lines.keys() {
            let mut agree = Vec::with_capacity(n);
            for i in 0..n {
                let l = self.value_in(i, line).and_then(|v| v.as_line());
                agree.push(l.map(|l| l.contains(points[i])).unwrap_or(false));
            }
            if agree.iter().all(|&b| b) {
                line_edges.push(line);
            } else if agree.iter().any(|&b| b) {
                tracing::warn!(line = line, "point-on-line membership disagreement across pictures");
                return Err(Error::InconsistentPictures(format!(
                    "point-on-line membership disagreement for line handle {line}"
                )));
            }
        }

        let mut circle_edges = Vec::new();
        for &circle in self.circles.keys() {
            let mut agree = Vec::with_capacity(n);
            for i in 0..n {
                let c = self.value_in(i, circle).and_then(|v| v.as_circle());
                agree.push(c.map(|c| c.contains(points[i])).unwrap_or(false));
            }
            if agree.iter().all(|&b| b) {
                circle_edges.push(circle);
            } else if agree.iter().any(|&b| b) {
                tracing::warn!(circle = circle, "point-on-circle membership disagreement across pictures");
                return Err(Error::InconsistentPictures(format!(
                    "point-on-circle membership disagreement for circle handle {circle}"
                )));
            }
        }

        let other_points: Vec<HandleId> = self.points.keys().copied().collect();

        let mut resolved_lines = Vec::with_capacity(other_points.len());
        for &other in &other_points {
            let mut values = Vec::with_capacity(n);
            for i in 0..n {
                let q = self.value_in(i, other).and_then(|v| v.as_point()).ok_or_else(|| {
                    Error::InternalInvariantViolation(format!("point handle {other} missing value in picture {i}"))
                })?;
                let line = Line::through(points[i], q).map_err(|_| {
                    Error::InternalInvariantViolation("distinct point handles coincided numerically".into())
                })?;
                values.push(AnalyticObject::Line(line));
            }
            let planned = match self.resolve_handle(ObjectKind::Line, &values)? {
                Some(h) => PlannedCurve::Reuse(h),
                None => PlannedCurve::Fresh(values),
            };
            resolved_lines.push((other, planned));
        }

        let mut resolved_circles = Vec::new();
        for (a, b) in pairs(&other_points) {
            let mut values = Vec::with_capacity(n);
            let mut any_ok = false;
            let mut any_collinear = false;
            for i in 0..n {
                let qp = self.value_in(i, a).and_then(|v| v.as_point()).ok_or_else(|| {
                    Error::InternalInvariantViolation(format!("point handle {a} missing value in picture {i}"))
                })?;
                let rp = self.value_in(i, b).and_then(|v| v.as_point()).ok_or_else(|| {
                    Error::InternalInvariantViolation(format!("point handle {b} missing value in picture {i}"))
                })?;
                match Circle::through(points[i], qp, rp) {
                    Ok(c) => {
                        any_ok = true;
                        values.push(AnalyticObject::Circle(c));
                    }
                    Err(_) => {
                        any_collinear = true;
                        values.push(AnalyticObject::Circle(Circle::new(qp, 0.0)));
                    }
                }
            }
            if any_ok && any_collinear {
                tracing::warn!(a = a, b = b, "collinearity of new point with existing pair disagrees across pictures");
                return Err(Error::InconsistentPictures(format!(
                    "collinearity of point handles {{new, {a}, {b}}} disagrees across pictures"
                )));
            }
            if any_collinear {
                continue;
            }
            let planned = match self.resolve_handle(ObjectKind::Circle, &values)? {
                Some(h) => PlannedCurve::Reuse(h),
                None => PlannedCurve::Fresh(values),
            };
            resolved_circles.push((a, b, planned));
        }

        Ok(NewPointPlan { line_edges, circle_edges, resolved_lines, resolved_circles })
    }

    fn apply_new_point_plan(&mut self, point: HandleId, plan: NewPointPlan) {
        for line in plan.line_edges {
            self.add_point_line_edge(point, line);
        }
        for circle in plan.circle_edges {
            self.add_point_circle_edge(point, circle);
        }
        for (other, planned) in plan.resolved_lines {
            let line = self.materialize(ObjectKind::Line, planned);
            self.add_point_line_edge(point, line);
            self.add_point_line_edge(other, line);
        }
        for (a, b, planned) in plan.resolved_circles {
            let circle = self.materialize(ObjectKind::Circle, planned);
            self.add_point_circle_edge(point, circle);
            self.add_point_circle_edge(a, circle);
            self.add_point_circle_edge(b, circle);
        }
    }

    // ---- explicit line/circle wiring (§4.6 step 5) ----

    fn plan_explicit_curve(&self, kind: ObjectKind, values: &[AnalyticObject]) -> Result<Vec<HandleId>> {
        let n = values.len();
        let mut edges = Vec::new();
        for &point in self.points.keys() {
            let mut agree = Vec::with_capacity(n);
            for i in 0..n {
                let p = self.value_in(i, point).and_then(|v| v.as_point());
                let holds = match (kind, p) {
                    (ObjectKind::Line, Some(p)) => values[i].as_line().map(|l| l.contains(p)).unwrap_or(false),
                    (ObjectKind::Circle, Some(p)) => values[i].as_circle().map(|c| c.contains(p)).unwrap_or(false),
                    _ => false,
                };
                agree.push(holds);
            }
            if agree.iter().all(|&b| b) {
                edges.push(point);
            } else if agree.iter().any(|&b| b) {
                tracing::warn!(point = point, kind = ?kind, "point-on-curve membership disagreement across pictures");
                return Err(Error::InconsistentPictures(format!(
                    "point-on-{:?} membership disagreement for point handle {point}",
                    kind
                )));
            }
        }
        Ok(edges)
    }

    fn apply_explicit_curve_plan(&mut self, handle: HandleId, kind: ObjectKind, points: Vec<HandleId>) {
        for point in points {
            match kind {
                ObjectKind::Line => self.add_point_line_edge(point, handle),
                ObjectKind::Circle => self.add_point_circle_edge(point, handle),
                ObjectKind::Point => unreachable!("explicit curve plan is only for lines/circles"),
            }
        }
    }

    fn materialize(&mut self, kind: ObjectKind, planned: PlannedCurve) -> HandleId {
        match planned {
            PlannedCurve::Reuse(h) => h,
            PlannedCurve::Fresh(values) => {
                let h = self.fresh_handle();
                for (i, v) in values.into_iter().enumerate() {
                    self.pictures[i].insert(h, v);
                }
                self.create_handle(kind, h, None);
                self.new_handles.insert(h);
                h
            }
        }
    }
}

struct NewPointPlan {
    line_edges: Vec<HandleId>,
    circle_edges: Vec<HandleId>,
    resolved_lines: Vec<(HandleId, PlannedCurve)>,
    resolved_circles: Vec<(HandleId, HandleId, PlannedCurve)>,
}

fn pairs(items: &[HandleId]) -> Vec<(HandleId, HandleId)> {
    let mut out = Vec::new();
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            out.push((items[i], items[j]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogen_analytic::ConstructionKind;

    fn point(x: f64, y: f64) -> AnalyticObject {
        AnalyticObject::Point(Point::new(x, y))
    }

    #[test]
    fn three_points_create_three_implicit_lines_and_one_circle() {
        let mut ctx = ContextualPicture::new();
        let a = ConfigurationObject::Loose { id: 0, kind: ObjectKind::Point };
        let b = ConfigurationObject::Loose { id: 1, kind: ObjectKind::Point };
        let c = ConfigurationObject::Loose { id: 2, kind: ObjectKind::Point };

        ctx.add(&a, &[point(0.0, 0.0), point(0.0, 0.0)]).unwrap();
        ctx.add(&b, &[point(4.0, 0.0), point(4.0, 0.0)]).unwrap();
        ctx.add(&c, &[point(0.0, 3.0), point(0.0, 3.0)]).unwrap();

        assert_eq!(ctx.lines(NewnessFilter::All).len(), 3);
        assert_eq!(ctx.circles(NewnessFilter::All).len(), 1);
        for line in ctx.lines(NewnessFilter::All) {
            assert_eq!(ctx.points_on_line(line).len(), 2);
        }
        for circle in ctx.circles(NewnessFilter::All) {
            assert_eq!(ctx.points_on_circle(circle).len(), 3);
        }
    }

    #[test]
    fn naming_a_previously_implicit_line_attaches_backing_without_a_new_handle() {
        let mut ctx = ContextualPicture::new();
        let a = ConfigurationObject::Loose { id: 0, kind: ObjectKind::Point };
        let b = ConfigurationObject::Loose { id: 1, kind: ObjectKind::Point };
        ctx.add(&a, &[point(0.0, 0.0)]).unwrap();
        ctx.add(&b, &[point(4.0, 0.0)]).unwrap();
        assert_eq!(ctx.lines(NewnessFilter::All).len(), 1);

        let named = ConfigurationObject::Constructed {
            id: 2,
            construction: ConstructionKind::LineFromPoints,
            args: vec![0, 1],
        };
        let named_value = AnalyticObject::Line(Line::through(Point::new(0.0, 0.0), Point::new(4.0, 0.0)).unwrap());
        ctx.add(&named, &[named_value]).unwrap();

        assert_eq!(ctx.lines(NewnessFilter::All).len(), 1, "naming must not mint a second handle");
        assert!(ctx.contains(2));
    }

    #[test]
    fn collinear_new_point_skips_circle_creation() {
        let mut ctx = ContextualPicture::new();
        let a = ConfigurationObject::Loose { id: 0, kind: ObjectKind::Point };
        let b = ConfigurationObject::Loose { id: 1, kind: ObjectKind::Point };
        let c = ConfigurationObject::Loose { id: 2, kind: ObjectKind::Point };
        ctx.add(&a, &[point(0.0, 0.0)]).unwrap();
        ctx.add(&b, &[point(1.0, 1.0)]).unwrap();
        ctx.add(&c, &[point(2.0, 2.0)]).unwrap();
        assert!(ctx.circles(NewnessFilter::All).is_empty());
    }

    #[test]
    fn new_handles_are_cleared_on_commit() {
        let mut ctx = ContextualPicture::new();
        let a = ConfigurationObject::Loose { id: 0, kind: ObjectKind::Point };
        ctx.add(&a, &[point(0.0, 0.0)]).unwrap();
        let handle = ctx.handle_of(0).unwrap();
        assert!(ctx.is_new(handle));
        ctx.commit_step();
        assert!(!ctx.is_new(handle));
    }
}
