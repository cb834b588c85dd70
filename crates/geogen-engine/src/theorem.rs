//! Theorem candidates and verified theorems: both are just a kind plus an
//! ordered list of the objects it relates. The only difference between a
//! [`PotentialTheorem`] and a [`Theorem`] is that the latter survived the
//! runner's check against every picture.
//!
//! Equality, hashing, and ordering all go through [`canonicalize`] rather
//! than the stored `objects` list directly: a producer's object order is an
//! implementation detail (e.g. `concurrent.rs` cares which line came first
//! in its own pencil-exclusion logic), but two theorems that differ only by
//! one of these type-specific symmetries name the same fact and must
//! compare equal.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::contextual::HandleId;

/// A registered handle, typed by what it names in a theorem's object list.
/// Carried alongside [`HandleId`] mostly for readability in producer code
/// and serialized output; the id alone is enough to look the value up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TheoremObject {
    Point(HandleId),
    Line(HandleId),
    Circle(HandleId),
}

/// The closed catalog of relationships the producers know how to propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TheoremKind {
    /// A point lies on a line (or circle).
    Incidence,
    /// Two lines never meet.
    Parallel,
    /// Two lines meet at a right angle.
    Perpendicular,
    /// Two segments have equal length.
    EqualSegments,
    /// A line touches a circle (or two circles touch) at exactly one point.
    Tangent,
    /// Three or more lines meet at a single point.
    Concurrent,
    /// Three or more points lie on a single line.
    Collinear,
    /// Four or more points lie on a single circle.
    Concyclic,
    /// Two distinct symbolic objects realize to the same numeric value in
    /// every picture.
    SameObjects,
}

/// Reduce `objects` to the canonical representative of its kind's symmetry
/// group, so that two object lists naming the same fact compare equal.
///
/// - `Incidence` has no symmetry to quotient: the point must stay
///   distinguishable from the line/circle it lies on, and producers always
///   put the point first, so the list is returned unchanged.
/// - `EqualSegments` relates two two-point segments: each segment's own
///   endpoints are sorted first (a segment doesn't care which end is
///   named first), then the two (now-normalized) segments are sorted
///   against each other (the relation doesn't care which segment is named
///   first either).
/// - Everything else (`Parallel`, `Perpendicular`, `Tangent`, `Concurrent`,
///   `Collinear`, `Concyclic`, `SameObjects`) relates an unordered set of
///   objects of one kind, so a plain sort of the whole list is canonical.
pub fn canonicalize(kind: TheoremKind, objects: &[HandleId]) -> Vec<HandleId> {
    match kind {
        TheoremKind::Incidence => objects.to_vec(),
        TheoremKind::EqualSegments => {
            let mut a = [objects[0], objects[1]];
            let mut b = [objects[2], objects[3]];
            a.sort_unstable();
            b.sort_unstable();
            let (first, second) = if a <= b { (a, b) } else { (b, a) };
            vec![first[0], first[1], second[0], second[1]]
        }
        _ => {
            let mut sorted = objects.to_vec();
            sorted.sort_unstable();
            sorted
        }
    }
}

fn canonical_key(kind: TheoremKind, objects: &[HandleId]) -> (TheoremKind, Vec<HandleId>) {
    (kind, canonicalize(kind, objects))
}

/// A candidate relationship, proposed by a producer but not yet checked
/// against every picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotentialTheorem {
    pub kind: TheoremKind,
    pub objects: Vec<HandleId>,
}

impl PotentialTheorem {
    pub fn new(kind: TheoremKind, objects: Vec<HandleId>) -> Self {
        Self { kind, objects }
    }
}

impl PartialEq for PotentialTheorem {
    fn eq(&self, other: &Self) -> bool {
        canonical_key(self.kind, &self.objects) == canonical_key(other.kind, &other.objects)
    }
}

impl Eq for PotentialTheorem {}

impl Hash for PotentialTheorem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_key(self.kind, &self.objects).hash(state);
    }
}

impl PartialOrd for PotentialTheorem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PotentialTheorem {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_key(self.kind, &self.objects).cmp(&canonical_key(other.kind, &other.objects))
    }
}

/// A theorem the runner confirmed holds in every picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theorem {
    pub kind: TheoremKind,
    pub objects: Vec<HandleId>,
}

impl PartialEq for Theorem {
    fn eq(&self, other: &Self) -> bool {
        canonical_key(self.kind, &self.objects) == canonical_key(other.kind, &other.objects)
    }
}

impl Eq for Theorem {}

impl Hash for Theorem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_key(self.kind, &self.objects).hash(state);
    }
}

impl PartialOrd for Theorem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Theorem {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_key(self.kind, &self.objects).cmp(&canonical_key(other.kind, &other.objects))
    }
}

impl From<PotentialTheorem> for Theorem {
    fn from(candidate: PotentialTheorem) -> Self {
        Self {
            kind: candidate.kind,
            objects: candidate.objects,
        }
    }
}

/// A canonically-ordered, duplicate-free collection of theorems: the
/// runner's `find_all`/`find_new` return type (spec §4.8). Iterating a
/// `TheoremMap` yields theorems sorted by kind, then lexicographically by
/// canonicalized object id, and inserting an already-present theorem (by
/// the symmetry-aware equality above) is a no-op.
pub type TheoremMap = BTreeSet<Theorem>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theorem_round_trips_through_json() {
        let theorem = Theorem {
            kind: TheoremKind::Concurrent,
            objects: vec![3, 7, 11],
        };

        let json = serde_json::to_string(&theorem).unwrap();
        let back: Theorem = serde_json::from_str(&json).unwrap();

        assert_eq!(theorem, back);
    }

    #[test]
    fn potential_theorem_converts_to_theorem_preserving_fields() {
        let candidate = PotentialTheorem::new(TheoremKind::Collinear, vec![1, 2, 3]);
        let theorem: Theorem = candidate.clone().into();

        assert_eq!(theorem.kind, candidate.kind);
        assert_eq!(theorem.objects, candidate.objects);
    }

    #[test]
    fn unordered_pair_theorems_are_equal_regardless_of_argument_order() {
        let a = Theorem { kind: TheoremKind::Parallel, objects: vec![1, 2] };
        let b = Theorem { kind: TheoremKind::Parallel, objects: vec![2, 1] };
        assert_eq!(a, b);
    }

    #[test]
    fn concurrent_triples_are_equal_under_any_permutation() {
        let a = Theorem { kind: TheoremKind::Concurrent, objects: vec![5, 1, 3] };
        let b = Theorem { kind: TheoremKind::Concurrent, objects: vec![3, 5, 1] };
        assert_eq!(a, b);
    }

    #[test]
    fn equal_segments_are_equal_under_endpoint_swap_and_segment_swap() {
        let a = Theorem { kind: TheoremKind::EqualSegments, objects: vec![1, 2, 3, 4] };
        let b = Theorem { kind: TheoremKind::EqualSegments, objects: vec![2, 1, 4, 3] };
        let c = Theorem { kind: TheoremKind::EqualSegments, objects: vec![4, 3, 2, 1] };
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn incidence_does_not_treat_point_and_line_as_interchangeable() {
        // Same pair of ids, but swapping them would mean "line 2 lies on
        // point 1" rather than "point 1 lies on line 2" — these must not
        // collapse to the same theorem.
        let a = Theorem { kind: TheoremKind::Incidence, objects: vec![1, 2] };
        let b = Theorem { kind: TheoremKind::Incidence, objects: vec![2, 1] };
        assert_ne!(a, b);
    }

    #[test]
    fn theorem_map_dedupes_structurally_equal_theorems() {
        let mut map = TheoremMap::new();
        map.insert(Theorem { kind: TheoremKind::Parallel, objects: vec![1, 2] });
        map.insert(Theorem { kind: TheoremKind::Parallel, objects: vec![2, 1] });
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn theorem_map_orders_by_kind_then_canonical_objects() {
        let mut map = TheoremMap::new();
        map.insert(Theorem { kind: TheoremKind::Concurrent, objects: vec![9, 1] });
        map.insert(Theorem { kind: TheoremKind::Incidence, objects: vec![5, 2] });
        map.insert(Theorem { kind: TheoremKind::Incidence, objects: vec![1, 2] });

        let ordered: Vec<_> = map.into_iter().collect();
        assert_eq!(ordered[0].kind, TheoremKind::Incidence);
        assert_eq!(ordered[0].objects, vec![1, 2]);
        assert_eq!(ordered[1].kind, TheoremKind::Incidence);
        assert_eq!(ordered[1].objects, vec![5, 2]);
        assert_eq!(ordered[2].kind, TheoremKind::Concurrent);
    }
}
