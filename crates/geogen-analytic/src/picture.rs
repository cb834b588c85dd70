//! `Picture`: one concrete, fully-numeric instantiation of a configuration.
//!
//! A picture is a bimap between symbolic [`ObjectId`]s and their realized
//! [`AnalyticObject`] values, plus a reverse index from canonical analytic
//! buckets back to ids, so that "does this numeric value already exist
//! under a different id" (duplicate detection, §4.5) is an O(1)-ish bucket
//! lookup followed by a small near-duplicate scan instead of an O(n) scan
//! over every object in the picture.
//!
//! Backed by `im::HashMap` so that cloning a picture to extend it
//! speculatively (the registrar's "try this construction, keep the clone
//! only if it's consistent" pattern) is cheap structural sharing rather
//! than a deep copy.

use im::HashMap as ImHashMap;

use crate::analytic::{AnalyticObject, CanonicalKey};
use crate::construction::ObjectId;
use crate::ToleranceEq;

/// One numeric instantiation of a configuration: every realized object's
/// id maps to its analytic value, and every analytic value's canonical
/// bucket maps back to the ids that (almost) match it.
#[derive(Debug, Clone, Default)]
pub struct Picture {
    values: ImHashMap<ObjectId, AnalyticObject>,
    index: ImHashMap<CanonicalKey, im::Vector<ObjectId>>,
}

impl Picture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<AnalyticObject> {
        self.values.get(&id).copied()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.values.contains_key(&id)
    }

    /// Insert `value` under `id`, overwriting any previous value for that
    /// id. Returns the id of a pre-existing, tolerance-equal object under a
    /// *different* id, if one was found by the canonical-bucket scan —
    /// callers use this to detect that two distinct symbolic objects
    /// realized to the same numeric value in this picture.
    pub fn insert(&mut self, id: ObjectId, value: AnalyticObject) -> Option<ObjectId> {
        let duplicate_of = self.duplicate_of(&value, id);

        let key = value.canonical_key();
        self.index.entry(key).or_default().push_back(id);
        self.values.insert(id, value);

        duplicate_of
    }

    /// Scan the canonical bucket and its neighbors for an existing object
    /// (other than `excluding`) that is tolerance-equal to `value`.
    pub fn duplicate_of(&self, value: &AnalyticObject, excluding: ObjectId) -> Option<ObjectId> {
        for key in value.key_neighbors() {
            if let Some(candidates) = self.index.get(&key) {
                for &candidate_id in candidates.iter() {
                    if candidate_id == excluding {
                        continue;
                    }
                    if let Some(candidate_value) = self.values.get(&candidate_id) {
                        if candidate_value.tol_eq(value) {
                            return Some(candidate_id);
                        }
                    }
                }
            }
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, AnalyticObject)> + '_ {
        self.values.iter().map(|(&id, &value)| (id, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn insert_and_get_round_trip() {
        let mut pic = Picture::new();
        pic.insert(0, AnalyticObject::Point(Point::new(1.0, 2.0)));
        assert!(pic.get(0).unwrap().as_point().unwrap().tol_eq(&Point::new(1.0, 2.0)));
    }

    #[test]
    fn cloning_is_independent() {
        let mut pic = Picture::new();
        pic.insert(0, AnalyticObject::Point(Point::new(0.0, 0.0)));
        let mut clone = pic.clone();
        clone.insert(1, AnalyticObject::Point(Point::new(1.0, 1.0)));
        assert_eq!(pic.len(), 1);
        assert_eq!(clone.len(), 2);
    }

    #[test]
    fn duplicate_value_under_a_different_id_is_detected() {
        let mut pic = Picture::new();
        pic.insert(0, AnalyticObject::Point(Point::new(3.0, 4.0)));
        let dup = pic.insert(1, AnalyticObject::Point(Point::new(3.0, 4.0)));
        assert_eq!(dup, Some(0));
    }

    #[test]
    fn distinct_values_are_not_flagged_as_duplicates() {
        let mut pic = Picture::new();
        pic.insert(0, AnalyticObject::Point(Point::new(0.0, 0.0)));
        let dup = pic.insert(1, AnalyticObject::Point(Point::new(10.0, 10.0)));
        assert_eq!(dup, None);
    }
}
