//! Property-based tests for the gradual analyzer and contextual picture.
//!
//! Uses proptest to verify structural laws hold for randomly generated
//! triangle configurations: permutation-invariance of the pictures a
//! configuration is checked against, and equivalence between finding
//! theorems incrementally (in two extension steps) and finding them all
//! at once.

use std::collections::HashSet;

use proptest::prelude::*;

use geogen_analytic::{AnalyticObject, ConfigurationObject, ObjectKind, Point};
use geogen_engine::analyzer::Analyzer;
use geogen_engine::contextual::ContextualPicture;
use geogen_engine::runner::Runner;
use geogen_engine::theorem::{Theorem, TheoremKind};

const A: u64 = 0;
const B: u64 = 1;
const C: u64 = 2;
const D: u64 = 3; // midpoint of AB
const E: u64 = 4; // midpoint of AC

/// A non-degenerate triangle: coordinates bounded away from collinearity so
/// random samples don't spuriously fail construction.
fn any_triangle() -> impl Strategy<Value = (Point, Point, Point)> {
    let coord = -20.0f64..20.0f64;
    (coord.clone(), coord.clone(), coord.clone(), coord.clone(), coord.clone(), coord).prop_map(
        |(ax, ay, bx, by, cx, cy)| {
            (Point::new(ax, ay), Point::new(bx, by), Point::new(cx, cy))
        },
    )
}

fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
}

fn loose_point(id: u64) -> ConfigurationObject {
    ConfigurationObject::Loose { id, kind: ObjectKind::Point }
}

fn theorem_set(theorems: &[Theorem]) -> HashSet<(TheoremKind, Vec<u64>)> {
    theorems
        .iter()
        .map(|t| {
            let mut objects = t.objects.clone();
            objects.sort_unstable();
            (t.kind, objects)
        })
        .collect()
}

/// Every candidate that currently holds in every picture, regardless of
/// the new/old partition — used to compare "all theorems now" across two
/// differently-built contextual pictures for the same geometry.
fn find_all(ctx: &ContextualPicture) -> HashSet<(TheoremKind, Vec<u64>)> {
    theorem_set(
        &Analyzer::all_candidates(ctx)
            .into_iter()
            .filter_map(|c| Runner::verify(ctx, &c))
            .collect::<Vec<_>>(),
    )
}

proptest! {
    /// Permuting which picture is realized first/second doesn't change
    /// which theorems are found: `Runner::verify`'s "holds in every
    /// picture" check is a conjunction over all pictures, symmetric in
    /// their order.
    #[test]
    fn permuting_pictures_yields_the_same_theorems(
        triangle_0 in any_triangle(),
        triangle_1 in any_triangle(),
    ) {
        prop_assume!(triangle_area(triangle_0.0, triangle_0.1, triangle_0.2) > 1.0);
        prop_assume!(triangle_area(triangle_1.0, triangle_1.1, triangle_1.2) > 1.0);

        let build = |order: [(Point, Point, Point); 2]| -> ContextualPicture {
            let mut ctx = ContextualPicture::new();
            for (id, pick) in [(A, 0usize), (B, 1), (C, 2)] {
                let realized: Vec<AnalyticObject> = order
                    .iter()
                    .map(|(a, b, c)| AnalyticObject::Point(match pick {
                        0 => *a,
                        1 => *b,
                        _ => *c,
                    }))
                    .collect();
                ctx.add(&loose_point(id), &realized).unwrap();
            }
            ctx
        };

        let forward = build([triangle_0, triangle_1]);
        let swapped = build([triangle_1, triangle_0]);

        prop_assert_eq!(find_all(&forward), find_all(&swapped));
    }

    /// Finding theorems in two extension steps (base triangle, then its
    /// two midpoints) and unioning the results equals finding all
    /// theorems once, after adding everything in a single step.
    #[test]
    fn incremental_discovery_matches_discovery_all_at_once(
        triangle_0 in any_triangle(),
        triangle_1 in any_triangle(),
    ) {
        prop_assume!(triangle_area(triangle_0.0, triangle_0.1, triangle_0.2) > 1.0);
        prop_assume!(triangle_area(triangle_1.0, triangle_1.1, triangle_1.2) > 1.0);
        let triangles = [triangle_0, triangle_1];

        let as_: Vec<Point> = triangles.iter().map(|(a, _, _)| *a).collect();
        let bs: Vec<Point> = triangles.iter().map(|(_, b, _)| *b).collect();
        let cs: Vec<Point> = triangles.iter().map(|(_, _, c)| *c).collect();
        let ds: Vec<Point> = triangles.iter().map(|(a, b, _)| a.midpoint(b)).collect();
        let es: Vec<Point> = triangles.iter().map(|(a, _, c)| a.midpoint(c)).collect();

        let points = |vs: &[Point]| -> Vec<AnalyticObject> { vs.iter().map(|p| AnalyticObject::Point(*p)).collect() };

        // Two steps: base triangle, then its midpoints.
        let mut ctx_incremental = ContextualPicture::new();
        ctx_incremental.add(&loose_point(A), &points(&as_)).unwrap();
        ctx_incremental.add(&loose_point(B), &points(&bs)).unwrap();
        ctx_incremental.add(&loose_point(C), &points(&cs)).unwrap();
        let step1 = find_all(&ctx_incremental);
        ctx_incremental.commit_step();

        ctx_incremental.add(&loose_point(D), &points(&ds)).unwrap();
        ctx_incremental.add(&loose_point(E), &points(&es)).unwrap();
        let step2_new_only = theorem_set(
            &Analyzer::all_candidates(&ctx_incremental)
                .into_iter()
                .filter_map(|c| Runner::verify(&ctx_incremental, &c))
                .collect::<Vec<_>>(),
        );
        ctx_incremental.commit_step();

        let incremental_union: HashSet<_> = step1.union(&step2_new_only).cloned().collect();

        // One step: everything added together.
        let mut ctx_all_at_once = ContextualPicture::new();
        ctx_all_at_once.add(&loose_point(A), &points(&as_)).unwrap();
        ctx_all_at_once.add(&loose_point(B), &points(&bs)).unwrap();
        ctx_all_at_once.add(&loose_point(C), &points(&cs)).unwrap();
        ctx_all_at_once.add(&loose_point(D), &points(&ds)).unwrap();
        ctx_all_at_once.add(&loose_point(E), &points(&es)).unwrap();
        let all_at_once = find_all(&ctx_all_at_once);

        prop_assert_eq!(incremental_union, all_at_once);
    }
}
