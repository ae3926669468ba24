//! Separating-axis tests for rectangles, circles, and convex polygons.
//!
//! Every test is a pure function of two cached [`WorldShape`]s and returns a
//! [`Contact`] whose normal points from the first argument toward the second.

use glam::Vec2;

use crate::{
    collision::{contact::Contact, manifold},
    core::shape::{ShapeKind, WorldShape},
    utils::math::{interval_overlap, project_circle, project_vertices},
};

/// Outcome of a separating-axis sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SatOutcome {
    /// Projections were disjoint on the axis at `axis_index` (in test order).
    Separated { axis_index: usize },
    /// Every axis overlapped; `axis` had the smallest overlap, `depth`.
    Overlap { axis: Vec2, depth: f32 },
}

/// Signature shared by every entry of the dispatch table.
pub type PairTest = fn(&WorldShape, &WorldShape) -> Option<Contact>;

/// Indexed by `[kind_a][kind_b]`. Rectangles and polygons share the convex
/// paths; mixed circle pairs always run with the convex shape first.
const PAIR_TESTS: [[PairTest; 3]; 3] = [
    [convex_vs_convex, convex_vs_circle, convex_vs_convex],
    [circle_vs_convex, circle_vs_circle, circle_vs_convex],
    [convex_vs_convex, convex_vs_circle, convex_vs_convex],
];

/// Runs the narrow-phase test registered for the pair's shape kinds.
pub fn collide(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    pair_test(a.kind(), b.kind())(a, b)
}

pub fn pair_test(kind_a: ShapeKind, kind_b: ShapeKind) -> PairTest {
    PAIR_TESTS[kind_a as usize][kind_b as usize]
}

/// Sweeps `axes` in order. The first axis with a strictly smaller overlap
/// wins, so equal overlaps keep the earlier axis.
fn sweep<I, FA, FB>(axes: I, project_a: FA, project_b: FB) -> SatOutcome
where
    I: IntoIterator<Item = Vec2>,
    FA: Fn(Vec2) -> (f32, f32),
    FB: Fn(Vec2) -> (f32, f32),
{
    let mut best: Option<(Vec2, f32)> = None;
    let mut tested = 0;

    for (axis_index, axis) in axes.into_iter().enumerate() {
        tested += 1;
        let Some(overlap) = interval_overlap(project_a(axis), project_b(axis)) else {
            return SatOutcome::Separated { axis_index };
        };
        match best {
            Some((_, depth)) if overlap >= depth => {}
            _ => best = Some((axis, overlap)),
        }
    }

    match best {
        Some((axis, depth)) => SatOutcome::Overlap { axis, depth },
        None => SatOutcome::Separated { axis_index: tested },
    }
}

/// Points `axis` from `center_a` toward `center_b`.
fn orient(axis: Vec2, center_a: Vec2, center_b: Vec2) -> Vec2 {
    if axis.dot(center_b - center_a) >= 0.0 {
        axis
    } else {
        -axis
    }
}

/// SAT over the edge normals of both shapes: A's first, then B's. Two
/// rectangles test exactly four axes since opposite edges share a normal.
pub fn sat_convex(a: &WorldShape, b: &WorldShape) -> SatOutcome {
    let axes = a.axes().iter().chain(b.axes()).copied();
    sweep(
        axes,
        |axis| project_vertices(a.vertices(), axis),
        |axis| project_vertices(b.vertices(), axis),
    )
}

/// SAT between a convex shape and a circle: the convex edge normals plus the
/// axis from the convex center to its vertex nearest the circle center.
pub fn sat_convex_circle(convex: &WorldShape, circle: &WorldShape) -> SatOutcome {
    let center = circle.center();
    let radius = circle.radius();
    let extra = nearest_vertex(convex.vertices(), center)
        .and_then(|vertex| (vertex - convex.center()).try_normalize());

    let axes = convex.axes().iter().copied().chain(extra);
    sweep(
        axes,
        |axis| project_vertices(convex.vertices(), axis),
        |axis| project_circle(center, radius, axis),
    )
}

/// Vertex closest to `point` by squared distance; the first one wins ties.
fn nearest_vertex(vertices: &[Vec2], point: Vec2) -> Option<Vec2> {
    let mut nearest: Option<(Vec2, f32)> = None;
    for &vertex in vertices {
        let distance = vertex.distance_squared(point);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((vertex, distance)),
        }
    }
    nearest.map(|(vertex, _)| vertex)
}

pub fn convex_vs_convex(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let SatOutcome::Overlap { axis, depth } = sat_convex(a, b) else {
        return None;
    };
    let normal = orient(axis, a.center(), b.center());
    let point = manifold::convex_convex_point(a.vertices(), b.vertices(), normal);
    Some(Contact::new(normal, depth, point))
}

pub fn convex_vs_circle(convex: &WorldShape, circle: &WorldShape) -> Option<Contact> {
    let SatOutcome::Overlap { axis, depth } = sat_convex_circle(convex, circle) else {
        return None;
    };
    let normal = orient(axis, convex.center(), circle.center());
    let point =
        manifold::convex_circle_point(convex.vertices(), circle.center(), circle.radius(), normal);
    Some(Contact::new(normal, depth, point))
}

/// Runs the convex-first test and flips the result back to circle-first.
pub fn circle_vs_convex(circle: &WorldShape, convex: &WorldShape) -> Option<Contact> {
    convex_vs_circle(convex, circle).map(Contact::flipped)
}

/// Analytic circle test. Coincident centers fall back to normal `(1, 0)` with
/// penetration equal to A's radius.
pub fn circle_vs_circle(a: &WorldShape, b: &WorldShape) -> Option<Contact> {
    let (center_a, radius_a) = (a.center(), a.radius());
    let (center_b, radius_b) = (b.center(), b.radius());

    let delta = center_b - center_a;
    let radii = radius_a + radius_b;
    let distance_squared = delta.length_squared();
    if distance_squared >= radii * radii {
        return None;
    }

    let distance = distance_squared.sqrt();
    let (normal, penetration) = if distance == 0.0 {
        (Vec2::X, radius_a)
    } else {
        (delta / distance, radii - distance)
    };

    let point = manifold::circle_circle_point(center_a, radius_a, normal);
    Some(Contact::new(normal, penetration, point))
}
