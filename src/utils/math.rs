//! Additional 2D math helpers layered on top of `glam`.

use glam::Vec2;

/// Projects a vertex set onto `axis`, returning the `(min, max)` interval.
pub fn project_vertices(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for vertex in vertices {
        let p = vertex.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}

/// Projects a circle onto `axis` (assumed unit length).
pub fn project_circle(center: Vec2, radius: f32, axis: Vec2) -> (f32, f32) {
    let p = center.dot(axis);
    (p - radius, p + radius)
}

/// Overlap of two 1D intervals, or `None` if they are disjoint.
/// Touching intervals overlap by exactly zero.
pub fn interval_overlap(a: (f32, f32), b: (f32, f32)) -> Option<f32> {
    if a.1 < b.0 || b.1 < a.0 {
        return None;
    }
    Some((a.1 - b.0).min(b.1 - a.0))
}

/// Unit perpendicular `(-dy, dx)` of the segment `from -> to`, or `None` for a
/// zero-length segment.
pub fn edge_normal(from: Vec2, to: Vec2) -> Option<Vec2> {
    let edge = to - from;
    Vec2::new(-edge.y, edge.x).try_normalize()
}

/// Proper intersection of segments `p0-p1` and `q0-q1`. Parallel and
/// non-crossing segments return `None`.
pub fn segment_intersection(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2) -> Option<Vec2> {
    let r = p1 - p0;
    let s = q1 - q0;
    let denom = r.perp_dot(s);
    if denom.abs() <= f32::EPSILON {
        return None;
    }

    let qp = q0 - p0;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p0 + r * t)
    } else {
        None
    }
}

/// Area-weighted second moment of a convex polygon about its centroid, per
/// unit mass. Falls back to zero for degenerate input.
pub fn polygon_unit_inertia(vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let mut centroid = Vec2::ZERO;
    let mut inertia = 0.0;
    for (i, &a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let cross = a.perp_dot(b);
        area += cross * 0.5;
        centroid += (a + b) * cross / 6.0;
        inertia += cross * (a.dot(a) + a.dot(b) + b.dot(b)) / 12.0;
    }

    if area.abs() <= f32::EPSILON {
        return 0.0;
    }
    centroid /= area;
    (inertia / area - centroid.length_squared()).abs()
}
