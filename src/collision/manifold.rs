//! Single-point contact construction for overlapping pairs.

use glam::Vec2;

use crate::utils::math::segment_intersection;

/// Edge of a convex vertex loop that faces a given direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureEdge {
    /// Vertex with the largest projection on the search direction.
    pub farthest: Vec2,
    pub start: Vec2,
    pub end: Vec2,
}

/// Finds the edge of `vertices` facing `direction`: the vertex farthest along
/// it, paired with whichever neighbour gives the edge more perpendicular to
/// `direction`. The first farthest vertex wins on ties.
pub fn best_edge(vertices: &[Vec2], direction: Vec2) -> FeatureEdge {
    let count = vertices.len();
    if count == 0 {
        return FeatureEdge {
            farthest: Vec2::ZERO,
            start: Vec2::ZERO,
            end: Vec2::ZERO,
        };
    }

    let mut index = 0;
    let mut max_projection = f32::NEG_INFINITY;
    for (i, vertex) in vertices.iter().enumerate() {
        let projection = vertex.dot(direction);
        if projection > max_projection {
            max_projection = projection;
            index = i;
        }
    }

    let farthest = vertices[index];
    let next = vertices[(index + 1) % count];
    let prev = vertices[(index + count - 1) % count];

    let to_next = (farthest - next).normalize_or_zero();
    let to_prev = (farthest - prev).normalize_or_zero();

    if to_prev.dot(direction).abs() <= to_next.dot(direction).abs() {
        FeatureEdge {
            farthest,
            start: prev,
            end: farthest,
        }
    } else {
        FeatureEdge {
            farthest,
            start: farthest,
            end: next,
        }
    }
}

/// Contact point between two convex vertex loops.
///
/// Intersects the edge of A facing `normal` with the edge of B facing
/// `-normal`. Parallel or non-crossing edges fall back to the midpoint of the
/// two middle endpoints along the contact tangent.
pub fn convex_convex_point(vertices_a: &[Vec2], vertices_b: &[Vec2], normal: Vec2) -> Vec2 {
    let edge_a = best_edge(vertices_a, normal);
    let edge_b = best_edge(vertices_b, -normal);

    if let Some(point) = segment_intersection(edge_a.start, edge_a.end, edge_b.start, edge_b.end)
    {
        return point;
    }

    let tangent = normal.perp();
    let mut endpoints = [edge_a.start, edge_a.end, edge_b.start, edge_b.end];
    endpoints.sort_by(|p, q| p.dot(tangent).total_cmp(&q.dot(tangent)));
    (endpoints[1] + endpoints[2]) * 0.5
}

/// Contact point between a convex vertex loop and a circle, on the circle
/// surface. `normal` points from the polygon toward the circle.
pub fn convex_circle_point(vertices: &[Vec2], center: Vec2, radius: f32, normal: Vec2) -> Vec2 {
    let edge = best_edge(vertices, normal);
    let along = edge.end - edge.start;
    let length_squared = along.length_squared();
    let t = if length_squared > f32::EPSILON {
        (center - edge.start).dot(along) / length_squared
    } else {
        0.0
    };

    if (0.0..=1.0).contains(&t) {
        return center - normal * radius;
    }

    let corner = if t < 0.0 { edge.start } else { edge.end };
    let axis = (center - corner).try_normalize().unwrap_or(normal);
    center - axis * radius
}

/// Contact point between two circles: on A's surface along the normal.
pub fn circle_circle_point(center_a: Vec2, radius_a: f32, normal: Vec2) -> Vec2 {
    center_a + normal * radius_a
}
