use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::types::WorldTransform;
use crate::{
    error::{PhysicsError, Result},
    utils::math::{edge_normal, polygon_unit_inertia},
};

/// Enumeration of supported collider geometries, in the body's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Oriented box centered on the body.
    Rectangle { width: f32, height: f32 },
    Circle { radius: f32 },
    /// Convex polygon with vertices relative to the body position.
    ConvexPolygon { vertices: Vec<Vec2> },
}

/// Discriminant used to index the narrow-phase dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle = 0,
    Circle = 1,
    ConvexPolygon = 2,
}

impl Shape {
    pub fn rectangle(width: f32, height: f32) -> Self {
        Shape::Rectangle { width, height }
    }

    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        Shape::ConvexPolygon { vertices }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::ConvexPolygon { .. } => ShapeKind::ConvexPolygon,
        }
    }

    /// Rejects shapes that could never produce valid world geometry.
    pub fn validate(&self) -> Result<()> {
        match self {
            Shape::Rectangle { width, height } => {
                positive("rectangle width", *width)?;
                positive("rectangle height", *height)
            }
            Shape::Circle { radius } => positive("circle radius", *radius),
            Shape::ConvexPolygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(PhysicsError::TooFewVertices {
                        count: vertices.len(),
                    });
                }
                polygon_normals(vertices).map(|_| ())
            }
        }
    }

    /// Moment of inertia per unit mass about the shape center.
    pub fn unit_inertia(&self) -> f32 {
        match self {
            Shape::Rectangle { width, height } => (width * width + height * height) / 12.0,
            Shape::Circle { radius } => radius * radius * 0.5,
            Shape::ConvexPolygon { vertices } => polygon_unit_inertia(vertices),
        }
    }

    /// Computes world-space vertices and edge normals for `transform`.
    ///
    /// Rectangles get four vertices (top-left, top-right, bottom-right,
    /// bottom-left before rotation) and the two distinct edge normals.
    /// Circle radii shrink with the smaller scale axis and never grow.
    pub fn compute_absolute(&self, transform: &WorldTransform) -> Result<WorldShape> {
        let rotation = Vec2::from_angle(transform.rotation);
        let center = transform.center;

        match self {
            Shape::Rectangle { width, height } => {
                let half = Vec2::new(*width, *height) * transform.scale.abs() * 0.5;
                // Clockwise in a y-up frame, so (-dy, dx) of each edge points outward.
                let local = [
                    Vec2::new(-half.x, half.y),
                    Vec2::new(half.x, half.y),
                    Vec2::new(half.x, -half.y),
                    Vec2::new(-half.x, -half.y),
                ];
                let vertices = local.map(|v| center + rotation.rotate(v));
                let normals = [
                    edge_normal(vertices[0], vertices[1])
                        .unwrap_or_else(|| rotation.rotate(Vec2::Y)),
                    edge_normal(vertices[1], vertices[2])
                        .unwrap_or_else(|| rotation.rotate(Vec2::X)),
                ];
                Ok(WorldShape::Rectangle {
                    center,
                    rotation: transform.rotation,
                    vertices,
                    normals,
                })
            }
            Shape::Circle { radius } => {
                let scale = transform.scale.x.abs().min(transform.scale.y.abs());
                Ok(WorldShape::Circle {
                    center,
                    radius: radius * scale,
                })
            }
            Shape::ConvexPolygon { vertices } => {
                let world: Vec<Vec2> = vertices
                    .iter()
                    .map(|v| center + rotation.rotate(*v * transform.scale))
                    .collect();
                let normals = polygon_normals(&world)?;
                Ok(WorldShape::ConvexPolygon {
                    center,
                    rotation: transform.rotation,
                    vertices: world,
                    normals,
                })
            }
        }
    }
}

fn positive(what: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidDimension { what, value })
    }
}

fn polygon_normals(vertices: &[Vec2]) -> Result<Vec<Vec2>> {
    (0..vertices.len())
        .map(|i| {
            edge_normal(vertices[i], vertices[(i + 1) % vertices.len()])
                .ok_or(PhysicsError::DegenerateEdge { edge: i })
        })
        .collect()
}

/// Cached world-space geometry of a body, consumed by the narrow phase.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldShape {
    Rectangle {
        center: Vec2,
        rotation: f32,
        vertices: [Vec2; 4],
        normals: [Vec2; 2],
    },
    Circle {
        center: Vec2,
        radius: f32,
    },
    ConvexPolygon {
        center: Vec2,
        rotation: f32,
        vertices: Vec<Vec2>,
        normals: Vec<Vec2>,
    },
}

impl WorldShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            WorldShape::Rectangle { .. } => ShapeKind::Rectangle,
            WorldShape::Circle { .. } => ShapeKind::Circle,
            WorldShape::ConvexPolygon { .. } => ShapeKind::ConvexPolygon,
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            WorldShape::Rectangle { center, .. }
            | WorldShape::Circle { center, .. }
            | WorldShape::ConvexPolygon { center, .. } => *center,
        }
    }

    /// World-space vertices; empty for circles.
    pub fn vertices(&self) -> &[Vec2] {
        match self {
            WorldShape::Rectangle { vertices, .. } => vertices,
            WorldShape::Circle { .. } => &[],
            WorldShape::ConvexPolygon { vertices, .. } => vertices,
        }
    }

    /// Candidate separating axes owned by this shape; empty for circles.
    pub fn axes(&self) -> &[Vec2] {
        match self {
            WorldShape::Rectangle { normals, .. } => normals,
            WorldShape::Circle { .. } => &[],
            WorldShape::ConvexPolygon { normals, .. } => normals,
        }
    }

    /// Scaled radius; zero for vertex-based shapes.
    pub fn radius(&self) -> f32 {
        match self {
            WorldShape::Circle { radius, .. } => *radius,
            _ => 0.0,
        }
    }
}
