//! Geometric kernel - axis-aligned boxes, planes and rays.
//!
//! Pure math over glam types. Degenerate inputs never panic or error:
//! they produce sentinel values (`Aabb::EMPTY`, `None`).

mod aabb;
mod plane;
mod ray;

pub use aabb::{Aabb, Axis};
pub use plane::Plane;
pub use ray::Ray;
