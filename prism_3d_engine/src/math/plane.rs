//! Plane in Hessian normal form.
//!
//! `dot(normal, p) = distance` for every point `p` on the plane. The
//! half-space `dot(normal, p) <= distance` is "inside"; frustum planes keep
//! their normals pointing out of the visible volume.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Signed distance from the origin along `normal`
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane through `point` with the given (unit) normal
    pub fn from_point_and_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            distance: point.dot(normal),
        }
    }

    /// Plane through three points, normal = normalize(cross(p2 - p1, p3 - p1)).
    ///
    /// Collinear points give a NaN normal; such a plane rejects nothing.
    pub fn from_three_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize();
        Self {
            normal,
            distance: p1.dot(normal),
        }
    }

    /// `dot(normal, p) - distance`: negative inside, positive outside
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }

    /// Strictly outside the half-space
    pub fn is_outside(&self, point: Vec3) -> bool {
        self.normal.dot(point) > self.distance
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
