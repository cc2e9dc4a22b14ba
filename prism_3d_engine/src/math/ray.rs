//! Ray with an origin and a direction (not required to be normalized).

use glam::Vec3;
use super::plane::Plane;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Parameter `t` such that `origin + t * direction` lies on the plane.
    ///
    /// Infinite or NaN when the ray is parallel to the plane.
    pub fn plane_intersection_parameter(&self, plane: &Plane) -> f32 {
        let numerator = plane.distance - self.origin.dot(plane.normal);
        let denominator = self.direction.dot(plane.normal);
        numerator / denominator
    }

    /// Point at parameter `t`
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection point with a plane, `None` when the plane is behind the
    /// origin (`t < 0`) or the parameter is NaN or infinite (parallel ray,
    /// zero direction).
    pub fn intersects_plane(&self, plane: &Plane) -> Option<Vec3> {
        let t = self.plane_intersection_parameter(plane);
        if t < 0.0 || !t.is_finite() {
            None
        } else {
            Some(self.point_at(t))
        }
    }
}

#[cfg(test)]
#[path = "ray_tests.rs"]
mod tests;
