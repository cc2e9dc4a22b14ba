/// Frustum - six clipping planes for visibility culling.
///
/// Planes are stored in Hessian form with normals pointing OUT of the
/// visible volume: a point is inside when `dot(normal, p) <= distance` for
/// all six planes. Plane order is near, far, top, bottom, left, right.

use glam::{Mat4, Vec3};
use crate::math::{Aabb, Plane};
use super::camera::Camera;

/// Frustum plane indices
pub const PLANE_NEAR: usize = 0;
pub const PLANE_FAR: usize = 1;
pub const PLANE_TOP: usize = 2;
pub const PLANE_BOTTOM: usize = 3;
pub const PLANE_LEFT: usize = 4;
pub const PLANE_RIGHT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// near, far, top, bottom, left, right
    pub planes: [Plane; 6],
}

impl Frustum {
    pub fn from_planes(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Build the frustum of a camera for a viewport aspect ratio
    /// (`width / height`).
    ///
    /// The near and far rectangles are computed from the field of view and
    /// aspect, and the four side planes are fitted through their corners.
    /// The perspective parameters are used for both projection types.
    pub fn from_camera(camera: &Camera, aspect: f32) -> Self {
        let (forward, left, up) = camera.basis();
        let position = camera.position();

        let near_center = position + forward * camera.near_plane();
        let far_center = position + forward * camera.far_plane();

        let a = 2.0 * (camera.field_of_view() / 2.0).tan();
        let near_height = camera.near_plane() * a;
        let near_width = near_height * aspect;
        let far_height = camera.far_plane() * a;
        let far_width = far_height * aspect;

        let far_top_left = far_center + left * (0.5 * far_width) + up * (0.5 * far_height);
        let far_bottom_left = far_top_left - up * far_height;
        let far_top_right = far_top_left - left * far_width;
        let far_bottom_right = far_top_right - up * far_height;

        let near_top_left = near_center + left * (0.5 * near_width) + up * (0.5 * near_height);
        let near_bottom_left = near_top_left - up * near_height;
        let near_top_right = near_top_left - left * near_width;
        let near_bottom_right = near_top_right - up * near_height;

        let mut planes = [Plane::new(Vec3::ZERO, 0.0); 6];
        planes[PLANE_NEAR] = Plane::from_point_and_normal(near_center, -forward);
        planes[PLANE_FAR] = Plane::from_point_and_normal(far_center, forward);
        planes[PLANE_TOP] = Plane::from_three_points(far_top_left, near_top_left, far_top_right);
        planes[PLANE_BOTTOM] = Plane::from_three_points(far_bottom_left, far_bottom_right, near_bottom_left);
        planes[PLANE_LEFT] = Plane::from_three_points(far_bottom_left, near_bottom_left, far_top_left);
        planes[PLANE_RIGHT] = Plane::from_three_points(far_bottom_right, far_top_right, near_bottom_right);

        Self { planes }
    }

    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method for an OpenGL-style clip space
    /// (NDC depth in [-1, 1]), which is what `Camera::projection_matrix`
    /// produces. Works for both perspective and orthographic projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        // Inward plane (n, w): inside when dot(n, p) + w >= 0.
        // Stored outward as (-n, w) so that inside means dot(-n, p) <= w.
        let to_plane = |v: glam::Vec4| {
            let normal = v.truncate();
            let length = normal.length();
            let (normal, w) = if length > 0.0 { (normal / length, v.w / length) } else { (normal, v.w) };
            Plane::new(-normal, w)
        };

        let mut planes = [Plane::new(Vec3::ZERO, 0.0); 6];
        planes[PLANE_NEAR] = to_plane(row3 + row2);
        planes[PLANE_FAR] = to_plane(row3 - row2);
        planes[PLANE_TOP] = to_plane(row3 - row1);
        planes[PLANE_BOTTOM] = to_plane(row3 + row1);
        planes[PLANE_LEFT] = to_plane(row3 + row0);
        planes[PLANE_RIGHT] = to_plane(row3 - row0);

        Self { planes }
    }

    /// True if the point lies inside (or on) every plane
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| !plane.is_outside(point))
    }

    /// Conservative rejection test, see `Aabb::is_outside_frustum`
    pub fn is_aabb_outside(&self, aabb: &Aabb) -> bool {
        aabb.is_outside_frustum(&self.planes)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
