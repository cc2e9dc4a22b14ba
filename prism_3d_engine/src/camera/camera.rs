/// Camera - viewpoint and projection parameters.
///
/// A look-at camera: position, target point and up vector, plus a
/// perspective (field of view) or orthographic projection between the near
/// and far planes. View and projection matrices, the culling frustum and
/// picking rays are all derived on demand.

use glam::{Mat4, Vec3};
use crate::math::Ray;
use super::frustum::Frustum;

/// Projection model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionType {
    #[default]
    Perspective,
    /// Orthographic volume sized to the viewport in world units
    Orthographic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    field_of_view: f32,
    near_plane: f32,
    far_plane: f32,
    projection_type: ProjectionType,
}

impl Camera {
    /// Vertical field of view in radians (60 degrees)
    pub const DEFAULT_FIELD_OF_VIEW: f32 = std::f32::consts::FRAC_PI_3;
    pub const DEFAULT_NEAR_PLANE: f32 = 1.0;
    pub const DEFAULT_FAR_PLANE: f32 = 1000.0;

    /// Perspective camera at `position` looking at `target`, Y up
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Vertical field of view in radians
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    pub fn far_plane(&self) -> f32 {
        self.far_plane
    }

    pub fn projection_type(&self) -> ProjectionType {
        self.projection_type
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    pub fn set_field_of_view(&mut self, radians: f32) {
        self.field_of_view = radians;
    }

    pub fn set_near_plane(&mut self, near: f32) {
        self.near_plane = near;
    }

    pub fn set_far_plane(&mut self, far: f32) {
        self.far_plane = far;
    }

    pub fn set_projection_type(&mut self, projection_type: ProjectionType) {
        self.projection_type = projection_type;
    }

    // ===== DERIVED =====

    /// Orthonormal camera basis `(forward, left, up)`.
    ///
    /// `forward` points from the position to the target. A camera whose
    /// target equals its position, or whose up is parallel to forward, has
    /// a NaN basis and culls nothing meaningful.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalize();
        let left = self.up.cross(forward).normalize();
        let up = forward.cross(left).normalize();
        (forward, left, up)
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Projection matrix for a viewport size in pixels (OpenGL depth range)
    pub fn projection_matrix(&self, width: f32, height: f32) -> Mat4 {
        match self.projection_type {
            ProjectionType::Perspective => Mat4::perspective_rh_gl(
                self.field_of_view,
                width / height,
                self.near_plane,
                self.far_plane,
            ),
            ProjectionType::Orthographic => Mat4::orthographic_rh_gl(
                -width / 2.0,
                width / 2.0,
                -height / 2.0,
                height / 2.0,
                self.near_plane,
                self.far_plane,
            ),
        }
    }

    /// `projection * view`
    pub fn view_projection_matrix(&self, width: f32, height: f32) -> Mat4 {
        self.projection_matrix(width, height) * self.view_matrix()
    }

    /// Culling frustum for a viewport aspect ratio (`width / height`)
    pub fn frustum(&self, aspect: f32) -> Frustum {
        Frustum::from_camera(self, aspect)
    }

    /// Picking ray from the camera position through a viewport point.
    ///
    /// `x` and `y` are normalized viewport coordinates in [0, 1], with
    /// (0, 0) at the top-left corner. The ray passes through the matching
    /// point on the near plane rectangle; its direction is normalized.
    pub fn camera_ray(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let (forward, left, up) = self.basis();
        let a = 2.0 * (self.field_of_view / 2.0).tan();
        let near_height = self.near_plane * a;
        let near_width = near_height * (width / height);

        let near_center = self.position + forward * self.near_plane;
        let near_top_left = near_center + left * (0.5 * near_width) + up * (0.5 * near_height);
        let point = near_top_left - left * (x * near_width) - up * (y * near_height);

        Ray::new(self.position, (point - self.position).normalize())
    }
}

impl Default for Camera {
    /// Perspective camera at the origin looking down -Z
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            field_of_view: Self::DEFAULT_FIELD_OF_VIEW,
            near_plane: Self::DEFAULT_NEAR_PLANE,
            far_plane: Self::DEFAULT_FAR_PLANE,
            projection_type: ProjectionType::Perspective,
        }
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
