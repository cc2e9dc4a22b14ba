//! Camera module - viewpoint, projection and culling frustum.
//!
//! Cameras are plain values owned by the caller (or by a `Scene` as its
//! active camera). Frusta are derived from them once per frame.

mod camera;
mod frustum;

pub use camera::{Camera, ProjectionType};
pub use frustum::{
    Frustum,
    PLANE_NEAR, PLANE_FAR, PLANE_TOP, PLANE_BOTTOM, PLANE_LEFT, PLANE_RIGHT,
};
