//! Axis-aligned bounding box.
//!
//! Stored as two opposite corners. The EMPTY box (`lower = +inf`,
//! `upper = -inf`) is the identity element of `union`: it contains nothing
//! and unioning it with any box returns that box unchanged.

use glam::{Mat4, Vec3};
use super::plane::Plane;

/// One of the three world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index into a Vec3 (X = 0, Y = 1, Z = 2)
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Axis-aligned bounding box in world or local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (x, y, z)
    pub lower: Vec3,
    /// Maximum corner (x, y, z)
    pub upper: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// The degenerate empty box, identity of `union`
    pub const EMPTY: Aabb = Aabb {
        lower: Vec3::splat(f32::INFINITY),
        upper: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a box from two corners. The caller guarantees `lower <= upper`.
    pub fn new(lower: Vec3, upper: Vec3) -> Self {
        Self { lower, upper }
    }

    /// Box centered on `center` with the given half extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            lower: center - half_extents,
            upper: center + half_extents,
        }
    }

    /// Smallest box containing every point of the iterator (EMPTY if none)
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Self::EMPTY, |acc, p| Self {
            lower: acc.lower.min(p),
            upper: acc.upper.max(p),
        })
    }

    /// True for any box with `lower > upper` on some axis (including EMPTY)
    pub fn is_empty(&self) -> bool {
        self.lower.x > self.upper.x || self.lower.y > self.upper.y || self.lower.z > self.upper.z
    }

    pub fn center(&self) -> Vec3 {
        (self.lower + self.upper) * 0.5
    }

    /// Per-axis extent (`upper - lower`)
    pub fn size(&self) -> Vec3 {
        self.upper - self.lower
    }

    /// Corner `index` in 0..8. Bit 0 selects X, bit 1 Y, bit 2 Z
    /// (clear = lower, set = upper).
    pub fn corner(&self, index: usize) -> Vec3 {
        Vec3::new(
            if index & 1 == 0 { self.lower.x } else { self.upper.x },
            if index & 2 == 0 { self.lower.y } else { self.upper.y },
            if index & 4 == 0 { self.lower.z } else { self.upper.z },
        )
    }

    /// All 8 corners in bit-index order
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| self.corner(i))
    }

    /// Componentwise min of lowers, max of uppers
    pub fn union(a: &Aabb, b: &Aabb) -> Aabb {
        Aabb {
            lower: a.lower.min(b.lower),
            upper: a.upper.max(b.upper),
        }
    }

    /// Union of every box in the iterator; EMPTY for an empty iterator
    pub fn union_all<'a, I: IntoIterator<Item = &'a Aabb>>(boxes: I) -> Aabb {
        boxes.into_iter().fold(Self::EMPTY, |acc, b| Self::union(&acc, b))
    }

    /// Transform all 8 corners and rebuild an axis-aligned box around them.
    ///
    /// Conservative: under rotation the result is larger than the tightest
    /// box around the rotated volume. The EMPTY box stays EMPTY.
    pub fn transform(&self, matrix: &Mat4) -> Aabb {
        if self.is_empty() {
            return Self::EMPTY;
        }
        Self::from_points(self.corners().iter().map(|c| matrix.transform_point3(*c)))
    }

    /// Axis with the largest extent. Exact ties prefer X, then Y, then Z.
    pub fn largest_axis(&self) -> Axis {
        let size = self.size();
        let max = size.x.max(size.y).max(size.z);
        if size.x == max {
            Axis::X
        } else if size.y == max {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.lower).all() && point.cmple(self.upper).all()
    }

    /// True if `other` lies entirely within `self`. Every box contains EMPTY.
    pub fn contains(&self, other: &Aabb) -> bool {
        if other.is_empty() {
            return true;
        }
        other.lower.cmpge(self.lower).all() && other.upper.cmple(self.upper).all()
    }

    /// True if the boxes overlap or touch
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.lower.cmple(other.upper).all() && self.upper.cmpge(other.lower).all()
    }

    /// Conservative frustum rejection.
    ///
    /// Returns true only when a single plane has all 8 corners strictly
    /// outside its half-space. A box straddling several planes near a
    /// frustum corner may be reported as not outside even though it is.
    /// An empty box encloses no point and is always outside.
    pub fn is_outside_frustum(&self, planes: &[Plane; 6]) -> bool {
        if self.is_empty() {
            return true;
        }
        let corners = self.corners();
        planes
            .iter()
            .any(|plane| corners.iter().all(|c| plane.is_outside(*c)))
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
