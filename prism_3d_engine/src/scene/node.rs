/// Scene graph node storage.
///
/// Nodes live in the `SceneGraph` arena and refer to each other by
/// `NodeKey`. Every node carries a local transform, a cached world
/// transform, cached world bounds and two independent dirty flags.

use std::sync::Arc;
use bitflags::bitflags;
use glam::Mat4;
use slotmap::new_key_type;
use crate::math::Aabb;
use crate::resource::{Material, Mesh};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a node within a SceneGraph.
    ///
    /// A key becomes invalid only when its own node is removed.
    pub struct NodeKey;
}

// ===== FLAGS =====

bitflags! {
    /// Cache invalidation state of a node
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// `global_transform` must be recomputed from the parent
        const TRANSFORM_DIRTY = 1 << 0;
        /// `bounds` must be recomputed from children (and own mesh)
        const BOUNDS_DIRTY    = 1 << 1;
    }
}

// ===== NODE KIND =====

/// Closed set of node variants
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Top of a subtree (static or dynamic scene root)
    Root,
    /// Interior grouping node created by the hierarchy builder
    Region,
    /// Pure transform node
    Transform,
    /// Drawable leaf: a shared mesh drawn with a shared material
    StaticMesh {
        mesh: Arc<Mesh>,
        material: Arc<Material>,
    },
}

// ===== SCENE NODE =====

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub(super) kind: NodeKind,
    pub(super) transform: Mat4,
    pub(super) global_transform: Mat4,
    pub(super) bounds: Aabb,
    pub(super) flags: NodeFlags,
    pub(super) parent: Option<NodeKey>,
    pub(super) children: Vec<NodeKey>,
}

impl SceneNode {
    /// Detached node with identity transforms, EMPTY bounds and both
    /// dirty flags set
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            transform: Mat4::IDENTITY,
            global_transform: Mat4::IDENTITY,
            bounds: Aabb::EMPTY,
            flags: NodeFlags::all(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(NodeKind::Root)
    }

    pub fn region() -> Self {
        Self::new(NodeKind::Region)
    }

    pub fn transform_node(transform: Mat4) -> Self {
        Self::new(NodeKind::Transform).with_transform(transform)
    }

    pub fn static_mesh(mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
        Self::new(NodeKind::StaticMesh { mesh, material })
    }

    /// Builder-style local transform
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    // ===== ACCESSORS =====

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Local transform relative to the parent
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    /// Cached world transform, valid while `TRANSFORM_DIRTY` is clear
    pub fn global_transform(&self) -> &Mat4 {
        &self.global_transform
    }

    /// Cached world bounds, valid while `BOUNDS_DIRTY` is clear
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn is_transform_dirty(&self) -> bool {
        self.flags.contains(NodeFlags::TRANSFORM_DIRTY)
    }

    pub fn is_bounds_dirty(&self) -> bool {
        self.flags.contains(NodeFlags::BOUNDS_DIRTY)
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn is_static_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::StaticMesh { .. })
    }

    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        match &self.kind {
            NodeKind::StaticMesh { mesh, .. } => Some(mesh),
            _ => None,
        }
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        match &self.kind {
            NodeKind::StaticMesh { material, .. } => Some(material),
            _ => None,
        }
    }
}
