// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene graph access and a small reference scene tree.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Point, Rect};

/// Read access to a hierarchical 2D scene.
///
/// The camera never owns nodes; it only reads their parents, local transforms
/// and bounds to compute where a node sits in camera space. Implement this for
/// whatever scene or box tree you already have.
///
/// The parent chain must be acyclic.
pub trait SceneGraph {
    /// Handle to a node in the scene.
    type Node: Copy + Eq + fmt::Debug;

    /// Returns `true` if `node` still refers to a live node.
    fn contains(&self, node: Self::Node) -> bool;

    /// Parent of `node`, or `None` for a root (or stale) node.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Transform from `node`'s local space into its parent's space.
    fn local_transform(&self, node: Self::Node) -> Affine;

    /// Bounds of `node` in its own local space.
    fn bounding_box(&self, node: Self::Node) -> Rect;

    /// Transform from `node`'s local space into world space.
    fn local_to_world(&self, node: Self::Node) -> Affine {
        let mut transform = self.local_transform(node);
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            transform = self.local_transform(ancestor) * transform;
            current = self.parent(ancestor);
        }
        transform
    }

    /// Transform from world space into `node`'s local space.
    fn world_to_local(&self, node: Self::Node) -> Affine {
        self.local_to_world(node).inverse()
    }

    /// World-space position of `node`'s origin.
    fn absolute_position(&self, node: Self::Node) -> Point {
        self.local_to_world(node) * Point::ORIGIN
    }
}

/// Identifier for a node in a [`SceneTree`].
///
/// A slot index plus a generation counter. Removing a node frees its slot;
/// reusing the slot bumps the generation, so stale ids never alias a new node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(u32, u32);

impl NodeId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Local geometry for a scene node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Bounds in the node's own space. Nodes are usually centered on their origin.
    pub local_bounds: Rect,
    /// Transform relative to the parent's space.
    pub local_transform: Affine,
}

impl LocalNode {
    /// A node of the given size centered on its origin, placed at `position`.
    #[must_use]
    pub fn centered(position: Point, width: f64, height: f64) -> Self {
        Self {
            local_bounds: Rect::from_center_size(Point::ORIGIN, (width, height)),
            local_transform: Affine::translate(position.to_vec2()),
        }
    }
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            local_bounds: Rect::ZERO,
            local_transform: Affine::IDENTITY,
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    local: LocalNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// A minimal arena-backed scene tree implementing [`SceneGraph`].
///
/// Enough structure to host a camera and the content it frames: parent links,
/// local transforms and local bounds. It performs no layout, hit testing or
/// rendering.
#[derive(Clone, Debug, Default)]
pub struct SceneTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl SceneTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a node under `parent` (or as a root).
    ///
    /// A stale `parent` inserts the node as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let parent = parent.filter(|&p| self.is_alive(p));
        let entry = Entry {
            local,
            parent,
            children: Vec::new(),
        };
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.entry = Some(entry);
            NodeId(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 1,
                entry: Some(entry),
            });
            NodeId(idx, 1)
        };
        if let Some(parent) = parent.and_then(|p| self.entry_mut(p)) {
            parent.children.push(id);
        }
        self.len += 1;
        id
    }

    /// Removes `id` and its whole subtree. Returns `false` if `id` was stale.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.entry(id).map(|e| e.parent) else {
            return false;
        };
        if let Some(parent) = parent.and_then(|p| self.entry_mut(p)) {
            parent.children.retain(|&c| c != id);
        }
        let mut stack = Vec::from([id]);
        while let Some(node) = stack.pop() {
            if let Some(entry) = self.slots[node.idx()].entry.take() {
                stack.extend(entry.children);
                self.free.push(node.0);
                self.len -= 1;
            }
        }
        true
    }

    /// Returns `true` if `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.entry(id).is_some()
    }

    /// Local data of a live node.
    #[must_use]
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.entry(id).map(|e| &e.local)
    }

    /// Children of a live node, in insertion order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.entry(id).map_or(&[][..], |e| e.children.as_slice())
    }

    /// Replaces the local transform of a live node.
    pub fn set_local_transform(&mut self, id: NodeId, transform: Affine) {
        if let Some(entry) = self.entry_mut(id) {
            entry.local.local_transform = transform;
        }
    }

    /// Replaces the local bounds of a live node.
    pub fn set_local_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(entry) = self.entry_mut(id) {
            entry.local.local_bounds = bounds;
        }
    }

    fn entry(&self, id: NodeId) -> Option<&Entry> {
        self.slots
            .get(id.idx())
            .filter(|s| s.generation == id.1)
            .and_then(|s| s.entry.as_ref())
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry> {
        self.slots
            .get_mut(id.idx())
            .filter(|s| s.generation == id.1)
            .and_then(|s| s.entry.as_mut())
    }
}

impl SceneGraph for SceneTree {
    type Node = NodeId;

    fn contains(&self, node: NodeId) -> bool {
        self.is_alive(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.entry(node).and_then(|e| e.parent)
    }

    fn local_transform(&self, node: NodeId) -> Affine {
        self.entry(node)
            .map_or(Affine::IDENTITY, |e| e.local.local_transform)
    }

    fn bounding_box(&self, node: NodeId) -> Rect {
        self.entry(node).map_or(Rect::ZERO, |e| e.local.local_bounds)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Rect, Vec2};

    use super::{LocalNode, SceneGraph, SceneTree};

    #[test]
    fn world_transform_composes_ancestors() {
        let mut tree = SceneTree::new();
        let root = tree.insert(
            None,
            LocalNode {
                local_transform: Affine::scale(2.0),
                ..LocalNode::default()
            },
        );
        let child = tree.insert(Some(root), LocalNode::centered(Point::new(10.0, 5.0), 4.0, 4.0));

        let p = tree.absolute_position(child);
        assert!((p.x - 20.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);

        let back = tree.world_to_local(child) * p;
        assert!(back.x.abs() < 1e-9 && back.y.abs() < 1e-9);
        assert_eq!(tree.bounding_box(child), Rect::new(-2.0, -2.0, 2.0, 2.0));
    }

    #[test]
    fn remove_drops_subtree_and_bumps_generation() {
        let mut tree = SceneTree::new();
        let root = tree.insert(None, LocalNode::default());
        let a = tree.insert(Some(root), LocalNode::default());
        let b = tree.insert(Some(a), LocalNode::default());
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.children(root), &[a]);

        assert!(tree.remove(a));
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert_eq!(tree.len(), 1);
        assert!(tree.children(root).is_empty());
        assert!(!tree.remove(a), "stale ids cannot be removed twice");

        let c = tree.insert(Some(root), LocalNode::default());
        assert_ne!(c, a, "reused slot must carry a new generation");
        assert!(tree.is_alive(c));
    }

    #[test]
    fn stale_parent_inserts_root() {
        let mut tree = SceneTree::new();
        let gone = tree.insert(None, LocalNode::default());
        tree.remove(gone);
        let node = tree.insert(Some(gone), LocalNode::default());
        assert_eq!(tree.parent(node), None);
    }

    #[test]
    fn setters_update_live_nodes() {
        let mut tree = SceneTree::new();
        let node = tree.insert(None, LocalNode::default());
        tree.set_local_transform(node, Affine::translate(Vec2::new(3.0, 4.0)));
        tree.set_local_bounds(node, Rect::new(0.0, 0.0, 1.0, 1.0));
        let local = tree.local(node).unwrap();
        assert_eq!(local.local_bounds, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(tree.absolute_position(node), Point::new(3.0, 4.0));
    }
}
