//! A generic, explicitly-parented game tree.
//!
//! Nodes live in an arena owned by the tree and are addressed by [`NodeId`].
//! Parent, children and root links are ids into that arena, never owning
//! references. Membership is decided by the root link alone: a node is in the
//! tree exactly when its root link points at this tree's root.
//!
//! Detached and removed nodes stay in the arena, so their ids remain valid
//! for inspection, but they are no longer members and cannot be reached from
//! the root.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::TreeError;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable handle to a node in a particular [`GameTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: usize,
}

/// A node holding per-move payload data.
#[derive(Clone, Debug)]
pub struct GameNode<T> {
    data: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    root: Option<NodeId>,
    depth: usize,
    marked_as_root: bool,
}

impl<T> GameNode<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
            root: None,
            depth: 0,
            marked_as_root: false,
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order. The first child is the main variation.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Distance to the root node (0 for the root).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.marked_as_root
    }
}

#[derive(Clone, Debug)]
pub struct GameTree<T> {
    id: u64,
    nodes: Vec<GameNode<T>>,
}

impl<T> GameTree<T> {
    /// Create a tree whose root node carries `root_data`.
    pub fn new(root_data: T) -> Self {
        let id = NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed);
        let root_id = NodeId { tree: id, index: 0 };
        let mut root = GameNode::new(root_data);
        root.marked_as_root = true;
        root.root = Some(root_id);
        Self {
            id,
            nodes: vec![root],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId { tree: self.id, index: 0 }
    }

    /// Create an unattached child node. It becomes a member once appended.
    pub fn create_node(&mut self, data: T) -> NodeId {
        self.nodes.push(GameNode::new(data));
        NodeId {
            tree: self.id,
            index: self.nodes.len() - 1,
        }
    }

    /// Look up a node, member or not. `None` for ids from another tree.
    pub fn node(&self, id: NodeId) -> Option<&GameNode<T>> {
        (id.tree == self.id).then(|| &self.nodes[id.index])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut GameNode<T>> {
        if id.tree == self.id { Some(&mut self.nodes[id.index]) } else { None }
    }

    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(GameNode::data)
    }

    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(GameNode::data_mut)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(GameNode::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(GameNode::children).unwrap_or(&[])
    }

    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.node(id).map(GameNode::depth)
    }

    /// Check whether the given node belongs to this tree.
    ///
    /// Compares the node's root link with this tree's root; no ancestry walk.
    pub fn is_member(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.root == Some(self.root()))
    }

    /// Appends a child node to a parent node in the tree.
    ///
    /// # Errors
    /// Fails without touching the tree if the parent is not a member, the
    /// child belongs to another tree, already has a parent, is a root node,
    /// or is the parent itself.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.is_member(parent) {
            return Err(TreeError::ParentNotMember);
        }
        let c = self.node(child).ok_or(TreeError::ForeignNode)?;
        if parent == child {
            return Err(TreeError::SelfParent);
        }
        if c.parent.is_some() {
            return Err(TreeError::ChildHasParent);
        }
        if c.marked_as_root {
            return Err(TreeError::ChildIsRoot);
        }

        let parent_depth = self.nodes[parent.index].depth;
        self.nodes[parent.index].children.push(child);
        self.nodes[child.index].parent = Some(parent);

        // A previously orphaned child brings its own subtree back in.
        let root = self.root();
        let mut stack = vec![(child, parent_depth + 1)];
        while let Some((n, depth)) = stack.pop() {
            let node = &mut self.nodes[n.index];
            node.root = Some(root);
            node.depth = depth;
            stack.extend(self.linked_children(n).into_iter().map(|c| (c, depth + 1)));
        }
        Ok(())
    }

    /// Appends the child as a direct descendant of the tree root.
    pub fn append_to_root(&mut self, child: NodeId) -> Result<(), TreeError> {
        self.append(self.root(), child)
    }

    /// Removes the node from the tree, erasing its parent and root links.
    ///
    /// This splits the tree if the node is not a leaf: the node keeps its
    /// children list, but each direct child loses its parent link and is not
    /// re-attached anywhere. The orphaned part can no longer reach the root,
    /// so every node in it stops being a member.
    /// Use [`remove_subtree`](Self::remove_subtree) to discard the whole branch.
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.check_removable(id)?;
        self.detach_from_parent(id);

        self.nodes[id.index].root = None;
        let orphans = self.linked_children(id);
        for child in &orphans {
            self.nodes[child.index].parent = None;
        }
        let mut stack = orphans;
        while let Some(n) = stack.pop() {
            self.nodes[n.index].root = None;
            stack.extend(self.linked_children(n));
        }
        Ok(())
    }

    /// Removes the node and its entire subtree, clearing every link in it.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.check_removable(id)?;
        self.detach_from_parent(id);

        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            stack.extend(self.linked_children(n));
            let node = &mut self.nodes[n.index];
            node.parent = None;
            node.root = None;
            node.children.clear();
        }
        Ok(())
    }

    /// Walk from `id` up through its parents, ending at the root.
    ///
    /// Yields `id` first. Empty for ids from another tree.
    pub fn path_to_root(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).map(|_| id), move |n| self.nodes[n.index].parent)
    }

    /// The nodes from the root down to `id`, inclusive.
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.path_to_root(id).collect();
        path.reverse();
        path
    }

    /// Children of `id` whose parent link still points back at it. A node left
    /// over from [`remove`](Self::remove) may list children that have since
    /// been attached elsewhere.
    fn linked_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.index]
            .children
            .iter()
            .copied()
            .filter(|c| self.nodes[c.index].parent == Some(id))
            .collect()
    }

    fn check_removable(&self, id: NodeId) -> Result<(), TreeError> {
        if !self.is_member(id) {
            return Err(TreeError::NotMember);
        }
        if id == self.root() {
            return Err(TreeError::RootRemoval);
        }
        Ok(())
    }

    fn detach_from_parent(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.index].parent.take() {
            self.nodes[parent.index].children.retain(|&c| c != id);
        }
    }
}
