//! Node arena: slot storage, creation, cascading delete, and path rendering.
//!
//! Nodes are addressed by stable `NodeId` handles into a slot vector, so
//! reparenting is an index rewrite and parent back-references carry no
//! ownership. A deleted node leaves a tombstone in its slot; the handle stays
//! valid but every accessor reports `Destroyed` from then on.

use crate::error::FsError;
use crate::tree::node::{validate_name, Node, Payload};
use crate::types::{EntryKind, NodeId};

/// Arena slot: a live node or the tombstone of a deleted one.
#[derive(Debug, Clone)]
enum Slot {
    Live(Node),
    Dead,
}

/// Owns every node of one namespace tree.
///
/// Exactly one root directory exists per arena, always at slot zero. The
/// root has the empty name and is its own parent; upward navigation from
/// root stays at root.
#[derive(Debug, Clone)]
pub struct NodeArena {
    slots: Vec<Slot>,
}

const ROOT: NodeId = 0;

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    /// Create an arena holding only the root directory.
    pub fn new() -> Self {
        NodeArena {
            slots: vec![Slot::Live(Node::directory("", ROOT))],
        }
    }

    /// Handle of the root directory.
    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == ROOT
    }

    /// Whether the handle refers to a live node.
    pub fn is_live(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id), Some(Slot::Live(_)))
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, FsError> {
        match self.slots.get(id) {
            Some(Slot::Live(node)) => Ok(node),
            _ => Err(FsError::Destroyed),
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, FsError> {
        match self.slots.get_mut(id) {
            Some(Slot::Live(node)) => Ok(node),
            _ => Err(FsError::Destroyed),
        }
    }

    pub fn name(&self, id: NodeId) -> Result<&str, FsError> {
        Ok(self.node(id)?.name())
    }

    pub fn parent(&self, id: NodeId) -> Result<NodeId, FsError> {
        Ok(self.node(id)?.parent())
    }

    pub fn kind(&self, id: NodeId) -> Result<EntryKind, FsError> {
        Ok(self.node(id)?.kind())
    }

    pub fn is_directory(&self, id: NodeId) -> Result<bool, FsError> {
        Ok(self.node(id)?.is_directory())
    }

    /// Look up a child of `dir` by exact name.
    pub fn child(&self, dir: NodeId, name: &str) -> Result<Option<NodeId>, FsError> {
        let node = self.node(dir)?;
        let children = node
            .children()
            .ok_or_else(|| FsError::NotADirectory(node.name.clone()))?;
        Ok(children.get(name).copied())
    }

    /// Create a new child under a live directory.
    pub fn create_child(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: EntryKind,
    ) -> Result<NodeId, FsError> {
        validate_name(name)?;
        let id = self.slots.len();
        {
            let parent_node = self.node_mut(parent)?;
            let parent_name = parent_node.name.clone();
            let children = parent_node
                .children_mut()
                .ok_or(FsError::NotADirectory(parent_name))?;
            if children.contains_key(name) {
                return Err(FsError::AlreadyExists(name.to_string()));
            }
            children.insert(name.to_string(), id);
        }
        let node = match kind {
            EntryKind::Directory => Node::directory(name, parent),
            EntryKind::Leaf => Node::leaf(name, parent),
        };
        self.slots.push(Slot::Live(node));
        Ok(id)
    }

    /// Render the absolute path of a node.
    ///
    /// The root renders as the delimiter alone; directories carry a trailing
    /// delimiter, leaves do not.
    pub fn full_path(&self, id: NodeId) -> Result<String, FsError> {
        let node = self.node(id)?;
        if self.is_root(id) {
            return Ok("/".to_string());
        }
        let mut segments = Vec::new();
        let mut cur = id;
        while !self.is_root(cur) {
            let n = self.node(cur)?;
            segments.push(n.name.clone());
            cur = n.parent;
        }
        let mut path = String::new();
        for segment in segments.iter().rev() {
            path.push('/');
            path.push_str(segment);
        }
        if node.is_directory() {
            path.push('/');
        }
        Ok(path)
    }

    /// Read a leaf's content buffer.
    pub fn content(&self, id: NodeId) -> Result<&str, FsError> {
        let node = self.node(id)?;
        match &node.payload {
            Payload::Leaf { content } => Ok(content),
            Payload::Directory { .. } => Err(FsError::NotALeaf(node.name.clone())),
        }
    }

    /// Append text to a leaf's content buffer. Empty text is a no-op.
    pub fn append_content(&mut self, id: NodeId, text: &str) -> Result<(), FsError> {
        let node = self.node_mut(id)?;
        match &mut node.payload {
            Payload::Leaf { content } => {
                if !text.is_empty() {
                    content.push_str(text);
                }
                Ok(())
            }
            Payload::Directory { .. } => Err(FsError::NotALeaf(node.name.clone())),
        }
    }

    /// Children of a directory as `(name, kind)` pairs, sorted by name.
    pub fn list_children(&self, dir: NodeId) -> Result<Vec<(String, EntryKind)>, FsError> {
        let node = self.node(dir)?;
        let children = node
            .children()
            .ok_or_else(|| FsError::NotADirectory(node.name.clone()))?;
        children
            .iter()
            .map(|(name, &id)| Ok((name.clone(), self.kind(id)?)))
            .collect()
    }

    /// Child handles of a directory, in name order.
    pub fn child_ids(&self, dir: NodeId) -> Result<Vec<NodeId>, FsError> {
        let node = self.node(dir)?;
        let children = node
            .children()
            .ok_or_else(|| FsError::NotADirectory(node.name.clone()))?;
        Ok(children.values().copied().collect())
    }

    /// Depth-first search under `start` for children whose name matches
    /// exactly. A matching directory is reported before its own subtree is
    /// searched. `start` itself is never a match.
    pub fn find_exact(
        &self,
        start: NodeId,
        name: &str,
        recursive: bool,
    ) -> Result<Vec<NodeId>, FsError> {
        let mut found = Vec::new();
        self.collect_matches(start, name, recursive, &mut found)?;
        Ok(found)
    }

    fn collect_matches(
        &self,
        dir: NodeId,
        name: &str,
        recursive: bool,
        found: &mut Vec<NodeId>,
    ) -> Result<(), FsError> {
        let node = self.node(dir)?;
        let Some(children) = node.children() else {
            return Ok(());
        };
        for (child_name, &child_id) in children {
            if child_name == name {
                found.push(child_id);
            }
            if recursive && self.node(child_id)?.is_directory() {
                self.collect_matches(child_id, name, recursive, found)?;
            }
        }
        Ok(())
    }

    /// Delete a node: detach it from its parent's child map and tombstone it,
    /// recursively tombstoning a directory's descendants first (post-order).
    pub fn delete(&mut self, id: NodeId) -> Result<(), FsError> {
        if self.is_root(id) {
            return Err(FsError::CannotDeleteRoot);
        }
        match self.slots.get(id) {
            Some(Slot::Live(_)) => {}
            _ => return Err(FsError::AlreadyDeleted),
        }
        let parent = self.parent(id)?;
        let name = self.name(id)?.to_string();
        self.remove_entry(parent, &name)?;
        self.tombstone_subtree(id);
        Ok(())
    }

    /// Tombstone a node and everything below it, children before parents.
    pub(crate) fn tombstone_subtree(&mut self, id: NodeId) {
        let child_ids: Vec<NodeId> = match self.slots.get(id) {
            Some(Slot::Live(node)) => node
                .children()
                .map(|children| children.values().copied().collect())
                .unwrap_or_default(),
            _ => return,
        };
        for child in child_ids {
            self.tombstone_subtree(child);
        }
        self.slots[id] = Slot::Dead;
    }

    /// Drop a name from a directory's child map without touching the node it
    /// pointed to. Move and delete use this as their detach primitive.
    pub(crate) fn remove_entry(&mut self, dir: NodeId, name: &str) -> Result<(), FsError> {
        let node = self.node_mut(dir)?;
        let dir_name = node.name.clone();
        let children = node
            .children_mut()
            .ok_or(FsError::NotADirectory(dir_name))?;
        children.remove(name);
        Ok(())
    }

    /// Bind an existing node into a directory under a (validated) name,
    /// rewriting the node's own name and parent handle to match.
    pub(crate) fn attach(
        &mut self,
        dir: NodeId,
        name: &str,
        id: NodeId,
    ) -> Result<(), FsError> {
        {
            let node = self.node_mut(id)?;
            node.name = name.to_string();
            node.parent = dir;
        }
        let dir_node = self.node_mut(dir)?;
        let dir_name = dir_node.name.clone();
        let children = dir_node
            .children_mut()
            .ok_or(FsError::NotADirectory(dir_name))?;
        children.insert(name.to_string(), id);
        Ok(())
    }
}
