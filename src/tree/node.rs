//! Node entity: name, parent handle, and directory/leaf payload.

use crate::error::FsError;
use crate::types::{EntryKind, NodeId, CURRENT_DIR, DELIMITER, PARENT_DIR};
use std::collections::BTreeMap;

/// A live node in the namespace tree.
///
/// The owning edge is the parent directory's child map; `parent` is a plain
/// navigational handle back up the tree. The root is its own parent.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: NodeId,
    pub(crate) payload: Payload,
}

/// Directory or leaf payload.
#[derive(Debug, Clone)]
pub(crate) enum Payload {
    Directory {
        /// Name-keyed children, sorted for deterministic listing and search.
        children: BTreeMap<String, NodeId>,
    },
    Leaf {
        /// Append-only text buffer.
        content: String,
    },
}

impl Node {
    pub(crate) fn directory(name: impl Into<String>, parent: NodeId) -> Self {
        Node {
            name: name.into(),
            parent,
            payload: Payload::Directory {
                children: BTreeMap::new(),
            },
        }
    }

    pub(crate) fn leaf(name: impl Into<String>, parent: NodeId) -> Self {
        Node {
            name: name.into(),
            parent,
            payload: Payload::Leaf {
                content: String::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn kind(&self) -> EntryKind {
        match self.payload {
            Payload::Directory { .. } => EntryKind::Directory,
            Payload::Leaf { .. } => EntryKind::Leaf,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.payload, Payload::Directory { .. })
    }

    pub(crate) fn children(&self) -> Option<&BTreeMap<String, NodeId>> {
        match &self.payload {
            Payload::Directory { children } => Some(children),
            Payload::Leaf { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<String, NodeId>> {
        match &mut self.payload {
            Payload::Directory { children } => Some(children),
            Payload::Leaf { .. } => None,
        }
    }
}

/// Check a candidate entry name against the naming invariant: non-empty,
/// no delimiter, and neither of the reserved `.`/`..` components.
pub fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty()
        || name == CURRENT_DIR
        || name == PARENT_DIR
        || name.contains(DELIMITER)
    {
        return Err(FsError::InvalidName(name.to_string()));
    }
    Ok(())
}
