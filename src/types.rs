//! Core types for the in-memory namespace.

use serde::{Deserialize, Serialize};

/// NodeId: stable arena handle addressing a node slot.
///
/// Handles stay valid for the lifetime of the arena and are never reused;
/// a deleted node's handle keeps pointing at its tombstone.
pub type NodeId = usize;

/// Path component delimiter.
pub const DELIMITER: char = '/';

/// Reserved component naming the current directory.
pub const CURRENT_DIR: &str = ".";

/// Reserved component naming the parent directory.
pub const PARENT_DIR: &str = "..";

/// Entry kind: container or content-bearing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    Leaf,
}

/// Collision policy for move operations whose destination name is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Overwrite the existing entry (a leaf never overwrites a directory).
    Replace,
    /// Fail the move and leave everything untouched.
    Abort,
    /// Keep the existing entry; the move becomes a successful no-op.
    KeepPrevious,
}

/// What a successful move actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The node now lives at the destination.
    Moved,
    /// The node now lives at the destination; the displaced entry was deleted.
    Replaced,
    /// The existing destination entry was kept; the source is unchanged.
    KeptExisting,
}
