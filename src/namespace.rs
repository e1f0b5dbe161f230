//! Namespace context: one root, one current-directory cursor, and the
//! command-level operations composed from the resolver and the mutation
//! primitives.
//!
//! Every lookup-style operation is one-shot: the cursor is saved and
//! restored around the traversal. Only `change_directory` commits a cursor
//! move. A namespace is an ordinary value — independent namespaces, each
//! with their own root, coexist freely.

use crate::error::FsError;
use crate::ops;
use crate::resolve::Resolver;
use crate::tree::NodeArena;
use crate::types::{CollisionPolicy, EntryKind, MoveOutcome, NodeId};
use tracing::info;

/// A mutable in-memory namespace of directories and leaves.
#[derive(Debug, Clone)]
pub struct Namespace {
    arena: NodeArena,
    resolver: Resolver,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    /// Fresh namespace: a lone root directory, cursor at root.
    pub fn new() -> Self {
        let arena = NodeArena::new();
        let resolver = Resolver::new(arena.root());
        Namespace { arena, resolver }
    }

    /// Handle of the root directory.
    pub fn root(&self) -> NodeId {
        self.arena.root()
    }

    /// Handle of the current directory.
    pub fn cwd(&self) -> NodeId {
        self.resolver.cwd()
    }

    /// One-shot resolution: the cursor is unchanged afterwards, whatever
    /// the path did.
    pub fn resolve(&mut self, path: &str, auto_create: bool) -> Result<NodeId, FsError> {
        let saved = self.resolver.cwd();
        let result = self.resolver.resolve(&mut self.arena, path, auto_create);
        self.resolver.set_cwd(saved);
        result
    }

    /// Change the current directory. Fails on a missing target or a leaf;
    /// the cursor moves only on success.
    pub fn change_directory(
        &mut self,
        path: &str,
        auto_create: bool,
    ) -> Result<NodeId, FsError> {
        let found = self.resolver.resolve(&mut self.arena, path, auto_create)?;
        if !self.arena.is_directory(found)? {
            return Err(FsError::NotADirectory(path.to_string()));
        }
        Ok(found)
    }

    /// Create a directory or leaf directly under the current directory.
    pub fn create_entry(&mut self, name: &str, kind: EntryKind) -> Result<NodeId, FsError> {
        let cwd = self.resolver.cwd();
        let id = self.arena.create_child(cwd, name, kind)?;
        info!(name, ?kind, "created entry");
        Ok(id)
    }

    /// Children of the current directory as `(name, kind)`, sorted by name.
    pub fn list_children(&self) -> Result<Vec<(String, EntryKind)>, FsError> {
        self.arena.list_children(self.resolver.cwd())
    }

    /// Resolve a path one-shot and list that directory's children's full
    /// paths.
    pub fn list_paths(&mut self, path: &str) -> Result<Vec<String>, FsError> {
        let dir = self.resolve(path, false)?;
        self.arena
            .child_ids(dir)?
            .into_iter()
            .map(|id| self.arena.full_path(id))
            .collect()
    }

    /// Full paths of every entry under the current directory whose name
    /// matches exactly, depth-first when `recursive`.
    pub fn find_exact(&self, name: &str, recursive: bool) -> Result<Vec<String>, FsError> {
        let matches = self
            .arena
            .find_exact(self.resolver.cwd(), name, recursive)?;
        matches
            .into_iter()
            .map(|id| self.arena.full_path(id))
            .collect()
    }

    /// Read a leaf's content. Fails `NotALeaf` on a directory.
    pub fn read_content(&mut self, path: &str) -> Result<String, FsError> {
        let id = self.resolve(path, false)?;
        Ok(self.arena.content(id)?.to_string())
    }

    /// Append text to a leaf identified by path. Fails `NotALeaf` on a
    /// directory; appending the empty string succeeds without effect.
    pub fn write_content(&mut self, path: &str, text: &str) -> Result<(), FsError> {
        let id = self.resolve(path, false)?;
        self.arena.append_content(id, text)
    }

    /// Move a leaf to a new directory and/or name under a collision policy.
    /// The cursor never moves, even when intermediate destination
    /// directories are created.
    pub fn move_entry(
        &mut self,
        source: &str,
        dest: &str,
        auto_create: bool,
        policy: CollisionPolicy,
    ) -> Result<MoveOutcome, FsError> {
        let id = self.resolve(source, false)?;
        let outcome = ops::move_leaf(&mut self.arena, id, dest, auto_create, policy)?;
        info!(source, dest, ?outcome, "moved entry");
        Ok(outcome)
    }

    /// Delete the entry at a path, cascading through a directory's subtree.
    /// If the deletion swallowed the current directory, the cursor falls
    /// back to root.
    pub fn delete(&mut self, path: &str) -> Result<(), FsError> {
        let id = self.resolve(path, false)?;
        self.arena.delete(id)?;
        if !self.arena.is_live(self.resolver.cwd()) {
            self.resolver.set_cwd(self.arena.root());
        }
        info!(path, "deleted entry");
        Ok(())
    }

    /// Absolute path of a node. Fails `Destroyed` on a tombstone.
    pub fn full_path(&self, id: NodeId) -> Result<String, FsError> {
        self.arena.full_path(id)
    }

    pub fn name(&self, id: NodeId) -> Result<String, FsError> {
        Ok(self.arena.name(id)?.to_string())
    }

    pub fn is_directory(&self, id: NodeId) -> Result<bool, FsError> {
        self.arena.is_directory(id)
    }
}
