//! Path resolution: component-by-component walk with a working-directory
//! cursor and optional auto-creation of missing directories.

use crate::error::FsError;
use crate::tree::NodeArena;
use crate::types::{EntryKind, NodeId, CURRENT_DIR, DELIMITER, PARENT_DIR};
use tracing::debug;

/// Walks paths over an arena while maintaining a current-directory cursor.
///
/// A successful resolution ending on a directory moves the cursor there;
/// ending on a leaf leaves the cursor alone, as does any failure. Callers
/// that want a one-shot lookup save and restore the cursor around the call.
#[derive(Debug, Clone)]
pub struct Resolver {
    cwd: NodeId,
}

impl Resolver {
    pub fn new(start: NodeId) -> Self {
        Resolver { cwd: start }
    }

    /// Current-directory cursor.
    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    pub fn set_cwd(&mut self, dir: NodeId) {
        self.cwd = dir;
    }

    /// Resolve a path to a node handle.
    ///
    /// A leading delimiter starts the walk at the root, anything else at the
    /// cursor. Empty components collapse, so repeated delimiters are
    /// harmless. `..` at the root stays at the root, even mid-path. With
    /// `auto_create`, missing components are created as directories — the
    /// final component included — under the directory being walked;
    /// directories created before a later failure remain created.
    pub fn resolve(
        &mut self,
        arena: &mut NodeArena,
        path: &str,
        auto_create: bool,
    ) -> Result<NodeId, FsError> {
        let start = if path.starts_with(DELIMITER) {
            arena.root()
        } else {
            self.cwd
        };
        let components: Vec<&str> = path
            .split(DELIMITER)
            .filter(|component| !component.is_empty())
            .collect();

        let mut current = start;
        for (idx, component) in components.iter().enumerate() {
            let is_last = idx + 1 == components.len();
            match *component {
                CURRENT_DIR => {}
                PARENT_DIR => {
                    if !arena.is_root(current) {
                        current = arena.parent(current)?;
                    }
                }
                name => {
                    let next = match arena.child(current, name)? {
                        Some(found) => found,
                        None if auto_create => {
                            debug!(name, "auto-creating missing directory");
                            arena.create_child(current, name, EntryKind::Directory)?
                        }
                        None => return Err(FsError::NotFound(name.to_string())),
                    };
                    if !is_last && !arena.is_directory(next)? {
                        return Err(FsError::NotADirectory(name.to_string()));
                    }
                    current = next;
                }
            }
        }

        if arena.is_directory(current)? {
            self.cwd = current;
        }
        Ok(current)
    }
}
