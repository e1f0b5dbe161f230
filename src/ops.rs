//! Mutation operations: leaf move (rename and/or reparent) under a
//! collision policy.
//!
//! Create and delete are arena primitives (`tree::arena`); move lives here
//! because it composes path resolution with two-directory surgery.

use crate::error::FsError;
use crate::resolve::Resolver;
use crate::tree::{validate_name, NodeArena};
use crate::types::{CollisionPolicy, MoveOutcome, NodeId, DELIMITER};
use tracing::{info, warn};

/// Move a leaf to a new directory and/or name.
///
/// The destination directory is everything before the last delimiter,
/// resolved from the leaf's current parent (from the root for absolute
/// paths) honoring `auto_create`; a destination without a delimiter is a
/// same-directory rename, and `/name` targets the root itself. Directory
/// moves are not supported.
///
/// The leaf is inserted at the destination before the old entry is dropped,
/// and every validation happens before either map is touched, so a failed
/// move leaves name, parent, and both directories exactly as they were.
pub fn move_leaf(
    arena: &mut NodeArena,
    source: NodeId,
    dest: &str,
    auto_create: bool,
    policy: CollisionPolicy,
) -> Result<MoveOutcome, FsError> {
    if arena.is_directory(source)? {
        return Err(FsError::UnsupportedOperation(
            "directory move".to_string(),
        ));
    }
    let old_parent = arena.parent(source)?;
    let old_name = arena.name(source)?.to_string();

    let (dest_dir, new_name) = match dest.rfind(DELIMITER) {
        Some(split_at) => {
            let dir_part = &dest[..split_at];
            let name_part = &dest[split_at + 1..];
            let dir = if dir_part.is_empty() {
                arena.root()
            } else {
                let mut resolver = Resolver::new(old_parent);
                resolver.resolve(arena, dir_part, auto_create)?
            };
            if !arena.is_directory(dir)? {
                return Err(FsError::NotADirectory(dir_part.to_string()));
            }
            (dir, name_part)
        }
        None => (old_parent, dest),
    };

    validate_name(new_name)?;

    if dest_dir == old_parent && new_name == old_name {
        return Ok(MoveOutcome::Moved);
    }

    let mut outcome = MoveOutcome::Moved;
    if let Some(existing) = arena.child(dest_dir, new_name)? {
        match policy {
            CollisionPolicy::Replace => {
                if arena.is_directory(existing)? {
                    return Err(FsError::TypeMismatch(new_name.to_string()));
                }
                warn!(name = new_name, "destination entry exists, replacing it");
                arena.remove_entry(dest_dir, new_name)?;
                arena.tombstone_subtree(existing);
                outcome = MoveOutcome::Replaced;
            }
            CollisionPolicy::Abort => {
                return Err(FsError::AlreadyExists(new_name.to_string()));
            }
            CollisionPolicy::KeepPrevious => {
                info!(
                    name = new_name,
                    "destination entry exists, keeping the existing version"
                );
                return Ok(MoveOutcome::KeptExisting);
            }
        }
    }

    arena.attach(dest_dir, new_name, source)?;
    arena.remove_entry(old_parent, &old_name)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryKind;

    struct Fixture {
        arena: NodeArena,
        docs: NodeId,
        archive: NodeId,
        report: NodeId,
    }

    fn setup() -> Fixture {
        let mut arena = NodeArena::new();
        let root = arena.root();
        let docs = arena.create_child(root, "docs", EntryKind::Directory).unwrap();
        let archive = arena
            .create_child(root, "archive", EntryKind::Directory)
            .unwrap();
        let report = arena.create_child(docs, "report", EntryKind::Leaf).unwrap();
        arena.append_content(report, "quarterly numbers").unwrap();
        Fixture {
            arena,
            docs,
            archive,
            report,
        }
    }

    #[test]
    fn test_same_directory_rename() {
        let mut fx = setup();
        let outcome =
            move_leaf(&mut fx.arena, fx.report, "summary", false, CollisionPolicy::Abort)
                .unwrap();
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(fx.arena.full_path(fx.report).unwrap(), "/docs/summary");
        assert_eq!(fx.arena.child(fx.docs, "report").unwrap(), None);
    }

    #[test]
    fn test_move_to_other_directory() {
        let mut fx = setup();
        move_leaf(
            &mut fx.arena,
            fx.report,
            "/archive/report",
            false,
            CollisionPolicy::Abort,
        )
        .unwrap();
        assert_eq!(fx.arena.full_path(fx.report).unwrap(), "/archive/report");
        assert_eq!(fx.arena.parent(fx.report).unwrap(), fx.archive);
        assert_eq!(fx.arena.child(fx.docs, "report").unwrap(), None);
        assert_eq!(fx.arena.content(fx.report).unwrap(), "quarterly numbers");
    }

    #[test]
    fn test_move_to_root() {
        let mut fx = setup();
        move_leaf(
            &mut fx.arena,
            fx.report,
            "/report",
            false,
            CollisionPolicy::Abort,
        )
        .unwrap();
        assert_eq!(fx.arena.full_path(fx.report).unwrap(), "/report");
    }

    #[test]
    fn test_relative_destination_resolves_from_parent() {
        let mut fx = setup();
        let inner = fx
            .arena
            .create_child(fx.docs, "inner", EntryKind::Directory)
            .unwrap();
        move_leaf(
            &mut fx.arena,
            fx.report,
            "inner/report",
            false,
            CollisionPolicy::Abort,
        )
        .unwrap();
        assert_eq!(fx.arena.parent(fx.report).unwrap(), inner);
    }

    #[test]
    fn test_move_directory_unsupported() {
        let mut fx = setup();
        assert_eq!(
            move_leaf(
                &mut fx.arena,
                fx.docs,
                "/archive/docs",
                false,
                CollisionPolicy::Replace
            ),
            Err(FsError::UnsupportedOperation("directory move".into()))
        );
    }

    #[test]
    fn test_invalid_new_name_leaves_node_untouched() {
        let mut fx = setup();
        assert_eq!(
            move_leaf(&mut fx.arena, fx.report, "/archive/..", false, CollisionPolicy::Abort),
            Err(FsError::InvalidName("..".into()))
        );
        assert_eq!(fx.arena.full_path(fx.report).unwrap(), "/docs/report");
        assert_eq!(fx.arena.name(fx.report).unwrap(), "report");
    }

    #[test]
    fn test_destination_through_leaf_fails() {
        let mut fx = setup();
        fx.arena
            .create_child(fx.archive, "blocker", EntryKind::Leaf)
            .unwrap();
        assert_eq!(
            move_leaf(
                &mut fx.arena,
                fx.report,
                "/archive/blocker/report",
                false,
                CollisionPolicy::Abort
            ),
            Err(FsError::NotADirectory("/archive/blocker".into()))
        );
        assert_eq!(fx.arena.full_path(fx.report).unwrap(), "/docs/report");
    }

    #[test]
    fn test_missing_destination_without_auto_create() {
        let mut fx = setup();
        assert_eq!(
            move_leaf(
                &mut fx.arena,
                fx.report,
                "/ghost/report",
                false,
                CollisionPolicy::Abort
            ),
            Err(FsError::NotFound("ghost".into()))
        );
    }

    #[test]
    fn test_auto_create_builds_destination() {
        let mut fx = setup();
        move_leaf(
            &mut fx.arena,
            fx.report,
            "/backups/2026/report",
            true,
            CollisionPolicy::Abort,
        )
        .unwrap();
        assert_eq!(
            fx.arena.full_path(fx.report).unwrap(),
            "/backups/2026/report"
        );
    }

    #[test]
    fn test_replace_overwrites_existing_leaf() {
        let mut fx = setup();
        let existing = fx
            .arena
            .create_child(fx.archive, "report", EntryKind::Leaf)
            .unwrap();
        let outcome = move_leaf(
            &mut fx.arena,
            fx.report,
            "/archive/report",
            false,
            CollisionPolicy::Replace,
        )
        .unwrap();
        assert_eq!(outcome, MoveOutcome::Replaced);
        assert_eq!(fx.arena.child(fx.archive, "report").unwrap(), Some(fx.report));
        // the displaced leaf is gone for good
        assert_eq!(fx.arena.name(existing), Err(FsError::Destroyed));
    }

    #[test]
    fn test_replace_onto_directory_fails_type_mismatch() {
        let mut fx = setup();
        fx.arena
            .create_child(fx.archive, "report", EntryKind::Directory)
            .unwrap();
        assert_eq!(
            move_leaf(
                &mut fx.arena,
                fx.report,
                "/archive/report",
                false,
                CollisionPolicy::Replace
            ),
            Err(FsError::TypeMismatch("report".into()))
        );
        assert_eq!(fx.arena.full_path(fx.report).unwrap(), "/docs/report");
    }

    #[test]
    fn test_abort_leaves_both_sides_unchanged() {
        let mut fx = setup();
        let existing = fx
            .arena
            .create_child(fx.archive, "report", EntryKind::Leaf)
            .unwrap();
        assert_eq!(
            move_leaf(
                &mut fx.arena,
                fx.report,
                "/archive/report",
                false,
                CollisionPolicy::Abort
            ),
            Err(FsError::AlreadyExists("report".into()))
        );
        assert_eq!(fx.arena.full_path(fx.report).unwrap(), "/docs/report");
        assert_eq!(fx.arena.child(fx.archive, "report").unwrap(), Some(existing));
    }

    #[test]
    fn test_keep_previous_reverts_rename_fully() {
        let mut fx = setup();
        let existing = fx
            .arena
            .create_child(fx.archive, "report", EntryKind::Leaf)
            .unwrap();
        let outcome = move_leaf(
            &mut fx.arena,
            fx.report,
            "/archive/report",
            false,
            CollisionPolicy::KeepPrevious,
        )
        .unwrap();
        assert_eq!(outcome, MoveOutcome::KeptExisting);
        // destination keeps its entry, source stays fully reachable
        assert_eq!(fx.arena.child(fx.archive, "report").unwrap(), Some(existing));
        assert_eq!(fx.arena.name(fx.report).unwrap(), "report");
        assert_eq!(fx.arena.parent(fx.report).unwrap(), fx.docs);
        assert_eq!(fx.arena.child(fx.docs, "report").unwrap(), Some(fx.report));
    }

    #[test]
    fn test_move_onto_itself_is_noop() {
        let mut fx = setup();
        let outcome = move_leaf(
            &mut fx.arena,
            fx.report,
            "report",
            false,
            CollisionPolicy::Replace,
        )
        .unwrap();
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(fx.arena.full_path(fx.report).unwrap(), "/docs/report");
    }
}
