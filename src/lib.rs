//! Memfs: In-Memory Hierarchical Namespace
//!
//! A mutable namespace of directories and leaf files held entirely in
//! memory, with Unix-like operations: create, rename/move under collision
//! policies, cascading delete, and path resolution supporting absolute and
//! relative paths, `.`/`..`, and optional auto-creation of missing
//! intermediate directories.

pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod namespace;
pub mod ops;
pub mod resolve;
pub mod tooling;
pub mod tree;
pub mod types;
