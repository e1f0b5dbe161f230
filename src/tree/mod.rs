//! Node tree: the node entity and the arena that owns every node.

pub mod arena;
pub mod node;

pub use arena::NodeArena;
pub use node::{validate_name, Node};
