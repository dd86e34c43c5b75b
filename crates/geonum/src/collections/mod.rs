//! Support structures: binary-heap priority queue and red-black tree.
//!
//! - `PriorityQueue`: min-heap with a caller comparator; event queue for the
//!   Voronoi sweep.
//! - `RedBlackTree`: arena-backed ordered set (insert/find/nearest/inorder).
//!   Standalone building block, not used by the geometry code.

mod priority_queue;
mod rbtree;

pub use priority_queue::PriorityQueue;
pub use rbtree::RedBlackTree;
