#![cfg_attr(feature = "clippy", feature(plugin))]
#![cfg_attr(feature = "clippy", plugin(clippy))]

//! Classic in-memory data structures.
//!
//! The search trees share one [`Tree`](tree::Tree) base whose per-node metadata selects the
//! balancing strategy: none, AVL balance factors or red-black colors. The splay tree wraps the
//! unbalanced tree and restructures it on every access. The hash tables resolve collisions with
//! double hashing or with chaining, and the priority queues are built on a binary heap or on a
//! red-black tree.

mod entry;
pub mod arena;
pub mod avl_tree;
pub mod compare;
pub mod error;
pub mod hash_table;
pub mod primes;
pub mod priority_queue;
pub mod red_black_tree;
pub mod splay_tree;
pub mod tree;

pub use crate::error::{Error, Result};
