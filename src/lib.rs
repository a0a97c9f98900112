//! Ordered maps and sets based on a red-black tree.
//!
//! Nodes live in an arena and refer to their children and parent by index. Insertion and removal
//! are followed by a fixup pass of recolorings and rotations, which keeps the tree's height within
//! `2 * log2(n + 1)` whatever order the keys arrive in.
//!
//! ```
//! use redblack::RedBlackSet;
//!
//! let mut set = RedBlackSet::new();
//! for key in 1..101 { set.insert(key); }
//!
//! assert!(set.height() <= 13);
//! assert_eq!(set.validate(), Ok(()));
//! ```

#![deny(missing_docs)]

pub mod map;
pub mod set;

mod error;
mod levels;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use error::Violation;
pub use levels::Levels;
pub use map::{Color, NodeRef, RedBlackMap};
pub use set::RedBlackSet;
