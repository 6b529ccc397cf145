//! Ordered standings for ranking and seeding
//!
//! This crate provides [`Standing`], a rank-ordered key/value container:
//! - List-like access by index (rank 0 is the best)
//! - Dict-like access by key (value lookup, value update)
//! - A symmetric law: `index_of(get_by_index(i)) == i` for every valid index
//!
//! Rankings use it as their backing store and tournaments query it to seed
//! their participants.
//!
//! # Usage
//!
//! ```
//! use standing::Standing;
//!
//! let mut standing = Standing::new();
//! standing.add(["a", "b", "c"], &[30.0, 20.0, 10.0]).unwrap();
//!
//! assert_eq!(standing.keys(), vec!["a", "b", "c"]);
//! assert_eq!(standing.index_of(&"b").unwrap(), 1);
//! ```

mod error;
mod standing;

pub use error::*;
pub use standing::*;
