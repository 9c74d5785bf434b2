//! Comparison result model.
//!
//! A comparison produces a [`Diff`]: an ordered list of [`Difference`]s, each
//! locating one mismatch by [`Path`](crate::path::Path) and describing it with
//! a message from the fixed [`messages`] catalog.
//!
//! ## Rendering
//!
//! ```
//! use deepcmp::compare;
//!
//! let diff = compare(&vec![1, 2, 3], &vec![1, 2, 4]);
//! assert_eq!(diff.to_string(), "[2]: int not equal");
//! assert_eq!(format!("{diff:#}"), "[2]: int not equal\n\tv1=3\n\tv2=4");
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical differences, in the
//!   same order, including for hash maps.
//! - **Append-only**: child differences are concatenated into their parent in
//!   traversal order, with the parent's path element prepended.

mod format;
pub mod messages;
pub mod model;

pub use model::{Diff, Difference};
