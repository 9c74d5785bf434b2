//! deepcmp - structural deep-equality comparison
//!
//! This crate compares two arbitrary values structurally and reports every
//! difference with the path where it occurs:
//! - Opt-in runtime value model (`Reflect`, `#[derive(Reflect)]`) with
//!   implementations for the standard library
//! - Recursive comparator with cycle detection, depth limit and per-container
//!   caps on reported differences
//! - Override hooks, including delegation to a type's own `Equal`/`Cmp`
//!   methods
//! - Deterministic output, including for hash maps
//! - Test assertions (`check_equal`, `assert_deep_eq!`)
//!
//! ```
//! use deepcmp::{compare, Reflect};
//!
//! #[derive(Reflect)]
//! struct User {
//!     name: String,
//!     tags: Vec<&'static str>,
//! }
//!
//! let a = User { name: "ann".into(), tags: vec!["admin", "ops"] };
//! let b = User { name: "ann".into(), tags: vec!["admin", "dev"] };
//!
//! let diff = compare(&a, &b);
//! assert_eq!(format!("{diff:#}"), ".tags[1]: string not equal\n\tv1=\"ops\"\n\tv2=\"dev\"");
//! ```

extern crate self as deepcmp;

pub mod check;
pub mod compare;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod path;
pub mod value;

#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use check::{check_equal, check_equal_with};
pub use compare::hooks::{hook_fn, Hook};
pub use compare::state::State;
pub use compare::{compare, default_comparator, Comparator};
pub use config::CompareConfig;
pub use deepcmp_derive::Reflect;
pub use diff::{Diff, Difference};
pub use errors::{DeepCmpError, ErrorKind, Result};
pub use path::{Path, PathElem};
pub use value::{
    ChanAccess, Field, Kind, MapAccess, Method, MethodFn, Reflect, SeqAccess, StructAccess,
    Value, Width,
};
