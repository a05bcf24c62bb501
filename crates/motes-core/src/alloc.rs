//! Hash collections used across motes.
//!
//! Re-exports AHash-backed maps and sets.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
