//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec for oracle selections (bounded by the coalition size, usually <8).
pub type SmallVec8<T> = SmallVec<[T; 8]>;

/// SmallVec for LRIC exception sets (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
