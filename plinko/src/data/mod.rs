pub mod errors;
pub mod symtree;
pub mod weight;
pub use crate::data::errors::*;
pub use crate::data::symtree::*;
pub use crate::data::weight::*;

// reexports and aliases
pub use robdd::{Bdd, Ref, Var};
pub use rustc_hash::{FxHashMap, FxHashSet};

pub type HashMap<K, V> = FxHashMap<K, V>;
pub type HashSet<V> = FxHashSet<V>;
