pub mod context;
pub mod eval;
pub mod functions;

pub use context::*;
pub use functions::{compile_function, gen_sym_type, mutex_encode};
