#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

// core types
pub mod data;
pub use data::*;

pub mod grammar;
pub use grammar::*;

#[macro_use]
pub mod grammar_macros;

// intermediate stages
pub mod typeinf;
pub use typeinf::{type_of, TyEnv};

// interface
pub mod compile;
pub use compile::*;

pub mod inference;

// extras
pub mod utils;

#[cfg(test)]
mod tests;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
