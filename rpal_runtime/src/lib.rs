//! `rpal` interpreter functionality.

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod builtins;
pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod toplevel;
pub mod value;

pub mod test;
