//! concrete syntax for `rpal`: parsing source text into sugared trees, and
//! rendering trees back out in the indented form.

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod parse;
pub mod pretty;
pub mod util;

#[cfg(test)]
pub mod test_helpers;

pub mod test;
