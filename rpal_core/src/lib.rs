//! `rpal` syntax trees and the standardizer that connects them.
//!
//! the parser produces an [`abstract_syntax::Ast`]. [`standardize`] rewrites
//! it into a [`standard_syntax::Expr`], which only uses abstraction,
//! application and the operator forms, and is what the evaluator runs.

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod abstract_syntax;
pub mod stack;
pub mod standard_syntax;
pub mod standardize;
pub mod test_helpers;
