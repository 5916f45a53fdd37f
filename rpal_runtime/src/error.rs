//! the runtime's error taxonomy.

use std::io;
use thiserror::Error;

use rpal_concrete_syntax::parse::SyntaxError;
use rpal_core::standardize::StandardizeError;

use crate::config::ConfigError;

/// the class an evaluation error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Unbound,
    Type,
    Arity,
    Index,
    Arithmetic,
    Resource,
    Output,
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("unbound identifier: {0}")]
    Unbound(String),

    #[error("type error: {context} expects {expected}, found {found}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("type error: `{op}` cannot compare {left} with {right}")]
    Incomparable {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("type error: {rator} is not applicable to {rand}")]
    NotApplicable {
        rator: &'static str,
        rand: &'static str,
    },

    #[error("arity error: pattern of {expected} names bound to a tuple of {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("arity error: Y* needs a function of one name, found a pattern of {0}")]
    FixedPointArity(usize),

    #[error("index error: index {index} is outside 1..{len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("index error: {0} of the empty string")]
    EmptyString(&'static str),

    #[error("arithmetic error: division by zero")]
    DivisionByZero,

    #[error("arithmetic error: integer overflow in `{0}`")]
    Overflow(&'static str),

    #[error("arithmetic error: negative exponent {0}")]
    NegativeExponent(i64),

    #[error("resource error: recursion deeper than {0}")]
    RecursionLimit(usize),

    #[error("output error: {0}")]
    Output(#[from] io::Error),
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Unbound(_) => ErrorKind::Unbound,
            EvalError::TypeMismatch { .. }
            | EvalError::Incomparable { .. }
            | EvalError::NotApplicable { .. } => ErrorKind::Type,
            EvalError::ArityMismatch { .. } | EvalError::FixedPointArity(_) => ErrorKind::Arity,
            EvalError::IndexOutOfRange { .. } | EvalError::EmptyString(_) => ErrorKind::Index,
            EvalError::DivisionByZero | EvalError::Overflow(_) | EvalError::NegativeExponent(_) => {
                ErrorKind::Arithmetic
            }
            EvalError::RecursionLimit(_) => ErrorKind::Resource,
            EvalError::Output(_) => ErrorKind::Output,
        }
    }

    pub fn type_mismatch(context: &str, expected: &'static str, found: &'static str) -> EvalError {
        EvalError::TypeMismatch {
            context: context.to_string(),
            expected,
            found,
        }
    }
}

/// everything that can stop a run, from reading the source to printing the
/// result.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Standardize(#[from] StandardizeError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
