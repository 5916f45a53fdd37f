//! standardized syntax: what remains once every definition form has been
//! rewritten into abstraction and application.

use std::{fmt, rc::Rc};

pub use crate::abstract_syntax::{BinOp, Lit, Name, UnOp};

/// the left-hand side of an abstraction.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Binder {
    Name(Name),
    Tuple(Vec<Binder>),
    Dummy,
}

/// `Expr` is what the evaluator runs. abstraction bodies are reference
/// counted so that building a closure never copies a subtree.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Expr {
    Var(Name),
    Lit(Lit),
    Lam(Binder, Rc<Expr>),
    App(Box<Expr>, Box<Expr>),
    Tau(Vec<Expr>),
    Aug(Box<Expr>, Box<Expr>),
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    BinOp(BinOp, Box<Expr>, Box<Expr>),
    UnOp(UnOp, Box<Expr>),
}

/// construct an application of 2 exprs.
#[macro_export]
macro_rules! app {
    ( $a: expr, $b: expr ) => {
        Expr::App(Box::new($a), Box::new($b))
    };
}

/// construct a lambda.
#[macro_export]
macro_rules! lam {
    ( $a: expr, $b: expr ) => {
        Expr::Lam($a, std::rc::Rc::new($b))
    };
}

impl fmt::Display for Binder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Binder::Name(nm) => write!(f, "{}", nm),
            Binder::Dummy => f.write_str("()"),
            Binder::Tuple(bs) => {
                let parts: Vec<String> = bs.iter().map(|b| b.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

impl Expr {
    pub fn var(s: &str) -> Expr {
        Expr::Var(Name::new(s))
    }

    pub fn int(i: i64) -> Expr {
        Expr::Lit(Lit::LInt(i))
    }
}
