//! sugared syntax: the tree produced by the parser, before standardization.

use std::fmt;

/// wrapper around `String`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Name(pub String);

impl Name {
    pub fn new(s: &str) -> Name {
        Name(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        let Name(s) = self;
        s
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// the identifier the standardizer emits for recursive definitions. it
/// cannot be written in source text, so programs can never shadow it.
pub const Y_STAR: &str = "Y*";

/// literal value.
///
/// strings keep their surrounding quote markers and escape sequences exactly
/// as written; they are interpreted when the literal is evaluated.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Lit {
    LInt(i64),
    LStr(String),
    LBool(bool),
    LNil,
    LDummy,
}

/// infix operators shared by the sugared and standardized trees.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum BinOp {
    Or,
    And,
    Gr,
    Ge,
    Ls,
    Le,
    Eq,
    Ne,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum UnOp {
    Not,
    Neg,
}

/// `Ast` is the tree the parser builds. it mirrors the surface grammar:
/// expression forms, definition forms (`Assign` through `Within`) and binder
/// forms (`Comma`, `EmptyParens`) all live in the one type, and it is the
/// standardizer's job to check that each appears where it is allowed.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Ast {
    Ident(Name),
    Lit(Lit),
    /// `fn V1 .. Vn . E`
    Lambda(Vec<Ast>, Box<Ast>),
    /// juxtaposition, `E1 E2`
    Gamma(Box<Ast>, Box<Ast>),
    Let(Box<Ast>, Box<Ast>),
    Where(Box<Ast>, Box<Ast>),
    Tau(Vec<Ast>),
    Aug(Box<Ast>, Box<Ast>),
    /// `B -> T | E`
    Cond(Box<Ast>, Box<Ast>, Box<Ast>),
    BinOp(BinOp, Box<Ast>, Box<Ast>),
    UnOp(UnOp, Box<Ast>),
    /// `E1 @ f E2`
    At(Box<Ast>, Name, Box<Ast>),

    /// `Vl = E`
    Assign(Box<Ast>, Box<Ast>),
    /// `f V1 .. Vn = E`
    FcnForm(Name, Vec<Ast>, Box<Ast>),
    Rec(Box<Ast>),
    And(Vec<Ast>),
    Within(Box<Ast>, Box<Ast>),

    /// `x, y, z` on the left of a definition or as a lambda parameter.
    Comma(Vec<Ast>),
    /// `()` as a parameter.
    EmptyParens,
}

impl Ast {
    /// the node's label, as printed in trees and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Ast::Ident(_) => "identifier",
            Ast::Lit(_) => "literal",
            Ast::Lambda(_, _) => "lambda",
            Ast::Gamma(_, _) => "gamma",
            Ast::Let(_, _) => "let",
            Ast::Where(_, _) => "where",
            Ast::Tau(_) => "tau",
            Ast::Aug(_, _) => "aug",
            Ast::Cond(_, _, _) => "->",
            Ast::BinOp(op, _, _) => binop_label(*op),
            Ast::UnOp(op, _) => unop_label(*op),
            Ast::At(_, _, _) => "@",
            Ast::Assign(_, _) => "=",
            Ast::FcnForm(_, _, _) => "function_form",
            Ast::Rec(_) => "rec",
            Ast::And(_) => "and",
            Ast::Within(_, _) => "within",
            Ast::Comma(_) => ",",
            Ast::EmptyParens => "()",
        }
    }
}

// helpers

pub fn binop_label(op: BinOp) -> &'static str {
    match op {
        BinOp::Or => "or",
        BinOp::And => "&",
        BinOp::Gr => "gr",
        BinOp::Ge => "ge",
        BinOp::Ls => "ls",
        BinOp::Le => "le",
        BinOp::Eq => "eq",
        BinOp::Ne => "ne",
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Pow => "**",
    }
}

pub fn unop_label(op: UnOp) -> &'static str {
    match op {
        UnOp::Not => "not",
        UnOp::Neg => "neg",
    }
}

/// construct a gamma node.
#[macro_export]
macro_rules! gamma {
    ( $a: expr, $b: expr ) => {
        Ast::Gamma(Box::new($a), Box::new($b))
    };
}

/// construct an identifier node from a `&str`.
#[macro_export]
macro_rules! ident {
    ( $a: expr ) => {
        Ast::Ident(Name::new($a))
    };
}
