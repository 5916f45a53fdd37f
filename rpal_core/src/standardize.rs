//! standardization: rewriting the sugared tree into the standardized one.
//!
//! every rule is local. children are standardized first, then combined:
//!
//! | sugared                 | standardized                          |
//! |-------------------------|---------------------------------------|
//! | `fn V1 .. Vn . E`       | `lambda V1 (.. (lambda Vn E))`        |
//! | `let X = E in P`        | `gamma (lambda X P) E`                |
//! | `P where X = E`         | `gamma (lambda X P) E`                |
//! | `f V1 .. Vn = E`        | `f = lambda V1 (.. (lambda Vn E))`    |
//! | `rec X = E`             | `X = gamma Y* (lambda X E)`           |
//! | `X1 = E1 and .. Xn = En`| `(X1, .., Xn) = tau (E1, .., En)`     |
//! | `X1 = E1 within X = E`  | `X = gamma (lambda X1 E) E1`          |
//! | `E1 @ f E2`             | `gamma (gamma f E1) E2`               |
//!
//! the remaining forms keep their shape.

use std::rc::Rc;
use thiserror::Error;

use crate::{
    abstract_syntax::{Ast, Name, Y_STAR},
    app,
    stack::ensure_sufficient_stack,
    standard_syntax::{Binder, Expr},
};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StandardizeError {
    #[error("standardization error: expected a definition, found `{0}`")]
    ExpectedDefinition(&'static str),
    #[error("standardization error: definition `{0}` used where an expression is expected")]
    UnexpectedDefinition(&'static str),
    #[error("standardization error: `{0}` cannot be used as a binder")]
    InvalidBinder(&'static str),
    #[error("standardization error: `{0}` appears outside a binder position")]
    StrayBinder(&'static str),
    #[error("standardization error: `rec` requires a function definition, `{0}` is not one")]
    RecNotFunction(String),
    #[error("standardization error: `{0}` needs at least one {1}")]
    Empty(&'static str, &'static str),
}

/// a standardized definition: `binder = value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub binder: Binder,
    pub value: Expr,
}

/// standardize a whole program, which must be an expression.
pub fn standardize(ast: &Ast) -> Result<Expr, StandardizeError> {
    let expr = st_expr(ast)?;
    tracing::debug!("standardized program");
    Ok(expr)
}

/// standardize a node in expression position.
pub fn st_expr(ast: &Ast) -> Result<Expr, StandardizeError> {
    ensure_sufficient_stack(|| st_expr_(ast))
}

fn st_expr_(ast: &Ast) -> Result<Expr, StandardizeError> {
    match ast {
        Ast::Ident(nm) => Ok(Expr::Var(nm.clone())),
        Ast::Lit(lit) => Ok(Expr::Lit(lit.clone())),

        Ast::Lambda(vbs, bd) => {
            if vbs.is_empty() {
                return Err(StandardizeError::Empty("lambda", "parameter"));
            }
            let binders = vbs.iter().map(st_binder).collect::<Result<Vec<_>, _>>()?;
            Ok(curry(binders, st_expr(bd)?))
        }

        Ast::Gamma(rator, rand) => Ok(app!(st_expr(rator)?, st_expr(rand)?)),

        Ast::Let(d, e) => {
            let Assignment { binder, value } = st_defn(d)?;
            let body = st_expr(e)?;
            Ok(app!(Expr::Lam(binder, Rc::new(body)), value))
        }

        Ast::Where(t, dr) => {
            let body = st_expr(t)?;
            let Assignment { binder, value } = st_defn(dr)?;
            Ok(app!(Expr::Lam(binder, Rc::new(body)), value))
        }

        Ast::Tau(es) => {
            let es_ = es.iter().map(st_expr).collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Tau(es_))
        }

        Ast::Aug(a, b) => Ok(Expr::Aug(Box::new(st_expr(a)?), Box::new(st_expr(b)?))),

        Ast::Cond(tst, thn, els) => Ok(Expr::If(
            Box::new(st_expr(tst)?),
            Box::new(st_expr(thn)?),
            Box::new(st_expr(els)?),
        )),

        Ast::BinOp(op, a, b) => Ok(Expr::BinOp(
            *op,
            Box::new(st_expr(a)?),
            Box::new(st_expr(b)?),
        )),

        Ast::UnOp(op, a) => Ok(Expr::UnOp(*op, Box::new(st_expr(a)?))),

        Ast::At(a1, nm, a2) => {
            let partial = app!(Expr::Var(nm.clone()), st_expr(a1)?);
            Ok(app!(partial, st_expr(a2)?))
        }

        Ast::Assign(_, _) | Ast::FcnForm(_, _, _) | Ast::Rec(_) | Ast::And(_) | Ast::Within(_, _) => {
            Err(StandardizeError::UnexpectedDefinition(ast.label()))
        }

        Ast::Comma(_) | Ast::EmptyParens => Err(StandardizeError::StrayBinder(ast.label())),
    }
}

/// standardize a node in definition position. the result is always an
/// assignment; anything that cannot become one is an error.
pub fn st_defn(ast: &Ast) -> Result<Assignment, StandardizeError> {
    ensure_sufficient_stack(|| st_defn_(ast))
}

fn st_defn_(ast: &Ast) -> Result<Assignment, StandardizeError> {
    match ast {
        Ast::Assign(vl, e) => Ok(Assignment {
            binder: st_binder(vl)?,
            value: st_expr(e)?,
        }),

        Ast::FcnForm(nm, vbs, e) => {
            if vbs.is_empty() {
                return Err(StandardizeError::Empty("function_form", "parameter"));
            }
            let binders = vbs.iter().map(st_binder).collect::<Result<Vec<_>, _>>()?;
            Ok(Assignment {
                binder: Binder::Name(nm.clone()),
                value: curry(binders, st_expr(e)?),
            })
        }

        Ast::Rec(db) => {
            let Assignment { binder, value } = st_defn(db)?;
            match value {
                Expr::Lam(_, _) => {
                    let knot = Expr::Lam(binder.clone(), Rc::new(value));
                    Ok(Assignment {
                        binder,
                        value: app!(Expr::Var(Name::new(Y_STAR)), knot),
                    })
                }
                _ => Err(StandardizeError::RecNotFunction(binder.to_string())),
            }
        }

        Ast::And(drs) => {
            if drs.is_empty() {
                return Err(StandardizeError::Empty("and", "definition"));
            }
            let (binders, values): (Vec<Binder>, Vec<Expr>) = drs
                .iter()
                .map(st_defn)
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|Assignment { binder, value }| (binder, value))
                .unzip();
            Ok(Assignment {
                binder: Binder::Tuple(binders),
                value: Expr::Tau(values),
            })
        }

        Ast::Within(da, d) => {
            let inner = st_defn(da)?;
            let outer = st_defn(d)?;
            let scoped = Expr::Lam(inner.binder, Rc::new(outer.value));
            Ok(Assignment {
                binder: outer.binder,
                value: app!(scoped, inner.value),
            })
        }

        _ => Err(StandardizeError::ExpectedDefinition(ast.label())),
    }
}

/// standardize a node in binder position.
pub fn st_binder(ast: &Ast) -> Result<Binder, StandardizeError> {
    match ast {
        Ast::Ident(nm) => Ok(Binder::Name(nm.clone())),
        Ast::EmptyParens => Ok(Binder::Dummy),
        Ast::Comma(vs) => {
            let bs = vs.iter().map(st_binder).collect::<Result<Vec<_>, _>>()?;
            Ok(Binder::Tuple(bs))
        }
        _ => Err(StandardizeError::InvalidBinder(ast.label())),
    }
}

/// successively wrap `body` in single-binder lambdas, innermost last.
fn curry(binders: Vec<Binder>, body: Expr) -> Expr {
    let wrap_lambda = |acc, b| Expr::Lam(b, Rc::new(acc));
    binders.into_iter().rev().fold(body, wrap_lambda)
}
