//! the built-in function library.
//!
//! every built-in is curried: applying it collects one more argument, and
//! only once its arity is met does it run.

use std::{io::Write, rc::Rc};

use rpal_core::{
    abstract_syntax::Name,
    standard_syntax::{Binder, Expr},
};

use crate::{
    env::Env,
    error::EvalError,
    eval::EvalState,
    value::{Builtin, BuiltinOp, Closure, Value},
};

/// a root environment holding every built-in, with no arguments received.
pub fn root_env() -> Rc<Env> {
    let env = Env::empty();
    for op in BuiltinOp::ALL.iter() {
        let val = Value::Builtin(Builtin {
            op: *op,
            args: Vec::new(),
        });
        env.define(Name::new(op.name()), val);
    }
    env
}

pub fn apply_builtin(es: &mut EvalState, b: Builtin, arg: Value) -> Result<Value, EvalError> {
    let Builtin { op, mut args } = b;
    args.push(arg);
    if args.len() < op.arity() {
        return Ok(Value::Builtin(Builtin { op, args }));
    }
    tracing::trace!(builtin = op.name(), "saturated built-in");
    run(es, op, args)
}

fn run(es: &mut EvalState, op: BuiltinOp, args: Vec<Value>) -> Result<Value, EvalError> {
    let mut args = args.into_iter();
    let x = args.next().unwrap_or(Value::Dummy);
    match op {
        BuiltinOp::Print => {
            let out = es.out();
            write!(out, "{}", x)?;
            out.flush()?;
            Ok(Value::Dummy)
        }

        BuiltinOp::Isinteger => Ok(Value::Bool(matches!(x, Value::Int(_)))),
        BuiltinOp::Isstring => Ok(Value::Bool(matches!(x, Value::Str(_)))),
        BuiltinOp::Istruthvalue => Ok(Value::Bool(matches!(x, Value::Bool(_)))),
        BuiltinOp::Istuple => Ok(Value::Bool(matches!(x, Value::Tuple(_) | Value::Nil))),
        BuiltinOp::Isfunction => Ok(Value::Bool(matches!(
            x,
            Value::Closure(_) | Value::Builtin(_)
        ))),
        BuiltinOp::Isdummy => Ok(Value::Bool(matches!(x, Value::Dummy))),

        BuiltinOp::Stem => {
            let s = expect_str(op, &x)?;
            let first = s.chars().next().ok_or(EvalError::EmptyString("Stem"))?;
            Ok(Value::Str(first.to_string()))
        }
        BuiltinOp::Stern => {
            let s = expect_str(op, &x)?;
            let mut chars = s.chars();
            chars.next().ok_or(EvalError::EmptyString("Stern"))?;
            Ok(Value::str(chars.as_str()))
        }
        BuiltinOp::Conc => {
            let y = args.next().unwrap_or(Value::Dummy);
            let mut s = expect_str(op, &x)?.to_string();
            s.push_str(expect_str(op, &y)?);
            Ok(Value::Str(s))
        }

        BuiltinOp::Order => match x {
            Value::Tuple(vals) => Ok(Value::Int(vals.len() as i64)),
            Value::Nil => Ok(Value::Int(0)),
            other => Err(EvalError::type_mismatch(op.name(), "tuple", other.type_name())),
        },
        BuiltinOp::Null => match x {
            Value::Tuple(vals) => Ok(Value::Bool(vals.is_empty())),
            Value::Nil => Ok(Value::Bool(true)),
            other => Err(EvalError::type_mismatch(op.name(), "tuple", other.type_name())),
        },

        BuiltinOp::ItoS => match x {
            Value::Int(n) => Ok(Value::Str(n.to_string())),
            other => Err(EvalError::type_mismatch(op.name(), "integer", other.type_name())),
        },

        BuiltinOp::YStar => y_star(x),
    }
}

fn expect_str(op: BuiltinOp, val: &Value) -> Result<&str, EvalError> {
    match val {
        Value::Str(s) => Ok(s.as_str()),
        other => Err(EvalError::type_mismatch(op.name(), "string", other.type_name())),
    }
}

/// tie the knot for a recursive definition.
///
/// `x` is `fn f. fn v. body`: the result is `fn v. body` closed over a scope
/// in which `f` names that very closure. the scope holds the closure and
/// the closure holds the scope, so the pair is never freed.
fn y_star(x: Value) -> Result<Value, EvalError> {
    let name = BuiltinOp::YStar.name();
    let clo = match x {
        Value::Closure(clo) => clo,
        other => return Err(EvalError::type_mismatch(name, "function", other.type_name())),
    };
    let nm = match &clo.binder {
        Binder::Name(nm) => nm,
        Binder::Tuple(bs) => return Err(EvalError::FixedPointArity(bs.len())),
        Binder::Dummy => {
            return Err(EvalError::type_mismatch(name, "a named function", "dummy binder"))
        }
    };
    let (binder, body) = match &*clo.body {
        Expr::Lam(binder, body) => (binder, body),
        _ => return Err(EvalError::type_mismatch(name, "a function body", "non-function")),
    };

    let knot = Env::extend(&clo.env);
    knot.define(nm.clone(), Value::Dummy);
    let rec = Value::Closure(Rc::new(Closure {
        binder: binder.clone(),
        body: Rc::clone(body),
        env: Rc::clone(&knot),
    }));
    knot.define(nm.clone(), rec.clone());
    tracing::trace!(name = %nm, "tied recursive knot");
    Ok(rec)
}
