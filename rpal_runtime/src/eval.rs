//! strict, environment-passing evaluation of standardized trees.

use std::{convert::TryFrom, io::Write, rc::Rc};

use rpal_core::{
    stack::ensure_sufficient_stack,
    standard_syntax::{BinOp, Binder, Expr, Lit, UnOp},
};

use crate::{
    builtins::{apply_builtin, root_env},
    env::Env,
    error::EvalError,
    value::{Closure, Value},
};

pub const DEFAULT_MAX_DEPTH: usize = 50_000;

/// what evaluation threads through every call: where `Print` writes, and how
/// deep the evaluator currently is.
pub struct EvalState<'a> {
    out: &'a mut dyn Write,
    depth: usize,
    max_depth: usize,
}

impl<'a> EvalState<'a> {
    pub fn new(out: &'a mut dyn Write, max_depth: usize) -> EvalState<'a> {
        EvalState {
            out,
            depth: 0,
            max_depth,
        }
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }
}

/// evaluate a whole program in a fresh root environment.
pub fn eval(es: &mut EvalState, expr: &Expr) -> Result<Value, EvalError> {
    let env = root_env();
    let val = eval_(&env, es, expr)?;
    tracing::debug!(result = %val.type_name(), "evaluated program");
    Ok(val)
}

pub fn eval_(env: &Rc<Env>, es: &mut EvalState, expr: &Expr) -> Result<Value, EvalError> {
    if es.depth >= es.max_depth {
        return Err(EvalError::RecursionLimit(es.max_depth));
    }
    es.depth += 1;
    let res = ensure_sufficient_stack(|| eval_inner(env, es, expr));
    es.depth -= 1;
    res
}

fn eval_inner(env: &Rc<Env>, es: &mut EvalState, expr: &Expr) -> Result<Value, EvalError> {
    match expr {
        Expr::Var(nm) => env.lookup(nm),

        Expr::Lit(lit) => Ok(eval_lit(lit)),

        Expr::Lam(binder, bd) => Ok(Value::Closure(Rc::new(Closure {
            binder: binder.clone(),
            body: Rc::clone(bd),
            env: Rc::clone(env),
        }))),

        // the operand is evaluated before the operator.
        Expr::App(rator, rand) => {
            let arg = eval_(env, es, rand)?;
            let fun = eval_(env, es, rator)?;
            apply(es, fun, arg)
        }

        Expr::Tau(xs) => {
            let mut vals = Vec::with_capacity(xs.len());
            for x in xs {
                vals.push(eval_(env, es, x)?);
            }
            Ok(Value::tuple(vals))
        }

        Expr::Aug(a, b) => {
            let left = eval_(env, es, a)?;
            let right = eval_(env, es, b)?;
            let mut vals = match left {
                Value::Tuple(vals) => (*vals).clone(),
                Value::Nil => Vec::new(),
                other => return Err(EvalError::type_mismatch("aug", "tuple", other.type_name())),
            };
            vals.push(right);
            Ok(Value::tuple(vals))
        }

        Expr::If(tst, thn, els) => match eval_(env, es, tst)? {
            Value::Bool(true) => eval_(env, es, thn),
            Value::Bool(false) => eval_(env, es, els),
            other => Err(EvalError::type_mismatch("->", "truthvalue", other.type_name())),
        },

        Expr::BinOp(BinOp::And, a, b) => match eval_(env, es, a)? {
            Value::Bool(false) => Ok(Value::Bool(false)),
            Value::Bool(true) => expect_bool("&", eval_(env, es, b)?),
            other => Err(EvalError::type_mismatch("&", "truthvalue", other.type_name())),
        },

        Expr::BinOp(BinOp::Or, a, b) => match eval_(env, es, a)? {
            Value::Bool(true) => Ok(Value::Bool(true)),
            Value::Bool(false) => expect_bool("or", eval_(env, es, b)?),
            other => Err(EvalError::type_mismatch("or", "truthvalue", other.type_name())),
        },

        Expr::BinOp(op, a, b) => {
            let left = eval_(env, es, a)?;
            let right = eval_(env, es, b)?;
            eval_binop(*op, left, right)
        }

        Expr::UnOp(UnOp::Not, a) => match eval_(env, es, a)? {
            Value::Bool(x) => Ok(Value::Bool(!x)),
            other => Err(EvalError::type_mismatch("not", "truthvalue", other.type_name())),
        },

        Expr::UnOp(UnOp::Neg, a) => match eval_(env, es, a)? {
            Value::Int(x) => x.checked_neg().map(Value::Int).ok_or(EvalError::Overflow("neg")),
            other => Err(EvalError::type_mismatch("neg", "integer", other.type_name())),
        },
    }
}

/// apply an evaluated operator to an evaluated operand.
pub fn apply(es: &mut EvalState, fun: Value, arg: Value) -> Result<Value, EvalError> {
    match fun {
        Value::Closure(clo) => {
            tracing::trace!(binder = %clo.binder, "applying closure");
            let new_env = Env::extend(&clo.env);
            bind(&new_env, &clo.binder, arg)?;
            eval_(&new_env, es, &clo.body)
        }
        Value::Builtin(b) => apply_builtin(es, b, arg),
        Value::Tuple(vals) => match arg {
            Value::Int(n) => select(&vals, n),
            other => Err(EvalError::NotApplicable {
                rator: "tuple",
                rand: other.type_name(),
            }),
        },
        other => Err(EvalError::NotApplicable {
            rator: other.type_name(),
            rand: arg.type_name(),
        }),
    }
}

/// bind `binder` against `val` in `env`. tuple patterns destructure
/// positionally, and may nest.
pub fn bind(env: &Env, binder: &Binder, val: Value) -> Result<(), EvalError> {
    match binder {
        Binder::Name(nm) => {
            env.define(nm.clone(), val);
            Ok(())
        }
        Binder::Dummy => Ok(()),
        Binder::Tuple(bs) => match val {
            Value::Tuple(vals) => {
                if bs.len() != vals.len() {
                    return Err(EvalError::ArityMismatch {
                        expected: bs.len(),
                        found: vals.len(),
                    });
                }
                for (b, v) in bs.iter().zip(vals.iter()) {
                    bind(env, b, v.clone())?;
                }
                Ok(())
            }
            other => Err(EvalError::type_mismatch(
                &format!("pattern {}", binder),
                "tuple",
                other.type_name(),
            )),
        },
    }
}

// 1-based.
fn select(vals: &[Value], n: i64) -> Result<Value, EvalError> {
    let out_of_range = || EvalError::IndexOutOfRange {
        index: n,
        len: vals.len(),
    };
    n.checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| vals.get(i))
        .cloned()
        .ok_or_else(out_of_range)
}

fn expect_bool(context: &str, val: Value) -> Result<Value, EvalError> {
    match val {
        Value::Bool(_) => Ok(val),
        other => Err(EvalError::type_mismatch(context, "truthvalue", other.type_name())),
    }
}

fn eval_lit(lit: &Lit) -> Value {
    match lit {
        Lit::LInt(x) => Value::Int(*x),
        Lit::LStr(s) => Value::Str(unescape(strip_quotes(s))),
        Lit::LBool(x) => Value::Bool(*x),
        Lit::LNil => Value::Nil,
        Lit::LDummy => Value::Dummy,
    }
}

fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix('\'').unwrap_or(s);
    s.strip_suffix('\'').unwrap_or(s)
}

fn unescape(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            res.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => res.push('\n'),
            Some('t') => res.push('\t'),
            Some('\\') => res.push('\\'),
            Some('\'') => res.push('\''),
            Some(other) => {
                res.push('\\');
                res.push(other);
            }
            None => res.push('\\'),
        }
    }
    res
}

fn eval_binop(op: BinOp, left: Value, right: Value) -> Result<Value, EvalError> {
    use BinOp::*;
    let label = rpal_core::abstract_syntax::binop_label(op);
    match op {
        Add | Sub | Mul | Div | Pow => match (left, right) {
            (Value::Int(a), Value::Int(b)) => arith(op, label, a, b).map(Value::Int),
            (Value::Int(_), other) | (other, _) => {
                Err(EvalError::type_mismatch(label, "integer", other.type_name()))
            }
        },
        Gr | Ge | Ls | Le => {
            let ord = match (&left, &right) {
                (Value::Int(a), Value::Int(b)) => a.cmp(b),
                (Value::Str(a), Value::Str(b)) => a.cmp(b),
                _ => return Err(incomparable(label, &left, &right)),
            };
            let res = match op {
                Gr => ord.is_gt(),
                Ge => ord.is_ge(),
                Ls => ord.is_lt(),
                _ => ord.is_le(),
            };
            Ok(Value::Bool(res))
        }
        Eq | Ne => {
            let same = match (&left, &right) {
                (Value::Int(a), Value::Int(b)) => a == b,
                (Value::Str(a), Value::Str(b)) => a == b,
                (Value::Bool(a), Value::Bool(b)) => a == b,
                (Value::Nil, Value::Nil) => true,
                _ => return Err(incomparable(label, &left, &right)),
            };
            Ok(Value::Bool(if op == Eq { same } else { !same }))
        }
        // short-circuit operators are handled before their operands are
        // evaluated.
        And | Or => Err(EvalError::type_mismatch(label, "truthvalue", left.type_name())),
    }
}

fn incomparable(label: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalError::Incomparable {
        op: label,
        left: left.type_name(),
        right: right.type_name(),
    }
}

fn arith(op: BinOp, label: &'static str, a: i64, b: i64) -> Result<i64, EvalError> {
    let overflow = EvalError::Overflow(label);
    match op {
        BinOp::Add => a.checked_add(b).ok_or(overflow),
        BinOp::Sub => a.checked_sub(b).ok_or(overflow),
        BinOp::Mul => a.checked_mul(b).ok_or(overflow),
        BinOp::Div => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            floor_div(a, b).ok_or(overflow)
        }
        _ => {
            if b < 0 {
                return Err(EvalError::NegativeExponent(b));
            }
            // these bases stay bounded for any exponent, however large.
            match a {
                0 | 1 if b > 0 => return Ok(a),
                -1 => return Ok(if b % 2 == 0 { 1 } else { -1 }),
                _ => (),
            }
            let exp = u32::try_from(b).map_err(|_| EvalError::Overflow(label))?;
            a.checked_pow(exp).ok_or(overflow)
        }
    }
}

/// division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}
