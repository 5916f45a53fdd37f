use pretty::RcDoc;
use std::{fmt, rc::Rc};

use rpal_concrete_syntax::util::pretty::to_pretty;
use rpal_core::standard_syntax::{Binder, Expr};

use crate::env::Env;

/// a runtime value.
///
/// tuples and closures are immutable once built, so they are shared by
/// reference count rather than copied.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
    Nil,
    Dummy,
    Tuple(Rc<Vec<Value>>),
    Closure(Rc<Closure>),
    Builtin(Builtin),
}

/// an abstraction paired with the environment it was created in.
pub struct Closure {
    pub binder: Binder,
    pub body: Rc<Expr>,
    pub env: Rc<Env>,
}

// the environment is left out: a recursive closure can reach itself through
// it.
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Closure")
            .field("binder", &self.binder)
            .field("body", &self.body)
            .finish()
    }
}

/// a built-in function together with the arguments it has received so far.
#[derive(Clone, Debug, PartialEq)]
pub struct Builtin {
    pub op: BuiltinOp,
    pub args: Vec<Value>,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum BuiltinOp {
    Print,
    Isinteger,
    Isstring,
    Istruthvalue,
    Istuple,
    Isfunction,
    Isdummy,
    Stem,
    Stern,
    Conc,
    Order,
    Null,
    ItoS,
    YStar,
}

impl BuiltinOp {
    pub const ALL: [BuiltinOp; 14] = [
        BuiltinOp::Print,
        BuiltinOp::Isinteger,
        BuiltinOp::Isstring,
        BuiltinOp::Istruthvalue,
        BuiltinOp::Istuple,
        BuiltinOp::Isfunction,
        BuiltinOp::Isdummy,
        BuiltinOp::Stem,
        BuiltinOp::Stern,
        BuiltinOp::Conc,
        BuiltinOp::Order,
        BuiltinOp::Null,
        BuiltinOp::ItoS,
        BuiltinOp::YStar,
    ];

    /// the name the built-in is bound to in the root environment.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinOp::Print => "Print",
            BuiltinOp::Isinteger => "Isinteger",
            BuiltinOp::Isstring => "Isstring",
            BuiltinOp::Istruthvalue => "Istruthvalue",
            BuiltinOp::Istuple => "Istuple",
            BuiltinOp::Isfunction => "Isfunction",
            BuiltinOp::Isdummy => "Isdummy",
            BuiltinOp::Stem => "Stem",
            BuiltinOp::Stern => "Stern",
            BuiltinOp::Conc => "Conc",
            BuiltinOp::Order => "Order",
            BuiltinOp::Null => "Null",
            BuiltinOp::ItoS => "ItoS",
            BuiltinOp::YStar => rpal_core::abstract_syntax::Y_STAR,
        }
    }

    pub fn arity(self) -> usize {
        match self {
            BuiltinOp::Conc => 2,
            _ => 1,
        }
    }
}

impl Value {
    /// the name of the value's runtime type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Bool(_) => "truthvalue",
            Value::Nil => "nil",
            Value::Dummy => "dummy",
            Value::Tuple(_) => "tuple",
            Value::Closure(_) | Value::Builtin(_) => "function",
        }
    }

    pub fn tuple(vals: Vec<Value>) -> Value {
        Value::Tuple(Rc::new(vals))
    }

    pub fn str(s: &str) -> Value {
        Value::Str(s.to_string())
    }

    /// the textual form `Print` emits.
    pub fn render(&self) -> String {
        to_pretty(ppr_value(self), 80)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Dummy, Value::Dummy) => true,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            // closures over the same abstraction in different environments
            // are distinct.
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (_, _) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

pub fn ppr_value(val: &Value) -> RcDoc<()> {
    match val {
        Value::Int(n) => RcDoc::as_string(n),
        Value::Str(s) => RcDoc::text(s.as_str()),
        Value::Bool(true) => RcDoc::text("true"),
        Value::Bool(false) => RcDoc::text("false"),
        Value::Nil => RcDoc::text("nil"),
        Value::Dummy => RcDoc::text("dummy"),
        Value::Tuple(vals) => {
            let docs = vals.iter().map(ppr_value);
            RcDoc::text("(")
                .append(RcDoc::intersperse(docs, RcDoc::text(", ")))
                .append(RcDoc::text(")"))
        }
        Value::Closure(clo) => RcDoc::text(format!("[lambda closure: {}]", clo.binder)),
        Value::Builtin(b) => RcDoc::text(format!("[built-in: {}]", b.op.name())),
    }
}
