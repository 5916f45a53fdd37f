use pretty_assertions::assert_eq;
use std::rc::Rc;

use rpal_core::{
    abstract_syntax::{Name, Y_STAR},
    standard_syntax::{Binder, Expr},
};

use crate::{
    builtins::{apply_builtin, root_env},
    env::Env,
    error::{ErrorKind, EvalError},
    eval::{apply, EvalState},
    value::{Builtin, BuiltinOp, Closure, Value},
};

fn unapplied(op: BuiltinOp) -> Builtin {
    Builtin {
        op,
        args: Vec::new(),
    }
}

fn closure(binder: Binder, body: Expr) -> Value {
    Value::Closure(Rc::new(Closure {
        binder,
        body: Rc::new(body),
        env: Env::empty(),
    }))
}

fn y_star(arg: Value) -> Result<Value, EvalError> {
    let mut out = Vec::new();
    let mut es = EvalState::new(&mut out, 100);
    apply_builtin(&mut es, unapplied(BuiltinOp::YStar), arg)
}

#[test]
fn root_env_binds_every_builtin() {
    let env = root_env();
    for op in BuiltinOp::ALL.iter() {
        let val = env.lookup(&Name::new(op.name())).unwrap();
        assert_eq!(val, Value::Builtin(unapplied(*op)));
    }
    assert!(env.lookup(&Name::new(Y_STAR)).is_ok());
    assert_eq!(
        env.lookup(&Name::new("Println")).unwrap_err().kind(),
        ErrorKind::Unbound
    );
}

#[test]
fn conc_waits_for_its_second_argument() {
    let mut out = Vec::new();
    let mut es = EvalState::new(&mut out, 100);
    let partial = apply_builtin(&mut es, unapplied(BuiltinOp::Conc), Value::str("x")).unwrap();
    assert_eq!(
        partial,
        Value::Builtin(Builtin {
            op: BuiltinOp::Conc,
            args: vec![Value::str("x")],
        })
    );
    let full = apply(&mut es, partial.clone(), Value::str("y")).unwrap();
    assert_eq!(full, Value::str("xy"));
    // a partial application can be reused.
    let again = apply(&mut es, partial, Value::str("z")).unwrap();
    assert_eq!(again, Value::str("xz"));
}

#[test]
fn print_writes_without_a_newline() {
    let mut out = Vec::new();
    {
        let mut es = EvalState::new(&mut out, 100);
        let res = apply_builtin(&mut es, unapplied(BuiltinOp::Print), Value::Int(-3)).unwrap();
        assert_eq!(res, Value::Dummy);
    }
    assert_eq!(String::from_utf8(out).unwrap(), "-3");
}

#[test]
fn y_star_rejects_non_functions() {
    let err = y_star(Value::Int(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn y_star_rejects_tuple_binders() {
    let binder = Binder::Tuple(vec![Binder::Name(Name::new("f")), Binder::Name(Name::new("g"))]);
    let body = Expr::Lam(Binder::Name(Name::new("x")), Rc::new(Expr::var("x")));
    let err = y_star(closure(binder, body)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arity);
}

#[test]
fn y_star_rejects_non_abstraction_bodies() {
    let err = y_star(closure(Binder::Name(Name::new("f")), Expr::int(1))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn y_star_closure_sees_itself() {
    let f = Name::new("f");
    let body = Expr::Lam(Binder::Name(Name::new("x")), Rc::new(Expr::Var(f.clone())));
    let rec = y_star(closure(Binder::Name(f.clone()), body)).unwrap();
    match &rec {
        Value::Closure(clo) => assert_eq!(clo.env.lookup(&f).unwrap(), rec),
        other => panic!("expected a closure, got {:?}", other),
    }
}

#[test]
fn empty_tuple_renders_as_parens() {
    assert_eq!(Value::tuple(Vec::new()).render(), "()");
    assert_eq!(
        Value::tuple(vec![Value::tuple(Vec::new()), Value::Nil]).render(),
        "((), nil)"
    );
}

#[test]
fn type_names() {
    assert_eq!(Value::Int(0).type_name(), "integer");
    assert_eq!(Value::Bool(true).type_name(), "truthvalue");
    assert_eq!(Value::Builtin(unapplied(BuiltinOp::Stem)).type_name(), "function");
}
