//! arbitrary generators for sugared syntax trees.
//!
//! trees are well-formed by construction: definitions only appear where the
//! grammar puts definitions, binders only where it puts binders, and every
//! `rec` wraps something that standardizes to a function.

use quickcheck::{empty_shrinker, single_shrinker, Arbitrary, Gen};
use rand::Rng;
use std::iter;

use crate::abstract_syntax::*;

/// a sugared tree the parser could have produced.
#[derive(Clone, Debug)]
pub struct WellFormedAst(pub Ast);

impl Arbitrary for WellFormedAst {
    fn arbitrary<G: Gen>(g: &mut G) -> WellFormedAst {
        WellFormedAst(arbitrary_ast(g, &[]))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = WellFormedAst>> {
        let WellFormedAst(ast) = self;
        Box::new(ast.shrink().map(WellFormedAst))
    }
}

pub fn arbitrary_ast<G: Gen>(g: &mut G, reserved: &[String]) -> Ast {
    gen_expr(g, g.size(), reserved)
}

impl Arbitrary for Ast {
    fn arbitrary<G: Gen>(_g: &mut G) -> Ast {
        panic!("don't use this - use arbitrary_ast")
    }

    // only expression-position children are shrunk into replacements for the
    // whole node, so shrinking never produces a tree with a definition or a
    // binder in expression position.
    fn shrink(&self) -> Box<dyn Iterator<Item = Ast>> {
        match self {
            Ast::Gamma(f, x) => {
                let pairs = (f.clone(), x.clone())
                    .shrink()
                    .map(|(f_, x_)| Ast::Gamma(f_, x_));
                let fs = single_shrinker(*f.clone());
                let xs = single_shrinker(*x.clone());
                Box::new(pairs.chain(fs).chain(xs))
            }
            Ast::Lambda(vbs, bd) => {
                let vbs_ = vbs.clone();
                let chain = bd
                    .clone()
                    .shrink()
                    .map(move |bd_| Ast::Lambda(vbs_.clone(), bd_));
                Box::new(chain.chain(single_shrinker(*bd.clone())))
            }
            Ast::Let(d, e) => {
                let d_ = d.clone();
                let chain = e.clone().shrink().map(move |e_| Ast::Let(d_.clone(), e_));
                Box::new(chain.chain(single_shrinker(*e.clone())))
            }
            Ast::Where(t, dr) => {
                let dr_ = dr.clone();
                let chain = t.clone().shrink().map(move |t_| Ast::Where(t_, dr_.clone()));
                Box::new(chain.chain(single_shrinker(*t.clone())))
            }
            Ast::Cond(tst, thn, els) => {
                let triples = (tst.clone(), thn.clone(), els.clone())
                    .shrink()
                    .map(|(tst_, thn_, els_)| Ast::Cond(tst_, thn_, els_));
                let thns = single_shrinker(*thn.clone());
                let elss = single_shrinker(*els.clone());
                Box::new(triples.chain(thns).chain(elss))
            }
            Ast::BinOp(op, a, b) => {
                let op = *op;
                let pairs = (a.clone(), b.clone())
                    .shrink()
                    .map(move |(a_, b_)| Ast::BinOp(op, a_, b_));
                let as_ = single_shrinker(*a.clone());
                let bs = single_shrinker(*b.clone());
                Box::new(pairs.chain(as_).chain(bs))
            }
            Ast::UnOp(op, a) => {
                let op = *op;
                let chain = a.shrink().map(move |a_| Ast::UnOp(op, a_));
                Box::new(chain.chain(single_shrinker(*a.clone())))
            }
            Ast::Aug(a, b) => {
                let pairs = (a.clone(), b.clone())
                    .shrink()
                    .map(|(a_, b_)| Ast::Aug(a_, b_));
                Box::new(pairs.chain(single_shrinker(*a.clone())))
            }
            Ast::Tau(es) => Box::new(es.clone().into_iter()),
            _ => empty_shrinker(),
        }
    }
}

/// the size parameter is divided as we recur, so that generated trees stay
/// small; below 1 only leaves are produced.
pub fn gen_expr<G: Gen>(g: &mut G, size: usize, reserved: &[String]) -> Ast {
    let upper_bound = if size < 1 { 2 } else { 13 };
    match g.gen_range(0, upper_bound) {
        0 => Ast::Ident(arbitrary_name(g, reserved)),
        1 => Ast::Lit(arbitrary_lit(g)),
        2 => {
            let n = g.gen_range(1, 4);
            let vbs = iter::repeat_with(|| gen_vb(g, reserved)).take(n).collect();
            let bd = gen_expr(g, size * 2 / 3, reserved);
            Ast::Lambda(vbs, Box::new(bd))
        }
        3 => {
            let f = gen_expr(g, size / 2, reserved);
            let a = gen_expr(g, size / 2, reserved);
            Ast::Gamma(Box::new(f), Box::new(a))
        }
        4 => {
            let d = gen_defn(g, size / 2, reserved);
            let e = gen_expr(g, size / 2, reserved);
            Ast::Let(Box::new(d), Box::new(e))
        }
        5 => {
            let t = gen_expr(g, size / 2, reserved);
            let dr = gen_defn(g, size / 2, reserved);
            Ast::Where(Box::new(t), Box::new(dr))
        }
        6 => {
            let n = g.gen_range(2, 4);
            let es = iter::repeat_with(|| gen_expr(g, size / n, reserved))
                .take(n)
                .collect();
            Ast::Tau(es)
        }
        7 => {
            let a = gen_expr(g, size / 2, reserved);
            let b = gen_expr(g, size / 2, reserved);
            Ast::Aug(Box::new(a), Box::new(b))
        }
        8 => {
            let tst = gen_expr(g, size / 3, reserved);
            let thn = gen_expr(g, size / 3, reserved);
            let els = gen_expr(g, size / 3, reserved);
            Ast::Cond(Box::new(tst), Box::new(thn), Box::new(els))
        }
        9 => {
            let a = gen_expr(g, size / 2, reserved);
            let b = gen_expr(g, size / 2, reserved);
            Ast::BinOp(arbitrary_binop(g), Box::new(a), Box::new(b))
        }
        10 => {
            let op = if bool::arbitrary(g) { UnOp::Not } else { UnOp::Neg };
            Ast::UnOp(op, Box::new(gen_expr(g, size * 2 / 3, reserved)))
        }
        11 => {
            let a1 = gen_expr(g, size / 2, reserved);
            let a2 = gen_expr(g, size / 2, reserved);
            let nm = arbitrary_name(g, reserved);
            Ast::At(Box::new(a1), nm, Box::new(a2))
        }
        12 => ident_or_lit(g, reserved),
        _ => panic!("impossible: gen_expr: gen out of bounds"),
    }
}

pub fn gen_defn<G: Gen>(g: &mut G, size: usize, reserved: &[String]) -> Ast {
    let upper_bound = if size < 2 { 2 } else { 5 };
    match g.gen_range(0, upper_bound) {
        0 => {
            let vl = gen_vl(g, reserved);
            let e = gen_expr(g, size / 2, reserved);
            Ast::Assign(Box::new(vl), Box::new(e))
        }
        1 => gen_fcn_form(g, size, reserved),
        2 => Ast::Rec(Box::new(gen_fcn_form(g, size / 2, reserved))),
        3 => {
            let n = g.gen_range(2, 4);
            let drs = iter::repeat_with(|| gen_defn(g, size / (n + 1), reserved))
                .take(n)
                .collect();
            Ast::And(drs)
        }
        4 => {
            let da = gen_defn(g, size / 2, reserved);
            let d = gen_defn(g, size / 2, reserved);
            Ast::Within(Box::new(da), Box::new(d))
        }
        _ => panic!("impossible: gen_defn: gen out of bounds"),
    }
}

fn gen_fcn_form<G: Gen>(g: &mut G, size: usize, reserved: &[String]) -> Ast {
    let nm = arbitrary_name(g, reserved);
    let n = g.gen_range(1, 3);
    let vbs = iter::repeat_with(|| gen_vb(g, reserved)).take(n).collect();
    let e = gen_expr(g, size / 2, reserved);
    Ast::FcnForm(nm, vbs, Box::new(e))
}

/// `Vb`: an identifier, a parenthesized list, or `()`.
pub fn gen_vb<G: Gen>(g: &mut G, reserved: &[String]) -> Ast {
    match g.gen_range(0, 4) {
        0 | 1 => Ast::Ident(arbitrary_name(g, reserved)),
        2 => gen_vl(g, reserved),
        3 => Ast::EmptyParens,
        _ => panic!("impossible: gen_vb: gen out of bounds"),
    }
}

/// `Vl`: one identifier, or a comma node over several.
pub fn gen_vl<G: Gen>(g: &mut G, reserved: &[String]) -> Ast {
    let n = g.gen_range(1, 4);
    if n == 1 {
        Ast::Ident(arbitrary_name(g, reserved))
    } else {
        let nms = iter::repeat_with(|| Ast::Ident(arbitrary_name(g, reserved)))
            .take(n)
            .collect();
        Ast::Comma(nms)
    }
}

fn ident_or_lit<G: Gen>(g: &mut G, reserved: &[String]) -> Ast {
    if bool::arbitrary(g) {
        Ast::Ident(arbitrary_name(g, reserved))
    } else {
        Ast::Lit(arbitrary_lit(g))
    }
}

pub fn arbitrary_lit<G: Gen>(g: &mut G) -> Lit {
    match g.gen_range(0, 5) {
        0 => Lit::LInt(i64::from(u32::arbitrary(g))),
        1 => Lit::LStr(format!("'{}'", arbitrary_name(g, &[]))),
        2 => Lit::LBool(bool::arbitrary(g)),
        3 => Lit::LNil,
        4 => Lit::LDummy,
        _ => panic!("impossible: Arbitrary: Lit: gen out of bounds"),
    }
}

pub fn arbitrary_binop<G: Gen>(g: &mut G) -> BinOp {
    match g.gen_range(0, 13) {
        0 => BinOp::Or,
        1 => BinOp::And,
        2 => BinOp::Gr,
        3 => BinOp::Ge,
        4 => BinOp::Ls,
        5 => BinOp::Le,
        6 => BinOp::Eq,
        7 => BinOp::Ne,
        8 => BinOp::Add,
        9 => BinOp::Sub,
        10 => BinOp::Mul,
        11 => BinOp::Div,
        12 => BinOp::Pow,
        _ => panic!("impossible: Arbitrary: BinOp: gen out of bounds"),
    }
}

pub fn arbitrary_name<G: Gen>(g: &mut G, reserved: &[String]) -> Name {
    let len = g.gen_range(3, 8);
    loop {
        let s0 = gen_alpha_char(g);
        let mut s: String = iter::repeat_with(|| gen_name_char(g))
            .take(len - 1)
            .collect();
        s.insert(0, s0);
        if !reserved.contains(&s) {
            return Name(s);
        }
    }
}

fn gen_alpha_char<G: Gen>(g: &mut G) -> char {
    const ALPHA_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let idx = g.gen_range(0, ALPHA_CHARSET.len());
    ALPHA_CHARSET[idx] as char
}

fn gen_name_char<G: Gen>(g: &mut G) -> char {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";
    let idx = g.gen_range(0, CHARSET.len());
    CHARSET[idx] as char
}
