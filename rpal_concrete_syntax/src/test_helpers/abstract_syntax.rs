use quickcheck::{Arbitrary, Gen};

use rpal_core::{abstract_syntax::*, test_helpers::abstract_syntax::arbitrary_ast};

use crate::parse::reserved;

// wrapped so that generated identifiers avoid this crate's keywords (and
// Rust disallows orphan instances).
#[derive(Clone, Debug)]
pub struct WrappedAst(pub Ast);

impl Arbitrary for WrappedAst {
    fn arbitrary<G: Gen>(g: &mut G) -> WrappedAst {
        WrappedAst(arbitrary_ast(g, &reserved()))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = WrappedAst>> {
        let WrappedAst(ast) = self;
        Box::new(ast.shrink().map(WrappedAst))
    }
}

/// number of lines `ppr_ast` produces for a tree.
pub fn node_count(ast: &Ast) -> usize {
    let sum = |xs: &[Ast]| xs.iter().map(node_count).sum::<usize>();
    1 + match ast {
        Ast::Ident(_) | Ast::Lit(_) | Ast::EmptyParens => 0,
        Ast::Lambda(vbs, bd) => sum(vbs) + node_count(bd),
        Ast::Tau(xs) | Ast::And(xs) | Ast::Comma(xs) => sum(xs),
        Ast::Gamma(a, b)
        | Ast::Let(a, b)
        | Ast::Where(a, b)
        | Ast::Aug(a, b)
        | Ast::BinOp(_, a, b)
        | Ast::Assign(a, b)
        | Ast::Within(a, b) => node_count(a) + node_count(b),
        Ast::Cond(a, b, c) => node_count(a) + node_count(b) + node_count(c),
        Ast::UnOp(_, a) | Ast::Rec(a) => node_count(a),
        Ast::At(a, _, b) => node_count(a) + 1 + node_count(b),
        Ast::FcnForm(_, vbs, e) => 1 + sum(vbs) + node_count(e),
    }
}
