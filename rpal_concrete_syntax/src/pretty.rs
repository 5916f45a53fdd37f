//! rendering syntax trees in the indented form: one node per line, each line
//! prefixed by one `.` per level of depth.

use pretty::RcDoc;

use rpal_core::{
    abstract_syntax::{binop_label, unop_label, Ast, Lit, Name, Y_STAR},
    stack::ensure_sufficient_stack,
    standard_syntax::{Binder, Expr},
};

/// render the sugared tree.
pub fn ppr_ast(ast: &Ast) -> RcDoc<()> {
    ppr_ast_at(ast, 0)
}

/// render the standardized tree.
pub fn ppr_expr(expr: &Expr) -> RcDoc<()> {
    ppr_expr_at(expr, 0)
}

fn ppr_ast_at(ast: &Ast, depth: usize) -> RcDoc<()> {
    ensure_sufficient_stack(|| ppr_ast_at_(ast, depth))
}

fn ppr_ast_at_(ast: &Ast, depth: usize) -> RcDoc<()> {
    match ast {
        Ast::Ident(nm) => leaf(depth, ppr_name(nm)),
        Ast::Lit(lit) => leaf(depth, ppr_lit(lit)),
        Ast::EmptyParens => leaf(depth, RcDoc::text("()")),
        Ast::Lambda(vbs, bd) => {
            let mut children: Vec<&Ast> = vbs.iter().collect();
            children.push(&**bd);
            node(depth, ast.label(), asts_at(&children, depth + 1))
        }
        Ast::Tau(xs) | Ast::And(xs) | Ast::Comma(xs) => {
            let children: Vec<&Ast> = xs.iter().collect();
            node(depth, ast.label(), asts_at(&children, depth + 1))
        }
        Ast::Gamma(a, b)
        | Ast::Let(a, b)
        | Ast::Where(a, b)
        | Ast::Aug(a, b)
        | Ast::BinOp(_, a, b)
        | Ast::Assign(a, b)
        | Ast::Within(a, b) => node(depth, ast.label(), asts_at(&[&**a, &**b], depth + 1)),
        Ast::Cond(a, b, c) => {
            let children = asts_at(&[&**a, &**b, &**c], depth + 1);
            node(depth, ast.label(), children)
        }
        Ast::UnOp(_, a) | Ast::Rec(a) => node(depth, ast.label(), asts_at(&[&**a], depth + 1)),
        Ast::At(a, nm, b) => {
            let children = vec![
                ppr_ast_at(a, depth + 1),
                leaf(depth + 1, ppr_name(nm)),
                ppr_ast_at(b, depth + 1),
            ];
            node(depth, ast.label(), children)
        }
        Ast::FcnForm(nm, vbs, e) => {
            let mut children = vec![leaf(depth + 1, ppr_name(nm))];
            children.extend(vbs.iter().map(|vb| ppr_ast_at(vb, depth + 1)));
            children.push(ppr_ast_at(e, depth + 1));
            node(depth, ast.label(), children)
        }
    }
}

fn ppr_expr_at(expr: &Expr, depth: usize) -> RcDoc<()> {
    ensure_sufficient_stack(|| ppr_expr_at_(expr, depth))
}

fn ppr_expr_at_(expr: &Expr, depth: usize) -> RcDoc<()> {
    match expr {
        Expr::Var(nm) => leaf(depth, ppr_name(nm)),
        Expr::Lit(lit) => leaf(depth, ppr_lit(lit)),
        Expr::Lam(binder, bd) => {
            let children = vec![ppr_binder_at(binder, depth + 1), ppr_expr_at(bd, depth + 1)];
            node(depth, "lambda", children)
        }
        Expr::App(a, b) => node(depth, "gamma", exprs_at(&[&**a, &**b], depth + 1)),
        Expr::Tau(xs) => {
            let children: Vec<&Expr> = xs.iter().collect();
            node(depth, "tau", exprs_at(&children, depth + 1))
        }
        Expr::Aug(a, b) => node(depth, "aug", exprs_at(&[&**a, &**b], depth + 1)),
        Expr::If(a, b, c) => node(depth, "->", exprs_at(&[&**a, &**b, &**c], depth + 1)),
        Expr::BinOp(op, a, b) => node(depth, binop_label(*op), exprs_at(&[&**a, &**b], depth + 1)),
        Expr::UnOp(op, a) => node(depth, unop_label(*op), exprs_at(&[&**a], depth + 1)),
    }
}

fn asts_at<'a>(xs: &[&'a Ast], depth: usize) -> Vec<RcDoc<'a, ()>> {
    xs.iter().map(|x| ppr_ast_at(x, depth)).collect()
}

fn exprs_at<'a>(xs: &[&'a Expr], depth: usize) -> Vec<RcDoc<'a, ()>> {
    xs.iter().map(|x| ppr_expr_at(x, depth)).collect()
}

fn ppr_binder_at(binder: &Binder, depth: usize) -> RcDoc<()> {
    match binder {
        Binder::Name(nm) => leaf(depth, ppr_name(nm)),
        Binder::Dummy => leaf(depth, RcDoc::text("()")),
        Binder::Tuple(bs) => {
            let children = bs.iter().map(|b| ppr_binder_at(b, depth + 1)).collect();
            node(depth, ",", children)
        }
    }
}

pub fn ppr_name(nm: &Name) -> RcDoc<()> {
    if nm.as_str() == Y_STAR {
        RcDoc::text("<Y*>")
    } else {
        RcDoc::text(format!("<ID:{}>", nm))
    }
}

pub fn ppr_lit(lit: &Lit) -> RcDoc<()> {
    match lit {
        Lit::LInt(i) => RcDoc::text(format!("<INT:{}>", i)),
        Lit::LStr(s) => RcDoc::text(format!("<STR:{}>", s)),
        Lit::LBool(true) => RcDoc::text("<true>"),
        Lit::LBool(false) => RcDoc::text("<false>"),
        Lit::LNil => RcDoc::text("<nil>"),
        Lit::LDummy => RcDoc::text("<dummy>"),
    }
}

fn dots<'a>(depth: usize) -> RcDoc<'a, ()> {
    RcDoc::text(".".repeat(depth))
}

fn leaf(depth: usize, doc: RcDoc<()>) -> RcDoc<()> {
    dots(depth).append(doc).append(RcDoc::hardline())
}

fn node<'a>(depth: usize, label: &'static str, children: Vec<RcDoc<'a, ()>>) -> RcDoc<'a, ()> {
    dots(depth)
        .append(RcDoc::text(label))
        .append(RcDoc::hardline())
        .append(RcDoc::concat(children))
}
