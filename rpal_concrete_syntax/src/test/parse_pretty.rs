//! unit tests for the parser and the tree renderer, plus property tests.

macro_rules! check_parse {
    ( $a: expr, $b: expr ) => {
        match parse_program(&$a[..]) {
            Ok(v) => pretty_assertions::assert_eq!(v, $b),
            Err(err) => panic!(
                "parse error:\nparse input: {:?}\nexpected value: {:?}\nerror: {}",
                $a, $b, err
            ),
        }
    };
}

macro_rules! check_parse_fails {
    ( $( $name: ident: $src: expr, )* ) => {
        $(
            #[test]
            fn $name() {
                assert!(parse_program($src).is_err(), "parsed: {:?}", $src);
            }
        )*
    };
}

fn int(i: i64) -> Ast {
    Ast::Lit(Lit::LInt(i))
}

fn binop(op: BinOp, a: Ast, b: Ast) -> Ast {
    Ast::BinOp(op, Box::new(a), Box::new(b))
}

fn assign(nm: &str, e: Ast) -> Ast {
    Ast::Assign(Box::new(ident!(nm)), Box::new(e))
}

fn let_(d: Ast, e: Ast) -> Ast {
    Ast::Let(Box::new(d), Box::new(e))
}

use pretty_assertions::assert_eq;

use rpal_core::{abstract_syntax::*, gamma, ident};

use crate::parse::parse_program;

pub mod parse_unit {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn let_in() {
        let body = binop(BinOp::Add, ident!("x"), int(2));
        check_parse!("let x = 3 in x + 2", let_(assign("x", int(3)), body));
    }

    #[test]
    fn lambda_with_several_binders() {
        let vbs = vec![
            ident!("x"),
            Ast::Comma(vec![ident!("y"), ident!("z")]),
            Ast::EmptyParens,
        ];
        check_parse!("fn x (y, z) (). x", Ast::Lambda(vbs, Box::new(ident!("x"))));
    }

    #[test]
    fn application_associates_left() {
        let e = gamma!(gamma!(ident!("f"), ident!("x")), ident!("y"));
        check_parse!("f x y", e);
    }

    #[test]
    fn application_of_parenthesized_tuple() {
        let args = Ast::Tau(vec![ident!("T"), binop(BinOp::Sub, ident!("N"), int(1))]);
        check_parse!("Psum(T, N-1)", gamma!(ident!("Psum"), args));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let e = binop(BinOp::Add, int(1), binop(BinOp::Mul, int(2), int(3)));
        check_parse!("1 + 2 * 3", e);
    }

    #[test]
    fn subtraction_associates_left() {
        let e = binop(BinOp::Sub, binop(BinOp::Sub, int(5), int(2)), int(1));
        check_parse!("5 - 2 - 1", e);
    }

    #[test]
    fn exponent_associates_right() {
        let e = binop(BinOp::Pow, int(2), binop(BinOp::Pow, int(3), int(2)));
        check_parse!("2 ** 3 ** 2", e);
    }

    #[test]
    fn leading_minus_negates_first_term() {
        let neg = Ast::UnOp(UnOp::Neg, Box::new(ident!("x")));
        check_parse!("-x + 1", binop(BinOp::Add, neg, int(1)));
    }

    #[test]
    fn leading_plus_is_identity() {
        check_parse!("+ 4", int(4));
    }

    #[test]
    fn application_binds_tighter_than_arithmetic() {
        let e = binop(BinOp::Add, gamma!(ident!("f"), int(1)), gamma!(ident!("g"), int(2)));
        check_parse!("f 1 + g 2", e);
    }

    #[test]
    fn conditional_nests_to_the_right() {
        let inner = Ast::Cond(Box::new(ident!("c")), Box::new(int(2)), Box::new(int(3)));
        let e = Ast::Cond(Box::new(ident!("b")), Box::new(int(1)), Box::new(inner));
        check_parse!("b -> 1 | c -> 2 | 3", e);
    }

    #[test]
    fn boolean_precedence() {
        let not_a = Ast::UnOp(UnOp::Not, Box::new(ident!("a")));
        let e = binop(BinOp::Or, binop(BinOp::And, not_a, ident!("b")), ident!("c"));
        check_parse!("not a & b or c", e);
    }

    #[test]
    fn comparison_spellings() {
        check_parse!("x ge 1", binop(BinOp::Ge, ident!("x"), int(1)));
        check_parse!("x >= 1", binop(BinOp::Ge, ident!("x"), int(1)));
        check_parse!("x > 1", binop(BinOp::Gr, ident!("x"), int(1)));
        check_parse!("x <= 1", binop(BinOp::Le, ident!("x"), int(1)));
        check_parse!("x ls 1", binop(BinOp::Ls, ident!("x"), int(1)));
        check_parse!("x ne 1", binop(BinOp::Ne, ident!("x"), int(1)));
        check_parse!("x eq 1", binop(BinOp::Eq, ident!("x"), int(1)));
    }

    #[test]
    fn tuple_literal() {
        check_parse!("1, 2, 3", Ast::Tau(vec![int(1), int(2), int(3)]));
    }

    #[test]
    fn aug_associates_left() {
        let inner = Ast::Aug(Box::new(Ast::Lit(Lit::LNil)), Box::new(int(1)));
        let e = Ast::Aug(Box::new(inner), Box::new(int(2)));
        check_parse!("nil aug 1 aug 2", e);
    }

    #[test]
    fn at_infix() {
        let e = Ast::At(Box::new(int(1)), Name::new("f"), Box::new(int(2)));
        check_parse!("1 @ f 2", e);
    }

    #[test]
    fn where_clause() {
        check_parse!("x where x = 1", Ast::Where(Box::new(ident!("x")), Box::new(assign("x", int(1)))));
    }

    #[test]
    fn rec_function_form() {
        let fcn = Ast::FcnForm(Name::new("f"), vec![ident!("n")], Box::new(ident!("n")));
        check_parse!("let rec f n = n in f", let_(Ast::Rec(Box::new(fcn)), ident!("f")));
    }

    #[test]
    fn simultaneous_definitions() {
        let d = Ast::And(vec![assign("x", int(1)), assign("y", int(2))]);
        check_parse!("let x = 1 and y = 2 in x", let_(d, ident!("x")));
    }

    #[test]
    fn within_definition() {
        let d = Ast::Within(Box::new(assign("a", int(1))), Box::new(assign("b", ident!("a"))));
        check_parse!("let a = 1 within b = a in b", let_(d, ident!("b")));
    }

    #[test]
    fn variable_list_definition() {
        let vl = Ast::Comma(vec![ident!("x"), ident!("y")]);
        let d = Ast::Assign(Box::new(vl), Box::new(Ast::Tau(vec![int(1), int(2)])));
        check_parse!("let x, y = 1, 2 in x", let_(d, ident!("x")));
    }

    #[test]
    fn parenthesized_definition() {
        check_parse!("let (x = 1) in x", let_(assign("x", int(1)), ident!("x")));
    }

    #[test]
    fn literals() {
        check_parse!("true", Ast::Lit(Lit::LBool(true)));
        check_parse!("false", Ast::Lit(Lit::LBool(false)));
        check_parse!("nil", Ast::Lit(Lit::LNil));
        check_parse!("dummy", Ast::Lit(Lit::LDummy));
        check_parse!("42", int(42));
    }

    #[test]
    fn string_keeps_quotes_and_escapes() {
        check_parse!(r"'a\'b\n'", Ast::Lit(Lit::LStr(r"'a\'b\n'".to_string())));
    }

    #[test]
    fn keyword_prefixed_identifiers() {
        check_parse!("letter", ident!("letter"));
        check_parse!("index", ident!("index"));
        check_parse!("nilly", ident!("nilly"));
        check_parse!("x_1", ident!("x_1"));
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        check_parse!("// leading\n  1 // trailing\n", int(1));
    }

    #[test]
    fn error_reports_position() {
        let err = parse_program("let x = 1\n in").unwrap_err();
        assert_eq!(err.line, 2);
    }

    check_parse_fails! {
        empty_input: "",
        keyword_as_identifier: "let in = 1 in in",
        unbalanced_parens: "(1 + 2",
        trailing_input: "1 )",
        dangling_operator: "1 +",
        conditional_without_else: "b -> 1",
        integer_out_of_range: "99999999999999999999",
        unterminated_string: "'abc",
    }
}

pub mod pretty_unit {
    use rpal_core::standardize::standardize;

    use super::*;
    use pretty_assertions::assert_eq;
    use crate::{
        pretty::{ppr_ast, ppr_expr},
        util::pretty::to_pretty,
    };

    fn render_ast(src: &str) -> String {
        let ast = parse_program(src).unwrap();
        to_pretty(ppr_ast(&ast), 80)
    }

    fn render_st(src: &str) -> String {
        let ast = parse_program(src).unwrap();
        to_pretty(ppr_expr(&standardize(&ast).unwrap()), 80)
    }

    #[test]
    fn long_chain_renders() {
        let n = 5_000;
        let src = format!("{}1", "1 + ".repeat(n));
        let handle = std::thread::Builder::new()
            .stack_size(4 * 1024 * 1024)
            .spawn(move || (render_ast(&src), render_st(&src)))
            .unwrap();
        let (ast_tree, st_tree) = handle.join().unwrap();
        let deepest = format!("{}<INT:1>", ".".repeat(n));
        for tree in &[ast_tree, st_tree] {
            let lines: Vec<&str> = tree.lines().collect();
            assert_eq!(lines.len(), 2 * n + 1);
            assert_eq!(lines[0], "+");
            assert_eq!(lines[n], deepest);
            assert_eq!(lines[2 * n], ".<INT:1>");
        }
    }

    #[test]
    fn let_tree() {
        let expected = "\
let
.=
..<ID:x>
..<INT:3>
.+
..<ID:x>
..<INT:2>
";
        assert_eq!(render_ast("let x = 3 in x + 2"), expected);
    }

    #[test]
    fn let_standardized_tree() {
        let expected = "\
gamma
.lambda
..<ID:x>
..+
...<ID:x>
...<INT:2>
.<INT:3>
";
        assert_eq!(render_st("let x = 3 in x + 2"), expected);
    }

    #[test]
    fn function_form_tree() {
        let expected = "\
let
.function_form
..<ID:f>
..,
...<ID:x>
...<ID:y>
..()
..<ID:x>
.<STR:'s'>
";
        assert_eq!(render_ast("let f (x, y) () = x in 's'"), expected);
    }

    #[test]
    fn rec_standardized_tree() {
        let expected = "\
gamma
.lambda
..<ID:f>
..<ID:f>
.gamma
..<Y*>
..lambda
...<ID:f>
...lambda
....,
.....<ID:a>
.....<ID:b>
....<nil>
";
        assert_eq!(render_st("let rec f (a, b) = nil in f"), expected);
    }

    #[test]
    fn leaves() {
        let expected = "\
tau
.<true>
.<false>
.<dummy>
.neg
..<INT:1>
";
        assert_eq!(render_ast("true, false, dummy, -1"), expected);
    }
}

pub mod properties {
    use crate::{pretty::ppr_ast, test_helpers::abstract_syntax::*, util::pretty::to_pretty};

    #[quickcheck]
    fn one_line_per_node(w: WrappedAst) -> bool {
        let WrappedAst(ast) = w;
        let s = to_pretty(ppr_ast(&ast), 80);
        s.lines().count() == node_count(&ast)
    }

    #[quickcheck]
    fn depth_grows_one_level_at_a_time(w: WrappedAst) -> bool {
        let WrappedAst(ast) = w;
        let s = to_pretty(ppr_ast(&ast), 80);
        let depths: Vec<usize> = s
            .lines()
            .map(|l| l.chars().take_while(|c| *c == '.').count())
            .collect();
        depths.first() == Some(&0) && depths.windows(2).all(|w| w[1] <= w[0] + 1)
    }
}
