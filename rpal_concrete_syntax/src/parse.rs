//! parsing concrete syntax to sugared abstract syntax.
//!
//! there is no separate tokenizer: whitespace, `//` comments, keywords and
//! operator symbols are handled by the combinators themselves.

use combine::error::{ParseError, StreamError};
use combine::parser::char::{alpha_num, char, digit, letter, space, string};
use combine::stream::{
    position::{self, SourcePosition},
    Stream, StreamErrorFor,
};
use combine::{
    any, attempt, between, choice, eof, many, many1, not_followed_by, one_of, optional, parser,
    position, satisfy, skip_many, EasyParser, Parser, Positioned,
};
use thiserror::Error;

use rpal_core::{abstract_syntax::*, gamma};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("syntax error: {message}")]
pub struct SyntaxError {
    pub line: i32,
    pub column: i32,
    pub message: String,
}

/// parse a whole program: exactly one expression, surrounded by optional
/// whitespace and comments.
pub fn parse_program(src: &str) -> Result<Ast, SyntaxError> {
    match program().easy_parse(position::Stream::new(src)) {
        Ok((ast, _)) => Ok(ast),
        Err(err) => Err(SyntaxError {
            line: err.position.line,
            column: err.position.column,
            message: err.to_string(),
        }),
    }
}

pub fn program_<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    // Necessary due to rust-lang/rust#24159
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    skip_spaces().with(expr()).skip(eof())
}

parser! {
    pub fn program[Input]()(Input) -> Ast
    where [Input: Stream<Token = char, Position = SourcePosition>]
    {
        program_()
    }
}

////////////////////////////////////////////////////////////////////////////////
// expressions
////////////////////////////////////////////////////////////////////////////////

// E -> 'let' D 'in' E | 'fn' Vb+ '.' E | Ew
pub fn expr_<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let let_ = (res_str("let"), defn(), res_str("in"), expr())
        .map(|t| Ast::Let(Box::new(t.1), Box::new(t.3)));

    let lambda = (
        res_str("fn"),
        many1::<Vec<_>, _, _>(vb()),
        res_op("."),
        expr(),
    )
        .map(|t| Ast::Lambda(t.1, Box::new(t.3)));

    // Ew -> T 'where' Dr | T
    let where_ = (tuple_expr(), optional((res_str("where"), rec_defn()))).map(|t| match t.1 {
        Some((_, dr)) => Ast::Where(Box::new(t.0), Box::new(dr)),
        None => t.0,
    });

    choice((let_, lambda, where_))
}

// As this expression parser needs to be able to call itself recursively `impl Parser` can't
// be used on its own as that would cause an infinitely large type. We can avoid this by using
// the `parser!` macro which erases the inner type and the size of that type entirely which
// lets it be used recursively.
parser! {
    pub fn expr[Input]()(Input) -> Ast
    where [Input: Stream<Token = char, Position = SourcePosition>]
    {
        expr_()
    }
}

// T -> Ta ( ',' Ta )+ | Ta
fn tuple_expr<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (aug_expr(), many::<Vec<_>, _, _>(lex_char(',').with(aug_expr()))).map(|(first, rest)| {
        if rest.is_empty() {
            first
        } else {
            let mut elems = vec![first];
            elems.extend(rest);
            Ast::Tau(elems)
        }
    })
}

// Ta -> Ta 'aug' Tc | Tc
fn aug_expr<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (cond_expr(), many::<Vec<_>, _, _>(res_str("aug").with(cond_expr()))).map(|(first, rest)| {
        rest.into_iter()
            .fold(first, |acc, x| Ast::Aug(Box::new(acc), Box::new(x)))
    })
}

// Tc -> B '->' Tc '|' Tc | B
fn cond_expr_<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let arms = (res_op("->"), cond_expr(), res_op("|"), cond_expr());
    (bool_expr(), optional(arms)).map(|t| match t.1 {
        Some((_, thn, _, els)) => Ast::Cond(Box::new(t.0), Box::new(thn), Box::new(els)),
        None => t.0,
    })
}

parser! {
    fn cond_expr[Input]()(Input) -> Ast
    where [Input: Stream<Token = char, Position = SourcePosition>]
    {
        cond_expr_()
    }
}

// B -> B 'or' Bt | Bt
// Bt -> Bt '&' Bs | Bs
// Bs -> 'not' Bp | Bp
fn bool_expr_<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (conjunction(), many::<Vec<_>, _, _>(res_str("or").with(conjunction())))
        .map(|(first, rest)| fold_binop(BinOp::Or, first, rest))
}

parser! {
    fn bool_expr[Input]()(Input) -> Ast
    where [Input: Stream<Token = char, Position = SourcePosition>]
    {
        bool_expr_()
    }
}

fn conjunction<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (negation(), many::<Vec<_>, _, _>(res_op("&").with(negation())))
        .map(|(first, rest)| fold_binop(BinOp::And, first, rest))
}

fn negation<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    choice((
        res_str("not")
            .with(comparison())
            .map(|e| Ast::UnOp(UnOp::Not, Box::new(e))),
        comparison(),
    ))
}

// Bp -> A ( 'gr' | '>' | 'ge' | '>=' | 'ls' | '<' | 'le' | '<=' | 'eq' | 'ne' ) A | A
fn comparison<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let rel_op = choice((
        choice((res_str("gr"), res_op(">"))).map(|_| BinOp::Gr),
        choice((res_str("ge"), res_op(">="))).map(|_| BinOp::Ge),
        choice((res_str("ls"), res_op("<"))).map(|_| BinOp::Ls),
        choice((res_str("le"), res_op("<="))).map(|_| BinOp::Le),
        res_str("eq").map(|_| BinOp::Eq),
        res_str("ne").map(|_| BinOp::Ne),
    ));
    (arith(), optional((rel_op, arith()))).map(|t| match t.1 {
        Some((op, rhs)) => Ast::BinOp(op, Box::new(t.0), Box::new(rhs)),
        None => t.0,
    })
}

// A -> A '+' At | A '-' At | '+' At | '-' At | At
fn arith_<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let sign = optional(choice((
        res_op("+").map(|_| false),
        res_op("-").map(|_| true),
    )));
    let add_op = choice((
        res_op("+").map(|_| BinOp::Add),
        res_op("-").map(|_| BinOp::Sub),
    ));
    (sign, term(), many::<Vec<_>, _, _>((add_op, term()))).map(|(sign, first, rest)| {
        let first = match sign {
            Some(true) => Ast::UnOp(UnOp::Neg, Box::new(first)),
            _ => first,
        };
        fold_ops(first, rest)
    })
}

parser! {
    fn arith[Input]()(Input) -> Ast
    where [Input: Stream<Token = char, Position = SourcePosition>]
    {
        arith_()
    }
}

// At -> At '*' Af | At '/' Af | Af
fn term<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let mul_op = choice((
        res_op("*").map(|_| BinOp::Mul),
        res_op("/").map(|_| BinOp::Div),
    ));
    (power(), many::<Vec<_>, _, _>((mul_op, power())))
        .map(|(first, rest)| fold_ops(first, rest))
}

// Af -> Ap '**' Af | Ap
fn power<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (at_expr(), many::<Vec<_>, _, _>(res_op("**").with(at_expr()))).map(|(first, rest)| {
        // `**` associates to the right: a ** b ** c is a ** (b ** c).
        let mut rest = rest.into_iter().rev();
        match rest.next() {
            None => first,
            Some(last) => {
                let tail = rest.fold(last, |acc: Ast, x: Ast| {
                    Ast::BinOp(BinOp::Pow, Box::new(x), Box::new(acc))
                });
                Ast::BinOp(BinOp::Pow, Box::new(first), Box::new(tail))
            }
        }
    })
}

// Ap -> Ap '@' <ID> R | R
fn at_expr<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let infix = (res_op("@"), name(), rator());
    (rator(), many::<Vec<_>, _, _>(infix)).map(|(first, rest)| {
        rest.into_iter().fold(first, |acc: Ast, (_, nm, arg): (&str, Name, Ast)| {
            Ast::At(Box::new(acc), nm, Box::new(arg))
        })
    })
}

// R -> R Rn | Rn
fn rator_<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (rand(), many::<Vec<_>, _, _>(rand()))
        .map(|(head, args)| args.into_iter().fold(head, |f: Ast, arg: Ast| gamma!(f, arg)))
}

parser! {
    fn rator[Input]()(Input) -> Ast
    where [Input: Stream<Token = char, Position = SourcePosition>]
    {
        rator_()
    }
}

// Rn -> <ID> | <INT> | <STR> | 'true' | 'false' | 'nil' | 'dummy' | '(' E ')'
fn rand<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let lit = choice((
        res_str("true").map(|_| Lit::LBool(true)),
        res_str("false").map(|_| Lit::LBool(false)),
        res_str("nil").map(|_| Lit::LNil),
        res_str("dummy").map(|_| Lit::LDummy),
        integer().map(Lit::LInt),
        string_lit().map(Lit::LStr),
    ))
    .map(Ast::Lit);

    choice((
        lit,
        name().map(Ast::Ident),
        between(lex_char('('), lex_char(')'), expr()),
    ))
}

////////////////////////////////////////////////////////////////////////////////
// definitions
////////////////////////////////////////////////////////////////////////////////

// D -> Da 'within' D | Da
// Da -> Dr ( 'and' Dr )+ | Dr
pub fn defn_<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let simultaneous =
        (rec_defn(), many::<Vec<_>, _, _>(res_str("and").with(rec_defn()))).map(|(first, rest)| {
            if rest.is_empty() {
                first
            } else {
                let mut drs = vec![first];
                drs.extend(rest);
                Ast::And(drs)
            }
        });
    (simultaneous, optional(res_str("within").with(defn()))).map(|t| match t.1 {
        Some(d) => Ast::Within(Box::new(t.0), Box::new(d)),
        None => t.0,
    })
}

parser! {
    pub fn defn[Input]()(Input) -> Ast
    where [Input: Stream<Token = char, Position = SourcePosition>]
    {
        defn_()
    }
}

// Dr -> 'rec' Db | Db
fn rec_defn<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    choice((
        res_str("rec").with(basic_defn()).map(|d| Ast::Rec(Box::new(d))),
        basic_defn(),
    ))
}

enum DefnTail {
    FcnForm(Vec<Ast>, Ast),
    Assign(Vec<Name>, Ast),
}

// Db -> Vl '=' E | '(' Vl ')' '=' E | <ID> Vb+ '=' E | '(' D ')'
fn basic_defn<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    // both named forms start with an identifier; what follows it decides
    // between a function form and a variable list.
    let tail = choice((
        (many1::<Vec<_>, _, _>(vb()), res_op("="), expr()).map(|t| DefnTail::FcnForm(t.0, t.2)),
        (
            many::<Vec<_>, _, _>(lex_char(',').with(name())),
            res_op("="),
            expr(),
        )
            .map(|t| DefnTail::Assign(t.0, t.2)),
    ));
    let named = (name(), tail).map(|(nm, tail)| match tail {
        DefnTail::FcnForm(vbs, e) => Ast::FcnForm(nm, vbs, Box::new(e)),
        DefnTail::Assign(rest, e) => Ast::Assign(Box::new(var_list(nm, rest)), Box::new(e)),
    });

    // `(a, b) = E` must be told apart from a parenthesized definition
    // before anything is committed to.
    let pattern = attempt((
        lex_char('('),
        name(),
        many::<Vec<_>, _, _>(lex_char(',').with(name())),
        lex_char(')'),
        res_op("="),
    ));
    let tuple_assign = (pattern, expr())
        .map(|((_, first, rest, _, _), e)| Ast::Assign(Box::new(var_list(first, rest)), Box::new(e)));

    choice((
        tuple_assign,
        between(lex_char('('), lex_char(')'), defn()),
        named,
    ))
}

// Vb -> <ID> | '(' Vl ')' | '(' ')'
fn vb<Input>() -> impl Parser<Input, Output = Ast>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let vl = (name(), many::<Vec<_>, _, _>(lex_char(',').with(name())))
        .map(|(first, rest)| var_list(first, rest));
    let parenthesized = choice((
        lex_char(')').map(|_| Ast::EmptyParens),
        vl.skip(lex_char(')')),
    ));
    choice((name().map(Ast::Ident), lex_char('(').with(parenthesized)))
}

////////////////////////////////////////////////////////////////////////////////
// helpers
////////////////////////////////////////////////////////////////////////////////

fn var_list(first: Name, rest: Vec<Name>) -> Ast {
    if rest.is_empty() {
        Ast::Ident(first)
    } else {
        let nms = std::iter::once(first).chain(rest).map(Ast::Ident).collect();
        Ast::Comma(nms)
    }
}

fn fold_binop(op: BinOp, first: Ast, rest: Vec<Ast>) -> Ast {
    rest.into_iter()
        .fold(first, |acc, x| Ast::BinOp(op, Box::new(acc), Box::new(x)))
}

fn fold_ops(first: Ast, rest: Vec<(BinOp, Ast)>) -> Ast {
    rest.into_iter()
        .fold(first, |acc, (op, x)| Ast::BinOp(op, Box::new(acc), Box::new(x)))
}

const OPERATOR_SYMBOLS: &str = "+-*<>&.@/:=~|$!#%^_[]{}\"`?";

// Creates a parser which parses a char and skips any trailing whitespace
fn lex_char<Input>(c: char) -> impl Parser<Input, Output = char>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    char(c).skip(skip_spaces())
}

// A parser which skips past whitespace and `//` comments.
// Since we aren't interested in knowing that our expression parser
// could have accepted additional whitespace between the tokens we also silence the error.
fn skip_spaces<Input>() -> impl Parser<Input, Output = ()>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let comment = (attempt(string("//")), skip_many(satisfy(|c| c != '\n'))).map(|_| ());
    skip_many(choice((space().map(|_| ()), comment))).silent()
}

fn ident_char<Input>() -> impl Parser<Input, Output = char>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    choice((alpha_num(), char('_')))
}

fn integer<Input>() -> impl Parser<Input, Output = i64>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    attempt(many1::<String, _, _>(digit()).and_then(|s: String| {
        s.parse::<i64>().map_err(|_| {
            StreamErrorFor::<Input>::message_format(format!("integer literal out of range: {}", s))
        })
    }))
    .skip(skip_spaces())
}

// the literal keeps its quotes and escapes verbatim.
fn string_lit<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    let escaped = (char('\\'), any()).map(|(_, c): (char, char)| format!("\\{}", c));
    let plain = satisfy(|c| c != '\'' && c != '\\').map(|c: char| c.to_string());
    between(
        char('\''),
        lex_char('\''),
        many::<Vec<String>, _, _>(choice((escaped, plain))),
    )
    .map(|parts| format!("'{}'", parts.concat()))
}

// a keyword: must not run on into an identifier.
fn res_str<Input>(x: &'static str) -> impl Parser<Input, Output = &'static str>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    attempt(string(x).skip(not_followed_by(ident_char()))).skip(skip_spaces())
}

// an operator: must not run on into a longer operator, so `-` never
// matches the start of `->`.
fn res_op<Input>(x: &'static str) -> impl Parser<Input, Output = &'static str>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    attempt(string(x).skip(not_followed_by(one_of(OPERATOR_SYMBOLS.chars()))))
        .skip(skip_spaces())
}

pub fn reserved() -> Vec<String> {
    [
        "let", "in", "fn", "where", "aug", "or", "not", "gr", "ge", "ls", "le", "eq", "ne",
        "true", "false", "nil", "dummy", "within", "and", "rec",
    ]
    .iter()
    .map(|x| x.to_string())
    .collect()
}

fn name<Input>() -> impl Parser<Input, Output = Name>
where
    Input: Stream<Token = char, Position = SourcePosition>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    Input: Positioned,
{
    attempt(
        (
            position(),
            letter(),
            many::<String, _, _>(ident_char()),
        )
            .and_then(|t: (SourcePosition, char, String)| {
                let pos = t.0;
                let mut s = t.2;
                s.insert(0, t.1);
                if reserved().contains(&s) {
                    Err(StreamErrorFor::<Input>::unexpected_format(format!(
                        "reserved keyword: {} at location {}:{}",
                        s, pos.line, pos.column
                    )))
                } else {
                    Ok(Name(s))
                }
            }),
    )
    .skip(skip_spaces())
}
