//! the pipeline from source text to value, and the pieces the binaries
//! share.

use std::{fs, io::Write, sync::Once};

use rpal_concrete_syntax::{
    parse::parse_program,
    pretty::{ppr_ast, ppr_expr},
    util::pretty::to_pretty,
};
use rpal_core::{abstract_syntax::Ast, standard_syntax::Expr, standardize::standardize};

use crate::{
    config::Config,
    error::Error,
    eval::{eval, EvalState},
    value::Value,
};

static TRACING_INIT: Once = Once::new();

/// install a stderr log subscriber, only if `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

pub fn parse_source(src: &str) -> Result<Ast, Error> {
    let ast = parse_program(src)?;
    tracing::debug!("parsed program");
    Ok(ast)
}

pub fn standardize_source(src: &str) -> Result<Expr, Error> {
    let ast = parse_source(src)?;
    Ok(standardize(&ast)?)
}

/// run a program, sending anything it prints to `out`.
pub fn run_source(src: &str, cfg: &Config, out: &mut dyn Write) -> Result<Value, Error> {
    let expr = standardize_source(src)?;
    let mut es = EvalState::new(out, cfg.max_depth);
    Ok(eval(&mut es, &expr)?)
}

/// what the `rpal` binary does with its configuration: print the requested
/// trees, then run the program and end its output with a newline.
pub fn run_file(cfg: &Config, out: &mut dyn Write) -> Result<(), Error> {
    let src = match &cfg.path {
        Some(path) => fs::read_to_string(path)?,
        None => return Err(crate::config::ConfigError::MissingPath.into()),
    };
    let ast = parse_source(&src)?;
    if cfg.print_ast {
        write!(out, "{}", to_pretty(ppr_ast(&ast), cfg.width))?;
    }
    let expr = standardize(&ast)?;
    if cfg.print_st {
        write!(out, "{}", to_pretty(ppr_expr(&expr), cfg.width))?;
    }
    if cfg.no_out {
        return Ok(());
    }
    let mut es = EvalState::new(out, cfg.max_depth);
    eval(&mut es, &expr)?;
    writeln!(out)?;
    Ok(())
}

/// `run_file`, then flush `out`. output the program produced before failing
/// is flushed first, and a failed flush is an error like any other.
pub fn run_file_and_flush(cfg: &Config, out: &mut dyn Write) -> Result<(), Error> {
    let res = run_file(cfg, out);
    let flushed = out.flush();
    res?;
    flushed?;
    Ok(())
}
