//! the file runner, driven through each flag combination.

use pretty_assertions::assert_eq;
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tempfile::NamedTempFile;

use crate::{
    config::Config,
    error::{Error, ErrorKind},
    toplevel::{run_file, run_file_and_flush},
};

const PROGRAM: &str = "let x = 3 in Print (x + 2)";

const AST_TREE: &str = "\
let
.=
..<ID:x>
..<INT:3>
.gamma
..<ID:Print>
..+
...<ID:x>
...<INT:2>
";

const ST_TREE: &str = "\
gamma
.lambda
..<ID:x>
..gamma
...<ID:Print>
...+
....<ID:x>
....<INT:2>
.<INT:3>
";

fn source_file(src: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", src).unwrap();
    file
}

fn run_with(file: &NamedTempFile, flags: impl FnOnce(&mut Config)) -> (Result<(), Error>, String) {
    let mut cfg = Config {
        path: Some(file.path().to_path_buf()),
        ..Config::default()
    };
    flags(&mut cfg);
    let mut out = Vec::new();
    let res = run_file(&cfg, &mut out);
    (res, String::from_utf8(out).unwrap())
}

#[test]
fn output_ends_with_a_newline() {
    let file = source_file(PROGRAM);
    let (res, out) = run_with(&file, |_| ());
    res.unwrap();
    assert_eq!(out, "5\n");
}

#[test]
fn final_value_is_not_printed() {
    let file = source_file("1 + 1");
    let (res, out) = run_with(&file, |_| ());
    res.unwrap();
    assert_eq!(out, "\n");
}

#[test]
fn ast_tree_comes_before_output() {
    let file = source_file(PROGRAM);
    let (res, out) = run_with(&file, |cfg| cfg.print_ast = true);
    res.unwrap();
    assert_eq!(out, format!("{}5\n", AST_TREE));
}

#[test]
fn st_tree_comes_before_output() {
    let file = source_file(PROGRAM);
    let (res, out) = run_with(&file, |cfg| cfg.print_st = true);
    res.unwrap();
    assert_eq!(out, format!("{}5\n", ST_TREE));
}

#[test]
fn both_trees_in_order() {
    let file = source_file(PROGRAM);
    let (res, out) = run_with(&file, |cfg| {
        cfg.print_ast = true;
        cfg.print_st = true;
    });
    res.unwrap();
    assert_eq!(out, format!("{}{}5\n", AST_TREE, ST_TREE));
}

#[test]
fn noout_prints_trees_only() {
    let file = source_file(PROGRAM);
    let (res, out) = run_with(&file, |cfg| {
        cfg.print_st = true;
        cfg.no_out = true;
    });
    res.unwrap();
    assert_eq!(out, ST_TREE);

    let (res, out) = run_with(&file, |cfg| {
        cfg.print_ast = true;
        cfg.no_out = true;
    });
    res.unwrap();
    assert_eq!(out, AST_TREE);
}

#[test]
fn noout_skips_runtime_errors() {
    let file = source_file("1 / 0");
    let (res, out) = run_with(&file, |cfg| cfg.no_out = true);
    res.unwrap();
    assert_eq!(out, "");
}

#[test]
fn output_before_an_error_is_kept_without_newline() {
    let file = source_file("(fn x. 1 / 0) (Print 'partial')");
    let (res, out) = run_with(&file, |_| ());
    assert!(matches!(res, Err(Error::Eval(_))));
    assert_eq!(out, "partial");
}

#[test]
fn ast_is_printed_even_if_standardizing_fails() {
    let file = source_file("let rec x = 1 in x");
    let (res, out) = run_with(&file, |cfg| cfg.print_ast = true);
    assert!(matches!(res, Err(Error::Standardize(_))));
    assert!(out.starts_with("let\n.rec\n"), "got {:?}", out);
}

#[test]
fn missing_file_is_an_io_error() {
    let cfg = Config {
        path: Some(PathBuf::from("/nonexistent/prog.rpal")),
        ..Config::default()
    };
    let mut out = Vec::new();
    assert!(matches!(run_file(&cfg, &mut out), Err(Error::Io(_))));
}

#[test]
fn no_path_is_a_config_error() {
    let mut out = Vec::new();
    assert!(matches!(
        run_file(&Config::default(), &mut out),
        Err(Error::Config(_))
    ));
}

/// accepts every write, then refuses to flush.
struct UnflushableSink(Vec<u8>);

impl Write for UnflushableSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "device full"))
    }
}

#[test]
fn flush_failure_is_reported() {
    let file = source_file("1 + 1");
    let cfg = Config {
        path: Some(file.path().to_path_buf()),
        ..Config::default()
    };
    let mut sink = UnflushableSink(Vec::new());
    assert!(matches!(run_file_and_flush(&cfg, &mut sink), Err(Error::Io(_))));
    assert_eq!(sink.0, b"\n");
}

#[test]
fn print_reports_flush_failure_as_output_error() {
    let file = source_file(PROGRAM);
    let cfg = Config {
        path: Some(file.path().to_path_buf()),
        ..Config::default()
    };
    let mut sink = UnflushableSink(Vec::new());
    match run_file_and_flush(&cfg, &mut sink) {
        Err(Error::Eval(err)) => assert_eq!(err.kind(), ErrorKind::Output),
        other => panic!("expected an output error, got {:?}", other),
    }
}

#[test]
fn flushing_run_matches_plain_run() {
    let file = source_file(PROGRAM);
    let cfg = Config {
        path: Some(file.path().to_path_buf()),
        print_st: true,
        ..Config::default()
    };
    let mut out = Vec::new();
    run_file_and_flush(&cfg, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{}5\n", ST_TREE));
}
