use pretty_assertions::assert_eq;
use std::path::PathBuf;

use crate::{
    config::{Config, ConfigError, MAX_DEPTH_VAR},
    eval::DEFAULT_MAX_DEPTH,
};

fn args(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|x| x.to_string()).collect()
}

fn parse(xs: &[&str]) -> Result<Config, ConfigError> {
    Config::from_args_and_env(args(xs), None)
}

#[test]
fn path_only() {
    let cfg = parse(&["prog.rpal"]).unwrap();
    assert_eq!(
        cfg,
        Config {
            path: Some(PathBuf::from("prog.rpal")),
            ..Config::default()
        }
    );
    assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn flags_in_any_order() {
    let cfg = parse(&["-st", "prog.rpal", "-ast", "-noout"]).unwrap();
    assert!(cfg.print_ast);
    assert!(cfg.print_st);
    assert!(cfg.no_out);
}

#[test]
fn depth_flag() {
    let cfg = parse(&["-depth", "123", "prog.rpal"]).unwrap();
    assert_eq!(cfg.max_depth, 123);
}

#[test]
fn depth_from_environment() {
    let cfg = Config::from_args_and_env(args(&["prog.rpal"]), Some("77".to_string())).unwrap();
    assert_eq!(cfg.max_depth, 77);
}

#[test]
fn depth_flag_beats_environment() {
    let cfg = Config::from_args_and_env(args(&["-depth", "5", "prog.rpal"]), Some("77".to_string()))
        .unwrap();
    assert_eq!(cfg.max_depth, 5);
}

#[test]
fn bad_depths() {
    assert_eq!(
        parse(&["-depth", "0", "prog.rpal"]),
        Err(ConfigError::BadNumber {
            source_name: "-depth".to_string(),
            value: "0".to_string(),
        })
    );
    assert!(matches!(
        parse(&["-depth", "lots", "prog.rpal"]),
        Err(ConfigError::BadNumber { .. })
    ));
    assert_eq!(
        parse(&["prog.rpal", "-depth"]),
        Err(ConfigError::MissingValue("-depth"))
    );
    assert_eq!(
        Config::from_args_and_env(args(&["prog.rpal"]), Some("-1".to_string())),
        Err(ConfigError::BadNumber {
            source_name: MAX_DEPTH_VAR.to_string(),
            value: "-1".to_string(),
        })
    );
}

#[test]
fn bad_arguments() {
    assert_eq!(parse(&[]), Err(ConfigError::MissingPath));
    assert_eq!(parse(&["-ast"]), Err(ConfigError::MissingPath));
    assert_eq!(
        parse(&["-l", "prog.rpal"]),
        Err(ConfigError::UnknownFlag("-l".to_string()))
    );
    assert_eq!(
        parse(&["a.rpal", "b.rpal"]),
        Err(ConfigError::DuplicatePath("b.rpal".to_string()))
    );
}
