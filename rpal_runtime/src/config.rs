//! run options, read from the command line.

use std::{env, path::PathBuf};
use thiserror::Error;

use crate::eval::DEFAULT_MAX_DEPTH;

pub const MAX_DEPTH_VAR: &str = "RPAL_MAX_DEPTH";

pub const USAGE: &str = "usage: rpal [-ast] [-st] [-noout] [-depth N] <file>";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
    #[error("no input file given")]
    MissingPath,
    #[error("more than one input file given: {0}")]
    DuplicatePath(String),
    #[error("flag {0} needs a value")]
    MissingValue(&'static str),
    #[error("{source_name} must be a positive integer, got {value:?}")]
    BadNumber { source_name: String, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub path: Option<PathBuf>,
    /// print the sugared tree before running.
    pub print_ast: bool,
    /// print the standardized tree before running.
    pub print_st: bool,
    /// print trees only, do not evaluate.
    pub no_out: bool,
    pub max_depth: usize,
    pub width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            path: None,
            print_ast: false,
            print_st: false,
            no_out: false,
            max_depth: DEFAULT_MAX_DEPTH,
            width: 80,
        }
    }
}

impl Config {
    /// parse the arguments following the program name, taking the default
    /// depth from `RPAL_MAX_DEPTH` when it is set.
    pub fn from_args<I>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Config::from_args_and_env(args, env::var(MAX_DEPTH_VAR).ok())
    }

    pub fn from_args_and_env<I>(args: I, env_depth: Option<String>) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cfg = Config::default();
        if let Some(value) = env_depth {
            cfg.max_depth = parse_depth(MAX_DEPTH_VAR, value)?;
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-ast" => cfg.print_ast = true,
                "-st" => cfg.print_st = true,
                "-noout" => cfg.no_out = true,
                "-depth" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("-depth"))?;
                    cfg.max_depth = parse_depth("-depth", value)?;
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(ConfigError::UnknownFlag(flag.to_string()));
                }
                _ => match cfg.path {
                    Some(_) => return Err(ConfigError::DuplicatePath(arg)),
                    None => cfg.path = Some(PathBuf::from(arg)),
                },
            }
        }

        match cfg.path {
            Some(_) => Ok(cfg),
            None => Err(ConfigError::MissingPath),
        }
    }
}

fn parse_depth(source_name: &str, value: String) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::BadNumber {
            source_name: source_name.to_string(),
            value,
        }),
    }
}
