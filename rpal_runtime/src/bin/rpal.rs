use std::{env, io, process};

use rpal_runtime::{
    config::{Config, USAGE},
    toplevel::{init_tracing, run_file_and_flush},
};

fn main() {
    init_tracing();

    let cfg = match Config::from_args(env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {}", err);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = run_file_and_flush(&cfg, &mut out) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
