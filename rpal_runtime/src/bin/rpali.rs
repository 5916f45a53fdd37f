use rustyline::{error::ReadlineError, Editor};

use rpal_runtime::{
    config::Config,
    toplevel::{init_tracing, run_source},
};

const BANNER: &str = r#"
                     __
   _________  ____ _/ /
  / ___/ __ \/ __ `/ /
 / /  / /_/ / /_/ / /
/_/  / .___/\__,_/_/
    /_/

"#;

fn main() {
    init_tracing();
    println!("{}", BANNER);

    let cfg = Config::default();
    let mut rl = Editor::<()>::new();
    loop {
        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str());
                let mut printed = Vec::new();
                let res = run_source(&line, &cfg, &mut printed);
                if !printed.is_empty() {
                    println!("{}", String::from_utf8_lossy(&printed));
                }
                match res {
                    Ok(val) => println!("{}", val),
                    Err(err) => println!("error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!("\nbye!");
                break;
            }
            Err(err) => {
                println!("error: {:?}", err);
                break;
            }
        }
    }
}
