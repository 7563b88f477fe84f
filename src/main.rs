use std::{env, io, process};

use lox_lang::Lox;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut stdout = io::stdout();
    let mut lox = Lox::new(&mut stdout);

    match args.len() {
        n if n > 2 => {
            println!("Usage: lox [script]");
            process::exit(64);
        },
        2 => {
            if let Err(error) = lox.run_file(&args[1]) {
                eprintln!("Could not read {}: {error}", args[1]);
                process::exit(66);
            }

            if lox.had_error() {
                process::exit(65);
            }
            if lox.had_runtime_error() {
                process::exit(70);
            }
        },
        _ => {
            if let Err(error) = lox.run_prompt() {
                eprintln!("{error}");
                process::exit(74);
            }
        },
    };
}
