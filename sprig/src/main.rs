use clap::Parser;
use sprig::{read_source, render, Emit};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Tokenizes and parses sprig source, printing the result.
#[derive(Debug, Parser)]
#[command(name = "sprig", version)]
struct Cli {
    /// Source file to parse. Starts a line-by-line prompt when omitted.
    file: Option<PathBuf>,
    /// Output to print for each parsed source.
    #[arg(long, value_enum, default_value_t = Emit::Ast)]
    emit: Emit,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let code = match &cli.file {
        Some(path) => run_file(path, cli.emit),
        None => run_repl(cli.emit),
    };
    process::exit(code);
}

fn run_file(path: &Path, emit: Emit) -> i32 {
    log::info!("parsing {}", path.display());
    match read_source(path).and_then(|source| render(&source, emit)) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(err) => {
            eprintln!("{}: error: {}", path.display(), err);
            1
        }
    }
}

fn run_repl(emit: Emit) -> i32 {
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    let mut lines = stdin.lock();
    loop {
        print!("> ");
        if stdout.flush().is_err() {
            return 1;
        }

        let mut input = String::new();
        match lines.read_line(&mut input) {
            Ok(0) => return 0,
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: {}", err);
                return 1;
            }
        }

        let source = input.trim_end();
        if source.is_empty() {
            continue;
        }
        match render(source, emit) {
            Ok(output) => println!("{}", output),
            Err(err) => eprintln!("error: {}", err),
        }
    }
}
