use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use jcheck::{Scanner, Validator};

const USAGE: &str = "Usage: jcheck <filename> or cat <filename> | jcheck";

/// Check whether the input is syntactically valid JSON.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// Print the token stream instead of validating.
    #[arg(short, long)]
    tokens: bool,

    /// JSON file to check. Reads piped standard input when omitted.
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let opts = Opts::parse();

    match run(&opts) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("jcheck: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Opts) -> Result<ExitCode> {
    let input: Box<dyn Read> = match &opts.file {
        Some(path) => {
            debug!("reading {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("unable to read file {}", path.display()))?;
            Box::new(file)
        }
        None if !io::stdin().is_terminal() => {
            debug!("reading standard input");
            Box::new(io::stdin().lock())
        }
        None => {
            println!("{}", USAGE);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut scanner = Scanner::new(input);
    if opts.tokens {
        return dump_tokens(&mut scanner);
    }

    match Validator::new().validate(&mut scanner) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // a read that fails partway is a verdict too, not a setup error
        Err(e) => {
            println!("Error: {}", e);
            println!("Invalid json.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn dump_tokens<R: Read>(scanner: &mut Scanner<R>) -> Result<ExitCode> {
    loop {
        match scanner.next_token() {
            Ok(tok) => {
                println!("{:?}", tok);
                if tok.is_eoi() {
                    return Ok(ExitCode::SUCCESS);
                }
            }
            Err(e) => {
                println!("Error: {} (at byte {})", e, scanner.offset());
                return Ok(ExitCode::FAILURE);
            }
        }
    }
}
