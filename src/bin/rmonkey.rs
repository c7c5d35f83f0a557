//! Monkey interpreter command-line.
//!
//! When called without argument it drops into an interactive
//! read-evaluate-print loop.
//!
//! When called with arguments, it interprets the corresponding files in a
//! single interpreter session (so definitions are shared between files).

use std::env;
use std::fs;
use std::io;

use anyhow::{self, Context};

use rmonkey::interpreter::Interpreter;
use rmonkey::repl;

fn main() -> Result<(), anyhow::Error> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    if !args.is_empty() {
        run_all_files(args)?;
    } else {
        let stdin = io::stdin();
        repl::start(stdin.lock(), io::stdout())?;
    }
    Ok(())
}

fn run_all_files(paths: Vec<String>) -> Result<(), anyhow::Error> {
    let mut interp = Interpreter::new();

    for p in &paths {
        let source =
            fs::read_to_string(p).with_context(|| format!("failed to read {}", p))?;
        if let Some(obj) = interp.eval(&source)? {
            println!("{}", obj);
        }
    }

    Ok(())
}
