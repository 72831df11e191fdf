use std::path::PathBuf;

use clap::Parser;
use rlox::{Lox, EX_USAGE};

/// A tree-walking interpreter for Lox.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to run. Starts an interactive prompt when omitted.
    script: Option<PathBuf>,

    /// Print the syntax tree of the program instead of running it.
    #[arg(long)]
    print_ast: bool,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            e.print()?;
            std::process::exit(EX_USAGE);
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    let mut lox = Lox::new().with_ast_printing(args.print_ast);
    match args.script {
        Some(filename) => match lox.run_file(&filename)? {
            0 => Ok(()),
            code => std::process::exit(code),
        },
        None => lox.run_prompt(),
    }
}
