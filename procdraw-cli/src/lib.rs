#![deny(unused_crate_dependencies)]


use std::io;

use clap::Parser;
use procdraw_diagnostic::Diagnostic;
use run::{Config, InterpreterError};

use crate::version::VERSION;

pub mod repl;
pub mod run;
pub mod version;

fn report_interpreter_error(err: InterpreterError) -> io::Result<()> {
    let mut diagnostic = Diagnostic::new();
    err.report(&mut diagnostic);
    diagnostic.report_all()
}

#[derive(Parser)]
#[command(name = "procdraw", disable_version_flag = true)]
struct Cli {
    /// The file to run. Starts a REPL if omitted.
    filename: Option<String>,

    /// Print the value of each top-level form in the file.
    #[arg(long)]
    print: bool,

    /// Pretty-print values to fit within this many columns.
    #[arg(long)]
    margin: Option<usize>,

    /// Print the current version.
    #[arg(long = "version")]
    version: bool,
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert()
}

/// The entrypoint to the CLI.
///
/// It's defined in this library to avoid false positives associated with the
/// [`#![deny(unused_crate_dependencies)]` attribute](https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html#unused-crate-dependencies).
pub fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("procdraw {}", VERSION);
        return Ok(());
    }

    match cli.filename {
        Some(filename) => {
            let config = Config {
                filename,
                print: cli.print,
                margin: cli.margin,
                stdout: None,
            };
            match run::run_interpreter(config) {
                Ok(()) => Ok(()),
                Err(err) => {
                    report_interpreter_error(err)?;
                    std::process::exit(1)
                }
            }
        }
        None => repl::run(cli.margin),
    }
}
