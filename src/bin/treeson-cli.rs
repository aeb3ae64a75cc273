//! treeson CLI - validate and reformat JSON documents.
//!
//! `check` parses a document and prints a machine-readable diagnostic report,
//! itself JSON built with this crate's own value tree and writer. `fmt`
//! parses and re-emits the document pretty-printed or minimized.
//!
//! # Usage
//!
//! ```bash
//! treeson-cli check <filepath>
//! treeson-cli check --stdin
//! treeson-cli fmt --minimize <filepath>
//! treeson-cli fmt <filepath> -o out.json
//! ```
//!
//! # Report format
//!
//! ```json
//! {
//!     "success": false,
//!     "error": {
//!         "kind": "unexpected_byte",
//!         "pos": 7,
//!         "line": 1,
//!         "message": "...multi-line caret diagnostic...",
//!         "hint": "Remove the extra comma; ..."
//!     },
//!     "version": "0.1.0"
//! }
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use treeson::{parse, serialize, Format, Value};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a document and print a JSON diagnostic report
    Check {
        /// Input file path (omit for stdin)
        file: Option<PathBuf>,

        /// Read from stdin instead of a file
        #[arg(long)]
        stdin: bool,
    },

    /// Parse a document and re-emit it
    Fmt {
        /// Input file path (omit for stdin)
        file: Option<PathBuf>,

        /// Read from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Emit minimized output instead of pretty-printed
        #[arg(long)]
        minimize: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, stdin } => {
            let text = match read_input(file, stdin) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error reading input: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let report = check_report(&text);
            let ok = report["success"].as_bool() == Some(true);
            println!("{}", serialize(&report, Format::Pretty));
            if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Fmt {
            file,
            stdin,
            minimize,
            output,
        } => {
            let text = match read_input(file, stdin) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error reading input: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let value = match parse(&text) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("{e}");
                    return ExitCode::FAILURE;
                }
            };
            let format = if minimize {
                Format::Minimized
            } else {
                Format::Pretty
            };
            let mut rendered = serialize(&value, format);
            rendered.push('\n');
            match output {
                Some(path) => {
                    if let Err(e) = fs::write(&path, rendered) {
                        eprintln!("Error writing {}: {e}", path.display());
                        return ExitCode::FAILURE;
                    }
                }
                None => {
                    let _ = io::stdout().write_all(rendered.as_bytes());
                }
            }
            ExitCode::SUCCESS
        }
    }
}

/// Build the `check` report as a value tree.
fn check_report(text: &str) -> Value {
    let mut report = Value::Null;
    match parse(text) {
        Ok(_) => {
            report["success"] = Value::from(true);
        }
        Err(e) => {
            report["success"] = Value::from(false);
            let mut detail = Value::Null;
            if let Some(parse_error) = e.as_parse() {
                detail["kind"] = Value::from(parse_error.kind.name());
                detail["pos"] = Value::from(parse_error.pos);
                detail["line"] = Value::from(parse_error.line);
                detail["hint"] = Value::from(parse_error.hint.clone());
            }
            detail["message"] = Value::from(e.to_string());
            report["error"] = detail;
        }
    }
    report["version"] = Value::from(env!("CARGO_PKG_VERSION"));
    report
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> io::Result<String> {
    match file {
        Some(path) if !stdin => fs::read_to_string(path),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
