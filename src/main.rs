#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::process;

use minish::builtins::{self, BuiltinOutcome};
use minish::executor;
use minish::expansion;
use minish::lexer;
use minish::parser::{self, CommandLine};
use minish::runtime::Runtime;
use minish::signal::SignalPolicy;

/// The read–expand–parse–dispatch cycle.
///
/// Each iteration first reports background children that finished since
/// the last prompt, then reads one line and dispatches it. Every error
/// except spawn resource exhaustion is contained to its own cycle.
fn main() -> Result<()> {
    let signals = SignalPolicy::install()?;
    let mut runtime = Runtime::new();
    let pid = process::id();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        runtime.report_finished_jobs();

        print!(": ");
        io::stdout().flush()?;

        let raw = match lines.next() {
            Some(line) => line?,
            // EOF behaves like `exit`.
            None => break,
        };

        if parser::is_comment(&raw) {
            continue;
        }

        let line = match expansion::expand_pid_marker(&raw, pid) {
            Ok(line) => line,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };

        let tokens = match lexer::tokenize(&line) {
            Ok(tokens) => tokens,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };

        let command = match parser::classify(tokens, signals.foreground_only()) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };

        match command {
            CommandLine::Empty => continue,
            CommandLine::Builtin(builtin) => {
                if builtins::dispatch(&builtin, &mut runtime) == BuiltinOutcome::Exit {
                    return Ok(());
                }
            }
            CommandLine::External(external) => {
                let result = if external.background {
                    executor::run_background(&external, &mut runtime)
                } else {
                    executor::run_foreground(&external, &mut runtime)
                };
                if let Err(err) = result {
                    eprintln!("{}", err);
                    process::exit(1);
                }
            }
        }
    }

    runtime.jobs().terminate_all();
    Ok(())
}
