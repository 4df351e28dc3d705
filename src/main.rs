use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;

use lispy::cli::{generate_completions, Args, Commands};
use lispy::config::{init_tracing, AppConfig, EXIT_RUNTIME, EXIT_SYNTAX, EXIT_USAGE};
use lispy::diagnostic::{render_diagnostics, Diagnostic};
use lispy::format::ValuePrinter;
use lispy::interpreter::{RuntimeError, Session};

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    if let Some(Commands::Complete { shell }) = args.command {
        generate_completions(shell);
        return;
    }

    let config = AppConfig::from_args(&args);
    init_tracing(config.verbose);

    match &args.script {
        Some(path) => process::exit(run_file(path, &config)),
        None => run_prompt(&config),
    }
}

/// Run a whole script and return the process exit status.
fn run_file(path: &Path, config: &AppConfig) -> i32 {
    tracing::debug!(path = %path.display(), "running script");
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            error_message(config, &format!("Failed to read {}: {}", path.display(), e));
            return EXIT_USAGE;
        }
    };
    let source = config.normalize(&source);

    let mut session = Session::new();
    let mut printer = ValuePrinter::new(io::stdout().lock());
    let result = session.run_with(&source, |value| printer.print(value));

    let file_name = path.display().to_string();
    report(config, &source, &file_name, &session, result.as_ref().err());

    if session.had_error() {
        EXIT_SYNTAX
    } else if result.is_err() {
        EXIT_RUNTIME
    } else {
        0
    }
}

fn run_prompt(config: &AppConfig) {
    tracing::debug!("entering REPL");
    let mut session = Session::new();
    let mut printer = ValuePrinter::new(io::stdout());
    let stdin = io::stdin();

    loop {
        print!(">>> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error_message(config, &format!("Error reading input: {}", e));
                break;
            }
        }

        let source = config.normalize(&line);
        match source.trim() {
            "" => continue,
            "exit" | "quit" => break,
            ":env" => {
                print_env(&session);
                continue;
            }
            _ => {}
        }

        let result = session.run_with(&source, |value| printer.print(value));
        report(config, &source, "repl", &session, result.as_ref().err());
        session.reset_diagnostics();
        if printer.failed() {
            break;
        }
    }
    println!();
}

fn print_env(session: &Session) {
    for (name, value) in session.interpreter().globals().bindings() {
        println!("{} = {}", name, value);
    }
}

/// Print the syntax errors recorded for this unit and the runtime error, if
/// any. Verbose mode adds the source excerpt under each.
fn report(config: &AppConfig, source: &str, file_name: &str, session: &Session, runtime: Option<&RuntimeError>) {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for err in session.diagnostics() {
        error_message(config, &err.to_string());
        diagnostics.push(err.to_diagnostic());
    }
    if let Some(err) = runtime {
        error_message(config, &err.to_string());
        diagnostics.push(err.to_diagnostic());
    }

    if config.verbose && !diagnostics.is_empty() {
        eprint!("{}", render_diagnostics(source, file_name, &diagnostics, config.color_enabled));
    }
}

fn error_message(config: &AppConfig, message: &str) {
    if config.color_enabled {
        eprintln!("{}", message.red().bold());
    } else {
        eprintln!("{}", message);
    }
}
