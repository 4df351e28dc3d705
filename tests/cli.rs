mod common;

use common::TempScript;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn get_lispy_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lispy"))
}

fn run_script(name: &str, content: &str, extra_args: &[&str]) -> Output {
    let script = TempScript::new(name, content).expect("Failed to create script");
    get_lispy_binary()
        .arg(script.path())
        .arg("--color")
        .arg("never")
        .args(extra_args)
        .output()
        .expect("Failed to execute lispy")
}

fn run_repl(input: &str) -> Output {
    let mut child = get_lispy_binary()
        .arg("--color")
        .arg("never")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn lispy");

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes()).unwrap();
        stdin.flush().unwrap();
    }

    child.wait_with_output().expect("Failed to read output")
}

#[test]
fn test_version_flag() {
    let output = get_lispy_binary()
        .arg("--version")
        .output()
        .expect("Failed to execute lispy");

    assert!(output.status.success(), "Version flag should succeed");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("lispy"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_script_prints_each_value() {
    let output = run_script(
        "prints",
        "(define (square x) (* x x))\n(square 4)\n(+ \"ab\" \"cd\")\n(cdr (1 2 3))\n",
        &[],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "16\nabcd\n(2 3)\n");
}

#[test]
fn test_script_is_lower_cased() {
    let output = run_script("case", "(SET X 2)\n(* X 21)\n", &[]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "42\n");
}

#[test]
fn test_preserve_case_keeps_symbols_distinct() {
    let output = run_script("preserve", "(set X 2)\n(set x 3)\n(* X x)\n", &["--preserve-case"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "6\n");
}

#[test]
fn test_runtime_error_exit_code() {
    let output = run_script("runtime", "(+ 1 1)\n(+ 1 x)\n(+ 2 2)\n", &[]);

    assert_eq!(output.status.code(), Some(70));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "2\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[line 2] Runtime Error: Undefined variable 'x'."));
}

#[test]
fn test_syntax_error_exit_code() {
    let output = run_script("syntax", "(+ 1 2\n", &[]);

    assert_eq!(output.status.code(), Some(65));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error at end: Expect ')' after expression."));
}

#[test]
fn test_missing_script_is_usage_error() {
    let output = get_lispy_binary()
        .arg("/definitely/not/here.lisp")
        .output()
        .expect("Failed to execute lispy");

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn test_too_many_arguments_is_usage_error() {
    let output = get_lispy_binary()
        .arg("a.lisp")
        .arg("b.lisp")
        .output()
        .expect("Failed to execute lispy");

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn test_verbose_renders_source_excerpt() {
    let output = run_script("verbose", "(set a 1)\n(+ a missing)\n", &["--verbose"]);

    assert_eq!(output.status.code(), Some(70));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error[E0201]"));
    assert!(stderr.contains("(+ a missing)"));
}

#[test]
fn test_repl_evaluates_each_line() {
    let output = run_repl("(define (square x) (* x x))\n(square 5)\n");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(">>> "));
    assert!(stdout.contains("25\n"));
}

#[test]
fn test_repl_survives_errors() {
    let output = run_repl("(+ 1 nope)\n(+ 1\n(+ 1 1)\n");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stdout.contains("2\n"));
    assert!(stderr.contains("Undefined variable 'nope'."));
    assert!(stderr.contains("Expect ')' after expression."));
}

#[test]
fn test_repl_env_and_exit() {
    let output = run_repl("(set a 1)\n(define (f) a)\n:env\nexit\n(+ 40 2)\n");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("a = 1\nf = <fn f>\n"));
    assert!(!stdout.contains("42"), "input after exit should be ignored");
}

#[test]
fn test_repl_exit_commands_ignore_case() {
    for command in ["EXIT", "Quit"] {
        let output = run_repl(&format!("(set a 1)\n{}\n(+ 40 2)\n", command));

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(!stdout.contains("42"), "{} should end the session", command);
        assert!(!stderr.contains("Undefined variable"), "{} was evaluated", command);
    }
}

#[test]
fn test_verbose_arity_error_notes_the_declaration() {
    let output = run_script("arity", "(define (square x) (* x x))\n(square)\n", &["--verbose"]);

    assert_eq!(output.status.code(), Some(70));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[line 2] Runtime Error: Expected 1 arguments but got 0."));
    assert!(stderr.contains("= note: 'square' is declared as (square x)"));
}

#[test]
fn test_completion_generation() {
    let output = get_lispy_binary()
        .arg("complete")
        .arg("bash")
        .output()
        .expect("Failed to execute lispy");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("lispy"));
}
