#![allow(dead_code)]

use lispy::interpreter::{parse_and_run, LispError, RuntimeError};
use lispy::Value;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Every printed value of `source`, rendered the way the binary prints them.
pub fn run(source: &str) -> Vec<String> {
    parse_and_run(source)
        .expect("program should succeed")
        .iter()
        .map(Value::to_string)
        .collect()
}

/// The last printed value of `source`.
pub fn eval(source: &str) -> String {
    run(source).pop().expect("program should print a value")
}

pub fn run_err(source: &str) -> LispError {
    parse_and_run(source).expect_err("program should fail")
}

pub fn runtime_err(source: &str) -> RuntimeError {
    match run_err(source) {
        LispError::Runtime(err) => err,
        other => panic!("expected a runtime error, got {}", other),
    }
}

/// Script file in the system temp dir, removed on drop.
pub struct TempScript {
    path: PathBuf,
}

impl TempScript {
    pub fn new(name: &str, content: &str) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!(
            "lispy_test_{}_{}.lisp",
            name,
            std::process::id()
        ));
        let mut file = File::create(&path)?;
        file.write_all(content.as_bytes())?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempScript {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
