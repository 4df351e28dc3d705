use std::sync::Once;

use crate::cli::{Args, ColorChoice};

/// Bad arguments or an unreadable script path.
pub const EXIT_USAGE: i32 = 64;
/// A syntax error was reported while running a script.
pub const EXIT_SYNTAX: i32 = 65;
/// A runtime error stopped a script.
pub const EXIT_RUNTIME: i32 = 70;

pub struct AppConfig {
    pub color_enabled: bool,
    pub verbose: bool,
    pub preserve_case: bool,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Self {
        let color_enabled = match args.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => atty::is(atty::Stream::Stderr) && atty::is(atty::Stream::Stdout),
        };

        AppConfig {
            color_enabled,
            verbose: args.verbose,
            preserve_case: args.preserve_case,
        }
    }

    /// Source text as the interpreter should see it.
    pub fn normalize<'a>(&self, source: &'a str) -> std::borrow::Cow<'a, str> {
        if self.preserve_case {
            std::borrow::Cow::Borrowed(source)
        } else {
            std::borrow::Cow::Owned(source.to_lowercase())
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the stderr subscriber. Filters come from `RUST_LOG`; `verbose`
/// turns on `debug` for this crate when `RUST_LOG` is unset.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if verbose {
            EnvFilter::new("lispy=debug")
        } else {
            return;
        };

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
