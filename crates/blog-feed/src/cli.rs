#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args manually. Environment variables with the `BLOG_FEED_*`
//! prefix override the defaults and are themselves overridden by flags.

use std::env;
use std::path::PathBuf;
use std::process;

use crate::error::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Blog Feed: a personal blog feed in the terminal

USAGE:
    blog-feed [OPTIONS]

OPTIONS:
    --data=PATH          Load posts from a JSON file instead of the bundled set
    --log-file=PATH      Write logs to PATH (logging is off otherwise)
    --no-mouse           Disable mouse event capture
    --exit-after-ms=N    Quit after N milliseconds (0 = never)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    j / Down, k / Up     Move between posts (scroll when a post is open)
    Enter                Open the highlighted post
    PageUp / PageDown    Scroll the open post
    Home / End           First / last post
    Esc                  Close the open post
    q / Ctrl+C           Quit

ENVIRONMENT VARIABLES:
    BLOG_FEED_DATA            Override --data
    BLOG_FEED_LOG_FILE        Override --log-file
    BLOG_FEED_EXIT_AFTER_MS   Override --exit-after-ms
    BLOG_FEED_LOG             Log filter directives (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Posts file; `None` uses the bundled posts.
    pub data: Option<PathBuf>,
    /// Log file; `None` disables logging.
    pub log_file: Option<PathBuf>,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            data: None,
            log_file: None,
            mouse: true,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse the process arguments and environment.
    ///
    /// Prints and exits on `--help`, `--version`, or a bad argument.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Invocation::Run(opts)) => opts,
            Ok(Invocation::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Invocation::Version) => {
                println!("blog-feed {VERSION}");
                process::exit(0);
            }
            Err(e) => {
                eprintln!("{e}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` (without the program name) against an environment
    /// lookup.
    ///
    /// Unparseable environment values are ignored; unparseable flags are
    /// errors.
    pub fn parse_from<F>(args: &[String], env: F) -> Result<Invocation, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = env("BLOG_FEED_DATA")
            && !val.is_empty()
        {
            opts.data = Some(PathBuf::from(val));
        }
        if let Some(val) = env("BLOG_FEED_LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env("BLOG_FEED_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Invocation::Help),
                "--version" | "-V" => return Ok(Invocation::Version),
                "--no-mouse" => opts.mouse = false,
                other => {
                    if let Some(val) = other.strip_prefix("--data=") {
                        opts.data = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val.parse().map_err(|_| {
                            Error::Usage(format!("Invalid --exit-after-ms value: {val}"))
                        })?;
                    } else {
                        return Err(Error::Usage(format!("Unknown argument: {other}")));
                    }
                }
            }
        }

        Ok(Invocation::Run(opts))
    }
}
