#![forbid(unsafe_code)]

//! Blog Feed binary entry point.

use std::time::Duration;

use blog_feed::cli::Opts;
use blog_feed::{Error, FeedModel};
use feed_core::logging::{DEFAULT_FILTER, init_file_logging};
use feed_runtime::{Program, ProgramConfig};

fn run(opts: Opts) -> Result<(), Error> {
    if let Some(path) = &opts.log_file {
        init_file_logging(path, DEFAULT_FILTER)?;
    }

    let store = blog_feed::load_store(opts.data.as_deref())?;
    let model = FeedModel::new(store).with_exit_after(Duration::from_millis(opts.exit_after_ms));

    let config = ProgramConfig {
        mouse: opts.mouse,
        ..ProgramConfig::default()
    };
    let mut program = Program::with_config(model, config)?;
    program.run()?;
    Ok(())
}

fn main() {
    let opts = Opts::parse();
    if let Err(e) = run(opts) {
        eprintln!("blog-feed: {e}");
        std::process::exit(1);
    }
}
