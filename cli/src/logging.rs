use colored::*;
use log::LevelFilter;

/// Sets up `env_logger`. `RUST_LOG` wins; otherwise warnings only, or debug
/// output with `--verbose`.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .init();
}

pub fn log_error(message: &str) {
    log::error!("{}", message);
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}
