#![forbid(unsafe_code)]

mod cli;
mod command_coverage;
mod command_translate;
mod command_validate;
mod diagnostic;
mod error;
mod project;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "localize=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli::run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
