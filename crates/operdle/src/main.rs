//! Daily arithmetic puzzle in the terminal.

#[macro_use]
extern crate lazy_static;

mod cli;
mod prefs;
mod render;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    color_eyre::install()?;

    let prefs = prefs::Preferences::load();
    cli::exec(args, &prefs)
}
