mod cli;
mod commands;
mod navigate;
mod reader;
mod render;
mod settings;

use clap::Parser;
use cli::{Cli, Commands};
use commands::read::{ReadOpts, Step};
use settings::Settings;
use tracing::debug;

fn init_tracing(cli: &Cli) {
    // Quiet unless asked: --verbose shows info, or whatever RUST_LOG says
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(cli.color())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.color() {
        colored::control::set_override(false);
    }
    init_tracing(&cli);

    let settings = Settings::load(cli.config.as_deref(), &cli.overrides())?;
    debug!(?settings, "loaded settings");

    match &cli.command {
        Some(Commands::List { filter }) => commands::list::run(&settings, filter),
        Some(Commands::Download { .. }) => commands::download::run(&settings),
        None => {
            let step = if cli.next {
                Step::Next
            } else if cli.previous {
                Step::Previous
            } else {
                Step::Stay
            };
            let opts = ReadOpts {
                step,
                json: cli.json,
                interactive: cli.interactive,
                color: cli.color(),
            };
            commands::read::run(&settings, &cli.query, &opts)
        }
    }
}
