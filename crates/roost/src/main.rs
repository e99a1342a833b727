mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roost_core::HttpStore;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Read once. Config commands get the raw result so they can refuse to
    // act on a broken file; everything else falls back to defaults.
    let loaded = config::load_config();

    match cli.command {
        Command::Config(args) => commands::config_cmd::handle(args, loaded, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "roost", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = loaded.unwrap_or_else(|err| {
                output::warn(
                    &format!("{err}\nignoring the config file and using defaults"),
                    cli.global.color,
                );
                Config::default()
            });
            let format = config::output_format(&cli.global, &cfg);
            let store = open_store(&cli.global, &cfg)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &store, &cfg, &cli.global, format).await
        }
    }
}

/// Build the store for the active profile and seed it from its cache.
fn open_store(global: &GlobalOpts, cfg: &Config) -> Result<HttpStore, CliError> {
    let store_config = config::resolve_store_config(global, cfg)?;
    tracing::debug!(
        api_url = %store_config.api_url,
        cache = ?store_config.cache,
        "opening apartment store"
    );
    let store = HttpStore::from_config(&store_config)?;
    store.initialize();
    Ok(store)
}
