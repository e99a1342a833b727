//! Command dispatch: bridges CLI args -> store operations -> output formatting.

pub mod apartments;
pub mod config_cmd;
pub mod util;

use roost_core::HttpStore;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a store-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    store: &HttpStore,
    config: &Config,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => apartments::list(store, args, config, global, format).await,
        Command::Show { id } => apartments::show(store, &id, global, format).await,
        Command::Add(args) => apartments::add(store, args, global, format).await,
        Command::Edit(args) => apartments::edit(store, args, global, format).await,
        Command::Remove { id } => apartments::remove(store, &id, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
