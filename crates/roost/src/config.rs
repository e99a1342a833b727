//! CLI configuration: thin wrapper around `roost_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --timeout, --no-cache, ...).

use clap::ValueEnum;

use roost_core::{CacheLocation, SortDirection, StoreConfig};

use crate::cli::{GlobalOpts, OutputFormat, SortArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use roost_config::{
    Config, ConfigError, Defaults, Profile, config_path, load_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Output format: flag > env > `defaults.output` > table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global
        .output
        .or_else(|| OutputFormat::from_str(&config.defaults.output, true).ok())
        .unwrap_or(OutputFormat::Table)
}

/// Sort order for `list`: flag > `defaults.sort`.
pub fn sort_direction(flag: Option<SortArg>, config: &Config) -> SortDirection {
    match flag {
        Some(SortArg::Asc) => SortDirection::Asc,
        Some(SortArg::Desc) => SortDirection::Desc,
        None => config.defaults.sort,
    }
}

/// Translate the active `Profile` + global flags into a `StoreConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_store_config(global: &GlobalOpts, config: &Config) -> Result<StoreConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let mut profile = config.profile(&profile_name).map_err(|err| match err {
        ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
            name: profile,
            available: available_profiles(config),
        },
        other => other.into(),
    })?;

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    let mut store = roost_config::profile_to_store_config(&profile, &config.defaults)?;
    if global.no_cache {
        store.cache = CacheLocation::Memory;
    }

    tracing::debug!(
        profile = %profile_name,
        api_url = %store.api_url,
        cache = ?store.cache,
        "resolved store configuration"
    );
    Ok(store)
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}
