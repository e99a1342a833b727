//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use roost_config::ConfigError;
use roost_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the apartment service")]
    #[diagnostic(
        code(roost::connection_failed),
        help(
            "{reason}\n\
             Check that the service is running, or point at another one with --api-url.\n\
             Current settings: roost config show"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Apartment '{id}' not found")]
    #[diagnostic(
        code(roost::not_found),
        help("Run: roost list  to see available apartments")
    )]
    NotFound { id: String },

    // ── Input ────────────────────────────────────────────────────────
    /// One help line per failed field rule.
    #[error("The apartment was not saved: {} field(s) invalid", messages.len())]
    #[diagnostic(code(roost::invalid_apartment))]
    InvalidApartment {
        messages: Vec<String>,
        #[help]
        details: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(roost::validation))]
    Validation { field: String, reason: String },

    // ── Server ───────────────────────────────────────────────────────
    #[error("The service rejected the request (HTTP {status})")]
    #[diagnostic(code(roost::rejected))]
    Rejected {
        status: u16,
        #[help]
        details: String,
    },

    #[error("Unexpected failure: {message}")]
    #[diagnostic(code(roost::unexpected))]
    Unexpected { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(roost::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: roost config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(roost::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(roost::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::InvalidApartment { .. }
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Unexpected { .. } | Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }

    fn bullet_list(messages: &[String]) -> String {
        messages
            .iter()
            .map(|m| format!("- {m}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationFailed { messages } => Self::InvalidApartment {
                details: Self::bullet_list(&messages),
                messages,
            },

            CoreError::NotInCollection { id } | CoreError::NotFound { id } => {
                Self::NotFound { id }
            }

            CoreError::NetworkUnreachable { reason } => Self::ConnectionFailed { reason },

            CoreError::ServerRejected { status, messages } => Self::Rejected {
                status,
                details: Self::bullet_list(&messages),
            },

            CoreError::Config { message } => Self::Validation {
                field: "configuration".into(),
                reason: message,
            },

            CoreError::Unknown { message } => Self::Unexpected { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { profile } => Self::ProfileNotFound {
                name: profile,
                available: "(none)".into(),
            },
            other => Self::Config(other),
        }
    }
}
