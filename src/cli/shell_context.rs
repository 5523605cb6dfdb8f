//! Shared runtime state for CLI interactions and command execution.

use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;
use gift_config::{Config, ConfigManager};
use gift_core::LedgerSession;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything one shell session owns. The gift table lives in `session` and is
/// only changed through [`LedgerSession::apply`].
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: LedgerSession,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    /// Application data directory (config file, default database and export).
    pub home: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, gifts: {} }}",
            self.running,
            self.last_command,
            self.session.ledger().len()
        )
    }
}
