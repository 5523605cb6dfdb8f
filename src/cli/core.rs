//! Core CLI dispatch, error reporting and shell context helpers.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use rust_decimal::Decimal;
use strsim::levenshtein;

use gift_config::{paths, ConfigError, ConfigManager};
use gift_core::{Command, CommandOutcome, CoreError, LedgerSession};
use gift_domain::{GiftField, GiftRecord, Ledger};
use gift_storage_sqlite::SqliteGiftStore;

pub use crate::errors::{CliError, GiftError};

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};
use super::ui::format_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_home(mode, paths::app_data_dir())
    }

    /// Builds a context whose config, default database and export live under `home`.
    pub fn with_home(mode: CliMode, home: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(home.clone())?;
        let config = config_manager.load()?;
        cli_io::apply_config(&config);
        tracing::debug!(home = %home.display(), ?mode, "shell context ready");

        Ok(ShellContext {
            mode,
            registry,
            session: LedgerSession::new(),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            home,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        format!("gift-ledger [{}]> ", self.session.ledger().len())
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn ledger(&self) -> &Ledger {
        self.session.ledger()
    }

    pub(crate) fn fixed_budget(&self) -> Decimal {
        self.config.fixed_budget
    }

    pub(crate) fn money(&self, value: Decimal) -> String {
        format_money(value, &self.config.currency)
    }

    /// Runs one ledger command; on error the table is left as it was.
    pub(crate) fn apply(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        let outcome = self.session.apply(command)?;
        tracing::debug!(?outcome, rows = self.session.ledger().len(), "command applied");
        Ok(outcome)
    }

    pub(crate) fn record(&self, index: usize) -> Result<&GiftRecord, CommandError> {
        self.session
            .ledger()
            .get(index)
            .ok_or_else(|| CommandError::Message(format!("Row {index} does not exist.")))
    }

    pub(crate) fn database_path(&self) -> PathBuf {
        self.config.resolve_database_path(&self.home)
    }

    pub(crate) fn open_store(&self) -> Result<SqliteGiftStore, CommandError> {
        Ok(SqliteGiftStore::open(&self.database_path())?)
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        cli_io::apply_config(&self.config);
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        tracing::debug!(command, status = %self.status(), "dispatching");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
            .map_err(|err| CliError::Input(err.to_string()))
    }

    /// Prints a failed command's error. The session always keeps running.
    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(GiftError::Core(err @ CoreError::Schema { .. })) => {
                cli_io::print_error(&err);
                let expected: Vec<&str> = GiftField::ALL
                    .into_iter()
                    .filter(|field| field.required_on_import())
                    .map(GiftField::import_header)
                    .collect();
                cli_io::print_hint(format!(
                    "Expected columns: {}. The gift table was not changed.",
                    expected.join(", ")
                ));
            }
            CommandError::Core(GiftError::Core(err @ CoreError::Persistence(_))) => {
                cli_io::print_error(&err);
                cli_io::print_hint("The gift table in memory is unchanged.");
            }
            other => cli_io::print_error(&other),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] GiftError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Core(GiftError::Core(err))
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownKey(_) | ConfigError::InvalidValue { .. } => {
                CommandError::InvalidArguments(err.to_string())
            }
            other => CommandError::Core(GiftError::Config(other)),
        }
    }
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Parses a 0-based row number argument.
pub(crate) fn parse_row(input: &str) -> Result<usize, CommandError> {
    input.trim().parse::<usize>().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid row `{}` (use the # from `list`)", input))
    })
}

#[cfg(test)]
pub(crate) fn process_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    crate::cli::shell::handle_line(context, line)
}

#[cfg(test)]
pub(crate) fn process_script(home: &std::path::Path, lines: &[&str]) -> ShellContext {
    let mut app = ShellContext::with_home(CliMode::Script, home.to_path_buf()).expect("context");
    for line in lines {
        match process_line(&mut app, line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err),
        }
    }
    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use gift_core::SummaryService;
    use tempfile::tempdir;

    const REFERENCE: [&str; 3] = [
        "add Alice Book 50 40 yes",
        "add Alice Game 50 0 no",
        "add Bob Toy 30 25 yes",
    ];

    #[test]
    fn script_builds_reference_ledger() {
        let home = tempdir().expect("tempdir");
        let app = process_script(home.path(), &REFERENCE);
        let ledger = app.ledger();
        assert_eq!(ledger.len(), 3);
        assert_eq!(SummaryService::total_budget(ledger), Decimal::from(130));
        assert_eq!(SummaryService::total_spent(ledger), Decimal::from(65));
    }

    #[test]
    fn failed_command_leaves_ledger_alone() {
        let home = tempdir().expect("tempdir");
        let mut lines = REFERENCE.to_vec();
        lines.push("add Cara Scarf -5 0 no");
        lines.push("edit 0 cost lots");
        lines.push("import /nonexistent/gifts.csv");
        let app = process_script(home.path(), &lines);
        assert_eq!(app.ledger().len(), 3);
        assert_eq!(app.ledger().get(0).and_then(|r| r.cost), Some(Decimal::from(40)));
    }

    #[test]
    fn exit_stops_processing() {
        let home = tempdir().expect("tempdir");
        let app = process_script(home.path(), &["add Alice Book 50 40 yes", "exit", "remove 0"]);
        assert_eq!(app.ledger().len(), 1);
        assert!(!app.running);
    }

    #[test]
    fn unknown_commands_do_not_fail() {
        let home = tempdir().expect("tempdir");
        let mut app = ShellContext::with_home(CliMode::Script, home.path().to_path_buf())
            .expect("context");
        assert_eq!(
            app.dispatch("lsit", "lsit", &[]).expect("dispatch"),
            LoopControl::Continue
        );
    }

    #[test]
    fn rows_must_be_numbers() {
        assert_eq!(parse_row(" 2 ").expect("row"), 2);
        assert!(matches!(
            parse_row("first"),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn config_value_errors_are_argument_errors() {
        let err = CommandError::from(ConfigError::UnknownKey("theme".into()));
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }
}
