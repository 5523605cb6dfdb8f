use std::{
    fmt,
    io::{self, IsTerminal, Write},
};

use dialoguer::{theme::ColorfulTheme, Confirm};
use gift_config::Config;

use crate::cli::core::CommandError;
use crate::cli::output::{self, OutputPreferences};

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Writes an undecorated line, used for table and chart bodies.
pub fn println_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")
}

/// Applies display preferences from the loaded configuration.
pub fn apply_config(config: &Config) {
    let color_enabled = config.ui_color_enabled
        && io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();
    output::set_preferences(OutputPreferences {
        plain_mode: config.accessibility.plain_output,
        color_enabled,
    });
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}
