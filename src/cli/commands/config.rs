use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        None | Some("show") => show_config(context),
        Some("set") => {
            let (Some(key), Some(_)) = (args.get(1), args.get(2)) else {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <key> <value>".into(),
                ));
            };
            let value = args[2..].join(" ");
            let key = key.to_lowercase();
            let mut updated = context.config.clone();
            updated.set_value(&key, &value)?;
            context.config = updated;
            context.persist_config()?;
            let shown = context.config.value_of(&key).unwrap_or_default();
            io::print_success(format!("Set `{}` to `{}`.", key, shown));
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}` (use show or set)",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        let value = if value.is_empty() { "-".to_string() } else { value };
        io::print_info(format!("  {:<17}: {}", key, value));
    }
    io::print_info(format!(
        "  {:<17}: {}",
        "config file",
        context.config_manager.config_path().display()
    ));
    io::print_info(format!(
        "  {:<17}: {}",
        "database in use",
        context.database_path().display()
    ));
    Ok(())
}
