use std::path::{Path, PathBuf};

use gift_core::{Command, CommandOutcome};
use gift_storage_csv::{export_to_path, import_from_path};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "import",
            "Replace the gift table with rows from a CSV file",
            "import <path>",
            cmd_import,
        ),
        CommandEntry::new(
            "export",
            "Write the gift table to a CSV file",
            "export [path]",
            cmd_export,
        ),
    ]
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::InvalidArguments("usage: import <path>".into()));
    };
    let path = Path::new(path);

    if context.can_prompt() && !context.ledger().is_empty() {
        let prompt = format!(
            "Replace the current {} gift(s) with `{}`?",
            context.ledger().len(),
            path.display()
        );
        if !io::confirm_action(&context.theme, &prompt, true)? {
            io::print_info("Operation cancelled.");
            return Ok(());
        }
    }

    let table = import_from_path(path)?;
    if let CommandOutcome::Imported { count, warnings } =
        context.apply(Command::ImportTable(table))?
    {
        io::print_success(format!(
            "Imported {} gift(s) from {}.",
            count,
            path.display()
        ));
        if !warnings.is_empty() {
            io::print_warning(&warnings);
        }
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] => context.config.resolve_export_path(&context.home),
        [path] => PathBuf::from(path),
        _ => return Err(CommandError::InvalidArguments("usage: export [path]".into())),
    };

    if let CommandOutcome::Export(snapshot) = context.apply(Command::ExportTable)? {
        export_to_path(&snapshot, &path)?;
        io::print_success(format!(
            "Exported {} gift(s) to {}.",
            snapshot.len(),
            path.display()
        ));
    }
    Ok(())
}
