use gift_domain::STORE_TABLE;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "save",
            "Save the gift table to the database",
            "save",
            cmd_save,
        ),
        CommandEntry::new(
            "load",
            "Replace the gift table with the saved copy",
            "load",
            cmd_load,
        ),
    ]
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let mut store = context.open_store()?;
    let count = context.session.persist_to(&mut store)?;
    io::print_success(format!(
        "Saved {} gift(s) to table `{}` in {}.",
        count,
        STORE_TABLE,
        context.database_path().display()
    ));
    Ok(())
}

fn cmd_load(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let store = context.open_store()?;
    let count = context.session.load_from(&store)?;
    io::print_success(format!(
        "Loaded {} gift(s) from {}.",
        count,
        context.database_path().display()
    ));
    Ok(())
}
