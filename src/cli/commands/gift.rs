use gift_core::{parse_amount, Command, CommandOutcome};
use gift_domain::{looks_like_url, max_amount, parse_flag, GiftField, GiftRecord};

use crate::cli::core::{parse_row, CommandError, CommandResult, ShellContext};
use crate::cli::forms::{FormResult, GiftForm};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{format_cost, Table, TableColumn, TableRenderer};

const ADD_USAGE: &str = "add [<recipient> <gift> <budget> <cost> <yes|no> [link]]";
const EDIT_USAGE: &str = "edit <row> [<field> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Add a gift idea", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Change one field of a gift", EDIT_USAGE, cmd_edit),
        CommandEntry::new("remove", "Remove a gift by row", "remove <row>", cmd_remove),
        CommandEntry::new("list", "Show every gift", "list", cmd_list),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let record = if args.is_empty() {
        if !context.can_prompt() {
            return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
        }
        match GiftForm::new(&context.theme).run(None)? {
            FormResult::Completed(record) => record,
            FormResult::Cancelled => {
                io::print_info("Operation cancelled.");
                return Ok(());
            }
        }
    } else {
        record_from_args(args)?
    };

    let (recipient, gift) = (record.recipient.clone(), record.gift.clone());
    if let CommandOutcome::Added { index } = context.apply(Command::AddRecord(record))? {
        io::print_success(format!(
            "Added gift `{}` for {} (row {}).",
            gift, recipient, index
        ));
    }
    Ok(())
}

fn record_from_args(args: &[&str]) -> Result<GiftRecord, CommandError> {
    let [recipient, gift, budget, cost, purchased, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };
    if rest.len() > 1 {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    }
    let mut record = GiftRecord::new(
        required_text(GiftField::Recipient, recipient)?,
        required_text(GiftField::Gift, gift)?,
        amount(GiftField::Budget, budget)?,
    )
    .with_cost(amount(GiftField::Cost, cost)?)
    .with_purchased(flag(purchased)?);
    if let Some(link) = rest.first() {
        warn_on_odd_link(link);
        record = record.with_link(link.trim());
    }
    Ok(record)
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(row) = args.first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {EDIT_USAGE}")));
    };
    let index = parse_row(row)?;
    let current = context.record(index)?.clone();

    let (record, changed) = match args.get(1) {
        Some(key) => {
            let field = GiftField::from_key(key).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "unknown field `{key}` (use recipient, gift, budget, cost, purchased or link)"
                ))
            })?;
            if args.len() < 3 && field != GiftField::Link {
                return Err(CommandError::InvalidArguments(format!("usage: {EDIT_USAGE}")));
            }
            let value = args[2..].join(" ");
            (with_field(current, field, &value)?, Some(field))
        }
        None if context.can_prompt() => match GiftForm::new(&context.theme).run(Some(&current))? {
            FormResult::Completed(record) => (record, None),
            FormResult::Cancelled => {
                io::print_info("Operation cancelled.");
                return Ok(());
            }
        },
        None => return Err(CommandError::InvalidArguments(format!("usage: {EDIT_USAGE}"))),
    };

    match context.apply(Command::UpdateRecord { index, record })? {
        CommandOutcome::Updated { index } => {
            let edited = context.record(index)?;
            match changed {
                Some(field) => io::print_success(format!(
                    "Updated row {}: {} is now `{}`.",
                    index,
                    field.export_header(),
                    edited.field_text(field)
                )),
                None => io::print_success(format!("Updated row {}.", index)),
            }
        }
        CommandOutcome::Unchanged { index } => {
            io::print_warning(format!("Row {} does not exist; nothing changed.", index))
        }
        _ => {}
    }
    Ok(())
}

/// Copy of `record` with one field replaced from shell text.
fn with_field(
    mut record: GiftRecord,
    field: GiftField,
    value: &str,
) -> Result<GiftRecord, CommandError> {
    match field {
        GiftField::Recipient => record.recipient = required_text(field, value)?,
        GiftField::Gift => record.gift = required_text(field, value)?,
        GiftField::Budget => record.budget = amount(field, value)?,
        GiftField::Cost => record.cost = Some(amount(field, value)?),
        GiftField::Purchased => record.purchased = flag(value)?,
        GiftField::Link => {
            warn_on_odd_link(value);
            record = record.with_link(value.trim());
        }
    }
    Ok(record)
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(row) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: remove <row>".into()));
    };
    let index = parse_row(row)?;

    if context.can_prompt() {
        if let Some(record) = context.ledger().get(index) {
            let prompt = format!("Remove gift `{}` for {}?", record.gift, record.recipient);
            if !io::confirm_action(&context.theme, &prompt, false)? {
                io::print_info("Operation cancelled.");
                return Ok(());
            }
        }
    }

    match context.apply(Command::DeleteRecord { index })? {
        CommandOutcome::Deleted { index, record } => io::print_success(format!(
            "Removed gift `{}` for {} (row {}).",
            record.gift, record.recipient, index
        )),
        CommandOutcome::Unchanged { index } => {
            io::print_warning(format!("Row {} does not exist; nothing removed.", index))
        }
        _ => {}
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger();
    if ledger.is_empty() {
        io::print_info("No gifts recorded yet. Use `add` or `import` to get started.");
        return Ok(());
    }

    let mut columns = vec![TableColumn::new("#", 2)];
    columns.extend(
        GiftField::ALL
            .into_iter()
            .map(|field| TableColumn::new(field.export_header(), 0)),
    );
    let mut table = Table::new(columns);
    let currency = context.config.currency.as_str();
    for (index, record) in ledger.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            record.recipient.clone(),
            record.gift.clone(),
            context.money(record.budget),
            format_cost(record.cost, currency),
            record.field_text(GiftField::Purchased),
            record.field_text(GiftField::Link),
        ]);
    }
    TableRenderer::render(&table, context.config.accessibility.plain_output);
    io::print_info(format!("{} gift(s).", ledger.len()));
    Ok(())
}

fn required_text(field: GiftField, value: &str) -> Result<String, CommandError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "{} cannot be empty",
            field.export_header()
        )));
    }
    Ok(value.to_string())
}

fn amount(field: GiftField, value: &str) -> Result<rust_decimal::Decimal, CommandError> {
    parse_amount(value).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "invalid {} `{}` (use a non-negative number up to {})",
            field.key(),
            value,
            max_amount()
        ))
    })
}

fn flag(value: &str) -> Result<bool, CommandError> {
    parse_flag(value).ok_or_else(|| {
        CommandError::InvalidArguments(format!("invalid purchased flag `{}` (use yes or no)", value))
    })
}

fn warn_on_odd_link(link: &str) {
    let link = link.trim();
    if !link.is_empty() && !looks_like_url(link) {
        io::print_warning("Gift link does not look like a web address; keeping it as entered.");
    }
}
