use gift_core::SummaryService;
use gift_domain::{GiftField, RecipientSummary};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{format_cost, render_waterfall, Table, TableColumn, TableRenderer};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show total budget, spent and remaining",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "groups",
            "Show gifts grouped by recipient",
            "groups [recipient]",
            cmd_groups,
        ),
        CommandEntry::new(
            "chart",
            "Waterfall of purchases against each recipient's budget",
            "chart [recipient]",
            cmd_chart,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = SummaryService::budget_totals(context.ledger());
    output_section("Budget summary");
    io::print_info(format!("Total Budget: {}", context.money(totals.total_budget)));
    io::print_info(format!("Total Spent: {}", context.money(totals.total_spent)));
    io::print_info(format!("Remaining: {}", context.money(totals.remaining)));
    io::print_info(format!(
        "Gifts: {} ({} purchased)",
        totals.record_count, totals.purchased_count
    ));
    if totals.is_overspent() {
        io::print_warning(format!(
            "Spending is over the total budget by {}.",
            context.money(-totals.remaining)
        ));
    }
    Ok(())
}

fn selected_groups(
    context: &ShellContext,
    args: &[&str],
) -> Result<Vec<RecipientSummary>, CommandError> {
    let groups = SummaryService::group_by_recipient(context.ledger(), context.fixed_budget());
    if args.is_empty() {
        return Ok(groups);
    }
    let name = args.join(" ");
    let found = SummaryService::find_group(&groups, &name)
        .or_else(|| {
            groups
                .iter()
                .find(|group| group.recipient.eq_ignore_ascii_case(&name))
        })
        .cloned();
    found.map(|group| vec![group]).ok_or_else(|| {
        CommandError::Message(format!("No gifts recorded for `{}`.", name))
    })
}

fn cmd_groups(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let groups = selected_groups(context, args)?;
    if groups.is_empty() {
        io::print_info("No gifts recorded yet.");
        return Ok(());
    }

    let currency = context.config.currency.as_str();
    let plain = context.config.accessibility.plain_output;
    for group in &groups {
        output_section(&group.recipient);
        let mut table = Table::new(vec![
            TableColumn::new(GiftField::Gift.export_header(), 0),
            TableColumn::new(GiftField::Budget.export_header(), 0),
            TableColumn::new(GiftField::Cost.export_header(), 0),
            TableColumn::new(GiftField::Purchased.export_header(), 0),
        ]);
        for item in &group.items {
            table.add_row(vec![
                item.gift.clone(),
                context.money(item.budget),
                format_cost(item.cost, currency),
                item.field_text(GiftField::Purchased),
            ]);
        }
        TableRenderer::render(&table, plain);
        io::print_info(format!(
            "Allotted: {}  Purchased: {}  Remaining of {}: {}",
            context.money(group.allotted_budget),
            context.money(group.total_purchased_cost),
            context.money(context.fixed_budget()),
            context.money(group.remaining_budget)
        ));
    }
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let groups = selected_groups(context, args)?;
    let fixed_budget = context.fixed_budget();
    let currency = context.config.currency.clone();

    let mut charted = 0;
    for group in &groups {
        match SummaryService::waterfall_series(group, fixed_budget) {
            Some(series) => {
                render_waterfall(&series, fixed_budget, &currency);
                charted += 1;
            }
            None if !args.is_empty() => io::print_info(format!(
                "No purchased gifts to chart for {}.",
                group.recipient
            )),
            None => {}
        }
    }
    if charted == 0 && args.is_empty() {
        io::print_info("No purchased gifts to chart yet.");
    }
    Ok(())
}
