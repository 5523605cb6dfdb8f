//! Text waterfall charts: each purchase steps the running total up, and the
//! final `Remaining` bar closes the gap to the recipient's fixed budget.

use crossterm::terminal;
use rust_decimal::{prelude::ToPrimitive, Decimal};

use gift_domain::{add_amounts, sum_amounts, WaterfallSeries};

use crate::cli::{io, output::current_preferences, ui::format_money};

const DEFAULT_COLUMNS: usize = 80;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 60;

struct Glyphs {
    spent: char,
    remaining: char,
    over: char,
}

const FANCY: Glyphs = Glyphs {
    spent: '█',
    remaining: '░',
    over: '▓',
};

const PLAIN: Glyphs = Glyphs {
    spent: '#',
    remaining: '.',
    over: '!',
};

/// Lays out one chart as text lines of `label  bar  amount`.
pub fn waterfall_lines(
    series: &WaterfallSeries,
    fixed_budget: Decimal,
    bar_width: usize,
    currency: &str,
    plain: bool,
) -> Vec<String> {
    let glyphs = if plain { &PLAIN } else { &FANCY };
    let Some((remaining, items)) = series.points.split_last() else {
        return Vec::new();
    };

    let spent = sum_amounts(items.iter().map(|point| point.value));
    let extent = fixed_budget.max(spent);
    let width = Decimal::from(bar_width);
    let to_cells = |value: Decimal| -> usize {
        if extent <= Decimal::ZERO {
            return 0;
        }
        value
            .checked_mul(width)
            .and_then(|scaled| scaled.checked_div(extent))
            .or_else(|| {
                value
                    .checked_div(extent)
                    .and_then(|share| share.checked_mul(width))
            })
            .and_then(|cells| cells.round().to_usize())
            .unwrap_or(0)
            .min(bar_width)
    };

    let label_width = series
        .points
        .iter()
        .map(|point| point.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(series.points.len());
    let mut running = Decimal::ZERO;
    for point in items {
        let start = running;
        running = add_amounts(running, point.value);
        lines.push(bar_line(
            &point.label,
            label_width,
            to_cells(start),
            to_cells(running),
            point.value > Decimal::ZERO,
            glyphs.spent,
            bar_width,
            &format_money(point.value, currency),
        ));
    }

    let (start, end, fill) = if remaining.value.is_sign_negative() {
        (fixed_budget, spent, glyphs.over)
    } else {
        (spent, add_amounts(spent, remaining.value), glyphs.remaining)
    };
    lines.push(bar_line(
        &remaining.label,
        label_width,
        to_cells(start),
        to_cells(end),
        !remaining.value.is_zero(),
        fill,
        bar_width,
        &format_money(remaining.value, currency),
    ));
    lines
}

#[allow(clippy::too_many_arguments)]
fn bar_line(
    label: &str,
    label_width: usize,
    start: usize,
    end: usize,
    nonzero: bool,
    fill: char,
    bar_width: usize,
    amount: &str,
) -> String {
    let mut cells = end.saturating_sub(start);
    if cells == 0 && nonzero {
        cells = 1;
    }
    let start = start.min(bar_width.saturating_sub(cells));
    let bar: String = std::iter::repeat(' ')
        .take(start)
        .chain(std::iter::repeat(fill).take(cells))
        .collect();
    let label_pad = label_width.saturating_sub(label.chars().count());
    let bar_pad = bar_width.saturating_sub(start + cells);
    format!(
        "{label}{}  |{bar}{}|  {amount}",
        " ".repeat(label_pad),
        " ".repeat(bar_pad)
    )
}

/// Bar width that fits the current terminal, or a default when stdout is not a tty.
pub fn bar_width_for_terminal(reserved: usize) -> usize {
    let columns = terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(DEFAULT_COLUMNS);
    columns
        .saturating_sub(reserved)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

/// Prints a recipient's chart under a section header.
pub fn render_waterfall(series: &WaterfallSeries, fixed_budget: Decimal, currency: &str) {
    let plain = current_preferences().plain_mode;
    let label_width = series
        .points
        .iter()
        .map(|point| point.label.chars().count())
        .max()
        .unwrap_or(0);
    let bar_width = bar_width_for_terminal(label_width + 20);

    crate::cli::output::section(format!(
        "{} (budget {})",
        series.recipient,
        format_money(fixed_budget, currency)
    ));
    for line in waterfall_lines(series, fixed_budget, bar_width, currency, plain) {
        let _ = io::println_text(&line);
    }
}
