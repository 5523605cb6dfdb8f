use crate::cli::io;

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, min_width: usize) -> Self {
        Self {
            header: header.into(),
            min_width,
        }
    }
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    /// Each column as wide as its widest cell, never narrower than `min_width`.
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain([column.header.chars().count(), column.min_width])
                    .max()
                    .unwrap_or(column.min_width)
            })
            .collect()
    }
}

/// Renders [`Table`] instances using simple padded columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn lines(table: &Table, plain: bool) -> Vec<String> {
        let widths = table.widths();
        let format_row = |cells: Vec<&str>| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad(cell, *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = Vec::with_capacity(table.rows.len() + 2);
        lines.push(format_row(
            table.columns.iter().map(|col| col.header.as_str()).collect(),
        ));
        if !plain {
            let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
            lines.push("-".repeat(total));
        }
        for row in &table.rows {
            let cells = (0..table.columns.len())
                .map(|idx| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect();
            lines.push(format_row(cells));
        }
        lines
    }

    pub fn render(table: &Table, plain: bool) {
        for line in Self::lines(table, plain) {
            let _ = io::println_text(&line);
        }
    }
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}
