pub mod chart;
pub mod formatting;
pub mod table;

pub use chart::{render_waterfall, waterfall_lines};
pub use formatting::{format_cost, format_money};
pub use table::{Table, TableColumn, TableRenderer};
