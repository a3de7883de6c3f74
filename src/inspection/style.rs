//! Output styling for inspect output.

use std::fmt::Display;

use owo_colors::OwoColorize;
use tabled::{
    Table,
    settings::{Alignment, Modify, Style, object::Rows},
};

pub fn header<T: Display>(v: T) -> String {
    v.bold().to_string()
}

pub fn value<T: Display>(v: T) -> String {
    v.green().to_string()
}

pub fn dim<T: Display>(v: T) -> String {
    v.dimmed().to_string()
}

/// Rounded borders, centered header row.
pub fn style_table(table: &mut Table) {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
}

/// Create a styled table from derive-tabled data.
pub fn rounded_table<T, I>(data: I) -> Table
where
    T: tabled::Tabled,
    I: IntoIterator<Item = T>,
{
    let mut table = Table::new(data);
    style_table(&mut table);
    table
}
