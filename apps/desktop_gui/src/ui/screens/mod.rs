//! One module per route; each adds an `impl DesktopGuiApp` block that draws it.

pub mod all_items;
pub mod details;
pub mod edit;
pub mod notifications;
pub mod overview;
pub mod settings;

use chrono::NaiveDate;

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
