use crate::config::DisplayConfig;
use crate::contact::ContactRecord;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

/// Render contacts as a table, or a short notice when there are none
pub fn render_contacts(records: &[ContactRecord], display: &DisplayConfig) -> String {
    if records.is_empty() {
        return "No contacts.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if !display.use_colors {
        table.force_no_tty();
    }

    let mut headers = Vec::new();
    if display.show_index_column {
        headers.push(Cell::new("#").add_attribute(Attribute::Bold));
    }
    headers.push(Cell::new("Name").add_attribute(Attribute::Bold));
    headers.push(Cell::new("Email").add_attribute(Attribute::Bold));
    table.set_header(headers);

    for (position, record) in records.iter().enumerate() {
        let mut row = Vec::new();
        if display.show_index_column {
            row.push((position + 1).to_string());
        }
        row.push(record.name.clone());
        row.push(record.email.clone());
        table.add_row(row);
    }

    let noun = if records.len() == 1 { "contact" } else { "contacts" };
    format!("{table}\n{} {}", records.len(), noun)
}
