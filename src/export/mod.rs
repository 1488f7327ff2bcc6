pub mod csv_export;
pub mod html_export;

pub use csv_export::{CSV_HEADERS, csv_string, default_csv_name, export_csv, write_csv};
pub use html_export::{default_html_name, export_html, render_document, render_report_markup};

/// Shortest text form of a total: `15`, `1.5`.
pub fn format_total(total: f64) -> String {
    format!("{}", total)
}
