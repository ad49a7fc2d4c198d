pub mod csv;
pub mod generator;

pub use csv::{report_rows, CsvExporter};
pub use generator::ReportGenerator;
