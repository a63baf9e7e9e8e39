pub mod output;
pub mod reader;
pub mod writer;

pub use output::{create_writer, ReportFormat, ReportWriter};
pub use reader::{open_records, RecordReader};
pub use writer::{create_output, write_row};
