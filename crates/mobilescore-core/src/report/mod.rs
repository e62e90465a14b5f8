mod writer;

pub use writer::{REPORT_HEADERS, ReportWriter};
