pub mod formatter;
pub mod report;

pub use formatter::format_result;
pub use report::VerificationReport;
