pub mod types;

pub use types::ReportError;
