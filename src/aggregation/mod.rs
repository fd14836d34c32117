pub mod dates;
pub mod validator;

pub use dates::{parse_request_date, DateRange};
pub use validator::{resolve_source_reports, SourceSelection};
