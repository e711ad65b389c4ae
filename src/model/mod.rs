pub mod capture;
pub mod parser;

pub use capture::{CaptureRecord, ReferenceYear, format_preview};
pub use parser::{DateMatch, extract_tags, normalize_date, parse_capture, recognize_date};
