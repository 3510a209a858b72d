pub mod header;
pub mod values;

pub use header::{normalize_label, resolve_subject_column};
pub use values::parse_percentage;
