#![forbid(unsafe_code)]

pub mod export;
pub mod import;
pub mod tabular;

pub use export::{ExportError, export_csv, export_rows};
pub use import::{ImportError, RowIssue, import_csv, import_rows};
pub use tabular::{TabularError, read_rows, write_rows};
