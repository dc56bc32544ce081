//! Customer table ingestion.
//!
//! Reads the input CSV with every column as a string, normalizes the
//! header and resolves the identifier and checked-field columns.
//!
//! ```ignore
//! use std::path::Path;
//! use dq_ingest::read_customer_table;
//!
//! let table = read_customer_table(Path::new("customers.csv"), "ID")?;
//! for record in table.records() {
//!     println!("{}: {:?}", record.id, record.email);
//! }
//! ```

mod error;
mod header;
mod reader;
mod table;

pub use error::{IngestError, Result};
pub use header::{ColumnLayout, field_aliases, header_key, normalize_header};
pub use reader::{read_csv_frame, validate_encoding};
pub use table::{CustomerTable, read_customer_table};
