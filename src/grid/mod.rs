//! Grid storage and its file codec
//!
//! ```text
//! GridStore
//! ├── headers: Vec<String>
//! └── rows: Vec<Vec<String>>   (each row has exactly column_count cells)
//! ```
//!
//! The codec in [`parser`] converts between delimited text and a [`Table`];
//! it never touches a [`GridStore`] directly.

mod parser;
mod store;

pub use parser::{
    column_letter, detect_delimiter, parse_table, write_table, Delimiter, ParseError, Table,
};
pub use store::{CellPosition, GridStore};
