//! CSV reading: byte decoding, tokenizing and header interpretation.

mod header;
mod tokenizer;

pub use header::{HEADER_ROWS, TableHeader};
pub use tokenizer::{
    decode_text, read_lines, read_lines_from_reader, read_source, tokenize, tokenize_numbered,
};
pub(crate) use tokenizer::{read_numbered, read_numbered_from_reader};
