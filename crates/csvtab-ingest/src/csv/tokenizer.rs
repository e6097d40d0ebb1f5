//! Source bytes to rows of cells.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use csvtab_model::{Row, SourceEncoding};

use crate::error::{Result, TableError};

/// Reads a whole table file into memory.
///
/// The file handle is dropped before returning, on success or failure.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str().is_empty() {
        return Err(TableError::InvalidTarget {
            reason: "table file path is empty".to_string(),
        });
    }
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TableError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            TableError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Decodes source bytes into Unicode text.
///
/// GBK input is transcoded without replacement characters, so any byte
/// sequence outside the code page is an error. A leading UTF-8 BOM is dropped.
pub fn decode_text(bytes: &[u8], encoding: SourceEncoding) -> Result<String> {
    let text = match encoding {
        SourceEncoding::Utf8 => std::str::from_utf8(bytes)
            .map_err(|e| TableError::Decode {
                encoding: encoding.label(),
                detail: format!("invalid byte sequence at offset {}", e.valid_up_to()),
            })?
            .to_string(),
        SourceEncoding::Gbk => encoding_rs::GBK
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| TableError::Decode {
                encoding: encoding.label(),
                detail: "byte sequence outside the GBK code page".to_string(),
            })?
            .into_owned(),
    };
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}

/// Splits text into rows of cells.
///
/// Cells are comma separated and may be double-quoted, with `""` escaping a
/// quote inside a quoted cell. Blank lines produce no row. Rows may differ in
/// length; the header and field-stream layers decide which lengths are valid.
pub fn tokenize(text: &str) -> Result<Vec<Row>> {
    Ok(tokenize_numbered(text)?
        .into_iter()
        .map(|(_, row)| row)
        .collect())
}

/// Like [`tokenize`], pairing each row with the one-based source line it
/// starts on. Skipped blank lines still count.
pub fn tokenize_numbered(text: &str) -> Result<Vec<(u64, Row)>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let bytes = text.as_bytes();
    let mut line: u64 = 1;
    let mut scanned = 0;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TableError::Csv {
            line: e.position().map(csv::Position::line).unwrap_or_default(),
            message: e.to_string(),
        })?;
        // The reader reports where it resumed, before any skipped blank lines.
        let resumed = record
            .position()
            .and_then(|p| usize::try_from(p.byte()).ok())
            .unwrap_or(scanned)
            .clamp(scanned, bytes.len());
        let start = resumed
            + bytes[resumed..]
                .iter()
                .take_while(|&&b| b == b'\r' || b == b'\n')
                .count();
        line += newlines(&bytes[scanned..start]);
        scanned = start;
        rows.push((line, record.iter().map(str::to_string).collect()));
    }
    Ok(rows)
}

fn newlines(bytes: &[u8]) -> u64 {
    bytes.iter().filter(|&&b| b == b'\n').count() as u64
}

/// Reads every row of a table file, header rows included.
pub fn read_lines(path: impl AsRef<Path>, encoding: SourceEncoding) -> Result<Vec<Row>> {
    Ok(strip_lines(read_numbered(path.as_ref(), encoding)?))
}

/// Reads every row from an arbitrary byte source.
pub fn read_lines_from_reader<R: Read>(reader: R, encoding: SourceEncoding) -> Result<Vec<Row>> {
    Ok(strip_lines(read_numbered_from_reader(reader, encoding)?))
}

pub(crate) fn read_numbered(path: &Path, encoding: SourceEncoding) -> Result<Vec<(u64, Row)>> {
    let bytes = read_source(path)?;
    let rows = tokenize_numbered(&decode_text(&bytes, encoding)?)?;
    tracing::debug!(
        path = %path.display(),
        encoding = encoding.label(),
        rows = rows.len(),
        "tokenized table file"
    );
    Ok(rows)
}

pub(crate) fn read_numbered_from_reader<R: Read>(
    mut reader: R,
    encoding: SourceEncoding,
) -> Result<Vec<(u64, Row)>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    tokenize_numbered(&decode_text(&bytes, encoding)?)
}

fn strip_lines(rows: Vec<(u64, Row)>) -> Vec<Row> {
    rows.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_tokenize_simple() {
        let rows = tokenize("a,b,c\n1,2,3\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_tokenize_quoted_cells() {
        let rows = tokenize("\"hello, world\",\"he said \"\"hi\"\"\"\n").unwrap();
        assert_eq!(rows, vec![vec!["hello, world", "he said \"hi\""]]);
    }

    #[test]
    fn test_tokenize_keeps_cell_whitespace() {
        let rows = tokenize("  a , b\n").unwrap();
        assert_eq!(rows, vec![vec!["  a ", " b"]]);
    }

    #[test]
    fn test_tokenize_skips_blank_lines_and_allows_ragged_rows() {
        let rows = tokenize("title\n\na,b\r\n1,2\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["title"]);
        assert_eq!(rows[2], vec!["1", "2"]);
    }

    #[test]
    fn test_tokenize_numbered_counts_skipped_lines() {
        let rows = tokenize_numbered("\n title\n\n\na,b\r\n\r\n\"x\ny\",2\n3,4\n").unwrap();
        let lines: Vec<u64> = rows.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![2, 5, 7, 9]);
        assert_eq!(rows[2].1, vec!["x\ny", "2"]);
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let text = decode_text("\u{feff}a,b".as_bytes(), SourceEncoding::Utf8).unwrap();
        assert_eq!(text, "a,b");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let result = decode_text(&[b'a', 0xff, b'b'], SourceEncoding::Utf8);
        assert!(matches!(
            result,
            Err(TableError::Decode {
                encoding: "UTF-8",
                ..
            })
        ));
    }

    #[test]
    fn test_decode_gbk() {
        // "名称" in GBK
        let bytes = [0xc3, 0xfb, 0xb3, 0xc6];
        let text = decode_text(&bytes, SourceEncoding::Gbk).unwrap();
        assert_eq!(text, "名称");
    }

    #[test]
    fn test_decode_gbk_rejects_truncated_sequence() {
        let result = decode_text(&[b'a', 0xc3], SourceEncoding::Gbk);
        assert!(matches!(result, Err(TableError::Decode { .. })));
    }

    #[test]
    fn test_read_lines_missing_file() {
        let result = read_lines("/definitely/not/here.csv", SourceEncoding::Utf8);
        assert!(matches!(result, Err(TableError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_lines_empty_path() {
        let result = read_lines("", SourceEncoding::Utf8);
        assert!(matches!(result, Err(TableError::InvalidTarget { .. })));
    }

    #[test]
    fn test_read_lines_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Goods\nid,name\nint,string\n1,apple\n").unwrap();
        let rows = read_lines(file.path(), SourceEncoding::Utf8).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3], vec!["1", "apple"]);
    }

    #[test]
    fn test_read_lines_from_reader() {
        let rows = read_lines_from_reader("x\ny\n".as_bytes(), SourceEncoding::Utf8).unwrap();
        assert_eq!(rows, vec![vec!["x"], vec!["y"]]);
    }
}
