//! Table names derived from file names.

use std::path::Path;

/// How a table's name is derived from its file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameCase {
    /// The file stem as is.
    #[default]
    Stem,
    /// The file stem in PascalCase, underscores removed.
    Pascal,
}

/// File name without directory or extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Upper-cases the first character and every character after `_`, dropping the underscores.
///
/// `item_buff_list` becomes `ItemBuffList`; other characters keep their case.
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        upper_next = false;
    }
    out
}

/// Name of the table stored at `path`.
pub fn table_name(path: &Path, case: NameCase) -> String {
    let stem = file_stem(path);
    match case {
        NameCase::Stem => stem,
        NameCase::Pascal => pascal_case(&stem),
    }
}
