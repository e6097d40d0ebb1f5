//! Batch conversion of table files to JSON.
//!
//! A run takes one table file or a directory of them. Each file is decoded
//! independently; the first file that fails to decode or write halts the run.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info, info_span};

use csvtab_ingest::{
    LooseRecord, SourceEncoding, Table, Value, decode_text, list_table_files, read_lines, read_source,
};

pub use crate::naming::NameCase;
use crate::naming::{file_stem, table_name};
use crate::types::{ConvertResult, TableSummary};

/// Output extensions that select a single combined file.
const COMBINED_EXTENSIONS: [&str; 2] = ["json", "cson"];

/// What is written for each table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConvertMode {
    /// Every tokenized row, header rows included, as arrays of strings.
    Lines,
    /// Data rows as objects with coerced values.
    #[default]
    Records,
    /// The decoded file text as one string.
    Text,
}

/// Settings for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Table file or directory of table files.
    pub source: PathBuf,
    /// Output directory or combined `.json`/`.cson` file. Defaults to the
    /// source directory.
    pub output: Option<PathBuf>,
    pub encoding: SourceEncoding,
    pub mode: ConvertMode,
    pub name_case: NameCase,
    /// Indent JSON output.
    pub pretty: bool,
}

impl ConvertConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: None,
            encoding: SourceEncoding::Gbk,
            mode: ConvertMode::default(),
            name_case: NameCase::default(),
            pretty: false,
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ConvertMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_name_case(mut self, name_case: NameCase) -> Self {
        self.name_case = name_case;
        self
    }
}

/// Returns true if `path` names a combined output file rather than a directory.
pub fn is_combined_output(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            COMBINED_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

struct Decoded {
    payload: JsonValue,
    rows: usize,
}

fn decode_table(path: &Path, mode: ConvertMode, encoding: SourceEncoding) -> Result<Decoded> {
    match mode {
        ConvertMode::Lines => {
            let rows = read_lines(path, encoding)?;
            Ok(Decoded {
                rows: rows.len(),
                payload: serde_json::to_value(&rows)?,
            })
        }
        ConvertMode::Records => {
            let records = Table::open(path, encoding)?.to_loose()?;
            ensure_finite(&records)?;
            Ok(Decoded {
                rows: records.len(),
                payload: serde_json::to_value(&records)?,
            })
        }
        ConvertMode::Text => {
            let text = decode_text(&read_source(path)?, encoding)?;
            Ok(Decoded {
                rows: 0,
                payload: JsonValue::String(text),
            })
        }
    }
}

/// JSON has no NaN or infinity, and `serde_json` would write them as `null`.
fn ensure_finite(records: &[LooseRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        let non_finite = record
            .iter()
            .find(|(_, value)| matches!(value, Value::Float(f) if !f.is_finite()));
        if let Some((name, value)) = non_finite {
            anyhow::bail!(
                "data row {} field \"{name}\" is {value}, which JSON cannot represent",
                index + 1
            );
        }
    }
    Ok(())
}

fn default_output_dir(source: &Path, source_is_dir: bool) -> PathBuf {
    if source_is_dir {
        return source.to_path_buf();
    }
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Serializes `value` to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let content = if pretty {
        serde_json::to_vec_pretty(value)
    } else {
        serde_json::to_vec(value)
    }
    .context("serialize json")?;
    fs::write(path, content).with_context(|| format!("write file {}", path.display()))
}

/// Converts every table selected by `config`.
pub fn run_convert(config: &ConvertConfig) -> Result<ConvertResult> {
    let source = &config.source;
    let metadata =
        fs::metadata(source).with_context(|| format!("read source {}", source.display()))?;
    let inputs = if metadata.is_dir() {
        list_table_files(source)?
    } else {
        vec![source.clone()]
    };
    let combined = config
        .output
        .as_ref()
        .filter(|path| is_combined_output(path))
        .cloned();
    let output_dir = match &config.output {
        Some(path) if combined.is_none() => path.clone(),
        _ => default_output_dir(source, metadata.is_dir()),
    };
    debug!(
        source = %source.display(),
        inputs = inputs.len(),
        encoding = config.encoding.label(),
        "starting conversion"
    );

    let mut result = ConvertResult::default();
    let mut collected: BTreeMap<String, JsonValue> = BTreeMap::new();
    for path in &inputs {
        let name = table_name(path, config.name_case);
        let span = info_span!("table", table = %name);
        let _guard = span.enter();
        let start = Instant::now();

        let Decoded { payload, rows } = decode_table(path, config.mode, config.encoding)
            .with_context(|| format!("read csv {}", path.display()))?;
        debug!(rows, duration_ms = start.elapsed().as_millis(), "decoded table");

        let output = if let Some(target) = &combined {
            collected.insert(name.clone(), payload);
            target.clone()
        } else {
            let target = output_dir.join(format!("{}.json", file_stem(path)));
            let payload = match config.mode {
                ConvertMode::Text => {
                    let mut wrapped = Map::new();
                    wrapped.insert(name.clone(), payload);
                    JsonValue::Object(wrapped)
                }
                ConvertMode::Lines | ConvertMode::Records => payload,
            };
            write_json(&target, &payload, config.pretty)?;
            info!(output = %target.display(), "write file");
            target
        };

        result.tables.push(TableSummary {
            name,
            source: path.clone(),
            rows,
            output,
        });
    }

    if let Some(target) = combined {
        write_json(&target, &collected, config.pretty)?;
        info!(output = %target.display(), tables = collected.len(), "write file");
        result.combined_output = Some(target);
    }
    Ok(result)
}
