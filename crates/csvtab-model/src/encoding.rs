use serde::{Deserialize, Serialize};

/// Character encoding of a source file.
///
/// Spreadsheet tools in simplified-Chinese locales save CSV as GBK by default;
/// those bytes are transcoded to Unicode before tokenizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEncoding {
    #[default]
    Utf8,
    Gbk,
}

impl SourceEncoding {
    /// Maps the legacy `is_gbk` call flag onto an encoding.
    pub fn from_gbk_flag(is_gbk: bool) -> Self {
        if is_gbk {
            SourceEncoding::Gbk
        } else {
            SourceEncoding::Utf8
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "UTF-8",
            SourceEncoding::Gbk => "GBK",
        }
    }
}
