use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use encoding_rs::{Encoding, GB18030, UTF_8};
use regex::Regex;

use crate::errors::{Li8nError, Result};

const BUILTIN_TABLE: &str = include_str!("../data/zh2hant.tsv");

static CJK_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x{4E00}-\x{9FFF}]+$").expect("valid CJK pattern"));

/// Decodes a table source file. A BOM decides the encoding when present;
/// otherwise UTF-8 is tried and GB18030 used when that fails.
pub fn decode_source(bytes: &[u8]) -> (Cow<'_, str>, &'static Encoding, bool) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text, encoding, had_errors);
    }
    let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if !had_errors {
        return (text, UTF_8, false);
    }
    let (text, had_errors) = GB18030.decode_without_bom_handling(bytes);
    (text, GB18030, had_errors)
}

/// The `*.txt` table sources directly under `dir`, in path order.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join("*.txt");
    let mut files = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        files.push(entry?);
    }
    Ok(files)
}

/// Simplified → Traditional lookup table.
///
/// Keys are single characters or whole words. The table is never mutated once
/// built, except by [`Dictionary::merge`] while it is still being assembled.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from explicit pairs. Identity pairs are dropped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = HashMap::new();
        for (k, v) in pairs {
            let (k, v) = (k.into(), v.into());
            if !k.is_empty() && k != v {
                entries.insert(k, v);
            }
        }
        Self { entries }
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_tsv_str("builtin", BUILTIN_TABLE)
    }

    /// Parses the OpenCC-style text format:
    ///
    /// - `simplified<TAB>traditional[ alternative...]`, the first candidate wins
    /// - blank lines and lines starting with `#` are ignored
    pub fn from_tsv_str(source_name: &str, s: &str) -> Result<Self> {
        let mut entries = HashMap::new();

        for (idx, line) in s.lines().enumerate() {
            let line = line.trim_start_matches('\u{feff}').trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut it = line.splitn(2, '\t');
            let key = it.next().unwrap_or("").trim();
            let value = it
                .next()
                .and_then(|rest| rest.split_whitespace().next())
                .unwrap_or("");
            if key.is_empty() || value.is_empty() {
                return Err(Li8nError::invalid_format(
                    source_name,
                    idx + 1,
                    "expected `simplified<TAB>traditional`",
                ));
            }
            if key != value {
                entries.insert(key.to_string(), value.to_string());
            }
        }

        tracing::debug!(source = source_name, entries = entries.len(), "parsed dictionary");
        Ok(Self { entries })
    }

    /// Loads a table from disk. Files ending in `.zst` are read through the
    /// seekable zstd decoder, everything else as plain UTF-8 text.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        if path.extension().is_some_and(|ext| ext == "zst") {
            let file = File::open(path)?;
            let mut decoder = zeekstd::Decoder::new(file)?;
            let mut text = String::new();
            decoder.read_to_string(&mut text)?;
            Self::from_tsv_str(&name, &text)
        } else {
            let text = fs::read_to_string(path)?;
            Self::from_tsv_str(&name, &text)
        }
    }

    /// Parses an OpenCC source file of unknown encoding, keeping only entries
    /// whose key consists solely of CJK Unified Ideographs.
    pub fn from_source(source_name: &str, bytes: &[u8]) -> Result<Self> {
        let (text, encoding, had_errors) = decode_source(bytes);
        if had_errors {
            tracing::warn!(source = source_name, encoding = encoding.name(), "encoding errors in source");
        }
        let mut dict = Self::from_tsv_str(source_name, &text)?;
        dict.entries.retain(|k, _| CJK_KEY.is_match(k));
        Ok(dict)
    }

    /// Overlays `other` on top of `self`; entries of `other` win.
    pub fn merge(&mut self, other: Dictionary) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Writes the table in the text format, sorted by key.
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> Result<()> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_unstable();
        for (k, v) in sorted {
            writeln!(writer, "{}\t{}", k, v)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the table as seekable zstd, readable by [`Dictionary::from_path`].
    pub fn write_compressed(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut encoder = zeekstd::Encoder::new(file)?;
        self.write_tsv(&mut encoder)?;
        encoder.finish()?;
        Ok(())
    }
}
