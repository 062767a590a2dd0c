//! The `.li8nrc` project file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::errors::{Li8nError, Result};

pub const CONFIG_FILE_NAME: &str = ".li8nrc";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Input file used when none is given on the command line.
    pub entry: PathBuf,
    /// Where the converted text is written.
    pub outfile: PathBuf,
    /// Extra table merged over the builtin one (`.tsv` or `.tsv.zst`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PathBuf>,
    /// Additional segmentation words, `word[<TAB>cost]` per line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<PathBuf>,
    /// WHATWG label of the input encoding. Output is always UTF-8.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("src/locales/zh-CN.json"),
            outfile: PathBuf::from("src/locales/zh-TW.json"),
            dictionary: None,
            words: None,
            encoding: None,
        }
    }
}

impl Config {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    /// Reads `<dir>/.li8nrc`. A missing file is `Ok(None)`.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = Self::path_in(dir);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let config: Config = serde_json::from_str(&text).map_err(|source| Li8nError::Config {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(Some(config))
    }

    /// Writes the default configuration to `<dir>/.li8nrc`, replacing any
    /// existing file.
    pub fn write_default(dir: &Path) -> Result<PathBuf> {
        let path = Self::path_in(dir);
        let json = serde_json::to_string_pretty(&Self::default())?;
        fs::write(&path, json + "\n")?;
        Ok(path)
    }

    /// The configured input encoding, UTF-8 when unset.
    pub fn input_encoding(&self) -> Result<&'static Encoding> {
        match &self.encoding {
            None => Ok(encoding_rs::UTF_8),
            Some(label) => Encoding::for_label(label.trim().as_bytes())
                .ok_or_else(|| Li8nError::UnknownEncoding(label.clone())),
        }
    }
}
