//! read → transliterate → confirm → write, driven by `.li8nrc`.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::errors::Result;
use crate::output::{write_output, WriteOutcome};
use crate::prompt::Prompt;
use crate::segmenter::{LatticeSegmenter, Lexicon, Segmenter};
use crate::transliterator::Transliterator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No `.li8nrc` in the working directory.
    MissingConfig,
    /// The input file does not exist.
    MissingInput(PathBuf),
    Written { path: PathBuf, outcome: WriteOutcome },
}

impl Outcome {
    /// The line shown to the user once the run is over.
    pub fn message(&self) -> String {
        match self {
            Outcome::MissingConfig => "没找到国际化配置文件,请执行'li8n init'".to_string(),
            Outcome::MissingInput(_) => "文件不存在".to_string(),
            Outcome::Written {
                outcome: WriteOutcome::Cancelled,
                ..
            } => "Write canceled".to_string(),
            Outcome::Written { path, .. } => format!("file create {}", path.display()),
        }
    }
}

/// Converts one project file with a dictionary and segmenter fixed at
/// construction.
pub struct Pipeline<S> {
    workdir: PathBuf,
    transliterator: Transliterator<S>,
}

impl<S: Segmenter> Pipeline<S> {
    pub fn new(workdir: impl Into<PathBuf>, dictionary: Dictionary, segmenter: S) -> Self {
        let workdir = workdir.into();
        tracing::debug!(workdir = %workdir.display(), entries = dictionary.len(), "pipeline ready");
        Self {
            workdir,
            transliterator: Transliterator::new(dictionary, segmenter),
        }
    }

    /// Relative paths are taken from the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.workdir.join(path)
    }

    /// Converts `input`, or the configured `entry` when none is given, and
    /// writes the configured output file.
    pub fn run<P: Prompt + ?Sized>(
        &self,
        config: &Config,
        input: Option<&Path>,
        prompt: &mut P,
    ) -> Result<Outcome> {
        let input = self.resolve(input.unwrap_or(config.entry.as_path()));
        if !input.is_file() {
            return Ok(Outcome::MissingInput(input));
        }
        let document = read_document(&input, config.input_encoding()?)?;
        let converted = self.transliterator.transliterate(&document);

        let path = self.resolve(&config.outfile);
        let outcome = write_output(&path, &converted, prompt)?;
        Ok(Outcome::Written { path, outcome })
    }
}

/// The builtin table with the configured extra table merged over it.
pub fn load_dictionary(workdir: &Path, config: &Config) -> Result<Dictionary> {
    let mut dictionary = Dictionary::builtin()?;
    if let Some(extra) = &config.dictionary {
        dictionary.merge(Dictionary::from_path(workdir.join(extra))?);
    }
    tracing::debug!(entries = dictionary.len(), "dictionary ready");
    Ok(dictionary)
}

/// A lattice segmenter over the keys of `dictionary` plus the configured
/// word list.
pub fn load_segmenter(workdir: &Path, config: &Config, dictionary: &Dictionary) -> Result<LatticeSegmenter> {
    let mut lexicon = Lexicon::from_dictionary(dictionary);
    if let Some(words) = &config.words {
        lexicon.extend_from_path(workdir.join(words))?;
    }
    tracing::debug!(words = lexicon.len(), "lexicon ready");
    Ok(LatticeSegmenter::new(lexicon))
}

/// Reads a whole file in the given encoding. Malformed input is replaced with
/// U+FFFD and reported as a warning.
pub fn read_document(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = fs::read(path)?;
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes);
    if had_errors {
        tracing::warn!(
            path = %path.display(),
            encoding = encoding.name(),
            "input contains malformed sequences"
        );
    }
    Ok(text.into_owned())
}
