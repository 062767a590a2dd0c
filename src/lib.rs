//! Simplified → Traditional Chinese conversion for project text files.
//!
//! Runs of CJK ideographs are segmented into words, each word is looked up in
//! a [`Dictionary`], and words the table does not know are converted character
//! by character. Everything else in the document is copied through.

pub mod config;
pub mod dictionary;
pub mod errors;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod segmenter;
pub mod transliterator;

pub use config::Config;
pub use dictionary::Dictionary;
pub use errors::{Li8nError, Result};
pub use output::{write_output, WriteOutcome};
pub use pipeline::{load_dictionary, load_segmenter, Outcome, Pipeline};
pub use prompt::{Prompt, TerminalPrompt};
pub use segmenter::{CharSegmenter, LatticeSegmenter, Lexicon, Segmenter};
pub use transliterator::{convert_token, transliterate, Transliterator};
