//! Splitting runs of ideographs into word-like tokens.
//!
//! Every segmenter returns sub-slices of its input, contiguous and in order,
//! so joining the tokens always gives back the input.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::dictionary::Dictionary;
use crate::errors::{Li8nError, Result};

/// Cost given to lexicon words that carry no explicit cost.
pub const DEFAULT_WORD_COST: i32 = 1000;

/// Cost of a single character not covered by any lexicon word.
pub const UNKNOWN_COST: i32 = 10000;

pub trait Segmenter {
    fn segment<'a>(&self, run: &'a str) -> Vec<&'a str>;
}

impl<S: Segmenter + ?Sized> Segmenter for &S {
    fn segment<'a>(&self, run: &'a str) -> Vec<&'a str> {
        (**self).segment(run)
    }
}

/// One token per character.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSegmenter;

impl Segmenter for CharSegmenter {
    fn segment<'a>(&self, run: &'a str) -> Vec<&'a str> {
        run.char_indices()
            .map(|(pos, ch)| &run[pos..pos + ch.len_utf8()])
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Word {
    surface: String,
    cost: i32,
}

/// Known words, indexed by their first character.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    index: HashMap<char, Vec<Word>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every key of `dict` becomes a word with [`DEFAULT_WORD_COST`].
    pub fn from_dictionary(dict: &Dictionary) -> Self {
        let mut lexicon = Self::new();
        for key in dict.keys() {
            lexicon.insert(key, DEFAULT_WORD_COST);
        }
        lexicon
    }

    /// Word list format: `word[<TAB>cost]`, `#` comments allowed.
    pub fn extend_from_str(&mut self, source_name: &str, s: &str) -> Result<()> {
        for (idx, line) in s.lines().enumerate() {
            let line = line.trim_start_matches('\u{feff}').trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut it = line.split('\t');
            let word = it.next().unwrap_or("").trim();
            let cost = match it.next().map(str::trim).filter(|x| !x.is_empty()) {
                Some(x) => x.parse::<i32>().map_err(|_| {
                    Li8nError::invalid_format(source_name, idx + 1, "word cost is not an integer")
                })?,
                None => DEFAULT_WORD_COST,
            };
            self.insert(word, cost);
        }
        Ok(())
    }

    pub fn extend_from_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        self.extend_from_str(&path.display().to_string(), &text)
    }

    /// Adds a word, keeping the lower cost if it is already known.
    pub fn insert(&mut self, surface: &str, cost: i32) {
        let Some(first) = surface.chars().next() else {
            return;
        };
        let words = self.index.entry(first).or_default();
        match words.iter_mut().find(|w| w.surface == surface) {
            Some(w) => w.cost = w.cost.min(cost),
            None => words.push(Word {
                surface: surface.to_string(),
                cost,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Words that occur in `text` starting at byte offset `start`,
    /// as `(byte_len, cost)`.
    fn lookup(&self, text: &str, start: usize) -> Vec<(usize, i32)> {
        let rest = &text[start..];
        let Some(first) = rest.chars().next() else {
            return Vec::new();
        };
        self.index
            .get(&first)
            .map(|words| {
                words
                    .iter()
                    .filter(|w| rest.starts_with(w.surface.as_str()))
                    .map(|w| (w.surface.len(), w.cost))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Minimum-cost segmentation over a lattice of lexicon matches.
#[derive(Debug, Clone, Default)]
pub struct LatticeSegmenter {
    lexicon: Lexicon,
}

impl LatticeSegmenter {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

#[derive(Debug, Clone, Copy)]
struct LatticeNode {
    cost: i64,
    prev: Option<usize>,
}

impl Segmenter for LatticeSegmenter {
    fn segment<'a>(&self, run: &'a str) -> Vec<&'a str> {
        // Without words every character is an unknown edge.
        if self.lexicon.is_empty() {
            return CharSegmenter.segment(run);
        }

        // Byte offsets of every character boundary; `pos_of` maps back.
        let mut bounds: Vec<usize> = run.char_indices().map(|(pos, _)| pos).collect();
        bounds.push(run.len());
        let pos_of: HashMap<usize, usize> =
            bounds.iter().enumerate().map(|(i, &b)| (b, i)).collect();
        let len = bounds.len() - 1;

        let mut nodes: Vec<Option<LatticeNode>> = vec![None; len + 1];
        nodes[0] = Some(LatticeNode { cost: 0, prev: None });

        for start in 0..len {
            let Some(node) = nodes[start] else {
                continue;
            };
            let byte_start = bounds[start];
            let mut edges = self.lexicon.lookup(run, byte_start);
            let char_len = bounds[start + 1] - byte_start;
            if !edges.iter().any(|&(l, _)| l == char_len) {
                edges.push((char_len, UNKNOWN_COST));
            }

            for (byte_len, cost) in edges {
                let Some(&end) = pos_of.get(&(byte_start + byte_len)) else {
                    continue;
                };
                let total = node.cost + i64::from(cost);
                // Strict comparison: the earliest start wins ties.
                if nodes[end].map_or(true, |n| total < n.cost) {
                    nodes[end] = Some(LatticeNode {
                        cost: total,
                        prev: Some(start),
                    });
                }
            }
        }

        let mut tokens = Vec::new();
        let mut end = len;
        while let Some(start) = nodes[end].and_then(|n| n.prev) {
            tokens.push(&run[bounds[start]..bounds[end]]);
            end = start;
        }
        tokens.reverse();
        tokens
    }
}
