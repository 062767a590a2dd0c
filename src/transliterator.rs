use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::dictionary::Dictionary;
use crate::segmenter::Segmenter;

/// Maximal runs of CJK Unified Ideographs. `(?i)` is a no-op for this block.
static CJK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[\x{4E00}-\x{9FFF}]+").expect("valid CJK pattern"));

/// Converts a document, leaving everything outside the CJK runs untouched.
pub fn transliterate<S>(document: &str, dictionary: &Dictionary, segmenter: &S) -> String
where
    S: Segmenter + ?Sized,
{
    CJK_RUN
        .replace_all(document, |caps: &Captures| {
            let run = &caps[0];
            let mut out = String::with_capacity(run.len());
            for token in segmenter.segment(run) {
                push_token(&mut out, token, dictionary);
            }
            out
        })
        .into_owned()
}

/// Converts one token.
///
/// A single character is looked up directly. A longer token is looked up as a
/// whole first and, when the table has no such word, character by character.
pub fn convert_token(token: &str, dictionary: &Dictionary) -> String {
    let mut out = String::with_capacity(token.len());
    push_token(&mut out, token, dictionary);
    out
}

fn push_token(out: &mut String, token: &str, dictionary: &Dictionary) {
    if let Some(mapped) = dictionary.get(token) {
        out.push_str(mapped);
        return;
    }
    let mut chars = token.chars();
    if chars.next().is_some() && chars.next().is_none() {
        out.push_str(token);
        return;
    }
    let mut buf = [0; 4];
    for ch in token.chars() {
        let key: &str = ch.encode_utf8(&mut buf);
        match dictionary.get(key) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(ch),
        }
    }
}

/// A dictionary bound to a segmenter.
pub struct Transliterator<S> {
    dictionary: Dictionary,
    segmenter: S,
}

impl<S: Segmenter> Transliterator<S> {
    pub fn new(dictionary: Dictionary, segmenter: S) -> Self {
        Self {
            dictionary,
            segmenter,
        }
    }

    pub fn transliterate(&self, document: &str) -> String {
        transliterate(document, &self.dictionary, &self.segmenter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::{CharSegmenter, LatticeSegmenter, Lexicon};

    /// Splits every run into tokens of the given character counts; whatever is
    /// left over becomes one final token.
    struct Split(Vec<usize>);

    impl Segmenter for Split {
        fn segment<'a>(&self, run: &'a str) -> Vec<&'a str> {
            let mut tokens = Vec::new();
            let mut rest = run;
            for &n in &self.0 {
                if rest.is_empty() {
                    break;
                }
                let at = rest.char_indices().nth(n).map_or(rest.len(), |(i, _)| i);
                tokens.push(&rest[..at]);
                rest = &rest[at..];
            }
            if !rest.is_empty() {
                tokens.push(rest);
            }
            tokens
        }
    }

    /// The characters of `s` outside the CJK block, in order.
    fn non_cjk(s: &str) -> String {
        s.chars()
            .filter(|c| !('\u{4E00}'..='\u{9FFF}').contains(c))
            .collect()
    }

    #[test]
    fn test_non_cjk_identity() {
        let dict = Dictionary::builtin().unwrap();
        for doc in ["", "hello, world", "ｈｅｌｌｏ 123 ☃ こんにちは", "\n\t"] {
            assert_eq!(transliterate(doc, &dict, &CharSegmenter), doc);
        }
    }

    #[test]
    fn test_empty_dictionary_identity() {
        let dict = Dictionary::new();
        let seg = LatticeSegmenter::new(Lexicon::from_dictionary(&Dictionary::builtin().unwrap()));
        let doc = "这里是中国的历史，头发很长。";
        assert_eq!(transliterate(doc, &dict, &seg), doc);
        assert_eq!(transliterate(doc, &dict, &CharSegmenter), doc);
    }

    #[test]
    fn test_passthrough_preserved() {
        let dict = Dictionary::builtin().unwrap();
        let seg = LatticeSegmenter::new(Lexicon::from_dictionary(&dict));
        let doc = "<p class=\"x\">这里是中国</p> {\"title\": \"头发 & 历史\"} 2024年";
        let out = transliterate(doc, &dict, &seg);
        assert_eq!(non_cjk(&out), non_cjk(doc));
    }

    #[test]
    fn test_single_character_lookup() {
        let dict = Dictionary::from_pairs([("国", "國")]);
        assert_eq!(transliterate("国", &dict, &CharSegmenter), "國");
        assert_eq!(transliterate("a国b", &dict, &Split(vec![1])), "a國b");
    }

    #[test]
    fn test_whole_token_lookup() {
        let dict = Dictionary::from_pairs([("中国", "中國")]);
        assert_eq!(transliterate("中国", &dict, &Split(vec![2])), "中國");
        // Split apart, neither character maps on its own.
        assert_eq!(transliterate("中国", &dict, &Split(vec![1, 1])), "中国");
    }

    #[test]
    fn test_split_tokens_map_individually() {
        let dict = Dictionary::from_pairs([("国", "國")]);
        assert_eq!(transliterate("中国", &dict, &Split(vec![1, 1])), "中國");

        let dict = Dictionary::from_pairs([("发", "發"), ("头", "頭")]);
        assert_eq!(transliterate("头发", &dict, &Split(vec![1, 1])), "頭發");
    }

    #[test]
    fn test_multi_char_miss_falls_back_to_chars() {
        let dict = Dictionary::from_pairs([("国", "國"), ("历", "歷")]);
        // One token not present as a whole.
        assert_eq!(transliterate("中国历史", &dict, &Split(vec![4])), "中國歷史");
        assert_eq!(convert_token("中国", &dict), "中國");
    }

    #[test]
    fn test_whole_token_beats_chars() {
        let dict = Dictionary::from_pairs([("发", "發"), ("头", "頭"), ("头发", "頭髮")]);
        assert_eq!(transliterate("头发", &dict, &Split(vec![2])), "頭髮");
        assert_eq!(transliterate("头发", &dict, &CharSegmenter), "頭發");
    }

    #[test]
    fn test_single_char_run_never_uses_fallback() {
        let dict = Dictionary::from_pairs([("后", "後")]);
        assert_eq!(convert_token("后", &dict), "後");
        assert_eq!(convert_token("中", &dict), "中");
    }

    #[test]
    fn test_runs_are_independent() {
        let dict = Dictionary::from_pairs([("中国", "中國")]);
        // The space splits the word into two runs.
        assert_eq!(transliterate("中 国", &dict, &Split(vec![2])), "中 国");
    }

    fn builtin() -> Transliterator<LatticeSegmenter> {
        let dict = Dictionary::builtin().unwrap();
        let seg = LatticeSegmenter::new(Lexicon::from_dictionary(&dict));
        Transliterator::new(dict, seg)
    }

    #[test]
    fn test_builtin_sentence() {
        assert_eq!(
            builtin().transliterate("这里是中国的历史，头发很长。Hello 世界!"),
            "這裡是中國的歷史，頭髮很長。Hello 世界!"
        );
    }

    #[test]
    fn test_builtin_everyday_sentence() {
        assert_eq!(
            builtin().transliterate(
                "给谁一万元？别担心，总之我们决定办好这张单子，该领的都领了，声音尽量连在一起。"
            ),
            "給誰一萬元？別擔心，總之我們決定辦好這張單子，該領的都領了，聲音儘量連在一起。"
        );
    }

    #[test]
    fn test_idempotent() {
        let t = builtin();
        for doc in [
            "",
            "里面包子",
            "日历史",
            "放松树下，理发展览。",
            "以后面条台湾周末几个人",
            "这里是中国的历史，头发很长。Hello 世界!",
            "给谁一万元？别担心，总之我们决定办好这张单子。",
            "钟情于复苏的历法，尽快收获饥荒后的稻谷。",
        ] {
            let once = t.transliterate(doc);
            assert_eq!(t.transliterate(&once), once, "{doc}");
        }
    }
}
