//! 全拼 -> 双拼：切分、校验、按方案编码。
//!
//! 多词读音（以空格或特殊空格分隔）逐词处理，再用配置指定的空格重新连接。

pub mod scheme;
pub mod segmenter;
pub mod syllabary;
pub mod validator;

use kaomoji_core::encoder::{Encoded, Encoder};
use kaomoji_core::segmenter::Segmenter;
use kaomoji_core::{SPECIAL_SPACE, SpaceVariant};
use log::debug;

pub use scheme::Scheme;
pub use segmenter::QuanpinSegmenter;
pub use validator::{PinyinOracle, Syllabary, Validation, Validator};

pub struct ShuangpinEncoder<O = Syllabary> {
    scheme: Scheme,
    segmenter: QuanpinSegmenter,
    validator: Validator<O>,
}

impl ShuangpinEncoder<Syllabary> {
    pub fn new(scheme: Scheme) -> Self {
        Self::with_oracle(scheme, Syllabary)
    }
}

impl<O: PinyinOracle> ShuangpinEncoder<O> {
    pub fn with_oracle(scheme: Scheme, oracle: O) -> Self {
        Self {
            scheme,
            segmenter: QuanpinSegmenter::new(),
            validator: Validator::with_oracle(oracle),
        }
    }

    /// 单词：合法时返回 (编码, 规范音节)。
    fn encode_word(&self, word: &str) -> Option<(String, Vec<String>)> {
        let segmentation = self.segmenter.segment(word);
        match self.validator.validate(&segmentation) {
            Validation::Valid(syllables) => {
                let code = self.scheme.encode(&syllables).concat();
                Some((code, syllables))
            }
            Validation::Invalid { failed } => {
                debug!(
                    "非拼音 {word:?}：切分为 {:?}，不合法 {}，原样保留",
                    segmentation.preedit(),
                    failed.join(" ")
                );
                None
            }
        }
    }
}

impl<O: PinyinOracle> Encoder for ShuangpinEncoder<O> {
    fn encode_reading(&self, reading: &str, space: SpaceVariant) -> Encoded {
        let is_separator = |c: char| c == ' ' || c == SPECIAL_SPACE;
        if reading.contains(is_separator) {
            let parts: Vec<String> = reading
                .split(is_separator)
                .filter(|p| !p.is_empty())
                .map(|p| match self.encode_word(p) {
                    Some((code, _)) => code,
                    None => p.to_string(),
                })
                .collect();
            let separator = space.as_char().to_string();
            return Encoded {
                code: parts.join(separator.as_str()),
                syllables: None,
            };
        }
        match self.encode_word(reading) {
            Some((code, syllables)) => Encoded {
                code,
                syllables: Some(syllables),
            },
            None => Encoded {
                code: reading.to_string(),
                syllables: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(scheme: Scheme, reading: &str, space: SpaceVariant) -> Encoded {
        ShuangpinEncoder::new(scheme).encode_reading(reading, space)
    }

    #[test]
    fn nihao_end_to_end() {
        let e = encode(Scheme::Xiaohe, "nihao", SpaceVariant::Reserved);
        assert_eq!(e.code, "nihc");
        assert_eq!(e.syllables, Some(vec!["ni".to_string(), "hao".to_string()]));
        assert_eq!(encode(Scheme::Znabc, "nihao", SpaceVariant::Plain).code, "nihk");
    }

    #[test]
    fn multi_word_reading_is_rejoined_with_chosen_space() {
        let e = encode(Scheme::Xiaohe, "wo bu", SpaceVariant::Reserved);
        assert_eq!(e.code, "wo\u{2002}bu");
        assert_eq!(e.syllables, None);

        let e = encode(Scheme::Xiaohe, "wo\u{2002}bu", SpaceVariant::Plain);
        assert_eq!(e.code, "wo bu");
    }

    #[test]
    fn invalid_word_passes_through_literally() {
        let e = encode(Scheme::Xiaohe, "hao xx", SpaceVariant::Plain);
        assert_eq!(e.code, "hc xx");
        let e = encode(Scheme::Xiaohe, "zhongguo  xx", SpaceVariant::Reserved);
        assert_eq!(e.code, "vsgo\u{2002}xx");
    }

    #[test]
    fn invalid_single_reading_is_unchanged() {
        for reading in ["awsl", "(T_T)", "Hmm"] {
            let e = encode(Scheme::Sogou, reading, SpaceVariant::Reserved);
            assert_eq!(e.code, reading);
            assert_eq!(e.syllables, None);
        }
    }

    #[test]
    fn simplified_spelling_is_encoded() {
        let e = encode(Scheme::Xiaohe, "xvan", SpaceVariant::Plain);
        assert_eq!(e.code, "xr");
        assert_eq!(e.syllables, Some(vec!["xuan".to_string()]));
    }

    #[test]
    fn umlaut_readings_reach_the_encoder() {
        let cases = [
            ("celue", "celt", vec!["ce", "lve"]),
            ("nü", "nv", vec!["nv"]),
            ("lu:e", "lt", vec!["lve"]),
            ("nüer", "nver", vec!["nv", "er"]),
            ("pianong", "piaans", vec!["pi", "a", "nong"]),
        ];
        for (reading, code, syllables) in cases {
            let e = encode(Scheme::Xiaohe, reading, SpaceVariant::Plain);
            assert_eq!(e.code, code, "{reading}");
            let syllables: Vec<String> = syllables.into_iter().map(String::from).collect();
            assert_eq!(e.syllables, Some(syllables), "{reading}");
        }
    }

    #[test]
    fn schemes_disagree_somewhere() {
        let codes: Vec<String> = Scheme::ALL
            .iter()
            .map(|&s| encode(s, "zhuangshi", SpaceVariant::Plain).code)
            .collect();
        assert_ne!(codes[0], codes[4]);
        assert_eq!(codes[0], "vlui");
    }
}
