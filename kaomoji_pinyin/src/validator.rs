//! 音节校验：每个切分段都必须是合法拼音音节。

use kaomoji_core::segmenter::Segmentation;

use crate::syllabary::{is_syllable, simplify_spelling};

/// 拼音判定的外部依据。
pub trait PinyinOracle: Send + Sync {
    fn is_pinyin(&self, syllable: &str) -> bool;

    /// 把书写变体化简为规范写法（`ü`/`u:` -> `v`，`ju`/`jv` 互换等）。
    fn simplify(&self, syllable: &str) -> String;
}

/// 内置音节表。
#[derive(Debug, Default, Clone, Copy)]
pub struct Syllabary;

impl PinyinOracle for Syllabary {
    fn is_pinyin(&self, syllable: &str) -> bool {
        is_syllable(syllable)
    }

    fn simplify(&self, syllable: &str) -> String {
        simplify_spelling(syllable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// 全部合法；音节已是规范写法
    Valid(Vec<String>),
    /// 化简后仍不合法的段
    Invalid { failed: Vec<String> },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }
}

#[derive(Debug, Default, Clone)]
pub struct Validator<O = Syllabary> {
    oracle: O,
}

impl Validator<Syllabary> {
    pub fn new() -> Self {
        Self { oracle: Syllabary }
    }
}

impl<O: PinyinOracle> Validator<O> {
    pub fn with_oracle(oracle: O) -> Self {
        Self { oracle }
    }

    /// 先原样判定；不通过则化简一次再判定。
    pub fn validate(&self, segmentation: &Segmentation) -> Validation {
        if !segmentation.covered {
            return Validation::Invalid {
                failed: segmentation.syllables.clone(),
            };
        }
        let mut out = Vec::with_capacity(segmentation.syllables.len());
        let mut failed = Vec::new();
        for syllable in &segmentation.syllables {
            if self.oracle.is_pinyin(syllable) {
                out.push(syllable.clone());
                continue;
            }
            let simplified = self.oracle.simplify(syllable);
            if self.oracle.is_pinyin(&simplified) {
                out.push(simplified);
            } else {
                failed.push(syllable.clone());
            }
        }
        if failed.is_empty() {
            Validation::Valid(out)
        } else {
            Validation::Invalid { failed }
        }
    }
}
