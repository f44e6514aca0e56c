//! 词典生成流水线：词源 -> 候选行 -> 规范化；双拼词典在拼音词典的基础上再编码。

use std::fmt;

use kaomoji_core::encoder::{Encoder, Glosser};
use kaomoji_core::{Canonical, Canonicalizer, ConfigError, Detail, Entry, PipelineConfig};
use kaomoji_pinyin::Scheme;
use log::{debug, info};

use crate::source::Source;

/// 输出词典的种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    Pinyin,
    Kmj,
    Shuangpin(Scheme),
}

impl Flavor {
    /// 输出文件名（不含扩展名）。
    pub fn file_stem(self) -> String {
        match self {
            Flavor::Pinyin => "all_output_result_pinyin".to_string(),
            Flavor::Kmj => "all_output_result_kmj".to_string(),
            Flavor::Shuangpin(scheme) => format!("all_output_result_shuangpin_{}", scheme.id()),
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.txt", self.file_stem())
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Pinyin => f.write_str("pinyin"),
            Flavor::Kmj => f.write_str("kmj"),
            Flavor::Shuangpin(scheme) => write!(f, "shuangpin_{scheme}"),
        }
    }
}

pub struct Pipeline {
    config: PipelineConfig,
    canonicalizer: Canonicalizer,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            canonicalizer: Canonicalizer::new(&config),
            config,
        }
    }

    /// 按来源顺序收集候选行；任一来源不支持该词典即整体失败。
    pub fn collect(&self, sources: &[Source], flavor: Flavor) -> Result<Vec<String>, ConfigError> {
        let mut lines = Vec::new();
        for source in sources {
            lines.extend(source.produce(flavor, &self.config)?);
        }
        Ok(lines)
    }

    pub fn pinyin(&self, sources: &[Source]) -> Result<Canonical, ConfigError> {
        info!("生成 pinyin 词典（{} 个来源）", sources.len());
        let lines = self.collect(sources, Flavor::Pinyin)?;
        Ok(self.canonicalizer.canonicalize(lines))
    }

    pub fn kmj(&self, sources: &[Source]) -> Result<Canonical, ConfigError> {
        info!("生成 kmj 词典（{} 个来源）", sources.len());
        let lines = self.collect(sources, Flavor::Kmj)?;
        Ok(self.canonicalizer.canonicalize(lines))
    }

    /// 把拼音词典的行编码为双拼。
    ///
    /// 输入应为拼音词典的全部行（含格式错误行）；无法解析的行原样交给规范化阶段分流。
    pub fn shuangpin<I, E>(&self, pinyin_lines: I, encoder: &E, glosser: Option<&dyn Glosser>) -> Canonical
    where
        I: IntoIterator<Item = String>,
        E: Encoder + ?Sized,
    {
        let space = self.config.space_variant();
        let lines: Vec<String> = pinyin_lines
            .into_iter()
            .map(|raw| {
                let entry = match Entry::parse_line(&raw) {
                    Ok(entry) => entry,
                    Err(err) => {
                        debug!("跳过编码 ({err}): {raw:?}");
                        return raw;
                    }
                };
                let encoded = encoder.encode_reading(&entry.reading, space);
                let detail = self.config.wants_detail().then(|| Detail {
                    gloss: if self.config.include_gloss {
                        glosser.zip(encoded.syllables.as_deref()).and_then(|(g, s)| g.gloss(s))
                    } else {
                        None
                    },
                    full_reading: entry.reading.clone(),
                });
                Entry::new(entry.headword, encoded.code, entry.weight)
                    .with_detail(detail)
                    .to_line()
                    .into_string()
            })
            .collect();
        self.canonicalizer.canonicalize(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceKind;
    use kaomoji_core::DictLine;
    use kaomoji_pinyin::ShuangpinEncoder;

    fn accepted(c: &Canonical) -> Vec<&str> {
        c.accepted.iter().map(DictLine::as_str).collect()
    }

    fn tabular(text: &str) -> Source {
        Source::new("Temreg", SourceKind::Tabular, text)
    }

    #[test]
    fn file_stems() {
        assert_eq!(Flavor::Pinyin.file_name(), "all_output_result_pinyin.txt");
        assert_eq!(Flavor::Kmj.file_stem(), "all_output_result_kmj");
        assert_eq!(
            Flavor::Shuangpin(Scheme::Znabc).file_stem(),
            "all_output_result_shuangpin_znabc"
        );
    }

    #[test]
    fn merges_sources_then_dedups() {
        let p = Pipeline::new(PipelineConfig::default());
        let a = tabular("(^_^)\tnihao\t0\n(T_T)\tku\t0\n");
        let b = Source::new("custom_phrase", SourceKind::Phrase, "nihao    (^_^)\nku    (T_T)\n");
        let c = tabular("(^_^)\tnihao\t0\n");
        let out = p.pinyin(&[a, b, c]).unwrap();
        assert_eq!(
            accepted(&out),
            vec!["(T_T)\tku\t0", "(T_T)\tku\t1", "(^_^)\tnihao\t0", "(^_^)\tnihao\t1"]
        );
        assert_eq!(out.stats.duplicates, 1);
    }

    #[test]
    fn kmj_collapses_to_one_line_per_headword_and_weight() {
        let p = Pipeline::new(PipelineConfig::default());
        let a = tabular("(^_^)\tnihao\t0\n(^_^)\thao\t0\n");
        let b = Source::new("A_kaomoji", SourceKind::Bare, "(^_^)\n");
        let out = p.kmj(&[a, b]).unwrap();
        assert_eq!(accepted(&out), vec!["(^_^)\tkmj\t0"]);
    }

    #[test]
    fn bare_source_is_fatal_for_pinyin() {
        let p = Pipeline::new(PipelineConfig::default());
        let b = Source::new("A_kaomoji", SourceKind::Bare, "(^_^)\n");
        assert!(p.pinyin(&[b]).is_err());
    }

    #[test]
    fn shuangpin_preserves_weight_and_routes_malformed() {
        let p = Pipeline::new(PipelineConfig::default());
        let pinyin = p.pinyin(&[tabular("(^_^)\tnihao\t1\nbroken line\n")]).unwrap();
        assert_eq!(pinyin.malformed, vec!["broken line"]);

        let enc = ShuangpinEncoder::new(Scheme::Xiaohe);
        let out = p.shuangpin(pinyin.lines(), &enc, None);
        assert_eq!(accepted(&out), vec!["(^_^)\tnihc\t1"]);
        assert_eq!(out.malformed, vec!["broken line"]);
    }

    #[test]
    fn shuangpin_multi_word_and_pass_through() {
        let p = Pipeline::new(PipelineConfig::default().reserved_space(false));
        let lines = vec!["a\two bu\t0".to_string(), "b\thao xx\t0".to_string(), "c\tawsl\t1".to_string()];
        let out = p.shuangpin(lines, &ShuangpinEncoder::new(Scheme::Xiaohe), None);
        assert_eq!(accepted(&out), vec!["c\tawsl\t1", "b\thc xx\t0", "a\two bu\t0"]);
    }

    struct Fixed;

    impl Glosser for Fixed {
        fn gloss(&self, syllables: &[String]) -> Option<String> {
            (syllables.concat() == "nihao").then(|| "你好".to_string())
        }
    }

    #[test]
    fn detail_columns() {
        let lines = || vec!["(^_^)\tnihao\t1".to_string(), "(o_o)\tawsl\t0".to_string()];
        let enc = ShuangpinEncoder::new(Scheme::Xiaohe);

        let p = Pipeline::new(PipelineConfig::default().full_reading(true));
        let out = p.shuangpin(lines(), &enc, Some(&Fixed));
        assert_eq!(accepted(&out), vec!["(o_o)\tawsl\t0\tawsl", "(^_^)\tnihc\t1\tnihao"]);

        let p = Pipeline::new(PipelineConfig::default().gloss(true));
        let out = p.shuangpin(lines(), &enc, Some(&Fixed));
        assert_eq!(accepted(&out), vec!["(o_o)\tawsl\t0\tawsl", "(^_^)\tnihc\t1\tnihao\t你好"]);
    }
}
