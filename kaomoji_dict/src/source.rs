//! 词源：把不同格式的源文件转成候选行。
//!
//! - `Tabular`：`headword<TAB>reading<TAB>weight`
//! - `Phrase`：`reading` + 四个空格 + `headword`
//! - `Bare`：每行一个颜文字，只能生成 kmj 词典
//!
//! 空行和 `#` 注释行跳过；不符合格式的行原样输出，由规范化阶段分流到格式错误文件。

use std::{fs, io, path::Path};

use kaomoji_core::{ConfigError, Entry, PipelineConfig, SPECIAL_SPACE, Weight};
use log::debug;

use crate::pipeline::Flavor;

/// kmj 词典统一使用的读音。
pub const KMJ_READING: &str = "kmj";

/// Rime 词库不允许作为词头开头的前缀。
const INVALID_PREFIXES: [&str; 2] = ["---", "..."];

const PHRASE_SEPARATOR: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Tabular,
    Phrase,
    Bare,
}

impl SourceKind {
    /// 无读音的来源只能生成 kmj。
    pub fn supports(self, flavor: Flavor) -> bool {
        !matches!(
            (self, flavor),
            (SourceKind::Bare, Flavor::Pinyin | Flavor::Shuangpin(_))
        )
    }
}

#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    kind: SourceKind,
    text: String,
}

struct RawEntry<'a> {
    headword: &'a str,
    reading: Option<&'a str>,
    weight: Weight,
}

impl Source {
    pub fn new(name: impl Into<String>, kind: SourceKind, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            text: text.into(),
        }
    }

    pub fn from_path(kind: SourceKind, path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), kind, text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// 按目标词典生成候选行（不含换行）。
    pub fn produce(&self, flavor: Flavor, config: &PipelineConfig) -> Result<Vec<String>, ConfigError> {
        if !self.kind.supports(flavor) {
            return Err(ConfigError::UnsupportedFlavor {
                origin: self.name.clone(),
                flavor: flavor.to_string(),
            });
        }

        let mut out = Vec::new();
        for line in self.text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some(raw) = self.parse(line) else {
                debug!("{}: 无法识别的行 {line:?}", self.name);
                out.push(line.to_string());
                continue;
            };
            let reading = match flavor {
                Flavor::Kmj => KMJ_READING,
                Flavor::Pinyin | Flavor::Shuangpin(_) => raw.reading.unwrap_or_default(),
            };
            let headword = normalize_headword(raw.headword, config);
            out.push(Entry::new(headword, reading, raw.weight).to_line().into_string());
        }
        debug!("{}: {} 条候选 ({flavor})", self.name, out.len());
        Ok(out)
    }

    fn parse<'a>(&self, line: &'a str) -> Option<RawEntry<'a>> {
        match self.kind {
            SourceKind::Tabular => {
                let fields: Vec<&str> = line.split('\t').collect();
                let [headword, reading, weight] = fields[..] else {
                    return None;
                };
                Some(RawEntry {
                    headword,
                    reading: Some(reading.trim()),
                    weight: weight.parse().unwrap_or(Weight::Derived),
                })
            }
            SourceKind::Phrase => {
                let (reading, headword) = line.split_once(PHRASE_SEPARATOR)?;
                Some(RawEntry {
                    headword,
                    reading: Some(reading.trim()),
                    weight: Weight::UserPriority,
                })
            }
            SourceKind::Bare => Some(RawEntry {
                headword: line,
                reading: None,
                weight: Weight::Derived,
            }),
        }
    }
}

/// 词头规范化：去首尾空白，反复去掉非法前缀，替换空格与 TAB。
pub fn normalize_headword(text: &str, config: &PipelineConfig) -> String {
    let mut s = text.trim();
    while let Some(prefix) = INVALID_PREFIXES.iter().find(|p| s.starts_with(**p)) {
        s = &s[prefix.len()..];
    }
    let space = config.space_variant().as_char();
    s.chars()
        .map(|c| match c {
            '\t' => space,
            ' ' if config.use_reserved_space => SPECIAL_SPACE,
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn strips_prefixes_repeatedly() {
        assert_eq!(normalize_headword("  ---...---(^_^)  ", &cfg()), "(^_^)");
        assert_eq!(normalize_headword("..(o_o)", &cfg()), "..(o_o)");
        assert_eq!(normalize_headword("---", &cfg()), "");
    }

    #[test]
    fn replaces_spaces_by_variant() {
        assert_eq!(normalize_headword("( ^ _ ^ )", &cfg()), "(\u{2002}^\u{2002}_\u{2002}^\u{2002})");
        let plain = cfg().reserved_space(false);
        assert_eq!(normalize_headword("( ^ _ ^ )", &plain), "( ^ _ ^ )");
        assert_eq!(normalize_headword("a\tb", &plain), "a b");
        assert_eq!(normalize_headword("a\tb", &cfg()), "a\u{2002}b");
    }

    #[test]
    fn tabular_keeps_weight_column() {
        let src = Source::new("t", SourceKind::Tabular, "(^_^)\tnihao\t1\n(T_T)\tku\tx\n");
        let lines = src.produce(Flavor::Pinyin, &cfg()).unwrap();
        assert_eq!(lines, vec!["(^_^)\tnihao\t1", "(T_T)\tku\t0"]);
    }

    #[test]
    fn phrase_is_user_priority() {
        let src = Source::new("p", SourceKind::Phrase, "ni hao    (^_^) /\n");
        let lines = src.produce(Flavor::Pinyin, &cfg()).unwrap();
        assert_eq!(lines, vec!["(^_^)\u{2002}/\tni hao\t1"]);
    }

    #[test]
    fn kmj_flavor_uses_fixed_reading() {
        let src = Source::new("b", SourceKind::Bare, "# comment\n\n---(=^.^=)\n");
        let lines = src.produce(Flavor::Kmj, &cfg()).unwrap();
        assert_eq!(lines, vec!["(=^.^=)\tkmj\t0"]);

        let src = Source::new("p", SourceKind::Phrase, "miao    (=^.^=)");
        assert_eq!(src.produce(Flavor::Kmj, &cfg()).unwrap(), vec!["(=^.^=)\tkmj\t1"]);
    }

    #[test]
    fn unrecognized_lines_are_passed_on() {
        let src = Source::new("t", SourceKind::Tabular, "no tabs at all\n");
        assert_eq!(src.produce(Flavor::Pinyin, &cfg()).unwrap(), vec!["no tabs at all"]);
    }

    #[test]
    fn bare_source_cannot_build_pinyin() {
        let src = Source::new("A_kaomoji", SourceKind::Bare, "(^_^)");
        let err = src.produce(Flavor::Pinyin, &cfg()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFlavor { ref origin, .. } if origin == "A_kaomoji"));
        assert!(!SourceKind::Bare.supports(Flavor::Shuangpin(kaomoji_pinyin::Scheme::Xiaohe)));
        assert!(SourceKind::Bare.supports(Flavor::Kmj));
    }
}
