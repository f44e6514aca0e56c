use std::{collections::BTreeMap, fs, io, path::Path};

use kaomoji_core::encoder::Glosser;

/// 释义表：音节序列 -> 汉字，用于详情列。
///
/// TSV 格式：
///
/// - `pinyin<TAB>hanzi`，拼音按音节用空格分隔（例如 `ni hao`）
/// - 允许 `#` 开头注释行
/// - 同一读音出现多次时保留第一条
pub struct TableGlosser {
    map: BTreeMap<String, String>,
}

impl TableGlosser {
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_tsv_str(&s)
    }

    pub fn from_tsv_str(s: &str) -> io::Result<Self> {
        let mut map = BTreeMap::new();
        for (idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut it = line.split('\t');
            let key = it.next().unwrap_or("").trim();
            let hanzi = it.next().unwrap_or("").trim();
            if key.is_empty() || hanzi.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("释义表第 {} 行缺少 pinyin/hanzi", idx + 1),
                ));
            }
            let key = key.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
            map.entry(key).or_insert_with(|| hanzi.to_string());
        }
        Ok(Self { map })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Glosser for TableGlosser {
    fn gloss(&self, syllables: &[String]) -> Option<String> {
        self.map.get(&syllables.join(" ")).cloned()
    }
}
