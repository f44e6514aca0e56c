//! 词条模型：`Entry`（解析后的三元组 + 可选详情）与 `DictLine`（序列化后的行）。
//!
//! 行格式：`headword<TAB>code<TAB>weight[<TAB>full_reading[<TAB>gloss]]`

use std::fmt;
use std::str::FromStr;

use crate::error::LineError;

/// 词条权重：来源决定，编码阶段原样保留。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weight {
    /// 推导得到的词条（序列化为 `0`）
    Derived,
    /// 用户优先词条（序列化为 `1`）
    UserPriority,
}

impl Weight {
    pub fn as_str(self) -> &'static str {
        match self {
            Weight::Derived => "0",
            Weight::UserPriority => "1",
        }
    }
}

impl FromStr for Weight {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Weight::Derived),
            "1" => Ok(Weight::UserPriority),
            other => Err(LineError::BadWeight(other.to_string())),
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 详情字段：全拼原文 + 可选释义（汉字）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub full_reading: String,
    pub gloss: Option<String>,
}

/// 一个词条。
///
/// `reading` 在编码前是全拼（可能含词间空格），编码后是双拼码。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 词头（颜文字），不含 TAB/换行
    pub headword: String,
    pub reading: String,
    pub weight: Weight,
    pub detail: Option<Detail>,
}

impl Entry {
    pub fn new(headword: impl Into<String>, reading: impl Into<String>, weight: Weight) -> Self {
        Self {
            headword: headword.into(),
            reading: reading.into(),
            weight,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: Option<Detail>) -> Self {
        self.detail = detail;
        self
    }

    /// 把一行文本解析为词条；字段结构不符时返回 `LineError`。
    ///
    /// 行尾的 `\n` / `\r\n` 会被忽略；字段本身不做 trim。
    pub fn parse_line(line: &str) -> Result<Self, LineError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = line.split('\t').collect();
        if !(3..=5).contains(&fields.len()) {
            return Err(LineError::FieldCount(fields.len()));
        }
        let headword = fields[0];
        let reading = fields[1];
        if headword.trim().is_empty() {
            return Err(LineError::EmptyField("headword"));
        }
        if reading.trim().is_empty() {
            return Err(LineError::EmptyField("reading"));
        }
        let weight: Weight = fields[2].parse()?;
        let detail = match fields.get(3) {
            Some(full_reading) => Some(Detail {
                full_reading: (*full_reading).to_string(),
                gloss: fields.get(4).map(|g| (*g).to_string()),
            }),
            None => None,
        };
        Ok(Self {
            headword: headword.to_string(),
            reading: reading.to_string(),
            weight,
            detail,
        })
    }

    pub fn to_line(&self) -> DictLine {
        let mut s = String::with_capacity(self.headword.len() + self.reading.len() + 4);
        s.push_str(&self.headword);
        s.push('\t');
        s.push_str(&self.reading);
        s.push('\t');
        s.push_str(self.weight.as_str());
        if let Some(detail) = &self.detail {
            s.push('\t');
            s.push_str(&detail.full_reading);
            if let Some(gloss) = &detail.gloss {
                s.push('\t');
                s.push_str(gloss);
            }
        }
        DictLine(s)
    }
}

/// 序列化后的词典行（不含换行）。创建后不可变；去重以整行为准。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DictLine(String);

impl DictLine {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// 第二个字段（读音/编码）；没有 TAB 时为空串。
    pub fn reading(&self) -> &str {
        reading_field(&self.0)
    }
}

impl AsRef<str> for DictLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DictLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn reading_field(line: &str) -> &str {
    line.split('\t').nth(1).unwrap_or("")
}
