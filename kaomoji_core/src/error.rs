//! 错误分类。
//!
//! - `LineError`：单行结构错误，局部恢复（整行进入格式错误流）
//! - `ConfigError`：配置错误，整次运行中止

use thiserror::Error;

/// 行无法解析为 (headword, reading, weight) 三元组。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("expected 3 to 5 tab-separated fields, found {0}")]
    FieldCount(usize),
    #[error("empty {0} field")]
    EmptyField(&'static str),
    #[error("weight must be 0 or 1, got {0:?}")]
    BadWeight(String),
}

/// 不可恢复的配置错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown shuangpin scheme {0:?} (expected one of xiaohe, ziranma, sogou, microsoft, znabc)")]
    UnknownScheme(String),
    #[error("source {origin} does not carry pinyin readings; cannot build the {flavor} dictionary")]
    UnsupportedFlavor { origin: String, flavor: String },
}
