//! 读音编码接口：core 不关心具体方案，只约定“读音 -> 编码”。

use crate::config::SpaceVariant;

/// 一条读音的编码结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// 编码串；无法编码的部分按原文保留
    pub code: String,
    /// 单词且全部合法时的音节序列（供释义使用）
    pub syllables: Option<Vec<String>>,
}

/// 把一条全拼读音编码为目标码。
///
/// 约定：
/// - 只接受全拼，不能对自身输出再次编码
/// - 多词读音用 `space` 指定的空格重新连接
pub trait Encoder: Send + Sync {
    fn encode_reading(&self, reading: &str, space: SpaceVariant) -> Encoded;
}

/// 音节序列 -> 汉字（仅用于详情列的释义，可缺省）。
pub trait Glosser: Send + Sync {
    fn gloss(&self, syllables: &[String]) -> Option<String>;
}
