//! `segmenter`：把全拼串切分为音节段。
//!
//! core 只定义接口；具体切分器在 `kaomoji_pinyin` 中实现。

/// 切分结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// 音节段（小写），按原顺序
    pub syllables: Vec<String>,
    /// 输入是否被完整地按拼音字母规则消费；为 false 时必然校验失败
    pub covered: bool,
}

impl Segmentation {
    /// 展示用（例如 `"ni hao"`）。
    pub fn preedit(&self) -> String {
        self.syllables.join(" ")
    }
}

/// Segmenter：把一个不含空格的全拼词切分为音节段。
pub trait Segmenter: Send + Sync {
    fn segment(&self, input: &str) -> Segmentation;
}
