//! 流水线配置：一次构造，显式传入各阶段。

/// 保留的“特殊空格”（EN SPACE, U+2002），避免下游分词把多词读音拆坏。
pub const SPECIAL_SPACE: char = '\u{2002}';

/// 多词读音/编码内部使用的分隔空格。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceVariant {
    /// 普通空格 U+0020
    Plain,
    /// 特殊空格 U+2002
    Reserved,
}

impl SpaceVariant {
    pub fn as_char(self) -> char {
        match self {
            SpaceVariant::Plain => ' ',
            SpaceVariant::Reserved => SPECIAL_SPACE,
        }
    }
}

/// 流水线配置。
///
/// 默认值：不输出详情、使用特殊空格、开启去重排序。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// 双拼行追加第 4 列（全拼原文）
    pub include_full_reading: bool,
    /// 追加第 5 列（释义）；隐含 `include_full_reading`
    pub include_gloss: bool,
    pub use_reserved_space: bool,
    pub dedup_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            include_full_reading: false,
            include_gloss: false,
            use_reserved_space: true,
            dedup_enabled: true,
        }
    }
}

impl PipelineConfig {
    pub fn full_reading(mut self, on: bool) -> Self {
        self.include_full_reading = on;
        self
    }

    pub fn gloss(mut self, on: bool) -> Self {
        self.include_gloss = on;
        self
    }

    pub fn reserved_space(mut self, on: bool) -> Self {
        self.use_reserved_space = on;
        self
    }

    pub fn dedup(mut self, on: bool) -> Self {
        self.dedup_enabled = on;
        self
    }

    pub fn space_variant(&self) -> SpaceVariant {
        if self.use_reserved_space {
            SpaceVariant::Reserved
        } else {
            SpaceVariant::Plain
        }
    }

    /// 是否输出详情列（全拼原文）。
    pub fn wants_detail(&self) -> bool {
        self.include_full_reading || self.include_gloss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_space_variant() {
        let c = PipelineConfig::default();
        assert_eq!(c.space_variant().as_char(), '\u{2002}');
        assert!(!c.wants_detail());

        let c = c.reserved_space(false).gloss(true).dedup(false);
        assert_eq!(c.space_variant(), SpaceVariant::Plain);
        assert!(c.wants_detail());
        assert!(!c.dedup_enabled);
    }
}
