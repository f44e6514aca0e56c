//! `filter`：候选行的规范化（分流 / 去重 / 排序）。
//!
//! 所有生产者的候选行汇总到这里，是整条流水线唯一的全局屏障。

use std::collections::HashSet;

use log::{debug, info};

use crate::config::PipelineConfig;
use crate::model::{DictLine, Entry, reading_field};

/// Filter：对已接受的行做后处理（去重、排序等）。
pub trait Filter: Send + Sync {
    fn apply(&self, lines: Vec<DictLine>) -> Vec<DictLine>;
}

/// 排序键：读音字段整体，忽略大小写。
pub fn sort_key(line: &str) -> String {
    reading_field(line).to_lowercase()
}

/// 默认 filter：按整行去重，按 `sort_key` 升序，同键按整行字节序。
pub struct DedupSort;

impl Filter for DedupSort {
    fn apply(&self, lines: Vec<DictLine>) -> Vec<DictLine> {
        dedup_sort(lines)
    }
}

fn dedup_sort<T>(lines: Vec<T>) -> Vec<T>
where
    T: AsRef<str> + Ord + std::hash::Hash + Clone,
{
    let mut seen: HashSet<T> = HashSet::with_capacity(lines.len());
    let mut keyed: Vec<(String, T)> = lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .map(|line| (sort_key(line.as_ref()), line))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    keyed.into_iter().map(|(_, line)| line).collect()
}

/// 规范化统计（用于日志/诊断）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalStats {
    pub candidates: usize,
    pub accepted: usize,
    pub malformed: usize,
    /// 去重时丢弃的行数（两路合计）
    pub duplicates: usize,
}

/// 规范化结果：两路有序、无重复的行序列。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Canonical {
    pub accepted: Vec<DictLine>,
    /// 格式错误的原始行（已去掉行尾换行）
    pub malformed: Vec<String>,
    pub stats: CanonicalStats,
}

impl Canonical {
    /// 已接受行的字符串形式（供下一阶段继续处理）。
    pub fn accepted_lines(&self) -> Vec<String> {
        self.accepted.iter().map(|l| l.as_str().to_string()).collect()
    }

    /// 全部行：先有效行，再格式错误行。
    pub fn lines(&self) -> Vec<String> {
        let mut out = self.accepted_lines();
        out.extend(self.malformed.iter().cloned());
        out
    }
}

pub struct Canonicalizer {
    dedup_enabled: bool,
}

impl Canonicalizer {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            dedup_enabled: config.dedup_enabled,
        }
    }

    /// 分流 + 去重 + 排序。
    ///
    /// 无法解析为三元组的行进入 `malformed`，其余（包括读音不是合法拼音的行）进入 `accepted`。
    pub fn canonicalize<I>(&self, lines: I) -> Canonical
    where
        I: IntoIterator<Item = String>,
    {
        let mut accepted: Vec<DictLine> = Vec::new();
        let mut malformed: Vec<String> = Vec::new();
        let mut candidates = 0usize;

        for raw in lines {
            candidates += 1;
            match Entry::parse_line(&raw) {
                Ok(entry) => accepted.push(entry.to_line()),
                Err(err) => {
                    debug!("格式错误 ({err}): {raw:?}");
                    malformed.push(raw.trim_end_matches(['\n', '\r']).to_string());
                }
            }
        }

        let before = accepted.len() + malformed.len();
        if self.dedup_enabled {
            accepted = DedupSort.apply(accepted);
            malformed = dedup_sort(malformed);
        }

        let stats = CanonicalStats {
            candidates,
            accepted: accepted.len(),
            malformed: malformed.len(),
            duplicates: before - accepted.len() - malformed.len(),
        };
        info!(
            "规范化：{} 条候选 -> {} 条有效，{} 条格式错误，{} 条重复",
            stats.candidates, stats.accepted, stats.malformed, stats.duplicates
        );
        Canonical {
            accepted,
            malformed,
            stats,
        }
    }
}
