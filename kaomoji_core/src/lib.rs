//! `kaomoji_core`：纯逻辑层（不做 I/O）。
//!
//! - `model`：词条与词典行
//! - `config`：流水线配置
//! - `segmenter` / `encoder`：切分、编码接口
//! - `filter`：分流 / 去重 / 排序
pub mod config;
pub mod encoder;
pub mod error;
pub mod filter;
pub mod model;
pub mod segmenter;

pub use config::{PipelineConfig, SPECIAL_SPACE, SpaceVariant};
pub use error::{ConfigError, LineError};
pub use filter::{Canonical, Canonicalizer};
pub use model::{Detail, DictLine, Entry, Weight};
