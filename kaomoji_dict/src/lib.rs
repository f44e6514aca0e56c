//! 颜文字词典生成：读取词源、组装流水线、写出词典文件。

pub mod gloss;
pub mod output;
pub mod pipeline;
pub mod source;

pub use gloss::TableGlosser;
pub use output::{malformed_path, write_canonical};
pub use pipeline::{Flavor, Pipeline};
pub use source::{KMJ_READING, Source, SourceKind, normalize_headword};
