//! 输出：有效行写入目标文件，格式错误行写入同目录的 `_format_error` 文件。

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use kaomoji_core::Canonical;
use log::{info, warn};

const MALFORMED_SUFFIX: &str = "_format_error";

/// `name.txt -> name_format_error.txt`；无扩展名时直接追加后缀。
pub fn malformed_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{MALFORMED_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{MALFORMED_SUFFIX}"),
    };
    path.with_file_name(name)
}

fn write_lines<'a>(path: &Path, lines: impl IntoIterator<Item = &'a str>) -> io::Result<usize> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    let mut n = 0;
    for line in lines {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        n += 1;
    }
    out.flush()?;
    Ok(n)
}

/// 写出一个词典；格式错误文件只在有内容时写出，否则删除上次留下的旧文件。
pub fn write_canonical(path: &Path, canonical: &Canonical) -> io::Result<()> {
    let n = write_lines(path, canonical.accepted.iter().map(|l| l.as_str()))?;
    info!("写入 {} ({n} 行)", path.display());

    let bad = malformed_path(path);
    if canonical.malformed.is_empty() {
        if bad.exists() {
            fs::remove_file(&bad)?;
        }
        return Ok(());
    }
    let n = write_lines(&bad, canonical.malformed.iter().map(String::as_str))?;
    warn!("{n} 行格式错误，已写入 {}", bad.display());
    Ok(())
}
