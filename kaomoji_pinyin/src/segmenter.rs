//! 全拼切分。
//!
//! 两遍分类：
//! 1. 逐字母标注声母/韵母（`zh`/`ch`/`sh` 作为一个单位，不可拆开）；
//! 2. 对可能作韵尾的 `n`/`g`/`r` 看下一个字母决定归属。
//!
//! 之后按“声母开新音节”切出段，再对照音节表做局部修复（零声母拆分、相邻段借位、跨段重切）。
//! `ü`/`u:` 先统一为 `v`；`lue`/`nue` 这类变体写法按一个音节处理，留给校验阶段化简。
//! 切分只依赖字母本身，不做频次打分；需要消歧时用 `'` 显式断开。

use kaomoji_core::segmenter::{Segmentation, Segmenter};

use crate::syllabary::{
    ZERO_INITIAL, is_initial_letter, is_spelled_syllable as legal, is_syllable, is_vowel,
    normalize_umlaut,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Initial,
    Final,
}

#[derive(Debug, Clone, Copy)]
struct Unit {
    start: usize,
    len: usize,
    role: Role,
    /// 该单位之后强制断开（韵尾后紧跟零声母音节）
    break_after: bool,
}

impl Unit {
    fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct QuanpinSegmenter;

impl QuanpinSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for QuanpinSegmenter {
    fn segment(&self, input: &str) -> Segmentation {
        let input_lower = normalize_umlaut(input);
        let letters_only = input_lower
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b == b'\'');
        if !letters_only {
            return Segmentation {
                syllables: vec![input.to_string()],
                covered: false,
            };
        }

        // `'` 是显式边界。
        let mut syllables = Vec::new();
        for chunk in input_lower.split('\'').filter(|c| !c.is_empty()) {
            let units = resolve_codas(chunk, tag_roles(chunk));
            syllables.extend(repair(cut(chunk, &units)));
        }
        let covered = !syllables.is_empty();
        Segmentation { syllables, covered }
    }
}

fn tag_roles(chunk: &str) -> Vec<Unit> {
    let b = chunk.as_bytes();
    let mut units = Vec::with_capacity(b.len());
    let mut i = 0;
    while i < b.len() {
        let digraph = i + 1 < b.len() && matches!(b[i], b'z' | b'c' | b's') && b[i + 1] == b'h';
        let (len, role) = if digraph {
            (2, Role::Initial)
        } else if is_initial_letter(b[i]) {
            (1, Role::Initial)
        } else {
            (1, Role::Final)
        };
        units.push(Unit {
            start: i,
            len,
            role,
            break_after: false,
        });
        i += len;
    }
    units
}

/// 韵尾消歧：`n`/`g`/`r` 后面是结尾或辅音时归前一音节；
/// 后面是元音时，只有“前段 + 韵尾”成音节且余下部分以零声母音节开头才归前，否则作下一音节的声母。
fn resolve_codas(chunk: &str, mut units: Vec<Unit>) -> Vec<Unit> {
    let b = chunk.as_bytes();
    // 当前音节起点
    let mut start = 0;
    for unit in units.iter_mut() {
        if unit.role == Role::Initial && is_coda(&b[start..unit.start], b[unit.start], unit.len) {
            let next = unit.end();
            match b.get(next) {
                None => unit.role = Role::Final,
                Some(&c) if is_initial_letter(c) => unit.role = Role::Final,
                Some(_) => {
                    if is_syllable(&chunk[start..next]) && starts_with_zero_initial(&chunk[next..]) {
                        unit.role = Role::Final;
                        unit.break_after = true;
                    }
                }
            }
        }
        if unit.role == Role::Initial && unit.start > start {
            start = unit.start;
        }
        if unit.break_after {
            start = unit.end();
        }
    }
    units
}

fn is_coda(current: &[u8], letter: u8, len: usize) -> bool {
    if len != 1 {
        return false;
    }
    match letter {
        b'n' => current.last().is_some_and(|&c| is_vowel(c)),
        b'g' => matches!(current, [.., v, b'n'] if is_vowel(*v)),
        b'r' => current == b"e",
        _ => false,
    }
}

fn starts_with_zero_initial(rest: &str) -> bool {
    ZERO_INITIAL.iter().any(|z| rest.starts_with(z))
}

/// 声母处开新段；`break_after` 处收段。
fn cut(chunk: &str, units: &[Unit]) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for unit in units {
        if unit.role == Role::Initial && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        current.push_str(&chunk[unit.start..unit.end()]);
        if unit.break_after {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn repair(tokens: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match split_zero_initial(&token) {
            Some(parts) => out.extend(parts),
            None => out.push(token),
        }
    }

    let mut i = 0;
    while i + 1 < out.len() {
        if legal(&out[i]) && legal(&out[i + 1]) {
            i += 1;
            continue;
        }
        let joined = format!("{}{}", out[i], out[i + 1]);
        if legal(&joined) {
            out[i] = joined;
            out.remove(i + 1);
            continue;
        }
        if let Some(parts) = shift_boundary(&out[i], &out[i + 1]).or_else(|| resplit(&joined)) {
            out.splice(i..i + 2, parts);
        } else {
            // 两段修不好时连同前一段或后一段一起重切：`kai an ge r -> kai ang er`
            let windows = [(i.checked_sub(1), i + 2), (Some(i), i + 3)];
            for (lo, hi) in windows {
                let Some(lo) = lo else { continue };
                if hi > out.len() {
                    continue;
                }
                if let Some(parts) = resplit(&out[lo..hi].concat()) {
                    out.splice(lo..hi, parts);
                    break;
                }
            }
        }
        i += 1;
    }
    out
}

/// 在最长的合法前缀之后、以 `a`/`o`/`e` 开头处拆开：`keai -> ke + ai`。
fn split_zero_initial(token: &str) -> Option<Vec<String>> {
    if legal(token) {
        return Some(vec![token.to_string()]);
    }
    let b = token.as_bytes();
    for p in (1..token.len()).rev() {
        if matches!(b[p], b'a' | b'o' | b'e') && legal(&token[..p]) {
            let mut parts = vec![token[..p].to_string()];
            parts.extend(split_zero_initial(&token[p..])?);
            return Some(parts);
        }
    }
    None
}

/// 相邻两段借一个字母，使两段都合法。
fn shift_boundary(left: &str, right: &str) -> Option<Vec<String>> {
    if left.len() > 1 {
        let (head, last) = left.split_at(left.len() - 1);
        let moved = format!("{last}{right}");
        if legal(head) && legal(&moved) {
            return Some(vec![head.to_string(), moved]);
        }
    }
    if right.len() > 1 {
        let (first, tail) = right.split_at(1);
        let moved = format!("{left}{first}");
        if legal(&moved) && legal(tail) {
            return Some(vec![moved, tail.to_string()]);
        }
    }
    None
}

/// 把一串字母重新切成两个或三个合法音节，左段尽量长：`pianong -> pi a nong`。
fn resplit(s: &str) -> Option<Vec<String>> {
    let n = s.len();
    for i in (1..n).rev() {
        if legal(&s[..i]) && legal(&s[i..]) {
            return Some(vec![s[..i].to_string(), s[i..].to_string()]);
        }
    }
    for i in (1..n).rev() {
        if !legal(&s[..i]) {
            continue;
        }
        for j in (i + 1..n).rev() {
            if legal(&s[i..j]) && legal(&s[j..]) {
                return Some(vec![s[..i].to_string(), s[i..j].to_string(), s[j..].to_string()]);
            }
        }
    }
    None
}
