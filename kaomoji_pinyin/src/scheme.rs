//! 双拼方案：每个音节映射为两个按键（声母键 + 韵母键）。
//!
//! 除 `zh`/`ch`/`sh` 外声母都映射到自身；零声母音节按方案约定处理：
//! - `Spelled`（小鹤、自然码）：单字母韵母双写，两字母原样，三字母取首字母 + 韵母键
//! - `Marker`（搜狗、微软、智能ABC）：固定引导键 + 韵母键

use std::fmt;
use std::str::FromStr;

use kaomoji_core::ConfigError;
use log::warn;

use crate::syllabary::split_initial;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Xiaohe,
    Ziranma,
    Sogou,
    Microsoft,
    Znabc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZeroInitial {
    Spelled,
    Marker(char),
}

struct SchemeTable {
    zh: char,
    ch: char,
    sh: char,
    finals: &'static [(&'static str, char)],
    zero: ZeroInitial,
}

const XIAOHE_FINALS: &[(&str, char)] = &[
    ("a", 'a'), ("o", 'o'), ("e", 'e'), ("i", 'i'), ("u", 'u'), ("v", 'v'),
    ("ai", 'd'), ("ei", 'w'), ("ui", 'v'), ("ao", 'c'), ("ou", 'z'), ("iu", 'q'),
    ("ie", 'p'), ("ue", 't'), ("ve", 't'), ("er", 'r'),
    ("an", 'j'), ("en", 'f'), ("in", 'b'), ("un", 'y'), ("vn", 'y'),
    ("ang", 'h'), ("eng", 'g'), ("ing", 'k'), ("ong", 's'),
    ("ia", 'x'), ("ua", 'x'), ("uo", 'o'), ("iao", 'n'), ("uai", 'k'),
    ("ian", 'm'), ("uan", 'r'), ("van", 'r'), ("iang", 'l'), ("uang", 'l'), ("iong", 's'),
];

const ZIRANMA_FINALS: &[(&str, char)] = &[
    ("a", 'a'), ("o", 'o'), ("e", 'e'), ("i", 'i'), ("u", 'u'), ("v", 'v'),
    ("ai", 'l'), ("ei", 'z'), ("ui", 'v'), ("ao", 'k'), ("ou", 'b'), ("iu", 'q'),
    ("ie", 'x'), ("ue", 't'), ("ve", 't'), ("er", 'r'),
    ("an", 'j'), ("en", 'f'), ("in", 'n'), ("un", 'p'), ("vn", 'p'),
    ("ang", 'h'), ("eng", 'g'), ("ing", 'y'), ("ong", 's'),
    ("ia", 'w'), ("ua", 'w'), ("uo", 'o'), ("iao", 'c'), ("uai", 'y'),
    ("ian", 'm'), ("uan", 'r'), ("van", 'r'), ("iang", 'd'), ("uang", 'd'), ("iong", 's'),
];

const SOGOU_FINALS: &[(&str, char)] = &[
    ("a", 'a'), ("o", 'o'), ("e", 'e'), ("i", 'i'), ("u", 'u'), ("v", 'y'),
    ("ai", 'l'), ("ei", 'z'), ("ui", 'v'), ("ao", 'k'), ("ou", 'b'), ("iu", 'q'),
    ("ie", 'x'), ("ue", 't'), ("ve", 't'), ("er", 'r'),
    ("an", 'j'), ("en", 'f'), ("in", 'n'), ("un", 'p'), ("vn", 'p'),
    ("ang", 'h'), ("eng", 'g'), ("ing", ';'), ("ong", 's'),
    ("ia", 'w'), ("ua", 'w'), ("uo", 'o'), ("iao", 'c'), ("uai", 'y'),
    ("ian", 'm'), ("uan", 'r'), ("van", 'r'), ("iang", 'd'), ("uang", 'd'), ("iong", 's'),
];

// 与搜狗只差 `ve`
const MICROSOFT_FINALS: &[(&str, char)] = &[
    ("a", 'a'), ("o", 'o'), ("e", 'e'), ("i", 'i'), ("u", 'u'), ("v", 'y'),
    ("ai", 'l'), ("ei", 'z'), ("ui", 'v'), ("ao", 'k'), ("ou", 'b'), ("iu", 'q'),
    ("ie", 'x'), ("ue", 't'), ("ve", 'v'), ("er", 'r'),
    ("an", 'j'), ("en", 'f'), ("in", 'n'), ("un", 'p'), ("vn", 'p'),
    ("ang", 'h'), ("eng", 'g'), ("ing", ';'), ("ong", 's'),
    ("ia", 'w'), ("ua", 'w'), ("uo", 'o'), ("iao", 'c'), ("uai", 'y'),
    ("ian", 'm'), ("uan", 'r'), ("van", 'r'), ("iang", 'd'), ("uang", 'd'), ("iong", 's'),
];

const ZNABC_FINALS: &[(&str, char)] = &[
    ("a", 'a'), ("o", 'o'), ("e", 'e'), ("i", 'i'), ("u", 'u'), ("v", 'v'),
    ("ai", 'l'), ("ei", 'q'), ("ui", 'm'), ("ao", 'k'), ("ou", 'b'), ("iu", 'r'),
    ("ie", 'x'), ("ue", 'm'), ("ve", 'm'), ("er", 'r'),
    ("an", 'j'), ("en", 'f'), ("in", 'c'), ("un", 'n'), ("vn", 'n'),
    ("ang", 'h'), ("eng", 'g'), ("ing", 'y'), ("ong", 's'),
    ("ia", 'd'), ("ua", 'd'), ("uo", 'o'), ("iao", 'z'), ("uai", 'c'),
    ("ian", 'w'), ("uan", 'p'), ("van", 'p'), ("iang", 't'), ("uang", 't'), ("iong", 's'),
];

static XIAOHE: SchemeTable = SchemeTable {
    zh: 'v',
    ch: 'i',
    sh: 'u',
    finals: XIAOHE_FINALS,
    zero: ZeroInitial::Spelled,
};

static ZIRANMA: SchemeTable = SchemeTable {
    zh: 'v',
    ch: 'i',
    sh: 'u',
    finals: ZIRANMA_FINALS,
    zero: ZeroInitial::Spelled,
};

static SOGOU: SchemeTable = SchemeTable {
    zh: 'v',
    ch: 'i',
    sh: 'u',
    finals: SOGOU_FINALS,
    zero: ZeroInitial::Marker('o'),
};

static MICROSOFT: SchemeTable = SchemeTable {
    zh: 'v',
    ch: 'i',
    sh: 'u',
    finals: MICROSOFT_FINALS,
    zero: ZeroInitial::Marker('o'),
};

static ZNABC: SchemeTable = SchemeTable {
    zh: 'a',
    ch: 'e',
    sh: 'v',
    finals: ZNABC_FINALS,
    zero: ZeroInitial::Marker('o'),
};

impl SchemeTable {
    fn final_key(&self, fin: &str) -> Option<char> {
        self.finals.iter().find(|(f, _)| *f == fin).map(|&(_, k)| k)
    }

    fn initial_key(&self, ini: &str) -> Option<char> {
        match ini {
            "zh" => Some(self.zh),
            "ch" => Some(self.ch),
            "sh" => Some(self.sh),
            _ => ini.chars().next(),
        }
    }

    fn zero_initial(&self, syllable: &str) -> Option<String> {
        match self.zero {
            ZeroInitial::Spelled => match syllable.len() {
                1 => Some(syllable.repeat(2)),
                2 => Some(syllable.to_string()),
                _ => {
                    let first = syllable.chars().next()?;
                    let key = self.final_key(syllable)?;
                    Some([first, key].iter().collect())
                }
            },
            ZeroInitial::Marker(marker) => {
                let key = self.final_key(syllable)?;
                Some([marker, key].iter().collect())
            }
        }
    }

    fn encode(&self, syllable: &str) -> Option<String> {
        match split_initial(syllable) {
            (None, fin) => self.zero_initial(fin),
            (Some(ini), fin) => {
                let i = self.initial_key(ini)?;
                let f = self.final_key(fin)?;
                Some([i, f].iter().collect())
            }
        }
    }
}

impl Scheme {
    pub const ALL: [Scheme; 5] = [
        Scheme::Xiaohe,
        Scheme::Ziranma,
        Scheme::Sogou,
        Scheme::Microsoft,
        Scheme::Znabc,
    ];

    /// 方案标识（也用于输出文件名）。
    pub fn id(self) -> &'static str {
        match self {
            Scheme::Xiaohe => "xiaohe",
            Scheme::Ziranma => "ziranma",
            Scheme::Sogou => "sogou",
            Scheme::Microsoft => "microsoft",
            Scheme::Znabc => "znabc",
        }
    }

    /// 按标识查找方案（忽略大小写与首尾空白）。
    pub fn from_id(id: &str) -> Result<Self, ConfigError> {
        let wanted = id.trim().to_ascii_lowercase();
        Scheme::ALL
            .into_iter()
            .find(|s| s.id() == wanted)
            .ok_or_else(|| ConfigError::UnknownScheme(id.to_string()))
    }

    fn table(self) -> &'static SchemeTable {
        match self {
            Scheme::Xiaohe => &XIAOHE,
            Scheme::Ziranma => &ZIRANMA,
            Scheme::Sogou => &SOGOU,
            Scheme::Microsoft => &MICROSOFT,
            Scheme::Znabc => &ZNABC,
        }
    }

    /// 单个音节的两键编码；方案表中缺键时原样返回音节。
    pub fn encode_syllable(self, syllable: &str) -> String {
        match self.table().encode(syllable) {
            Some(code) => code,
            None => {
                warn!("{} 方案无法编码音节 {syllable:?}，保留原文", self.id());
                syllable.to_string()
            }
        }
    }

    /// 音节序列逐个编码；拼接即为整词编码。
    pub fn encode(self, syllables: &[String]) -> Vec<String> {
        syllables.iter().map(|s| self.encode_syllable(s)).collect()
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::from_id(s)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
