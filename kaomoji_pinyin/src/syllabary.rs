//! 合法音节表（ü 写作 `v`）与声母表。

use std::collections::HashSet;
use std::sync::OnceLock;

/// 单字母声母（含 `y`/`w`，编码时按声母处理）。
pub const INITIAL_LETTERS: &[u8] = b"bpmfdtnlgkhjqxrzcsyw";

/// 双字母声母，切分时不可拆开。
pub const DIGRAPH_INITIALS: [&str; 3] = ["zh", "ch", "sh"];

/// 零声母音节。
pub const ZERO_INITIAL: &[&str] = &["a", "ai", "an", "ang", "ao", "e", "ei", "en", "eng", "er", "o", "ou"];

pub const SYLLABLES: &[&str] = &[
    "a", "ai", "an", "ang", "ao", "e", "ei", "en", "eng", "er", "o", "ou",
    "ba", "bai", "ban", "bang", "bao", "bei", "ben", "beng", "bi", "bian", "biao", "bie", "bin",
    "bing", "bo", "bu",
    "pa", "pai", "pan", "pang", "pao", "pei", "pen", "peng", "pi", "pian", "piao", "pie", "pin",
    "ping", "po", "pou", "pu",
    "ma", "mai", "man", "mang", "mao", "me", "mei", "men", "meng", "mi", "mian", "miao", "mie",
    "min", "ming", "miu", "mo", "mou", "mu",
    "fa", "fan", "fang", "fei", "fen", "feng", "fo", "fou", "fu",
    "da", "dai", "dan", "dang", "dao", "de", "dei", "den", "deng", "di", "dia", "dian", "diao",
    "die", "ding", "diu", "dong", "dou", "du", "duan", "dui", "dun", "duo",
    "ta", "tai", "tan", "tang", "tao", "te", "tei", "teng", "ti", "tian", "tiao", "tie", "ting",
    "tong", "tou", "tu", "tuan", "tui", "tun", "tuo",
    "na", "nai", "nan", "nang", "nao", "ne", "nei", "nen", "neng", "ni", "nian", "niang", "niao",
    "nie", "nin", "ning", "niu", "nong", "nou", "nu", "nuan", "nun", "nuo", "nv", "nve",
    "la", "lai", "lan", "lang", "lao", "le", "lei", "leng", "li", "lia", "lian", "liang", "liao",
    "lie", "lin", "ling", "liu", "lo", "long", "lou", "lu", "luan", "lun", "luo", "lv", "lve",
    "ga", "gai", "gan", "gang", "gao", "ge", "gei", "gen", "geng", "gong", "gou", "gu", "gua",
    "guai", "guan", "guang", "gui", "gun", "guo",
    "ka", "kai", "kan", "kang", "kao", "ke", "kei", "ken", "keng", "kong", "kou", "ku", "kua",
    "kuai", "kuan", "kuang", "kui", "kun", "kuo",
    "ha", "hai", "han", "hang", "hao", "he", "hei", "hen", "heng", "hong", "hou", "hu", "hua",
    "huai", "huan", "huang", "hui", "hun", "huo",
    "ji", "jia", "jian", "jiang", "jiao", "jie", "jin", "jing", "jiong", "jiu", "ju", "juan",
    "jue", "jun",
    "qi", "qia", "qian", "qiang", "qiao", "qie", "qin", "qing", "qiong", "qiu", "qu", "quan",
    "que", "qun",
    "xi", "xia", "xian", "xiang", "xiao", "xie", "xin", "xing", "xiong", "xiu", "xu", "xuan",
    "xue", "xun",
    "zha", "zhai", "zhan", "zhang", "zhao", "zhe", "zhei", "zhen", "zheng", "zhi", "zhong",
    "zhou", "zhu", "zhua", "zhuai", "zhuan", "zhuang", "zhui", "zhun", "zhuo",
    "cha", "chai", "chan", "chang", "chao", "che", "chen", "cheng", "chi", "chong", "chou",
    "chu", "chua", "chuai", "chuan", "chuang", "chui", "chun", "chuo",
    "sha", "shai", "shan", "shang", "shao", "she", "shei", "shen", "sheng", "shi", "shou",
    "shu", "shua", "shuai", "shuan", "shuang", "shui", "shun", "shuo",
    "ran", "rang", "rao", "re", "ren", "reng", "ri", "rong", "rou", "ru", "rua", "ruan", "rui",
    "run", "ruo",
    "za", "zai", "zan", "zang", "zao", "ze", "zei", "zen", "zeng", "zi", "zong", "zou", "zu",
    "zuan", "zui", "zun", "zuo",
    "ca", "cai", "can", "cang", "cao", "ce", "cen", "ceng", "ci", "cong", "cou", "cu", "cuan",
    "cui", "cun", "cuo",
    "sa", "sai", "san", "sang", "sao", "se", "sen", "seng", "si", "song", "sou", "su", "suan",
    "sui", "sun", "suo",
    "ya", "yan", "yang", "yao", "ye", "yi", "yin", "ying", "yo", "yong", "you", "yu", "yuan",
    "yue", "yun",
    "wa", "wai", "wan", "wang", "wei", "wen", "weng", "wo", "wu",
];

fn syllable_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| SYLLABLES.iter().copied().collect())
}

pub fn is_syllable(s: &str) -> bool {
    syllable_set().contains(s)
}

/// 把 `ü` 的各种写法统一为 `v`（并转小写）。
pub fn normalize_umlaut(s: &str) -> String {
    s.to_lowercase().replace("u:", "v").replace('ü', "v")
}

/// 书写变体化简：`jv`/`qv`/`xv`/`yv` -> `ju`…，`lue`/`nue` -> `lve`/`nve`。
pub fn simplify_spelling(s: &str) -> String {
    let s = normalize_umlaut(s);
    match s.as_bytes() {
        [b'j' | b'q' | b'x' | b'y', b'v', ..] => format!("{}u{}", &s[..1], &s[2..]),
        [b'l' | b'n', b'u', b'e', ..] => format!("{}ve{}", &s[..1], &s[3..]),
        _ => s,
    }
}

/// 合法音节，或化简后是合法音节的变体写法。
pub fn is_spelled_syllable(s: &str) -> bool {
    is_syllable(s) || is_syllable(&simplify_spelling(s))
}

pub fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'v')
}

pub fn is_initial_letter(b: u8) -> bool {
    INITIAL_LETTERS.contains(&b)
}

/// 按语法拆出声母与韵母：`zhuang -> (Some("zh"), "uang")`，`ang -> (None, "ang")`。
pub fn split_initial(syllable: &str) -> (Option<&str>, &str) {
    if DIGRAPH_INITIALS.iter().any(|d| syllable.starts_with(d)) {
        let (ini, fin) = syllable.split_at(2);
        return (Some(ini), fin);
    }
    match syllable.bytes().next() {
        Some(b) if is_initial_letter(b) => {
            let (ini, fin) = syllable.split_at(1);
            (Some(ini), fin)
        }
        _ => (None, syllable),
    }
}
