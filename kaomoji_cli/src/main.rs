use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use env_logger::Env;
use kaomoji_core::{Canonical, PipelineConfig, encoder::Glosser};
use kaomoji_dict::{Flavor, Pipeline, Source, SourceKind, TableGlosser, write_canonical};
use kaomoji_pinyin::{Scheme, ShuangpinEncoder};
use log::{info, warn};

const DEFAULT_TABULAR: &str = "Temreg_dict_data.txt";
const DEFAULT_PHRASE: &str = "custom_phrase_dict_data.txt";
const DEFAULT_BARE: &str = "A_kaomoji_dict_data.txt";

const LONG_ABOUT: &str = "Build Rime kaomoji dictionaries (pinyin, kmj and shuangpin) from source lists.

Without a flavor flag every dictionary is built. --shuangpin builds the pinyin
dictionary first and encodes it with --scheme. When no source file is given,
the default files under --data-dir are used; missing files are skipped.";

#[derive(Parser, Debug)]
#[command(name = "kaomoji", version, about = "Kaomoji dictionary builder", long_about = LONG_ABOUT)]
struct Cli {
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    output_dir: PathBuf,
    #[arg(long = "data-dir", value_name = "DIR", default_value = "data", long_help = "Directory holding the default source files.")]
    data_dir: PathBuf,
    #[arg(long, action = ArgAction::SetTrue, long_help = "Build pinyin, kmj and every shuangpin scheme.")]
    all: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    pinyin: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    kmj: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    shuangpin: bool,
    #[arg(
        long,
        value_enum,
        ignore_case = true,
        value_name = "ID",
        default_value_t = SchemeArg::Xiaohe,
        long_help = "Shuangpin scheme used with --shuangpin."
    )]
    scheme: SchemeArg,
    #[arg(long, value_name = "FILE", long_help = "Tab-separated source: headword, reading, weight.")]
    tabular: Vec<PathBuf>,
    #[arg(long, value_name = "FILE", long_help = "Phrase source: reading, four spaces, headword.")]
    phrase: Vec<PathBuf>,
    #[arg(long, value_name = "FILE", long_help = "One headword per line; only used for the kmj dictionary.")]
    bare: Vec<PathBuf>,
    #[arg(long = "no-special-space", action = ArgAction::SetTrue, long_help = "Keep U+0020 instead of U+2002 inside headwords and codes.")]
    no_special_space: bool,
    #[arg(long = "no-dedup", action = ArgAction::SetTrue, long_help = "Keep duplicates and production order.")]
    no_dedup: bool,
    #[arg(long, action = ArgAction::SetTrue, long_help = "Append the full pinyin reading to shuangpin lines.")]
    detail: bool,
    #[arg(
        long,
        value_name = "FILE",
        long_help = "Gloss table (pinyin<TAB>hanzi); appends a hanzi column to shuangpin lines."
    )]
    gloss: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum SchemeArg {
    #[default]
    Xiaohe,
    Ziranma,
    Sogou,
    Microsoft,
    Znabc,
}

impl From<SchemeArg> for Scheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Xiaohe => Scheme::Xiaohe,
            SchemeArg::Ziranma => Scheme::Ziranma,
            SchemeArg::Sogou => Scheme::Sogou,
            SchemeArg::Microsoft => Scheme::Microsoft,
            SchemeArg::Znabc => Scheme::Znabc,
        }
    }
}

/// 本次要生成的词典。
struct Plan {
    pinyin: bool,
    kmj: bool,
    schemes: Vec<Scheme>,
}

impl Plan {
    fn from_cli(cli: &Cli) -> Self {
        let all = cli.all || !(cli.pinyin || cli.kmj || cli.shuangpin);
        let schemes = if all {
            Scheme::ALL.to_vec()
        } else if cli.shuangpin {
            vec![Scheme::from(cli.scheme)]
        } else {
            Vec::new()
        };
        Self {
            pinyin: all || cli.pinyin || !schemes.is_empty(),
            kmj: all || cli.kmj,
            schemes,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let plan = Plan::from_cli(&cli);
    let config = PipelineConfig::default()
        .reserved_space(!cli.no_special_space)
        .dedup(!cli.no_dedup)
        .full_reading(cli.detail)
        .gloss(cli.gloss.is_some());

    let sources = load_sources(&cli)?;
    let glosser = cli
        .gloss
        .as_ref()
        .map(|p| TableGlosser::from_path(p).with_context(|| format!("读取释义表 {} 失败", p.display())))
        .transpose()?;

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("无法创建输出目录 {}", cli.output_dir.display()))?;
    let pipeline = Pipeline::new(config);

    if plan.pinyin {
        // 无读音的来源只参与 kmj
        let (with_reading, bare): (Vec<Source>, Vec<Source>) = sources
            .iter()
            .cloned()
            .partition(|s| s.kind().supports(Flavor::Pinyin));
        for s in &bare {
            info!("{} 没有读音，不参与 pinyin/shuangpin", s.name());
        }
        let pinyin = pipeline.pinyin(&with_reading)?;
        emit(&cli.output_dir, Flavor::Pinyin, &pinyin)?;

        for &scheme in &plan.schemes {
            let encoder = ShuangpinEncoder::new(scheme);
            let gloss = glosser.as_ref().map(|g| g as &dyn Glosser);
            let canonical = pipeline.shuangpin(pinyin.lines(), &encoder, gloss);
            emit(&cli.output_dir, Flavor::Shuangpin(scheme), &canonical)?;
        }
    }

    if plan.kmj {
        let kmj = pipeline.kmj(&sources)?;
        emit(&cli.output_dir, Flavor::Kmj, &kmj)?;
    }
    Ok(())
}

fn load_sources(cli: &Cli) -> Result<Vec<Source>> {
    let explicit = !(cli.tabular.is_empty() && cli.phrase.is_empty() && cli.bare.is_empty());
    let files: Vec<(SourceKind, PathBuf)> = if explicit {
        let tabular = cli.tabular.iter().map(|p| (SourceKind::Tabular, p.clone()));
        let phrase = cli.phrase.iter().map(|p| (SourceKind::Phrase, p.clone()));
        let bare = cli.bare.iter().map(|p| (SourceKind::Bare, p.clone()));
        tabular.chain(phrase).chain(bare).collect()
    } else {
        vec![
            (SourceKind::Tabular, cli.data_dir.join(DEFAULT_TABULAR)),
            (SourceKind::Phrase, cli.data_dir.join(DEFAULT_PHRASE)),
            (SourceKind::Bare, cli.data_dir.join(DEFAULT_BARE)),
        ]
    };

    let mut sources = Vec::with_capacity(files.len());
    for (kind, path) in files {
        if !path.exists() {
            warn!("找不到来源文件 {}，跳过", path.display());
            continue;
        }
        let source = Source::from_path(kind, &path)
            .with_context(|| format!("读取来源文件 {} 失败", path.display()))?;
        sources.push(source);
    }
    Ok(sources)
}

fn emit(dir: &Path, flavor: Flavor, canonical: &Canonical) -> Result<()> {
    let path = dir.join(flavor.file_name());
    write_canonical(&path, canonical).with_context(|| format!("写入 {} 失败", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_names_match_library_ids() {
        for arg in SchemeArg::value_variants() {
            let name = arg.to_possible_value().map(|v| v.get_name().to_string());
            let scheme = Scheme::from(*arg);
            assert_eq!(name.as_deref(), Some(scheme.to_string().as_str()));
            assert_eq!(Scheme::from_id(&scheme.to_string()).ok(), Some(scheme));
        }
    }

    #[test]
    fn scheme_flag_is_case_insensitive() {
        let cli = Cli::try_parse_from(["kaomoji", "--shuangpin", "--scheme", "ZNABC"]).unwrap();
        assert_eq!(Plan::from_cli(&cli).schemes, vec![Scheme::Znabc]);
        assert!(Cli::try_parse_from(["kaomoji", "--scheme", "cangjie"]).is_err());
    }
}
