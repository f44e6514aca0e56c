use std::fs;

use kaomoji_core::PipelineConfig;
use kaomoji_dict::{Flavor, Pipeline, Source, SourceKind, malformed_path, write_canonical};
use kaomoji_pinyin::{Scheme, ShuangpinEncoder};

fn write(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    let p = dir.join(name);
    fs::write(&p, body).unwrap();
    p
}

#[test]
fn builds_all_flavors_from_files() {
    let tmp = tempfile::tempdir().unwrap();
    let temreg = write(
        tmp.path(),
        "Temreg_dict_data.txt",
        "(^_^)\tnihao\t0\n---(T_T)\tku\t0\nmissing weight\n",
    );
    let phrase = write(tmp.path(), "custom_phrase_dict_data.txt", "wan an    (-_-) zzz\n");
    let bare = write(tmp.path(), "A_kaomoji_dict_data.txt", "(=^.^=)\n...(^_^)\n");

    let tabular = Source::from_path(SourceKind::Tabular, &temreg).unwrap();
    let phrase = Source::from_path(SourceKind::Phrase, &phrase).unwrap();
    let bare = Source::from_path(SourceKind::Bare, &bare).unwrap();

    let pipeline = Pipeline::new(PipelineConfig::default());
    let pinyin = pipeline.pinyin(&[tabular.clone(), phrase.clone()]).unwrap();
    let kmj = pipeline.kmj(&[tabular, phrase, bare]).unwrap();
    let encoder = ShuangpinEncoder::new(Scheme::Xiaohe);
    let shuangpin = pipeline.shuangpin(pinyin.lines(), &encoder, None);

    let out = tmp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    for (flavor, canonical) in [
        (Flavor::Pinyin, &pinyin),
        (Flavor::Kmj, &kmj),
        (Flavor::Shuangpin(Scheme::Xiaohe), &shuangpin),
    ] {
        write_canonical(&out.join(flavor.file_name()), canonical).unwrap();
    }

    let pinyin_txt = fs::read_to_string(out.join("all_output_result_pinyin.txt")).unwrap();
    assert_eq!(
        pinyin_txt,
        "(T_T)\tku\t0\n(^_^)\tnihao\t0\n(-_-)\u{2002}zzz\twan an\t1\n"
    );

    let sp = out.join("all_output_result_shuangpin_xiaohe.txt");
    assert_eq!(
        fs::read_to_string(&sp).unwrap(),
        "(T_T)\tku\t0\n(^_^)\tnihc\t0\n(-_-)\u{2002}zzz\twj\u{2002}an\t1\n"
    );
    assert_eq!(
        fs::read_to_string(malformed_path(&sp)).unwrap(),
        "missing weight\n"
    );

    let kmj_txt = fs::read_to_string(out.join("all_output_result_kmj.txt")).unwrap();
    assert_eq!(
        kmj_txt,
        "(-_-)\u{2002}zzz\tkmj\t1\n(=^.^=)\tkmj\t0\n(T_T)\tkmj\t0\n(^_^)\tkmj\t0\n"
    );
    assert!(malformed_path(&out.join("all_output_result_kmj.txt")).exists());
}

#[test]
fn stale_malformed_file_is_removed() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("all_output_result_pinyin.txt");
    let bad = malformed_path(&target);
    fs::write(&bad, "old\n").unwrap();

    let pipeline = Pipeline::new(PipelineConfig::default());
    let src = Source::new("t", SourceKind::Tabular, "(^_^)\tnihao\t1\n");
    let canonical = pipeline.pinyin(&[src]).unwrap();
    write_canonical(&target, &canonical).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "(^_^)\tnihao\t1\n");
    assert!(!bad.exists());
}

#[test]
fn output_is_deterministic_across_runs() {
    let sources = || {
        vec![
            Source::new("a", SourceKind::Tabular, "b\tzhongguo\t0\na\tZhongguo\t0\nc\tai\t1\n"),
            Source::new("b", SourceKind::Phrase, "ai    c\nzhongguo    b\n"),
        ]
    };
    let pipeline = Pipeline::new(PipelineConfig::default());
    let first = pipeline.pinyin(&sources()).unwrap();
    let second = pipeline.pinyin(&sources().into_iter().rev().collect::<Vec<_>>()).unwrap();
    assert_eq!(first.accepted, second.accepted);
}
