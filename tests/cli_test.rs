use clap::Parser;
use recode::cli::Args;
use recode::error::Error;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("recode")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["--src", "src/main.rs", "--label", "MODELS"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.src, Some(PathBuf::from("src/main.rs")));
    assert_eq!(parsed.label, "MODELS");
    assert_eq!(parsed.input, None);
    assert_eq!(parsed.row, "");
    assert_eq!(parsed.col, "");
    assert_eq!(parsed.sep, ",");
    assert_eq!(parsed.formatter, "rustfmt");
    assert!(parsed.formatter_args.is_empty());
    assert!(!parsed.no_format);
    assert!(!parsed.verbose);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--src",
        "lib.rs",
        "--label",
        "L",
        "--input",
        "names.txt",
        "--row",
        "{{ . }},",
        "--col",
        "{{ upper . }}",
        "--sep",
        " | ",
        "--formatter",
        "cat",
        "--no-format",
        "--verbose",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.input, Some(PathBuf::from("names.txt")));
    assert_eq!(parsed.row, "{{ . }},");
    assert_eq!(parsed.col, "{{ upper . }}");
    assert_eq!(parsed.sep, " | ");
    assert_eq!(parsed.formatter, "cat");
    assert!(parsed.no_format);
    assert!(parsed.verbose);
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-s", "a.rs", "-l", "L", "-i", "in.txt", "-v"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.src, Some(PathBuf::from("a.rs")));
    assert_eq!(parsed.label, "L");
    assert_eq!(parsed.input, Some(PathBuf::from("in.txt")));
    assert!(parsed.verbose);
}

#[test]
fn test_missing_label() {
    let args = make_args(&["--src", "a.rs"]);
    let err = Args::try_parse_from(args).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_empty_label() {
    let args = make_args(&["--src", "a.rs", "--label", ""]);
    let err = Args::try_parse_from(args).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn test_default_formatter_edition() {
    let parsed = Args::try_parse_from(make_args(&["-s", "a.rs", "-l", "L"])).unwrap();
    let formatter = parsed.command_formatter();

    assert_eq!(formatter.program(), "rustfmt");
    assert_eq!(formatter.arguments(), ["--edition", "2021"]);
}

#[test]
fn test_formatter_args() {
    let args = make_args(&[
        "-s",
        "a.rs",
        "-l",
        "L",
        "--formatter-arg=--edition",
        "--formatter-arg",
        "2024",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();
    assert_eq!(parsed.formatter_args, ["--edition", "2024"]);

    let formatter = parsed.command_formatter();
    assert_eq!(formatter.program(), "rustfmt");
    assert_eq!(formatter.arguments(), ["--edition", "2024"]);

    let args = make_args(&["-s", "a.rs", "-l", "L", "--formatter", "gofmt", "--formatter-arg", "-w"]);
    let formatter = Args::try_parse_from(args).unwrap().command_formatter();
    assert_eq!(formatter.program(), "gofmt");
    assert_eq!(formatter.arguments(), ["-w"]);
}

#[test]
fn test_source_path() {
    let parsed = Args::try_parse_from(make_args(&["--src", "a.rs", "-l", "L"])).unwrap();
    assert_eq!(parsed.source_path().unwrap(), PathBuf::from("a.rs"));

    let unset = Args { src: None, ..parsed };
    assert!(matches!(unset.source_path(), Err(Error::MissingSourceError)));
}
