use clap::Parser;
use std::path::{Path, PathBuf};

use crate::args::{CliArgs, Command};

#[test]
fn parses_sandbox_defaults() {
    let args = CliArgs::try_parse_from(["jsbox", "sandbox"]).expect("default args should parse");
    assert!(args.config.is_none());
    let Command::Sandbox(sandbox) = args.command else {
        panic!("expected the sandbox command");
    };
    assert_eq!(sandbox.app_id, None);
    assert_eq!(sandbox.runtime, None);
    assert!(!sandbox.wrap_this);
    assert!(!sandbox.output.pretty);
    assert!(!sandbox.output.keep_lines);
    assert!(sandbox.out_dir.is_none());
    assert!(sandbox.files.is_empty());
}

#[test]
fn parses_sandbox_flags() {
    let args = CliArgs::try_parse_from([
        "jsbox",
        "sandbox",
        "--app-id",
        "42",
        "--runtime",
        "sbx",
        "--wrap-this",
        "--pretty",
        "--keep-lines",
        "--out-dir",
        "dist",
        "a.json",
        "b.json",
    ])
    .expect("flagged args should parse");

    let Command::Sandbox(sandbox) = args.command else {
        panic!("expected the sandbox command");
    };
    assert_eq!(sandbox.app_id.as_deref(), Some("42"));
    assert_eq!(sandbox.runtime.as_deref(), Some("sbx"));
    assert!(sandbox.wrap_this);
    assert!(sandbox.output.pretty);
    assert!(sandbox.output.keep_lines);
    assert_eq!(sandbox.out_dir.as_deref(), Some(Path::new("dist")));
    assert_eq!(
        sandbox.files,
        vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
    );
}

#[test]
fn config_is_accepted_after_the_subcommand() {
    let args = CliArgs::try_parse_from(["jsbox", "exports", "--config", "jsbox.json", "app.json"])
        .expect("global config flag should parse");
    assert_eq!(args.config.as_deref(), Some(Path::new("jsbox.json")));
    let Command::Exports(exports) = args.command else {
        panic!("expected the exports command");
    };
    assert_eq!(exports.file.as_deref(), Some(Path::new("app.json")));
}

#[test]
fn intl_check_defaults_to_tx() {
    let args = CliArgs::try_parse_from(["jsbox", "intl-check"]).expect("intl-check should parse");
    let Command::IntlCheck(intl) = args.command else {
        panic!("expected the intl-check command");
    };
    assert_eq!(intl.function, "tx");
    assert!(intl.files.is_empty());

    let args = CliArgs::try_parse_from(["jsbox", "intl-check", "--function", "t", "-"])
        .expect("intl-check flags should parse");
    let Command::IntlCheck(intl) = args.command else {
        panic!("expected the intl-check command");
    };
    assert_eq!(intl.function, "t");
    assert_eq!(intl.files, vec![PathBuf::from("-")]);
}

#[test]
fn intl_check_takes_several_files() {
    let args = CliArgs::try_parse_from(["jsbox", "intl-check", "a.json", "b.json"])
        .expect("intl-check should parse");
    let Command::IntlCheck(intl) = args.command else {
        panic!("expected the intl-check command");
    };
    assert_eq!(
        intl.files,
        vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
    );
}

#[test]
fn render_takes_one_file() {
    let args = CliArgs::try_parse_from(["jsbox", "render", "--pretty", "tree.json"])
        .expect("render should parse");
    let Command::Render(render) = args.command else {
        panic!("expected the render command");
    };
    assert!(render.output.pretty);
    assert_eq!(render.file.as_deref(), Some(Path::new("tree.json")));

    assert!(CliArgs::try_parse_from(["jsbox", "render", "a.json", "b.json"]).is_err());
}

#[test]
fn rejects_missing_or_unknown_commands() {
    assert!(CliArgs::try_parse_from(["jsbox"]).is_err());
    assert!(CliArgs::try_parse_from(["jsbox", "minify"]).is_err());
    assert!(CliArgs::try_parse_from(["jsbox", "exports", "--pretty"]).is_err());
}
